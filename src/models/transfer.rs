//! Transfer ("ajuste") model
//!
//! A single settlement payment from a debtor to a creditor.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use crate::error::BarbacoaError;

/// One settlement payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub debtor: String,
    pub creditor: String,
    pub amount: Money,
}

impl Transfer {
    pub fn new(debtor: impl Into<String>, creditor: impl Into<String>, amount: Money) -> Self {
        Self {
            debtor: debtor.into(),
            creditor: creditor.into(),
            amount,
        }
    }
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.debtor, self.creditor, self.amount)
    }
}

/// Transfer as it travels over the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRecord {
    #[serde(alias = "deudor")]
    pub debtor: String,

    #[serde(alias = "acreedor")]
    pub creditor: String,

    #[serde(alias = "pago")]
    pub amount: f64,
}

impl From<&Transfer> for TransferRecord {
    fn from(transfer: &Transfer) -> Self {
        Self {
            debtor: transfer.debtor.clone(),
            creditor: transfer.creditor.clone(),
            amount: transfer.amount.to_decimal(),
        }
    }
}

impl TryFrom<TransferRecord> for Transfer {
    type Error = BarbacoaError;

    fn try_from(record: TransferRecord) -> Result<Self, Self::Error> {
        let amount = Money::from_decimal(record.amount)
            .map_err(|e| BarbacoaError::InvalidAmount(e.to_string()))?;

        if !amount.is_positive() {
            return Err(BarbacoaError::InvalidAmount(format!(
                "Transfer amount must be positive, got {}",
                record.amount
            )));
        }
        if record.debtor.trim().is_empty() || record.creditor.trim().is_empty() {
            return Err(BarbacoaError::MissingParticipant);
        }
        if record.debtor == record.creditor {
            return Err(BarbacoaError::Validation(format!(
                "{} cannot pay themselves",
                record.debtor
            )));
        }

        Ok(Transfer::new(record.debtor, record.creditor, amount))
    }
}
