//! Barbacoa model
//!
//! A settled event: the expense list, the transfers that settle it and the
//! summary totals, snapshotted when the event is saved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::expense::{distinct_payers, Expense, ExpenseRecord};
use super::ids::BarbacoaId;
use super::money::Money;
use super::transfer::{Transfer, TransferRecord};
use crate::error::BarbacoaError;

/// A settled group-expense event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barbacoa {
    /// Unique identifier
    #[serde(default)]
    pub id: BarbacoaId,

    /// When the event was settled
    pub date: DateTime<Utc>,

    /// Unique, user-chosen name
    pub name: String,

    /// Expenses as recorded
    pub expenses: Vec<Expense>,

    /// Settlement transfers, in the order they were generated
    pub transfers: Vec<Transfer>,

    /// Sum of all expenses
    pub total_amount: Money,

    /// Total divided by the number of paying participants
    pub average_share: Money,

    /// Distinct payers, in order of first appearance
    pub participants: Vec<String>,
}

impl Barbacoa {
    /// Create a new event dated now
    pub fn new(name: impl Into<String>, expenses: Vec<Expense>, transfers: Vec<Transfer>) -> Self {
        Self::with_date(name, Utc::now(), expenses, transfers)
    }

    /// Create an event with an explicit date; summary totals are derived from
    /// the expenses
    pub fn with_date(
        name: impl Into<String>,
        date: DateTime<Utc>,
        expenses: Vec<Expense>,
        transfers: Vec<Transfer>,
    ) -> Self {
        let participants = distinct_payers(&expenses);
        let total_amount: Money = expenses.iter().map(|e| e.amount).sum();
        let average_share = total_amount.div_round(participants.len());

        Self {
            id: BarbacoaId::new(),
            date,
            name: name.into(),
            expenses,
            transfers,
            total_amount,
            average_share,
            participants,
        }
    }

    /// Normalize an event name for uniqueness checks
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Check if this event has the given name (case-insensitive)
    pub fn matches_name(&self, name: &str) -> bool {
        Self::normalize_name(&self.name) == Self::normalize_name(name)
    }

    /// Whether the event needed no transfers
    pub fn is_settled_without_transfers(&self) -> bool {
        self.transfers.is_empty()
    }

    /// Validate the event
    pub fn validate(&self) -> Result<(), BarbacoaValidationError> {
        if self.name.trim().is_empty() {
            return Err(BarbacoaValidationError::EmptyName);
        }

        let name_chars = self.name.chars().count();
        if name_chars > 100 {
            return Err(BarbacoaValidationError::NameTooLong(name_chars));
        }

        if self.expenses.is_empty() {
            return Err(BarbacoaValidationError::NoExpenses);
        }

        Ok(())
    }
}

impl fmt::Display for Barbacoa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.date.format("%Y-%m-%d"))
    }
}

/// Validation errors for barbacoas
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BarbacoaValidationError {
    EmptyName,
    NameTooLong(usize),
    NoExpenses,
}

impl fmt::Display for BarbacoaValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Barbacoa name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Barbacoa name too long ({} chars, max 100)", len)
            }
            Self::NoExpenses => write!(f, "Barbacoa has no expenses"),
        }
    }
}

impl std::error::Error for BarbacoaValidationError {}

/// Settled event as it travels over the wire, amounts as decimals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarbacoaRecord {
    /// Defaults to the time the record is accepted
    #[serde(default, alias = "fecha")]
    pub date: Option<DateTime<Utc>>,

    pub name: String,

    #[serde(default, alias = "ajustes")]
    pub transfers: Vec<TransferRecord>,

    #[serde(alias = "gastos")]
    pub expenses: Vec<ExpenseRecord>,

    #[serde(default)]
    pub total_amount: f64,

    #[serde(default)]
    pub average_share: f64,

    #[serde(default)]
    pub participants: Vec<String>,
}

impl From<&Barbacoa> for BarbacoaRecord {
    fn from(barbacoa: &Barbacoa) -> Self {
        Self {
            date: Some(barbacoa.date),
            name: barbacoa.name.clone(),
            transfers: barbacoa.transfers.iter().map(TransferRecord::from).collect(),
            expenses: barbacoa.expenses.iter().map(ExpenseRecord::from).collect(),
            total_amount: barbacoa.total_amount.to_decimal(),
            average_share: barbacoa.average_share.to_decimal(),
            participants: barbacoa.participants.clone(),
        }
    }
}

/// Converts a wire record into a typed event. Summary totals are recomputed
/// from the expenses; the ones sent by the client are ignored.
impl TryFrom<BarbacoaRecord> for Barbacoa {
    type Error = BarbacoaError;

    fn try_from(record: BarbacoaRecord) -> Result<Self, Self::Error> {
        let expenses = record
            .expenses
            .into_iter()
            .map(Expense::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let transfers = record
            .transfers
            .into_iter()
            .map(Transfer::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let barbacoa = Barbacoa::with_date(
            record.name.trim(),
            record.date.unwrap_or_else(Utc::now),
            expenses,
            transfers,
        );
        barbacoa
            .validate()
            .map_err(|e| BarbacoaError::Validation(e.to_string()))?;

        Ok(barbacoa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Barbacoa {
        Barbacoa::new(
            "San Juan",
            vec![
                Expense::new("A", "Carne", Money::from_cents(9000)),
                Expense::new("B", "Pan", Money::from_cents(3000)),
                Expense::new("C", "", Money::zero()),
            ],
            vec![
                Transfer::new("B", "A", Money::from_cents(1000)),
                Transfer::new("C", "A", Money::from_cents(4000)),
            ],
        )
    }

    #[test]
    fn test_summary_totals() {
        let bbq = sample();
        assert_eq!(bbq.total_amount, Money::from_cents(12000));
        assert_eq!(bbq.average_share, Money::from_cents(4000));
        assert_eq!(bbq.participants, vec!["A", "B", "C"]);
        assert!(!bbq.is_settled_without_transfers());
    }

    #[test]
    fn test_name_matching() {
        let bbq = sample();
        assert!(bbq.matches_name("san juan"));
        assert!(bbq.matches_name("  SAN JUAN "));
        assert!(!bbq.matches_name("Nochevieja"));
    }

    #[test]
    fn test_validation() {
        let mut bbq = sample();
        assert!(bbq.validate().is_ok());

        bbq.name = " ".into();
        assert_eq!(bbq.validate(), Err(BarbacoaValidationError::EmptyName));

        let empty = Barbacoa::new("Vacía", vec![], vec![]);
        assert_eq!(empty.validate(), Err(BarbacoaValidationError::NoExpenses));
    }

    #[test]
    fn test_name_length_counts_characters() {
        let mut bbq = sample();
        bbq.name = "ñ".repeat(100);
        assert!(bbq.validate().is_ok());

        bbq.name = "ñ".repeat(101);
        assert_eq!(
            bbq.validate(),
            Err(BarbacoaValidationError::NameTooLong(101))
        );
    }

    #[test]
    fn test_record_conversion_recomputes_totals() {
        let mut record = BarbacoaRecord::from(&sample());
        record.total_amount = 1.0;
        record.average_share = 1.0;

        let bbq = Barbacoa::try_from(record).unwrap();
        assert_eq!(bbq.total_amount, Money::from_cents(12000));
        assert_eq!(bbq.average_share, Money::from_cents(4000));
        assert_eq!(bbq.transfers.len(), 2);
    }

    #[test]
    fn test_record_without_date_gets_one() {
        let record: BarbacoaRecord = serde_json::from_str(
            r#"{"name": "Playa", "expenses": [{"payer": "A", "amount": 10}]}"#,
        )
        .unwrap();
        assert!(record.date.is_none());

        let bbq = Barbacoa::try_from(record).unwrap();
        assert_eq!(bbq.name, "Playa");
        assert!(bbq.transfers.is_empty());
    }

    #[test]
    fn test_serialization() {
        let bbq = sample();
        let json = serde_json::to_string(&bbq).unwrap();
        let deserialized: Barbacoa = serde_json::from_str(&json).unwrap();
        assert_eq!(bbq, deserialized);
    }
}
