//! Expense model
//!
//! One payment a participant advanced for the group. `ExpenseRecord` is the
//! loose boundary shape (decimal amount, Spanish field names
//! accepted); it becomes a typed `Expense` only after validation.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use crate::error::BarbacoaError;

/// A recorded payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Who paid
    pub payer: String,

    /// Free-text label, may be empty
    #[serde(default)]
    pub concept: String,

    /// Amount advanced for the group
    pub amount: Money,
}

impl Expense {
    /// Create a new expense
    pub fn new(payer: impl Into<String>, concept: impl Into<String>, amount: Money) -> Self {
        Self {
            payer: payer.into(),
            concept: concept.into(),
            amount,
        }
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.payer.trim().is_empty() {
            return Err(ExpenseValidationError::MissingPayer);
        }

        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount(self.amount));
        }

        if !self.amount.is_within_limit() {
            return Err(ExpenseValidationError::AmountTooLarge(self.amount));
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.concept.is_empty() {
            write!(f, "{}: {}", self.payer, self.amount)
        } else {
            write!(f, "{} ({}): {}", self.payer, self.concept, self.amount)
        }
    }
}

/// Distinct payers in order of first appearance
pub fn distinct_payers(expenses: &[Expense]) -> Vec<String> {
    let mut payers: Vec<String> = Vec::new();
    for expense in expenses {
        if !payers.iter().any(|p| p == &expense.payer) {
            payers.push(expense.payer.clone());
        }
    }
    payers
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    MissingPayer,
    NegativeAmount(Money),
    AmountTooLarge(Money),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPayer => write!(f, "Expense has no payer"),
            Self::NegativeAmount(amount) => write!(f, "Amount cannot be negative: {}", amount),
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount exceeds {}: {}", Money::MAX_AMOUNT, amount)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

impl From<ExpenseValidationError> for BarbacoaError {
    fn from(err: ExpenseValidationError) -> Self {
        match err {
            ExpenseValidationError::MissingPayer => BarbacoaError::MissingParticipant,
            ExpenseValidationError::NegativeAmount(_) | ExpenseValidationError::AmountTooLarge(_) => {
                BarbacoaError::InvalidAmount(err.to_string())
            }
        }
    }
}

/// Expense as it arrives over the wire or from an import file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    #[serde(alias = "persona")]
    pub payer: String,

    #[serde(default, alias = "concepto")]
    pub concept: String,

    #[serde(alias = "importe")]
    pub amount: f64,
}

impl From<&Expense> for ExpenseRecord {
    fn from(expense: &Expense) -> Self {
        Self {
            payer: expense.payer.clone(),
            concept: expense.concept.clone(),
            amount: expense.amount.to_decimal(),
        }
    }
}

impl TryFrom<ExpenseRecord> for Expense {
    type Error = BarbacoaError;

    fn try_from(record: ExpenseRecord) -> Result<Self, Self::Error> {
        let amount = Money::from_decimal(record.amount)
            .map_err(|e| BarbacoaError::InvalidAmount(e.to_string()))?;

        let expense = Expense::new(record.payer.trim(), record.concept.trim(), amount);
        expense.validate()?;
        Ok(expense)
    }
}
