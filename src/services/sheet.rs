//! Expense sheet
//!
//! The in-progress expense list of an unsaved barbacoa. It is an ordinary
//! owned value: the caller edits it and hands `snapshot()` to the settlement
//! engine when it is time to settle.

use crate::error::{BarbacoaError, BarbacoaResult};
use crate::models::{distinct_payers, Expense, Money, Participant};

/// Ordered list of expenses being captured, plus the roster they are drawn from
#[derive(Debug, Clone, Default)]
pub struct ExpenseSheet {
    expenses: Vec<Expense>,
    roster: Vec<String>,
}

impl ExpenseSheet {
    /// Empty sheet with no roster
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty sheet for the given roster of participant names
    pub fn with_roster<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            expenses: Vec::new(),
            roster: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Sheet pre-filled with already typed expenses; each one is validated
    pub fn from_expenses(expenses: Vec<Expense>) -> BarbacoaResult<Self> {
        let mut sheet = Self::new();
        for expense in expenses {
            sheet.push(expense)?;
        }
        Ok(sheet)
    }

    /// Record an expense from raw user input
    ///
    /// An empty amount counts as zero. The payer is required.
    pub fn add(&mut self, payer: &str, concept: &str, raw_amount: &str) -> BarbacoaResult<&Expense> {
        let payer = payer.trim();
        if payer.is_empty() {
            return Err(BarbacoaError::MissingParticipant);
        }

        let amount = parse_amount(raw_amount)?;
        self.push(Expense::new(payer, concept.trim(), amount))?;

        let index = self.expenses.len() - 1;
        Ok(&self.expenses[index])
    }

    /// Record an already typed expense
    pub fn push(&mut self, expense: Expense) -> BarbacoaResult<()> {
        expense.validate()?;
        self.expenses.push(expense);
        Ok(())
    }

    /// Record an expense written as `PAYER:AMOUNT[:CONCEPT]`
    pub fn add_entry(&mut self, entry: &str) -> BarbacoaResult<&Expense> {
        let mut parts = entry.splitn(3, ':');
        let payer = parts.next().unwrap_or_default();
        let amount = parts.next().unwrap_or_default();
        let concept = parts.next().unwrap_or_default();
        self.add(payer, concept, amount)
    }

    /// Remove the expense at `index`, returning it
    pub fn remove(&mut self, index: usize) -> BarbacoaResult<Expense> {
        if index >= self.expenses.len() {
            return Err(BarbacoaError::Validation(format!(
                "No expense at position {} (sheet has {})",
                index,
                self.expenses.len()
            )));
        }
        Ok(self.expenses.remove(index))
    }

    pub fn clear(&mut self) {
        self.expenses.clear();
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Owned copy of the expense list to hand to the engine
    pub fn snapshot(&self) -> Vec<Expense> {
        self.expenses.clone()
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn total(&self) -> Money {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Distinct payers so far, in order of first appearance
    pub fn payers(&self) -> Vec<String> {
        distinct_payers(&self.expenses)
    }

    /// Roster participants who have not recorded an expense yet
    pub fn remaining_participants(&self) -> Vec<&str> {
        self.roster
            .iter()
            .filter(|name| !self.expenses.iter().any(|e| same_name(&e.payer, name)))
            .map(String::as_str)
            .collect()
    }
}

fn same_name(a: &str, b: &str) -> bool {
    Participant::normalize_name(a) == Participant::normalize_name(b)
}

/// Parse a user-typed amount; blank means zero, negatives are rejected
pub fn parse_amount(raw: &str) -> BarbacoaResult<Money> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Money::zero());
    }

    let amount = Money::parse(raw).map_err(|e| BarbacoaError::InvalidAmount(e.to_string()))?;
    if amount.is_negative() {
        return Err(BarbacoaError::InvalidAmount(format!(
            "'{}' is negative",
            raw
        )));
    }
    Ok(amount)
}
