//! Core data models for barbacoa
//!
//! Expenses, settlement transfers, the participant roster and settled events.

pub mod barbacoa;
pub mod expense;
pub mod ids;
pub mod money;
pub mod participant;
pub mod transfer;

pub use barbacoa::{Barbacoa, BarbacoaRecord, BarbacoaValidationError};
pub use expense::{distinct_payers, Expense, ExpenseRecord, ExpenseValidationError};
pub use ids::{BarbacoaId, ParticipantId};
pub use money::{Money, MoneyParseError};
pub use participant::{Participant, ParticipantValidationError, PartnerMap};
pub use transfer::{Transfer, TransferRecord};
