//! barbacoa - split shared group expenses and settle them
//!
//! Everyone who paid something at a barbacoa owes an equal share of the total.
//! The settlement engine turns the expense list into the transfers that leave
//! every participant even, settling declared partners with each other first.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Money, expenses, transfers, participants and settled events
//! - `storage`: JSON file storage layer
//! - `audit`: Audit logging system
//! - `services`: Settlement engine and business logic
//! - `display`: Terminal formatting
//! - `export`: JSON, YAML and CSV export of a settled event
//! - `api`: HTTP server and the blocking client for it
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust
//! use barbacoa_cli::models::{Expense, Money, PartnerMap};
//! use barbacoa_cli::services::settle;
//!
//! let expenses = vec![
//!     Expense::new("Ana", "Carne", Money::from_cents(4000)),
//!     Expense::new("Bea", "Pan", Money::from_cents(2000)),
//!     Expense::new("Carlos", "", Money::zero()),
//! ];
//! let transfers = settle(&expenses, &PartnerMap::new());
//!
//! assert_eq!(transfers.len(), 1);
//! assert_eq!(transfers[0].debtor, "Carlos");
//! assert_eq!(transfers[0].amount, Money::from_cents(2000));
//! ```

pub mod api;
pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{BarbacoaError, BarbacoaResult};
