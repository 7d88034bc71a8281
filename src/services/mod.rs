//! Service layer for barbacoa
//!
//! Business logic on top of the storage layer: the settlement engine, the
//! expense sheet being edited, file import, the roster and the event store.

pub mod backend;
pub mod barbacoa;
pub mod import;
pub mod roster;
pub mod settlement;
pub mod sheet;

pub use backend::{LocalBackend, SettlementBackend};
pub use barbacoa::{record, BarbacoaService};
pub use import::{load_expenses, ImportFormat};
pub use roster::RosterService;
pub use settlement::{settle, Balance, Settlement, SettlementEngine};
pub use sheet::{parse_amount, ExpenseSheet};
