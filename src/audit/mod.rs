//! Audit logging
//!
//! Every change to persisted state (an event saved or deleted, a roster
//! participant added, updated or removed) is appended to `audit.log` as one
//! JSON line with the entity's state before and after the change.
//!
//! ```rust,ignore
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(
//!     EntityType::Barbacoa,
//!     barbacoa.id.to_string(),
//!     Some(barbacoa.name.clone()),
//!     &barbacoa,
//! ))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
