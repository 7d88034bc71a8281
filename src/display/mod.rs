//! Display formatting for terminal output
//!
//! Plain strings; the CLI decides where they are printed.

pub mod barbacoa;
pub mod roster;
pub mod settlement;

pub use barbacoa::{format_barbacoa_details, format_barbacoa_list};
pub use roster::format_roster;
pub use settlement::{format_balances, format_expenses, format_settlement, format_transfers};

use crate::audit::AuditEntry;

/// Audit entries, newest last
pub fn format_audit_entries(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No audit entries.".to_string();
    }

    entries
        .iter()
        .map(AuditEntry::format_human_readable)
        .collect::<Vec<_>>()
        .join("\n")
}
