//! Audit log CLI command

use crate::display::format_audit_entries;
use crate::error::BarbacoaResult;
use crate::storage::Storage;

/// Handle `barbacoa audit [--limit N]`
pub fn handle_audit_command(storage: &Storage, limit: usize) -> BarbacoaResult<()> {
    let entries = storage.audit().read_recent(limit)?;
    println!("{}", format_audit_entries(&entries));

    let total = storage.audit().entry_count()?;
    if total > entries.len() {
        println!("\nShowing {} of {} entries", entries.len(), total);
    }
    Ok(())
}
