//! Saved-event CLI commands: list, show and delete

use crate::config::Settings;
use crate::display::{format_barbacoa_details, format_barbacoa_list};
use crate::error::{BarbacoaError, BarbacoaResult};
use crate::services::SettlementBackend;

/// Handle `barbacoa list`
pub fn handle_list_command(backend: &dyn SettlementBackend, settings: &Settings) -> BarbacoaResult<()> {
    let barbacoas = backend.list()?;
    print!(
        "{}",
        format_barbacoa_list(&barbacoas, &settings.currency_symbol, &settings.date_format)
    );

    if !barbacoas.is_empty() {
        println!("\nTotal: {} barbacoas", barbacoas.len());
    } else {
        println!();
    }
    Ok(())
}

/// Handle `barbacoa show NAME`
pub fn handle_show_command(
    backend: &dyn SettlementBackend,
    settings: &Settings,
    name: &str,
) -> BarbacoaResult<()> {
    let barbacoa = backend
        .find(name)?
        .ok_or_else(|| BarbacoaError::barbacoa_not_found(name))?;

    print!(
        "{}",
        format_barbacoa_details(&barbacoa, &settings.currency_symbol, &settings.date_format)
    );
    Ok(())
}

/// Handle `barbacoa delete NAME [--force]`
pub fn handle_delete_command(
    backend: &dyn SettlementBackend,
    name: &str,
    force: bool,
) -> BarbacoaResult<()> {
    let barbacoa = backend
        .find(name)?
        .ok_or_else(|| BarbacoaError::barbacoa_not_found(name))?;

    if !force {
        println!("About to delete barbacoa: {}", barbacoa);
        println!("Use --force to confirm deletion");
        return Ok(());
    }

    let deleted = backend.delete(&barbacoa.name)?;
    println!("Deleted barbacoa: {}", deleted.name);
    Ok(())
}
