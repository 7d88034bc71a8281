//! Storage initialization
//!
//! First-run setup: directories plus empty data files

use crate::config::BarbacoaPaths;
use crate::error::BarbacoaError;

use super::barbacoas::BarbacoaData;
use super::file_io::write_json_atomic;
use super::roster::RosterData;

/// Initialize storage for a fresh installation
///
/// Existing data files are left untouched.
pub fn initialize_storage(paths: &BarbacoaPaths) -> Result<(), BarbacoaError> {
    paths.ensure_directories()?;

    if !paths.roster_file().exists() {
        write_json_atomic(paths.roster_file(), &RosterData::default())?;
    }

    if !paths.barbacoas_file().exists() {
        write_json_atomic(paths.barbacoas_file(), &BarbacoaData::default())?;
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &BarbacoaPaths) -> bool {
    !paths.settings_file().exists() || !paths.roster_file().exists()
}
