//! Path management for barbacoa
//!
//! ## Path Resolution Order
//!
//! 1. `BARBACOA_DATA_DIR` environment variable (if set)
//! 2. The platform config directory joined with `barbacoa`
//!    (`~/.config/barbacoa` on Linux, `%APPDATA%\barbacoa` on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::BarbacoaError;

/// Manages all paths used by barbacoa
#[derive(Debug, Clone)]
pub struct BarbacoaPaths {
    /// Base directory for all barbacoa data
    base_dir: PathBuf,
}

impl BarbacoaPaths {
    /// Create a new BarbacoaPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and no
    /// override is set.
    pub fn new() -> Result<Self, BarbacoaError> {
        let base_dir = if let Ok(custom) = std::env::var("BARBACOA_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create BarbacoaPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to barbacoas.json (settled events)
    pub fn barbacoas_file(&self) -> PathBuf {
        self.data_dir().join("barbacoas.json")
    }

    /// Get the path to cuadrilla.json (participant roster)
    pub fn roster_file(&self) -> PathBuf {
        self.data_dir().join("cuadrilla.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), BarbacoaError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BarbacoaError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| BarbacoaError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if barbacoa has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, BarbacoaError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| BarbacoaError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("barbacoa"))
}
