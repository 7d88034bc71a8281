//! User settings for barbacoa
//!
//! Manages user preferences: display formats, whether declared partners are
//! settled first, and where the HTTP backend listens or can be reached.

use serde::{Deserialize, Serialize};

use super::paths::BarbacoaPaths;
use crate::error::BarbacoaError;

/// Where `barbacoa serve` binds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// User settings for barbacoa
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol shown after amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for event dates (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Settle debts between declared partners before anything else
    #[serde(default = "default_partner_priority")]
    pub partner_priority: bool,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSettings,

    /// Backend used by `--remote` when no URL is given explicitly
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "€".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}

fn default_partner_priority() -> bool {
    true
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_backend_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            partner_priority: default_partner_priority(),
            server: ServerSettings::default(),
            backend_url: default_backend_url(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &BarbacoaPaths) -> Result<Self, BarbacoaError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                BarbacoaError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BarbacoaError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BarbacoaPaths) -> Result<(), BarbacoaError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            BarbacoaError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            BarbacoaError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
