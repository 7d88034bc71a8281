//! Configuration module for barbacoa
//!
//! - Path resolution for settings, data files and the audit log
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::BarbacoaPaths;
pub use settings::{ServerSettings, Settings};
