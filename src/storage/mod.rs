//! Storage layer for barbacoa
//!
//! JSON files with atomic writes, one repository per file, and the audit log
//! that records every change made through them.

pub mod barbacoas;
pub mod file_io;
pub mod init;
pub mod roster;

pub use barbacoas::BarbacoaRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use roster::RosterRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::BarbacoaPaths;
use crate::error::BarbacoaError;

/// Storage coordinator: repositories plus the audit log
pub struct Storage {
    paths: BarbacoaPaths,
    pub barbacoas: BarbacoaRepository,
    pub roster: RosterRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: BarbacoaPaths) -> Result<Self, BarbacoaError> {
        paths.ensure_directories()?;

        Ok(Self {
            barbacoas: BarbacoaRepository::new(paths.barbacoas_file()),
            roster: RosterRepository::new(paths.roster_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &BarbacoaPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), BarbacoaError> {
        self.barbacoas.load()?;
        self.roster.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), BarbacoaError> {
        self.barbacoas.save()?;
        self.roster.save()?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), BarbacoaError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Result<(), BarbacoaError> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), BarbacoaError> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}
