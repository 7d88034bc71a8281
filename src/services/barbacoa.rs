//! Barbacoa service
//!
//! Settles an expense list into a full event record and manages the store of
//! settled events.

use tracing::info;

use crate::audit::EntityType;
use crate::error::{BarbacoaError, BarbacoaResult};
use crate::models::{Barbacoa, Expense, PartnerMap};
use crate::storage::Storage;

use super::settlement::SettlementEngine;

/// Build an event record for `expenses`, settled with `partners`
///
/// Nothing is persisted.
pub fn record(
    name: &str,
    expenses: Vec<Expense>,
    partners: &PartnerMap,
) -> BarbacoaResult<Barbacoa> {
    for expense in &expenses {
        expense.validate()?;
    }

    let transfers = SettlementEngine::with_partners(partners.clone()).settle(&expenses);
    let barbacoa = Barbacoa::new(name.trim(), expenses, transfers);
    barbacoa
        .validate()
        .map_err(|e| BarbacoaError::Validation(e.to_string()))?;

    Ok(barbacoa)
}

/// Service for settled events
pub struct BarbacoaService<'a> {
    storage: &'a Storage,
}

impl<'a> BarbacoaService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Store an event; names must be unique
    pub fn save(&self, barbacoa: Barbacoa) -> BarbacoaResult<Barbacoa> {
        barbacoa
            .validate()
            .map_err(|e| BarbacoaError::Validation(e.to_string()))?;

        self.storage.barbacoas.insert(barbacoa.clone())?;
        self.storage.log_create(
            EntityType::Barbacoa,
            barbacoa.id.to_string(),
            Some(barbacoa.name.clone()),
            &barbacoa,
        )?;

        info!(name = %barbacoa.name, transfers = barbacoa.transfers.len(), "saved barbacoa");
        Ok(barbacoa)
    }

    /// Settle and store in one step
    pub fn record_and_save(
        &self,
        name: &str,
        expenses: Vec<Expense>,
        partners: &PartnerMap,
    ) -> BarbacoaResult<Barbacoa> {
        self.save(record(name, expenses, partners)?)
    }

    /// All events in the order they were saved
    pub fn list(&self) -> BarbacoaResult<Vec<Barbacoa>> {
        self.storage.barbacoas.get_all()
    }

    /// Find an event by name or ID
    pub fn find(&self, identifier: &str) -> BarbacoaResult<Option<Barbacoa>> {
        if let Some(barbacoa) = self.storage.barbacoas.get_by_name(identifier)? {
            return Ok(Some(barbacoa));
        }

        match identifier.trim().parse() {
            Ok(id) => self.storage.barbacoas.get(id),
            Err(_) => Ok(None),
        }
    }

    /// Delete an event by name, returning it
    pub fn delete(&self, name: &str) -> BarbacoaResult<Barbacoa> {
        let barbacoa = self
            .storage
            .barbacoas
            .delete_by_name(name)?
            .ok_or_else(|| BarbacoaError::barbacoa_not_found(name.trim()))?;

        self.storage.log_delete(
            EntityType::Barbacoa,
            barbacoa.id.to_string(),
            Some(barbacoa.name.clone()),
            &barbacoa,
        )?;

        info!(name = %barbacoa.name, "deleted barbacoa");
        Ok(barbacoa)
    }

    pub fn count(&self) -> BarbacoaResult<usize> {
        self.storage.barbacoas.count()
    }
}
