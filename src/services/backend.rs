//! Settlement backend seam
//!
//! The CLI talks to a `SettlementBackend`: either the local engine and store
//! (`LocalBackend`) or a barbacoa server over HTTP (`api::RemoteClient`).

use crate::error::BarbacoaResult;
use crate::models::{Barbacoa, Expense, PartnerMap, Transfer};
use crate::storage::Storage;

use super::barbacoa::BarbacoaService;
use super::settlement::SettlementEngine;

/// Settlement and event-store operations, wherever they run
pub trait SettlementBackend {
    /// Transfers that settle `expenses`
    fn settle(&self, expenses: &[Expense], partners: &PartnerMap) -> BarbacoaResult<Vec<Transfer>>;

    /// Store a settled event; fails with `DuplicateEventName` if the name is taken
    fn save(&self, barbacoa: &Barbacoa) -> BarbacoaResult<()>;

    fn list(&self) -> BarbacoaResult<Vec<Barbacoa>>;

    fn find(&self, name: &str) -> BarbacoaResult<Option<Barbacoa>>;

    /// Delete an event by name, returning it
    fn delete(&self, name: &str) -> BarbacoaResult<Barbacoa>;
}

/// In-process backend over local storage
pub struct LocalBackend<'a> {
    storage: &'a Storage,
}

impl<'a> LocalBackend<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }
}

impl SettlementBackend for LocalBackend<'_> {
    fn settle(&self, expenses: &[Expense], partners: &PartnerMap) -> BarbacoaResult<Vec<Transfer>> {
        for expense in expenses {
            expense.validate()?;
        }
        Ok(SettlementEngine::with_partners(partners.clone()).settle(expenses))
    }

    fn save(&self, barbacoa: &Barbacoa) -> BarbacoaResult<()> {
        BarbacoaService::new(self.storage).save(barbacoa.clone())?;
        Ok(())
    }

    fn list(&self) -> BarbacoaResult<Vec<Barbacoa>> {
        BarbacoaService::new(self.storage).list()
    }

    fn find(&self, name: &str) -> BarbacoaResult<Option<Barbacoa>> {
        BarbacoaService::new(self.storage).find(name)
    }

    fn delete(&self, name: &str) -> BarbacoaResult<Barbacoa> {
        BarbacoaService::new(self.storage).delete(name)
    }
}
