//! Barbacoa repository for JSON storage
//!
//! Settled events live in barbacoas.json in the order they were saved. Event
//! names are unique, compared trimmed and case-insensitively.
//!
//! Mutations write the file while still holding the write lock, and are
//! undone in memory when the write fails.

use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use crate::error::BarbacoaError;
use crate::models::{Barbacoa, BarbacoaId};

use super::file_io::{read_json, write_json_atomic};

/// On-disk layout of barbacoas.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct BarbacoaData {
    pub barbacoas: Vec<Barbacoa>,
}

#[derive(Serialize)]
struct BarbacoaDataRef<'a> {
    barbacoas: &'a [Barbacoa],
}

/// Repository for settled events
pub struct BarbacoaRepository {
    path: PathBuf,
    data: RwLock<Vec<Barbacoa>>,
}

impl BarbacoaRepository {
    /// Create a new barbacoa repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Barbacoa>>, BarbacoaError> {
        self.data
            .read()
            .map_err(|e| BarbacoaError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Barbacoa>>, BarbacoaError> {
        self.data
            .write()
            .map_err(|e| BarbacoaError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load events from disk
    pub fn load(&self) -> Result<(), BarbacoaError> {
        let file_data: BarbacoaData = read_json(&self.path)?;
        *self.write()? = file_data.barbacoas;
        Ok(())
    }

    fn persist(&self, barbacoas: &[Barbacoa]) -> Result<(), BarbacoaError> {
        write_json_atomic(&self.path, &BarbacoaDataRef { barbacoas })
    }

    /// Save events to disk
    pub fn save(&self) -> Result<(), BarbacoaError> {
        let data = self.write()?;
        self.persist(&data)
    }

    /// Get an event by ID
    pub fn get(&self, id: BarbacoaId) -> Result<Option<Barbacoa>, BarbacoaError> {
        Ok(self.read()?.iter().find(|b| b.id == id).cloned())
    }

    /// Get an event by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Barbacoa>, BarbacoaError> {
        Ok(self.read()?.iter().find(|b| b.matches_name(name)).cloned())
    }

    /// All events, oldest first
    pub fn get_all(&self) -> Result<Vec<Barbacoa>, BarbacoaError> {
        Ok(self.read()?.clone())
    }

    /// Append an event and write it to disk
    ///
    /// Fails if one with the same name is already stored.
    pub fn insert(&self, barbacoa: Barbacoa) -> Result<(), BarbacoaError> {
        let mut data = self.write()?;

        if data.iter().any(|b| b.matches_name(&barbacoa.name)) {
            return Err(BarbacoaError::DuplicateEventName(barbacoa.name));
        }

        data.push(barbacoa);
        if let Err(e) = self.persist(&data) {
            data.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Remove the event with the given name and write the change to disk
    pub fn delete_by_name(&self, name: &str) -> Result<Option<Barbacoa>, BarbacoaError> {
        let mut data = self.write()?;

        let Some(pos) = data.iter().position(|b| b.matches_name(name)) else {
            return Ok(None);
        };

        let removed = data.remove(pos);
        if let Err(e) = self.persist(&data) {
            data.insert(pos, removed);
            return Err(e);
        }
        Ok(Some(removed))
    }

    /// Count events
    pub fn count(&self) -> Result<usize, BarbacoaError> {
        Ok(self.read()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, Money};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, BarbacoaRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("barbacoas.json");
        let repo = BarbacoaRepository::new(path);
        (temp_dir, repo)
    }

    fn event(name: &str) -> Barbacoa {
        Barbacoa::new(
            name,
            vec![Expense::new("Ana", "Carne", Money::from_cents(4000))],
            vec![],
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_insert_keeps_order() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(event("Verano")).unwrap();
        repo.insert(event("Otoño")).unwrap();
        repo.insert(event("Año Nuevo")).unwrap();

        let names: Vec<_> = repo.get_all().unwrap().into_iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["Verano", "Otoño", "Año Nuevo"]);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(event("San Juan")).unwrap();

        let err = repo.insert(event(" san juan ")).unwrap_err();
        assert!(err.is_duplicate_event_name());
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_get_by_name_and_id() {
        let (_temp_dir, repo) = create_test_repo();
        let bbq = event("Playa");
        let id = bbq.id;
        repo.insert(bbq).unwrap();

        assert!(repo.get_by_name("PLAYA").unwrap().is_some());
        assert!(repo.get_by_name("Monte").unwrap().is_none());
        assert_eq!(repo.get(id).unwrap().unwrap().name, "Playa");
    }

    #[test]
    fn test_delete_by_name() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(event("Playa")).unwrap();

        let deleted = repo.delete_by_name("playa").unwrap();
        assert_eq!(deleted.unwrap().name, "Playa");
        assert_eq!(repo.count().unwrap(), 0);

        assert!(repo.delete_by_name("playa").unwrap().is_none());
    }

    #[test]
    fn test_insert_is_persisted() {
        let (temp_dir, repo) = create_test_repo();
        let bbq = event("Playa");
        repo.insert(bbq.clone()).unwrap();

        let repo2 = BarbacoaRepository::new(temp_dir.path().join("barbacoas.json"));
        repo2.load().unwrap();

        assert_eq!(repo2.get_all().unwrap(), vec![bbq]);
    }

    #[test]
    fn test_failed_write_leaves_store_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        // A plain file where the data directory should be
        let blocker = temp_dir.path().join("data");
        std::fs::write(&blocker, "").unwrap();
        let repo = BarbacoaRepository::new(blocker.join("barbacoas.json"));

        assert!(repo.insert(event("Playa")).is_err());
        assert_eq!(repo.count().unwrap(), 0);

        // The name is still free once the disk is writable again
        std::fs::remove_file(&blocker).unwrap();
        repo.insert(event("Playa")).unwrap();
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_failed_delete_keeps_event() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("data");
        let repo = BarbacoaRepository::new(dir.join("barbacoas.json"));
        repo.insert(event("Playa")).unwrap();
        repo.insert(event("Monte")).unwrap();

        std::fs::remove_dir_all(&dir).unwrap();
        std::fs::write(&dir, "").unwrap();

        assert!(repo.delete_by_name("Playa").is_err());
        let names: Vec<_> = repo.get_all().unwrap().into_iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["Playa", "Monte"]);
    }
}
