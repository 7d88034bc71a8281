//! Roster repository for JSON storage
//!
//! Manages loading and saving the cuadrilla to cuadrilla.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::BarbacoaError;
use crate::models::{Participant, ParticipantId};

use super::file_io::{read_json, write_json_atomic};

/// On-disk layout of cuadrilla.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct RosterData {
    pub participants: Vec<Participant>,
}

/// Repository for roster persistence
pub struct RosterRepository {
    path: PathBuf,
    data: RwLock<HashMap<ParticipantId, Participant>>,
    /// Index: normalized name -> participant_id
    by_name: RwLock<HashMap<String, ParticipantId>>,
}

impl RosterRepository {
    /// Create a new roster repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_name: RwLock::new(HashMap::new()),
        }
    }

    /// Load the roster from disk
    pub fn load(&self) -> Result<(), BarbacoaError> {
        let file_data: RosterData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            BarbacoaError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_name = self.by_name.write().map_err(|e| {
            BarbacoaError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        by_name.clear();

        for participant in file_data.participants {
            by_name.insert(Participant::normalize_name(&participant.name), participant.id);
            data.insert(participant.id, participant);
        }

        Ok(())
    }

    /// Save the roster to disk
    ///
    /// The write lock is held until the file is replaced, so saves land in
    /// the order they were made.
    pub fn save(&self) -> Result<(), BarbacoaError> {
        let data = self.data.write().map_err(|e| {
            BarbacoaError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let mut participants: Vec<_> = data.values().cloned().collect();
        participants.sort_by_key(|p| Participant::normalize_name(&p.name));
        write_json_atomic(&self.path, &RosterData { participants })
    }

    /// Get a participant by ID
    pub fn get(&self, id: ParticipantId) -> Result<Option<Participant>, BarbacoaError> {
        let data = self.data.read().map_err(|e| {
            BarbacoaError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// All participants, sorted by name
    pub fn get_all(&self) -> Result<Vec<Participant>, BarbacoaError> {
        let data = self.data.read().map_err(|e| {
            BarbacoaError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut participants: Vec<_> = data.values().cloned().collect();
        participants.sort_by_key(|p| Participant::normalize_name(&p.name));
        Ok(participants)
    }

    /// Get a participant by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Participant>, BarbacoaError> {
        let data = self.data.read().map_err(|e| {
            BarbacoaError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let by_name = self.by_name.read().map_err(|e| {
            BarbacoaError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(by_name
            .get(&Participant::normalize_name(name))
            .and_then(|id| data.get(id).cloned()))
    }

    /// Insert or update a participant
    pub fn upsert(&self, participant: Participant) -> Result<(), BarbacoaError> {
        let mut data = self.data.write().map_err(|e| {
            BarbacoaError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_name = self.by_name.write().map_err(|e| {
            BarbacoaError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if let Some(old) = data.get(&participant.id) {
            by_name.remove(&Participant::normalize_name(&old.name));
        }

        by_name.insert(Participant::normalize_name(&participant.name), participant.id);
        data.insert(participant.id, participant);
        Ok(())
    }

    /// Delete a participant
    pub fn delete(&self, id: ParticipantId) -> Result<bool, BarbacoaError> {
        let mut data = self.data.write().map_err(|e| {
            BarbacoaError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_name = self.by_name.write().map_err(|e| {
            BarbacoaError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        match data.remove(&id) {
            Some(participant) => {
                by_name.remove(&Participant::normalize_name(&participant.name));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Count participants
    pub fn count(&self) -> Result<usize, BarbacoaError> {
        let data = self.data.read().map_err(|e| {
            BarbacoaError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}
