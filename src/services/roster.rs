//! Roster service
//!
//! Business logic for the cuadrilla: adding and removing participants and
//! declaring partners. Pairing is symmetric; removing a participant also
//! clears any partner reference pointing at them.

use crate::audit::EntityType;
use crate::error::{BarbacoaError, BarbacoaResult};
use crate::models::{Participant, PartnerMap};
use crate::storage::Storage;

/// Service for roster management
pub struct RosterService<'a> {
    storage: &'a Storage,
}

impl<'a> RosterService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All participants, sorted by name
    pub fn list(&self) -> BarbacoaResult<Vec<Participant>> {
        self.storage.roster.get_all()
    }

    pub fn find(&self, name: &str) -> BarbacoaResult<Option<Participant>> {
        self.storage.roster.get_by_name(name)
    }

    fn get_required(&self, name: &str) -> BarbacoaResult<Participant> {
        self.find(name)?
            .ok_or_else(|| BarbacoaError::participant_not_found(name.trim()))
    }

    /// Add a participant
    ///
    /// A declared partner must already be on the roster and is paired back.
    pub fn add(
        &self,
        name: &str,
        partner: Option<&str>,
        color: Option<&str>,
    ) -> BarbacoaResult<Participant> {
        let name = name.trim();
        if self.find(name)?.is_some() {
            return Err(BarbacoaError::Duplicate {
                entity_type: "Participant",
                identifier: name.to_string(),
            });
        }
        if let Some(partner) = partner {
            self.get_required(partner)?;
        }

        let mut participant = Participant::new(name);
        participant.color = color.map(|c| c.trim().to_string());
        participant
            .validate()
            .map_err(|e| BarbacoaError::Validation(e.to_string()))?;

        self.storage.roster.upsert(participant.clone())?;
        self.storage.roster.save()?;
        self.storage.log_create(
            EntityType::Participant,
            participant.id.to_string(),
            Some(participant.name.clone()),
            &participant,
        )?;

        match partner {
            Some(partner) => {
                let (participant, _) = self.pair(&participant.name, partner)?;
                Ok(participant)
            }
            None => Ok(participant),
        }
    }

    /// Remove a participant, unpairing anyone who had them as partner
    pub fn remove(&self, name: &str) -> BarbacoaResult<Participant> {
        let participant = self.get_required(name)?;

        for other in self.list()? {
            let points_here = other
                .partner
                .as_deref()
                .map(|p| participant.matches_name(p))
                .unwrap_or(false);
            if points_here {
                self.set_partner(other, None)?;
            }
        }

        self.storage.roster.delete(participant.id)?;
        self.storage.roster.save()?;
        self.storage.log_delete(
            EntityType::Participant,
            participant.id.to_string(),
            Some(participant.name.clone()),
            &participant,
        )?;

        Ok(participant)
    }

    /// Declare `a` and `b` partners of each other
    ///
    /// Any previous partner of either is unpaired first.
    pub fn pair(&self, a: &str, b: &str) -> BarbacoaResult<(Participant, Participant)> {
        let first = self.get_required(a)?;
        let second = self.get_required(b)?;

        if first.id == second.id {
            return Err(BarbacoaError::Validation(
                "A participant cannot be their own partner".into(),
            ));
        }

        for current in [&first, &second] {
            if let Some(old) = current.partner.as_deref() {
                if !first.matches_name(old) && !second.matches_name(old) {
                    self.unpair(&current.name)?;
                }
            }
        }

        // Re-read: unpairing may have touched either side
        let first = self.get_required(a)?;
        let second = self.get_required(b)?;
        let second_name = second.name.clone();
        let first_name = first.name.clone();

        let first = self.set_partner(first, Some(second_name))?;
        let second = self.set_partner(second, Some(first_name))?;
        Ok((first, second))
    }

    /// Clear a participant's partner, and the partner's reference back
    pub fn unpair(&self, name: &str) -> BarbacoaResult<Participant> {
        let participant = self.get_required(name)?;

        if let Some(partner_name) = participant.partner.clone() {
            if let Some(partner) = self.find(&partner_name)? {
                let points_back = partner
                    .partner
                    .as_deref()
                    .map(|p| participant.matches_name(p))
                    .unwrap_or(false);
                if points_back {
                    self.set_partner(partner, None)?;
                }
            }
        }

        self.set_partner(participant, None)
    }

    /// Partner map derived from the roster, for the settlement engine
    pub fn partner_map(&self) -> BarbacoaResult<PartnerMap> {
        Ok(PartnerMap::from_roster(&self.list()?))
    }

    fn set_partner(
        &self,
        mut participant: Participant,
        partner: Option<String>,
    ) -> BarbacoaResult<Participant> {
        if participant.partner == partner {
            return Ok(participant);
        }

        let before = participant.clone();
        participant.partner = partner;
        participant
            .validate()
            .map_err(|e| BarbacoaError::Validation(e.to_string()))?;

        self.storage.roster.upsert(participant.clone())?;
        self.storage.roster.save()?;
        self.storage.log_update(
            EntityType::Participant,
            participant.id.to_string(),
            Some(participant.name.clone()),
            &before,
            &participant,
            Some(format!(
                "partner: {} -> {}",
                describe(&before.partner),
                describe(&participant.partner)
            )),
        )?;

        Ok(participant)
    }
}

fn describe(partner: &Option<String>) -> String {
    match partner {
        Some(name) => format!("'{}'", name),
        None => "none".to_string(),
    }
}
