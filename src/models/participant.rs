//! Roster ("cuadrilla") models
//!
//! A participant may declare a partner ("pareja"); the resulting `PartnerMap`
//! only biases the order in which debts are settled.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::ids::ParticipantId;

/// A member of the cuadrilla
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique identifier
    #[serde(default)]
    pub id: ParticipantId,

    /// Display name, also the payer identifier on expenses
    #[serde(alias = "nombre")]
    pub name: String,

    /// Declared partner's name
    #[serde(default, alias = "pareja", skip_serializing_if = "Option::is_none")]
    pub partner: Option<String>,

    /// UI colour as `#rrggbb`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Participant {
    /// Create a new participant without a partner
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ParticipantId::new(),
            name: name.into(),
            partner: None,
            color: None,
        }
    }

    /// Create a participant with a declared partner
    pub fn with_partner(name: impl Into<String>, partner: impl Into<String>) -> Self {
        let mut participant = Self::new(name);
        participant.partner = Some(partner.into());
        participant
    }

    /// Normalize a name for matching
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Check if this participant matches a name (case-insensitive)
    pub fn matches_name(&self, name: &str) -> bool {
        Self::normalize_name(&self.name) == Self::normalize_name(name)
    }

    /// Validate the participant
    pub fn validate(&self) -> Result<(), ParticipantValidationError> {
        if self.name.trim().is_empty() {
            return Err(ParticipantValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(ParticipantValidationError::NameTooLong(self.name.len()));
        }

        if let Some(partner) = &self.partner {
            if self.matches_name(partner) {
                return Err(ParticipantValidationError::SelfPartner);
            }
        }

        if let Some(color) = &self.color {
            let hex = color.strip_prefix('#').unwrap_or("");
            if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(ParticipantValidationError::InvalidColor(color.clone()));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for participants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantValidationError {
    EmptyName,
    NameTooLong(usize),
    SelfPartner,
    InvalidColor(String),
}

impl fmt::Display for ParticipantValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Participant name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Participant name too long ({} chars, max 50)", len)
            }
            Self::SelfPartner => write!(f, "A participant cannot be their own partner"),
            Self::InvalidColor(c) => write!(f, "Invalid colour '{}', expected #rrggbb", c),
        }
    }
}

impl std::error::Error for ParticipantValidationError {}

/// Participant name -> declared partner name
///
/// Symmetric by convention only; nothing enforces that `b -> a` exists when
/// `a -> b` does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartnerMap(HashMap<String, String>);

impl PartnerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the map from the roster's declared partners
    pub fn from_roster(participants: &[Participant]) -> Self {
        participants
            .iter()
            .filter_map(|p| p.partner.as_ref().map(|partner| (p.name.clone(), partner.clone())))
            .collect()
    }

    pub fn insert(&mut self, participant: impl Into<String>, partner: impl Into<String>) {
        self.0.insert(participant.into(), partner.into());
    }

    /// Partner declared for `participant`, if any
    pub fn partner_of(&self, participant: &str) -> Option<&str> {
        self.0.get(participant).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(String, String)> for PartnerMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<HashMap<String, String>> for PartnerMap {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_participant() {
        let p = Participant::new("Ana");
        assert_eq!(p.name, "Ana");
        assert!(p.partner.is_none());
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut p = Participant::new("");
        assert_eq!(p.validate(), Err(ParticipantValidationError::EmptyName));

        p.name = "a".repeat(51);
        assert!(matches!(
            p.validate(),
            Err(ParticipantValidationError::NameTooLong(51))
        ));

        let selfish = Participant::with_partner("Ana", "ana");
        assert_eq!(selfish.validate(), Err(ParticipantValidationError::SelfPartner));

        let mut colored = Participant::new("Luis");
        colored.color = Some("#1a2B3c".into());
        assert!(colored.validate().is_ok());
        colored.color = Some("red".into());
        assert!(matches!(
            colored.validate(),
            Err(ParticipantValidationError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_loads_spanish_roster_shape() {
        let p: Participant =
            serde_json::from_str(r##"{"nombre": "Ana", "pareja": "Luis", "color": "#ff0000"}"##)
                .unwrap();
        assert_eq!(p.name, "Ana");
        assert_eq!(p.partner.as_deref(), Some("Luis"));
    }

    #[test]
    fn test_partner_map_from_roster() {
        let roster = vec![
            Participant::with_partner("Ana", "Luis"),
            Participant::with_partner("Luis", "Ana"),
            Participant::new("Marta"),
        ];
        let partners = PartnerMap::from_roster(&roster);

        assert_eq!(partners.len(), 2);
        assert_eq!(partners.partner_of("Ana"), Some("Luis"));
        assert_eq!(partners.partner_of("Luis"), Some("Ana"));
        assert_eq!(partners.partner_of("Marta"), None);
    }

    #[test]
    fn test_partner_map_serializes_as_plain_object() {
        let mut partners = PartnerMap::new();
        partners.insert("A", "B");
        assert_eq!(serde_json::to_string(&partners).unwrap(), r#"{"A":"B"}"#);
    }
}
