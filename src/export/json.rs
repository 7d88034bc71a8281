//! JSON export of a settled event

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{BarbacoaError, BarbacoaResult};
use crate::models::{Barbacoa, BarbacoaRecord};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Exported event with provenance metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    /// Amounts as decimals, same shape the HTTP API uses
    pub barbacoa: BarbacoaRecord,
}

impl EventExport {
    pub fn new(barbacoa: &Barbacoa) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            barbacoa: BarbacoaRecord::from(barbacoa),
        }
    }
}

/// Write the event as pretty-printed JSON
pub fn export_barbacoa_json<W: Write>(barbacoa: &Barbacoa, writer: &mut W) -> BarbacoaResult<()> {
    serde_json::to_writer_pretty(&mut *writer, &EventExport::new(barbacoa))
        .map_err(|e| BarbacoaError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| BarbacoaError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, Money, Transfer};

    #[test]
    fn test_json_export() {
        let bbq = Barbacoa::new(
            "Playa",
            vec![
                Expense::new("Ana", "Carne", Money::from_cents(3050)),
                Expense::new("Luis", "", Money::zero()),
            ],
            vec![Transfer::new("Luis", "Ana", Money::from_cents(1525))],
        );

        let mut out = Vec::new();
        export_barbacoa_json(&bbq, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["barbacoa"]["name"], "Playa");
        assert_eq!(value["barbacoa"]["total_amount"], 30.5);
        assert_eq!(value["barbacoa"]["transfers"][0]["amount"], 15.25);
    }
}
