//! YAML export of a settled event

use std::io::Write;

use crate::error::{BarbacoaError, BarbacoaResult};
use crate::export::json::EventExport;
use crate::models::Barbacoa;

/// Write the event as YAML, preceded by a comment header
pub fn export_barbacoa_yaml<W: Write>(barbacoa: &Barbacoa, writer: &mut W) -> BarbacoaResult<()> {
    let export = EventExport::new(barbacoa);
    let io_err = |e: std::io::Error| BarbacoaError::Export(e.to_string());

    writeln!(writer, "# Barbacoa export: {}", barbacoa.name).map_err(io_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(io_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(io_err)?;
    writeln!(writer).map_err(io_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| BarbacoaError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, Money};

    #[test]
    fn test_yaml_export() {
        let bbq = Barbacoa::new(
            "Monte",
            vec![Expense::new("Ana", "Leña", Money::from_cents(1200))],
            vec![],
        );

        let mut out = Vec::new();
        export_barbacoa_yaml(&bbq, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("# Barbacoa export: Monte"));
        assert!(text.contains("name: Monte"));
        assert!(text.contains("payer: Ana"));
        assert!(text.contains("transfers: []"));
    }
}
