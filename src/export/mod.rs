//! Export of a settled event
//!
//! - JSON: the full event record with export metadata
//! - YAML: the same, human-readable, with a comment header
//! - CSV: the transfer list, or the expense list

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_expenses_csv, export_transfers_csv};
pub use self::json::{export_barbacoa_json, EventExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::export_barbacoa_yaml;
