//! CLI command for exporting a saved barbacoa
//!
//! Writes to a file with `-o`, otherwise to stdout.

use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::error::{BarbacoaError, BarbacoaResult};
use crate::export::{export_barbacoa_json, export_barbacoa_yaml, export_expenses_csv, export_transfers_csv};
use crate::models::Barbacoa;
use crate::services::SettlementBackend;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Full event record as JSON
    Json,
    /// Full event record as YAML, human-readable
    Yaml,
    /// Transfer table (or expense table with --expenses)
    Csv,
}

/// Arguments of `barbacoa export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Barbacoa name
    pub name: String,

    /// Export format
    #[arg(long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// With CSV, export the expenses instead of the transfers
    #[arg(long)]
    pub expenses: bool,
}

/// Handle `barbacoa export`
pub fn handle_export_command(backend: &dyn SettlementBackend, args: ExportArgs) -> BarbacoaResult<()> {
    let barbacoa = backend
        .find(&args.name)?
        .ok_or_else(|| BarbacoaError::barbacoa_not_found(&args.name))?;

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                BarbacoaError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(&barbacoa, &args, &mut writer)?;
            writer
                .flush()
                .map_err(|e| BarbacoaError::Export(e.to_string()))?;
            eprintln!("Exported '{}' to: {}", barbacoa.name, path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_export(&barbacoa, &args, &mut writer)?;
        }
    }

    Ok(())
}

fn write_export<W: Write>(barbacoa: &Barbacoa, args: &ExportArgs, writer: &mut W) -> BarbacoaResult<()> {
    match args.format {
        ExportFormat::Json => export_barbacoa_json(barbacoa, writer),
        ExportFormat::Yaml => export_barbacoa_yaml(barbacoa, writer),
        ExportFormat::Csv if args.expenses => export_expenses_csv(barbacoa, writer),
        ExportFormat::Csv => export_transfers_csv(barbacoa, writer),
    }
}
