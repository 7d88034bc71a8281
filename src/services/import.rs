//! Expense file import
//!
//! Loads an expense list from JSON or CSV. The format is picked from the file
//! extension.
//!
//! JSON is either a bare array of expense records or an object with an
//! `expenses` (or `gastos`) array. CSV needs a header row; columns are found by
//! name (`payer`/`persona`/`name`, `concept`/`concepto`/`description`,
//! `amount`/`importe`), in any order. A row that fails validation aborts the
//! import and the error names the row.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;
use tracing::debug;

use crate::error::{BarbacoaError, BarbacoaResult};
use crate::models::{Expense, ExpenseRecord};

use super::sheet::parse_amount;

/// Supported import formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Json,
    Csv,
}

impl ImportFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> BarbacoaResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(BarbacoaError::Import(format!(
                "Unsupported file type for {}: expected .json or .csv",
                path.display()
            ))),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExpenseFile {
    Bare(Vec<ExpenseRecord>),
    Wrapped {
        #[serde(alias = "gastos")]
        expenses: Vec<ExpenseRecord>,
    },
}

/// Load expenses from a JSON or CSV file
pub fn load_expenses(path: &Path) -> BarbacoaResult<Vec<Expense>> {
    let format = ImportFormat::from_path(path)?;
    let file = File::open(path)
        .map_err(|e| BarbacoaError::Import(format!("Cannot open {}: {}", path.display(), e)))?;
    let reader = BufReader::new(file);

    let expenses = match format {
        ImportFormat::Json => parse_json(reader)?,
        ImportFormat::Csv => parse_csv(reader)?,
    };

    debug!(path = %path.display(), count = expenses.len(), "imported expenses");
    Ok(expenses)
}

/// Parse a JSON expense list
pub fn parse_json<R: Read>(reader: R) -> BarbacoaResult<Vec<Expense>> {
    let file: ExpenseFile = serde_json::from_reader(reader)
        .map_err(|e| BarbacoaError::Import(format!("Invalid expense JSON: {}", e)))?;

    let records = match file {
        ExpenseFile::Bare(records) => records,
        ExpenseFile::Wrapped { expenses } => expenses,
    };

    records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| {
            Expense::try_from(record)
                .map_err(|e| BarbacoaError::Import(format!("entry {}: {}", idx + 1, e)))
        })
        .collect()
}

struct Columns {
    payer: usize,
    concept: Option<usize>,
    amount: usize,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> BarbacoaResult<Self> {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.contains(&h.trim().to_lowercase().as_str()))
        };

        let payer = find(&["payer", "persona", "name", "nombre"])
            .ok_or_else(|| BarbacoaError::Import("CSV has no payer column".into()))?;
        let amount = find(&["amount", "importe"])
            .ok_or_else(|| BarbacoaError::Import("CSV has no amount column".into()))?;
        let concept = find(&["concept", "concepto", "description"]);

        Ok(Self {
            payer,
            concept,
            amount,
        })
    }

    fn parse(&self, record: &StringRecord) -> BarbacoaResult<Expense> {
        let payer = record.get(self.payer).unwrap_or_default().trim();
        if payer.is_empty() {
            return Err(BarbacoaError::MissingParticipant);
        }

        let concept = self
            .concept
            .and_then(|col| record.get(col))
            .unwrap_or_default()
            .trim();
        let amount = parse_amount(record.get(self.amount).unwrap_or_default())?;

        Ok(Expense::new(payer, concept, amount))
    }
}

/// Parse a CSV expense list; the first row must be a header
pub fn parse_csv<R: Read>(reader: R) -> BarbacoaResult<Vec<Expense>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| BarbacoaError::Import(format!("Cannot read CSV header: {}", e)))?
        .clone();
    let columns = Columns::from_headers(&headers)?;

    let mut expenses = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // Header is line 1
        let line = idx + 2;
        let record = result
            .map_err(|e| BarbacoaError::Import(format!("line {}: {}", line, e)))?;

        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let expense = columns
            .parse(&record)
            .map_err(|e| BarbacoaError::Import(format!("line {}: {}", line, e)))?;
        expenses.push(expense);
    }

    Ok(expenses)
}
