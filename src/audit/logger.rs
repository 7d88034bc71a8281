//! Append-only JSONL audit log

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{BarbacoaError, BarbacoaResult};

use super::entry::AuditEntry;

/// Writes audit entries, one JSON object per line, flushed on every write
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an entry
    pub fn log(&self, entry: &AuditEntry) -> BarbacoaResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| BarbacoaError::Io(format!("Failed to open audit log: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| BarbacoaError::Json(format!("Failed to serialize audit entry: {}", e)))?;

        // One write per line so concurrent appends never interleave
        file.write_all(format!("{}\n", json).as_bytes())
            .map_err(|e| BarbacoaError::Io(format!("Failed to write audit entry: {}", e)))?;

        file.flush()
            .map_err(|e| BarbacoaError::Io(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }

    /// All entries, oldest first
    pub fn read_all(&self) -> BarbacoaResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| BarbacoaError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut entries = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                BarbacoaError::Io(format!("Failed to read audit log line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                BarbacoaError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> BarbacoaResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }

    pub fn entry_count(&self) -> BarbacoaResult<usize> {
        if !self.log_path.exists() {
            return Ok(0);
        }

        let file = File::open(&self.log_path)
            .map_err(|e| BarbacoaError::Io(format!("Failed to open audit log: {}", e)))?;

        Ok(BufReader::new(file)
            .lines()
            .map_while(Result::ok)
            .filter(|l| !l.trim().is_empty())
            .count())
    }

    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::{EntityType, Operation};
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    fn entry(name: &str) -> AuditEntry {
        AuditEntry::create(
            EntityType::Barbacoa,
            format!("bbq-{}", name),
            Some(name.to_string()),
            &json!({"name": name}),
        )
    }

    #[test]
    fn test_empty_log() {
        let (logger, _temp_dir) = create_test_logger();
        assert!(logger.read_all().unwrap().is_empty());
        assert_eq!(logger.entry_count().unwrap(), 0);
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp_dir) = create_test_logger();
        logger.log(&entry("Playa")).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].entity_name.as_deref(), Some("Playa"));
    }

    #[test]
    fn test_read_recent() {
        let (logger, _temp_dir) = create_test_logger();
        for name in ["a", "b", "c", "d"] {
            logger.log(&entry(name)).unwrap();
        }

        let recent = logger.read_recent(2).unwrap();
        let names: Vec<_> = recent.iter().filter_map(|e| e.entity_name.clone()).collect();
        assert_eq!(names, vec!["c", "d"]);
        assert_eq!(logger.read_recent(10).unwrap().len(), 4);
        assert_eq!(logger.entry_count().unwrap(), 4);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let (logger, _temp_dir) = create_test_logger();
        logger.log(&entry("a")).unwrap();
        std::fs::OpenOptions::new()
            .append(true)
            .open(logger.path())
            .and_then(|mut f| writeln!(f))
            .unwrap();
        logger.log(&entry("b")).unwrap();

        assert_eq!(logger.read_all().unwrap().len(), 2);
        assert_eq!(logger.entry_count().unwrap(), 2);
    }
}
