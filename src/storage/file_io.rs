//! JSON file helpers
//!
//! Writes go to a sibling temp file which is then renamed over the target, so
//! a crash leaves either the old file or the new one.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;

use crate::error::BarbacoaError;

fn storage_err(action: &str, path: &Path, e: impl std::fmt::Display) -> BarbacoaError {
    BarbacoaError::Storage(format!("Failed to {} {}: {}", action, path.display(), e))
}

/// Read JSON from `path`, or `T::default()` when the file does not exist yet
pub fn read_json<T, P>(path: P) -> Result<T, BarbacoaError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| storage_err("open", path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_err("parse", path, e))
}

/// Write `data` as pretty JSON, atomically
///
/// Each call writes its own uniquely named temp file, so concurrent writers
/// never share one.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), BarbacoaError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    // Same directory as the target so the rename stays on one filesystem
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| storage_err("create directory", dir, e))?;

    let temp =
        NamedTempFile::new_in(dir).map_err(|e| storage_err("create temp file in", dir, e))?;
    let mut writer = BufWriter::new(temp);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_err("serialize", path, e))?;
    let temp = writer
        .into_inner()
        .map_err(|e| storage_err("flush", path, e.error()))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| storage_err("sync", temp.path(), e))?;

    // A failed persist drops the temp file
    temp.persist(path)
        .map_err(|e| storage_err("replace", path, e.error))?;

    Ok(())
}
