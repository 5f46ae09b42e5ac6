//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::LedgerError;

/// Outcome of reading a JSON file that may be absent or damaged
#[derive(Debug)]
pub enum JsonRead<T> {
    /// No file at the path
    Missing,
    Parsed(T),
    /// The file exists but does not deserialize; carries the parser message
    Malformed(String),
}

/// Read JSON from a file, distinguishing a missing file and bad content
///
/// Only I/O failures other than "not found" are errors.
pub fn read_json<T, P>(path: P) -> Result<JsonRead<T>, LedgerError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(JsonRead::Missing),
        Err(e) => {
            return Err(LedgerError::Io(format!(
                "Failed to open {}: {}",
                path.display(),
                e
            )))
        }
    };

    let reader = BufReader::new(file);
    match serde_json::from_reader(reader) {
        Ok(data) => Ok(JsonRead::Parsed(data)),
        Err(e) if e.is_io() => Err(LedgerError::Io(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        ))),
        Err(e) => Ok(JsonRead::Malformed(e.to_string())),
    }
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// The file is either completely written or not modified at all, so a
/// reader never observes a partial ledger.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), LedgerError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            LedgerError::Persistence(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = sibling_path(path, ".tmp");

    let result = write_temp(&temp_path, data).and_then(|()| {
        fs::rename(&temp_path, path).map_err(|e| {
            LedgerError::Persistence(format!("Failed to rename temp file: {}", e))
        })
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}

fn write_temp<T: Serialize>(temp_path: &Path, data: &T) -> Result<(), LedgerError> {
    let file = File::create(temp_path)
        .map_err(|e| LedgerError::Persistence(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| LedgerError::Persistence(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| LedgerError::Persistence(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| LedgerError::Persistence(format!("Failed to sync data: {}", e)))
}

/// Move a damaged file aside as `<name>.corrupt-<timestamp>`
///
/// Returns the new location.
pub fn quarantine<P: AsRef<Path>>(path: P) -> std::io::Result<PathBuf> {
    let path = path.as_ref();
    let stamp = Local::now().format("%Y%m%d%H%M%S");

    let mut target = sibling_path(path, &format!(".corrupt-{}", stamp));
    let mut n = 1;
    while target.exists() {
        target = sibling_path(path, &format!(".corrupt-{}-{}", stamp, n));
        n += 1;
    }

    fs::rename(path, &target)?;
    Ok(target)
}

/// `path` with `suffix` appended to its file name
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}
