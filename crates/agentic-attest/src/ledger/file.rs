//! File-backed ledger: the whole key space in one JSON snapshot.
//!
//! File format:
//! ```json
//! {
//!     "version": 1,
//!     "entries": { "key": "<base64 value>", ... }
//! }
//! ```
//!
//! Every mutation rewrites the snapshot through a temporary file and a
//! rename, so a reader never sees a half-written ledger. The store is safe
//! for single-process use; concurrent writers are not coordinated.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use base64::Engine;
use serde::{Deserialize, Serialize};

use super::{Ledger, WriteSet};
use crate::error::{AttestError, Result};

// ── File format constants ─────────────────────────────────────────────────────

const LEDGER_FILE_VERSION: u32 = 1;

// ── On-disk structure ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct LedgerFile {
    /// Format version number.
    version: u32,
    /// Key → base64 value.
    entries: BTreeMap<String, String>,
}

// ── FileLedger ────────────────────────────────────────────────────────────────

/// Ledger persisted as a single JSON snapshot file.
pub struct FileLedger {
    path: PathBuf,
    entries: BTreeMap<String, Vec<u8>>,
}

impl FileLedger {
    /// Open the ledger at `path`, starting empty if the file does not exist.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns `AttestError::InvalidFileFormat` for a malformed or
    /// unsupported snapshot, or `AttestError::Io` for filesystem errors.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let entries = if path.exists() {
            read_snapshot(&path)?
        } else {
            BTreeMap::new()
        };

        log::debug!(
            "opened ledger {} ({} keys)",
            path.display(),
            entries.len()
        );
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn persist(&self, entries: &BTreeMap<String, Vec<u8>>) -> Result<()> {
        let engine = base64::engine::general_purpose::STANDARD;
        let file = LedgerFile {
            version: LEDGER_FILE_VERSION,
            entries: entries
                .iter()
                .map(|(k, v)| (k.clone(), engine.encode(v)))
                .collect(),
        };

        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| AttestError::SerializationError(e.to_string()))?;

        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json.as_bytes())?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Persist `next` and adopt it only once it is on disk.
    fn replace(&mut self, next: BTreeMap<String, Vec<u8>>) -> Result<()> {
        self.persist(&next)?;
        self.entries = next;
        Ok(())
    }
}

impl Ledger for FileLedger {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut next = self.entries.clone();
        next.insert(key.to_string(), value);
        self.replace(next)
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut next = self.entries.clone();
        next.remove(key);
        self.replace(next)
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }

    /// Apply the whole batch with a single snapshot rewrite.
    fn apply(&mut self, writes: &WriteSet) -> Result<()> {
        if writes.is_empty() {
            return Ok(());
        }
        let mut next = self.entries.clone();
        for (key, write) in writes.iter() {
            match write {
                Some(value) => {
                    next.insert(key.to_string(), value.to_vec());
                }
                None => {
                    next.remove(key);
                }
            }
        }
        self.replace(next)
    }
}

fn read_snapshot(path: &Path) -> Result<BTreeMap<String, Vec<u8>>> {
    let bytes = std::fs::read(path)?;
    let file: LedgerFile = serde_json::from_slice(&bytes).map_err(|e| {
        AttestError::InvalidFileFormat(format!(
            "failed to parse ledger file {}: {e}",
            path.display()
        ))
    })?;

    if file.version != LEDGER_FILE_VERSION {
        return Err(AttestError::InvalidFileFormat(format!(
            "unsupported ledger file version {} in {}",
            file.version,
            path.display()
        )));
    }

    let engine = base64::engine::general_purpose::STANDARD;
    let mut entries = BTreeMap::new();
    for (key, encoded) in file.entries {
        let value = engine.decode(encoded.as_bytes()).map_err(|e| {
            AttestError::InvalidFileFormat(format!("bad value for key '{key}': {e}"))
        })?;
        entries.insert(key, value);
    }
    Ok(entries)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
