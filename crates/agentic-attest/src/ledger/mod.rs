//! Ledger accessor: the key-value contract the transaction handlers run on.
//!
//! The hosting ledger platform owns ordering, replication and durability.
//! The core only needs `get`/`put`/`delete` with read-your-writes
//! consistency inside one transaction, which [`Transaction`] provides on
//! top of any [`Ledger`].
//!
//! # Modules
//!
//! - [`memory`]: in-memory ledger (simulated ledger for tests).
//! - [`file`]: single-file JSON snapshot ledger used by the CLI.
//! - [`transaction`]: per-invocation overlay with read/write set tracking.

pub mod file;
pub mod memory;
pub mod transaction;

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::{AttestError, Result};
use crate::keys::LedgerKey;

pub use file::FileLedger;
pub use memory::MemoryLedger;
pub use transaction::{Commit, Transaction};

/// Key-value store the handlers read from and write to.
pub trait Ledger {
    /// Read a key. `None` means the key is absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Write a key, replacing any existing value.
    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Remove a key. Removing an absent key is not an error.
    fn delete(&mut self, key: &str) -> Result<()>;

    /// All keys currently present, ordered.
    fn keys(&self) -> Result<Vec<String>>;

    /// Apply a batch of writes produced by one transaction.
    ///
    /// The default replays the batch in key order. Backends that can make
    /// the batch all-or-nothing override this.
    fn apply(&mut self, writes: &WriteSet) -> Result<()> {
        for (key, write) in writes.iter() {
            match write {
                Some(value) => self.put(key, value.to_vec())?,
                None => self.delete(key)?,
            }
        }
        Ok(())
    }
}

/// The buffered writes of one transaction: key → `Some(value)` for a put,
/// `None` for a delete. Later writes to the same key replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSet {
    entries: BTreeMap<String, Option<Vec<u8>>>,
}

impl WriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, key: &str, value: Vec<u8>) {
        self.entries.insert(key.to_string(), Some(value));
    }

    pub fn delete(&mut self, key: &str) {
        self.entries.insert(key.to_string(), None);
    }

    /// `None` if the key was not written, `Some(None)` if it was deleted.
    pub fn lookup(&self, key: &str) -> Option<Option<&[u8]>> {
        self.entries.get(key).map(|w| w.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&[u8]>)> {
        self.entries
            .iter()
            .map(|(k, w)| (k.as_str(), w.as_deref()))
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// SHA-256 over the ordered writes, hex encoded. Two transactions that
    /// produce the same writes produce the same digest.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for (key, write) in self.iter() {
            hasher.update((key.len() as u64).to_be_bytes());
            hasher.update(key.as_bytes());
            match write {
                Some(value) => {
                    hasher.update([1u8]);
                    hasher.update((value.len() as u64).to_be_bytes());
                    hasher.update(value);
                }
                None => hasher.update([0u8]),
            }
        }
        hex::encode(hasher.finalize())
    }
}

/// Read and decode a JSON record. `Ok(None)` if the key is absent.
///
/// # Errors
///
/// Returns `AttestError::SerializationError` if the stored bytes do not
/// decode as `T`.
pub fn read_record<L, T>(ledger: &L, key: &LedgerKey) -> Result<Option<T>>
where
    L: Ledger + ?Sized,
    T: DeserializeOwned,
{
    let Some(bytes) = ledger.get(key.as_str())? else {
        return Ok(None);
    };
    let record = serde_json::from_slice(&bytes).map_err(|e| {
        AttestError::SerializationError(format!("failed to decode record at '{key}': {e}"))
    })?;
    Ok(Some(record))
}

/// Encode a record as JSON and write it.
///
/// # Errors
///
/// Returns `AttestError::SerializationError` if encoding fails, or any
/// error raised by the ledger.
pub fn write_record<L, T>(ledger: &mut L, key: &LedgerKey, record: &T) -> Result<()>
where
    L: Ledger + ?Sized,
    T: Serialize,
{
    let bytes = serde_json::to_vec(record).map_err(|e| {
        AttestError::SerializationError(format!("failed to encode record at '{key}': {e}"))
    })?;
    ledger.put(key.as_str(), bytes)
}
