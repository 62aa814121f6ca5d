//! Transaction overlay: one handler invocation's view of the ledger.
//!
//! Reads fall through to the underlying ledger unless the key was already
//! written in this transaction. Writes are buffered and reach the
//! underlying ledger only on [`Transaction::commit`], as one
//! [`Ledger::apply`] call. Dropping a transaction discards its writes.
//!
//! Every key consulted is recorded in the read set and every key mutated
//! in the write set, so the hosting platform can run its conflict checks.

use std::cell::RefCell;
use std::collections::BTreeSet;

use serde::Serialize;

use super::{Ledger, WriteSet};
use crate::error::Result;

/// Summary of a committed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    /// Keys read, ordered.
    pub read_keys: Vec<String>,
    /// Keys written or deleted, ordered.
    pub written_keys: Vec<String>,
    /// Hex SHA-256 of the write set.
    pub digest: String,
}

/// Buffered, read-your-writes view over a ledger.
pub struct Transaction<'a, L: Ledger + ?Sized> {
    inner: &'a mut L,
    reads: RefCell<BTreeSet<String>>,
    writes: WriteSet,
}

impl<'a, L: Ledger + ?Sized> Transaction<'a, L> {
    pub fn new(inner: &'a mut L) -> Self {
        Self {
            inner,
            reads: RefCell::new(BTreeSet::new()),
            writes: WriteSet::new(),
        }
    }

    /// Keys read so far, ordered.
    pub fn read_set(&self) -> Vec<String> {
        self.reads.borrow().iter().cloned().collect()
    }

    /// Hand the buffered writes to the underlying ledger.
    ///
    /// # Errors
    ///
    /// Returns whatever the underlying ledger's `apply` returns; in that
    /// case nothing is guaranteed to have been written unless the backend
    /// applies batches atomically.
    pub fn commit(self) -> Result<Commit> {
        let commit = Commit {
            read_keys: self.read_set(),
            written_keys: self.writes.keys(),
            digest: self.writes.digest(),
        };
        self.inner.apply(&self.writes)?;
        log::debug!(
            "committed {} write(s), digest {}",
            commit.written_keys.len(),
            commit.digest
        );
        Ok(commit)
    }

    /// Drop the buffered writes. The underlying ledger is untouched.
    pub fn discard(self) {
        if !self.writes.is_empty() {
            log::debug!("discarded {} buffered write(s)", self.writes.len());
        }
    }
}

impl<L: Ledger + ?Sized> Ledger for Transaction<'_, L> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.reads.borrow_mut().insert(key.to_string());
        match self.writes.lookup(key) {
            Some(buffered) => Ok(buffered.map(<[u8]>::to_vec)),
            None => self.inner.get(key),
        }
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        self.writes.put(key, value);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        self.writes.delete(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys: BTreeSet<String> = self.inner.keys()?.into_iter().collect();
        for (key, write) in self.writes.iter() {
            match write {
                Some(_) => {
                    keys.insert(key.to_string());
                }
                None => {
                    keys.remove(key);
                }
            }
        }
        Ok(keys.into_iter().collect())
    }
}
