//! Key namespace: maps an entity kind and identifier to a ledger key.
//!
//! Handlers never concatenate key strings themselves; every key goes
//! through [`LedgerKey`]. The layout is:
//!
//! | Entity               | Key                          |
//! |----------------------|------------------------------|
//! | Identity record      | `{identityId}`               |
//! | Attestation requests | `requestAttest_{attesterId}` |
//! | Attestations         | `attester_{attesterId}`      |
//!
//! Identity keys carry no prefix, so identity identifiers that start with
//! one of the set prefixes (or are empty) can never hold a record: writes
//! refuse them and reads treat them as absent.

use crate::error::{AttestError, Result};
use crate::model::{AttesterId, IdentityId};

const REQUEST_PREFIX: &str = "requestAttest_";
const ATTEST_PREFIX: &str = "attester_";

/// The entity family a ledger key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    /// An [`IdentityRecord`](crate::model::IdentityRecord).
    Identity,
    /// The pending attestation requests addressed to one attester.
    AttestationRequests,
    /// The attestations issued by one attester.
    Attestations,
}

impl EntityKind {
    /// The key prefix for this kind.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Identity => "",
            Self::AttestationRequests => REQUEST_PREFIX,
            Self::Attestations => ATTEST_PREFIX,
        }
    }

    /// Human-readable tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::AttestationRequests => "requests",
            Self::Attestations => "attestations",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully-qualified ledger key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LedgerKey {
    kind: EntityKind,
    key: String,
}

impl LedgerKey {
    /// Key of the identity record for `id`, for writing.
    ///
    /// # Errors
    ///
    /// Returns `AttestError::InvalidArgument` for an empty id or one that
    /// starts with a set prefix.
    pub fn identity(id: &IdentityId) -> Result<Self> {
        let raw = id.as_str();
        if raw.is_empty() {
            return Err(AttestError::InvalidArgument(
                "identity id is empty".to_string(),
            ));
        }
        if raw.starts_with(REQUEST_PREFIX) || raw.starts_with(ATTEST_PREFIX) {
            return Err(AttestError::InvalidArgument(format!(
                "identity id '{raw}' uses a reserved key prefix"
            )));
        }
        Ok(Self {
            kind: EntityKind::Identity,
            key: raw.to_string(),
        })
    }

    /// Key of the identity record for `id`, for reading. `None` when `id`
    /// could never have been written.
    pub fn existing_identity(id: &IdentityId) -> Option<Self> {
        Self::identity(id).ok()
    }

    /// Key of the pending request set addressed to `attester`.
    pub fn requests(attester: &AttesterId) -> Self {
        Self::scoped(EntityKind::AttestationRequests, attester)
    }

    /// Key of the attestation set issued by `attester`.
    pub fn attestations(attester: &AttesterId) -> Self {
        Self::scoped(EntityKind::Attestations, attester)
    }

    fn scoped(kind: EntityKind, attester: &AttesterId) -> Self {
        Self {
            kind,
            key: format!("{}{}", kind.prefix(), attester.as_str()),
        }
    }

    /// Classify a raw ledger key. Returns the kind and the identifier
    /// with the prefix stripped.
    pub fn classify(raw: &str) -> (EntityKind, &str) {
        if let Some(id) = raw.strip_prefix(REQUEST_PREFIX) {
            (EntityKind::AttestationRequests, id)
        } else if let Some(id) = raw.strip_prefix(ATTEST_PREFIX) {
            (EntityKind::Attestations, id)
        } else {
            (EntityKind::Identity, raw)
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }
}

impl std::fmt::Display for LedgerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.key)
    }
}
