//! Per-attester claim sets.
//!
//! The same shape backs both the pending request set (value = evidence URL)
//! and the attestation set (value = attested claim hash).

use serde::{Deserialize, Serialize};

use super::ids::IdentityId;
use super::pair_map::PairMap;

/// `(client, claim name)` → value, stored under one attester's key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClaimSet {
    #[serde(default)]
    pub claim: PairMap<IdentityId, String>,
}

/// Pending attestation requests addressed to one attester.
pub type AttestationRequestSet = ClaimSet;

/// Attestations issued by one attester.
pub type AttestationSet = ClaimSet;

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the value for `(client, claim)`.
    pub fn upsert(
        &mut self,
        client: IdentityId,
        claim: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.claim.insert(client, claim, value.into())
    }

    /// Remove `(client, claim)` if present.
    pub fn remove(&mut self, client: &IdentityId, claim: &str) -> Option<String> {
        self.claim.remove(client, claim)
    }

    pub fn get(&self, client: &IdentityId, claim: &str) -> Option<&str> {
        self.claim.get(client, claim).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.claim.is_empty()
    }

    pub fn len(&self) -> usize {
        self.claim.len()
    }
}
