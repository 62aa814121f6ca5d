//! Identity records and the credentials shared from them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ids::AttesterId;
use super::pair_map::PairMap;

/// Claim name of the full-name claim written at registration.
pub const CLAIM_FULLNAME: &str = "fullname";

/// Claim name of the document-id claim written at registration.
pub const CLAIM_DOCID: &str = "docid";

/// An access token granted by an identity to an attester for one claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Opaque token; not verified by the core.
    pub token: String,
    /// Validity period in days.
    #[serde(rename = "validDay")]
    pub valid_day: u32,
}

impl Credential {
    pub fn new(token: impl Into<String>, valid_day: u32) -> Self {
        Self {
            token: token.into(),
            valid_day,
        }
    }
}

/// The stored claims and shared-credential grants for one registered party.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Claim name → claim value.
    #[serde(default, deserialize_with = "nullable")]
    pub claims: BTreeMap<String, String>,
    /// `(attester, claim name)` → credential.
    #[serde(default)]
    pub infoshared: PairMap<AttesterId, Credential>,
}

impl IdentityRecord {
    /// A fresh record holding the two registration claims and no shared
    /// credentials.
    pub fn register(fullname: impl Into<String>, docid: impl Into<String>) -> Self {
        let mut claims = BTreeMap::new();
        claims.insert(CLAIM_FULLNAME.to_string(), fullname.into());
        claims.insert(CLAIM_DOCID.to_string(), docid.into());
        Self {
            claims,
            infoshared: PairMap::new(),
        }
    }

    /// Grant (or replace) the credential for `(attester, claim)`.
    pub fn share(
        &mut self,
        attester: AttesterId,
        claim: impl Into<String>,
        credential: Credential,
    ) -> Option<Credential> {
        self.infoshared.insert(attester, claim, credential)
    }

    pub fn credential(&self, attester: &AttesterId, claim: &str) -> Option<&Credential> {
        self.infoshared.get(attester, claim)
    }
}

fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
