//! Query projections returned to callers.
//!
//! - [`ClaimsView`]: `{"user": ..., "claims": {...}}`, one party's claims.
//! - [`SetQuery`]: the result of listing a request or attestation set:
//!   either a JSON array of `ClaimsView`, or the "no data" sentinel object.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::error::{AttestError, Result};
use crate::model::{ClaimSet, IdentityId};

/// Message carried by the "no data" sentinel payload.
pub const NO_DATA_MESSAGE: &str = "There are not request Attestations";

/// One party's claims: name → value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimsView {
    pub user: IdentityId,
    pub claims: BTreeMap<String, String>,
}

/// Result of listing a per-attester set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetQuery {
    /// The set key is absent or holds no entries. Reported as a successful
    /// sentinel payload, never as an error.
    NoData,
    /// One entry per client present in the set, ordered by client id.
    Entries(Vec<ClaimsView>),
}

impl SetQuery {
    /// Project a stored set. A missing or empty set becomes `NoData`.
    pub fn from_set(set: Option<&ClaimSet>) -> Self {
        let Some(set) = set.filter(|s| !s.is_empty()) else {
            return Self::NoData;
        };

        let entries = set
            .claim
            .nested()
            .into_iter()
            .map(|(client, claims)| ClaimsView {
                user: client.clone(),
                claims: claims
                    .into_iter()
                    .map(|(name, value)| (name.to_string(), value.clone()))
                    .collect(),
            })
            .collect();
        Self::Entries(entries)
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }

    /// Entries, or an empty slice for `NoData`.
    pub fn entries(&self) -> &[ClaimsView] {
        match self {
            Self::NoData => &[],
            Self::Entries(entries) => entries,
        }
    }

    /// Look up the value recorded for `(client, claim)`.
    pub fn find(&self, client: &str, claim: &str) -> Option<&str> {
        self.entries()
            .iter()
            .find(|view| view.user.as_str() == client)
            .and_then(|view| view.claims.get(claim))
            .map(String::as_str)
    }
}

impl Serialize for SetQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct NoData {
            error: &'static str,
        }

        match self {
            Self::NoData => NoData {
                error: NO_DATA_MESSAGE,
            }
            .serialize(serializer),
            Self::Entries(entries) => entries.serialize(serializer),
        }
    }
}

/// Encode a projection as the JSON response payload.
pub fn to_payload<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| AttestError::SerializationError(e.to_string()))
}
