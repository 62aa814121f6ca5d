//! Attestation workflow: pending requests and issued attestations.
//!
//! Each `(attester, client, claim)` triple is in one of three states:
//!
//! ```text
//!   NoRequest ──request_attestation──▶ Requested ──create_attestation──▶ Attested
//!                                        │  ▲
//!                                        └──┘ request_attestation (replaces the URL)
//! ```
//!
//! Requests live in the attester's request set (`requestAttest_{attester}`)
//! and attestations in its attestation set (`attester_{attester}`). The
//! two sets are linked only by matching triples.

use crate::error::{AttestError, Result};
use crate::keys::LedgerKey;
use crate::ledger::{read_record, write_record, Ledger};
use crate::model::{AttestationRequestSet, AttestationSet, AttesterId, IdentityId};
use crate::view::SetQuery;

/// Ask `attester` to verify `claim` of `client`, pointing at the evidence
/// in `claim_url`.
///
/// A repeated request for the same triple replaces the URL.
pub fn request_attestation<L: Ledger + ?Sized>(
    ledger: &mut L,
    attester: &AttesterId,
    client: &IdentityId,
    claim: &str,
    claim_url: &str,
) -> Result<()> {
    let key = LedgerKey::requests(attester);
    let mut requests: AttestationRequestSet = read_record(ledger, &key)?.unwrap_or_default();

    if requests
        .upsert(client.clone(), claim, claim_url)
        .is_some()
    {
        log::debug!("replaced pending request {client}/{claim} at {attester}");
    } else {
        log::debug!("new pending request {client}/{claim} at {attester}");
    }

    write_record(ledger, &key, &requests)
}

/// Publish `claim_hash` as `attester`'s attestation of `claim` for
/// `client`, and retire the matching pending request.
///
/// The attester's request set must exist. The specific pending entry need
/// not: attesting a claim nobody asked about is accepted and logged.
/// Both sets are written in the same invocation; atomicity comes from the
/// enclosing transaction.
///
/// # Errors
///
/// Returns `AttestError::NotFound` if `attester` has no request set.
pub fn create_attestation<L: Ledger + ?Sized>(
    ledger: &mut L,
    attester: &AttesterId,
    client: &IdentityId,
    claim: &str,
    claim_hash: &str,
) -> Result<()> {
    let requests_key = LedgerKey::requests(attester);
    let attestations_key = LedgerKey::attestations(attester);

    let mut requests: AttestationRequestSet = read_record(ledger, &requests_key)?
        .ok_or_else(|| {
            AttestError::NotFound(format!(
                "request of attestation not found for attester '{attester}'"
            ))
        })?;
    let mut attestations: AttestationSet =
        read_record(ledger, &attestations_key)?.unwrap_or_default();

    if let Some(previous) = attestations.upsert(client.clone(), claim, claim_hash) {
        log::debug!("re-attested {client}/{claim} at {attester} (was {previous})");
    }
    if requests.remove(client, claim).is_none() {
        log::warn!("attested {client}/{claim} at {attester} without a pending request");
    }

    write_record(ledger, &requests_key, &requests)?;
    write_record(ledger, &attestations_key, &attestations)?;
    log::debug!("attested {client}/{claim} at {attester}");
    Ok(())
}

/// List the pending requests addressed to `attester`.
pub fn query_requests<L: Ledger + ?Sized>(ledger: &L, attester: &AttesterId) -> Result<SetQuery> {
    let key = LedgerKey::requests(attester);
    let requests: Option<AttestationRequestSet> = read_record(ledger, &key)?;
    Ok(SetQuery::from_set(requests.as_ref()))
}

/// List the attestations issued by `attester`.
pub fn query_attestations<L: Ledger + ?Sized>(
    ledger: &L,
    attester: &AttesterId,
) -> Result<SetQuery> {
    let key = LedgerKey::attestations(attester);
    let attestations: Option<AttestationSet> = read_record(ledger, &key)?;
    Ok(SetQuery::from_set(attestations.as_ref()))
}
