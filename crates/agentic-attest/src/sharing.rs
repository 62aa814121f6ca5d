//! Credential sharing: grant an attester token-gated access to one claim.

use crate::error::{AttestError, Result};
use crate::keys::LedgerKey;
use crate::ledger::{write_record, Ledger};
use crate::model::{AttesterId, Credential, IdentityId};
use crate::registry::load_identity;

/// Parse a validity period given as a decimal string of days.
///
/// # Errors
///
/// Returns `AttestError::InvalidArgument` for a negative number, and
/// `AttestError::Parse` for anything else that is not a `u32`.
pub fn parse_valid_days(raw: &str) -> Result<u32> {
    if let Ok(days) = raw.parse::<i64>() {
        if days < 0 {
            return Err(AttestError::InvalidArgument(format!(
                "validDay must be non-negative, got {days}"
            )));
        }
    }
    raw.parse::<u32>().map_err(|_| AttestError::Parse {
        field: "validDay",
        value: raw.to_string(),
    })
}

/// Record that `identity` shares `claim` with `attester` under `token`,
/// valid for `valid_days` days.
///
/// A second share for the same `(attester, claim)` replaces the credential;
/// shares for other claims are untouched.
///
/// # Errors
///
/// Returns `AttestError::NotFound` if `identity` is not registered.
pub fn share_info<L: Ledger + ?Sized>(
    ledger: &mut L,
    identity: &IdentityId,
    attester: &AttesterId,
    claim: &str,
    token: &str,
    valid_days: u32,
) -> Result<()> {
    let mut record = load_identity(ledger, identity)?;
    let replaced = record
        .share(attester.clone(), claim, Credential::new(token, valid_days))
        .is_some();

    let key = LedgerKey::identity(identity)?;
    write_record(ledger, &key, &record)?;
    log::debug!(
        "{} credential {identity}/{claim} for {attester} ({valid_days} days)",
        if replaced { "replaced" } else { "shared" }
    );
    Ok(())
}
