//! Identity registry: create, query and remove identity records.
//!
//! An identity record lives under its own identifier. Absence is reported
//! as `AttestError::NotFound`, never as an empty record.

use crate::error::{AttestError, Result};
use crate::keys::LedgerKey;
use crate::ledger::{read_record, write_record, Ledger};
use crate::model::{IdentityId, IdentityRecord};
use crate::view::ClaimsView;

/// Register `id` with its full-name and document-id claims.
///
/// Writes unconditionally: an existing record at `id` is replaced,
/// including any credentials it had shared.
pub fn create_identity<L: Ledger + ?Sized>(
    ledger: &mut L,
    id: &IdentityId,
    fullname: &str,
    docid: &str,
) -> Result<()> {
    let key = LedgerKey::identity(id)?;
    let record = IdentityRecord::register(fullname, docid);
    write_record(ledger, &key, &record)?;
    log::debug!("registered identity {id}");
    Ok(())
}

/// Load the full record for `id`.
///
/// # Errors
///
/// Returns `AttestError::NotFound` if no record exists, or
/// `AttestError::SerializationError` if the stored record is malformed.
pub fn load_identity<L: Ledger + ?Sized>(ledger: &L, id: &IdentityId) -> Result<IdentityRecord> {
    let key = LedgerKey::existing_identity(id).ok_or_else(|| user_not_found(id))?;
    read_record(ledger, &key)?.ok_or_else(|| user_not_found(id))
}

/// Read-only projection of the claims of `id`. Shared credentials are
/// never included.
pub fn query_claims<L: Ledger + ?Sized>(ledger: &L, id: &IdentityId) -> Result<ClaimsView> {
    let record = load_identity(ledger, id)?;
    Ok(ClaimsView {
        user: id.clone(),
        claims: record.claims,
    })
}

/// Delete the identity record for `id`.
///
/// Only the identity key is removed; request and attestation sets that
/// mention `id` are left as they are.
///
/// # Errors
///
/// Returns `AttestError::NotFound` if no record exists.
pub fn remove_identity<L: Ledger + ?Sized>(ledger: &mut L, id: &IdentityId) -> Result<()> {
    let key = LedgerKey::existing_identity(id).ok_or_else(|| user_not_found(id))?;
    if ledger.get(key.as_str())?.is_none() {
        return Err(user_not_found(id));
    }
    ledger.delete(key.as_str())?;
    log::debug!("removed identity {id}");
    Ok(())
}

pub(crate) fn user_not_found(id: &IdentityId) -> AttestError {
    AttestError::NotFound(format!("user '{id}' does not exist"))
}
