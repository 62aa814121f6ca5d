//! Demo seed data.
//!
//! Not part of the transaction surface proper: the router only dispatches
//! `initLedger` when demo seeding is switched on, and the random source is
//! always supplied by the caller. Nothing on the regular transaction path
//! draws randomness.

use rand::RngCore;

use crate::error::Result;
use crate::keys::LedgerKey;
use crate::ledger::{write_record, Ledger};
use crate::model::{AttesterId, Credential, IdentityId, IdentityRecord, CLAIM_FULLNAME};

/// Number of identities written by [`seed_ledger`].
pub const SEED_IDENTITIES: usize = 9;

/// The demo attesters and the credential each receives for the full-name
/// claim: `(attester, token, valid days)`.
pub const DEMO_GRANTS: [(&str, &str, u32); 2] =
    [("GOOGLE", "token1", 30), ("FACEBOOK", "token2", 60)];

/// 16 random bytes as upper-case hex.
pub fn pseudo_uuid<R: RngCore + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    hex::encode_upper(bytes)
}

/// Write the demo identities `ID1` ..= `ID9`.
///
/// Each gets `fullname = name{i}`, a random `docid`, and the
/// [`DEMO_GRANTS`] credentials for its full-name claim. Existing records
/// with those ids are replaced. Returns the ids written.
pub fn seed_ledger<L, R>(ledger: &mut L, rng: &mut R) -> Result<Vec<IdentityId>>
where
    L: Ledger + ?Sized,
    R: RngCore + ?Sized,
{
    let mut ids = Vec::with_capacity(SEED_IDENTITIES);

    for i in 1..=SEED_IDENTITIES {
        let id = IdentityId::new(format!("ID{i}"));
        let mut record = IdentityRecord::register(format!("name{i}"), pseudo_uuid(rng));
        for (attester, token, days) in DEMO_GRANTS {
            record.share(
                AttesterId::new(attester),
                CLAIM_FULLNAME,
                Credential::new(token, days),
            );
        }

        write_record(ledger, &LedgerKey::identity(&id)?, &record)?;
        ids.push(id);
    }

    log::info!("seeded {} demo identities", ids.len());
    Ok(ids)
}
