//! Record model: the values stored under each ledger key.

pub mod claim_set;
pub mod identity;
pub mod ids;
pub mod pair_map;

pub use claim_set::{AttestationRequestSet, AttestationSet, ClaimSet};
pub use identity::{Credential, IdentityRecord, CLAIM_DOCID, CLAIM_FULLNAME};
pub use ids::{AttesterId, IdentityId};
pub use pair_map::PairMap;
