//! AgenticAttest: identity claims and third-party attestations on a
//! shared ledger.
//!
//! Identities register a small set of claims, share claims with attesters
//! under a token and validity period, and ask attesters to vouch for a
//! claim. Attesters answer pending requests by publishing a hash. Every
//! operation is a transaction over a key-value [`Ledger`], routed by
//! function name through [`Contract`].

pub mod contract;
pub mod error;
pub mod keys;
pub mod ledger;
pub mod model;
pub mod registry;
pub mod seed;
pub mod sharing;
pub mod view;
pub mod workflow;

// Re-export primary types
pub use contract::{Contract, ContractConfig, Function, Response};
pub use error::{AttestError, Result};
pub use keys::{EntityKind, LedgerKey};
pub use ledger::{Commit, FileLedger, Ledger, MemoryLedger, Transaction, WriteSet};
pub use view::{ClaimsView, SetQuery, NO_DATA_MESSAGE};

// Re-export model types
pub use model::{
    AttestationRequestSet, AttestationSet, AttesterId, ClaimSet, Credential, IdentityId,
    IdentityRecord, PairMap, CLAIM_DOCID, CLAIM_FULLNAME,
};
