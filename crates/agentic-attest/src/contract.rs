//! Transaction router: function name + positional string arguments to a
//! handler, run inside one [`Transaction`].
//!
//! | Function                  | Arguments                                           |
//! |---------------------------|-----------------------------------------------------|
//! | `createId`                | id, fullname, docId                                 |
//! | `queryClaimsById`         | id                                                  |
//! | `requestAttestation`      | attesterId, clientId, claimName, claimUrl           |
//! | `createAttestion`         | attesterId, clientId, claimName, claimHash          |
//! | `queryRequestAttestation` | attesterId                                          |
//! | `queryAttestation`        | attesterId                                          |
//! | `shareinfo`               | identityId, attesterId, claimName, token, validDay  |
//! | `removeUser`              | id                                                  |
//! | `initLedger`              | (none)                                              |
//!
//! Arity is checked before the ledger is touched. A handler error discards
//! the transaction, so a failed invocation never leaves partial writes.

use crate::error::{AttestError, Result};
use crate::ledger::{Commit, Ledger, Transaction};
use crate::model::{AttesterId, IdentityId};
use crate::view::to_payload;
use crate::{registry, seed, sharing, workflow};

/// The functions of the transaction surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    CreateId,
    QueryClaimsById,
    RequestAttestation,
    CreateAttestation,
    QueryRequestAttestation,
    QueryAttestation,
    ShareInfo,
    RemoveUser,
    InitLedger,
}

impl Function {
    pub const ALL: [Function; 9] = [
        Function::CreateId,
        Function::QueryClaimsById,
        Function::RequestAttestation,
        Function::CreateAttestation,
        Function::QueryRequestAttestation,
        Function::QueryAttestation,
        Function::ShareInfo,
        Function::RemoveUser,
        Function::InitLedger,
    ];

    /// Wire name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateId => "createId",
            Self::QueryClaimsById => "queryClaimsById",
            Self::RequestAttestation => "requestAttestation",
            Self::CreateAttestation => "createAttestion",
            Self::QueryRequestAttestation => "queryRequestAttestation",
            Self::QueryAttestation => "queryAttestation",
            Self::ShareInfo => "shareinfo",
            Self::RemoveUser => "removeUser",
            Self::InitLedger => "initLedger",
        }
    }

    /// Positional parameter names.
    pub fn params(&self) -> &'static [&'static str] {
        match self {
            Self::CreateId => &["id", "fullname", "docId"],
            Self::QueryClaimsById | Self::RemoveUser => &["id"],
            Self::RequestAttestation => &["attesterId", "clientId", "claimName", "claimUrl"],
            Self::CreateAttestation => &["attesterId", "clientId", "claimName", "claimHash"],
            Self::QueryRequestAttestation | Self::QueryAttestation => &["attesterId"],
            Self::ShareInfo => &["identityId", "attesterId", "claimName", "token", "validDay"],
            Self::InitLedger => &[],
        }
    }

    pub fn arity(&self) -> usize {
        self.params().len()
    }

    /// `true` for functions that never write.
    pub fn is_query(&self) -> bool {
        matches!(
            self,
            Self::QueryClaimsById | Self::QueryRequestAttestation | Self::QueryAttestation
        )
    }

    /// Resolve a wire name.
    ///
    /// # Errors
    ///
    /// Returns `AttestError::UnknownFunction` for any other name.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| AttestError::UnknownFunction(name.to_string()))
    }

    fn check_arity(&self, actual: usize) -> Result<()> {
        let expected = self.arity();
        if actual != expected {
            return Err(AttestError::ArgumentCount { expected, actual });
        }
        Ok(())
    }
}

impl std::fmt::Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Router configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContractConfig {
    /// Allow `initLedger` to write the demo identities.
    pub demo_seed: bool,
}

/// Result of a routed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// JSON payload; empty for calls that return nothing.
    pub payload: Vec<u8>,
    /// Present when the call's writes were committed.
    pub commit: Option<Commit>,
}

impl Response {
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Payload as text (lossy).
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }

    /// Payload parsed as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        serde_json::from_slice(&self.payload)
            .map_err(|e| AttestError::SerializationError(e.to_string()))
    }
}

/// Routes surface calls to the registry, workflow and sharing handlers.
#[derive(Debug, Clone, Default)]
pub struct Contract {
    config: ContractConfig,
}

impl Contract {
    pub fn new(config: ContractConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    /// Run `name(args)` as a transaction and commit its writes.
    ///
    /// # Errors
    ///
    /// `UnknownFunction` and `ArgumentCount` are raised before the ledger
    /// is read. Handler errors discard the transaction.
    pub fn invoke<L, S>(&self, ledger: &mut L, name: &str, args: &[S]) -> Result<Response>
    where
        L: Ledger + ?Sized,
        S: AsRef<str>,
    {
        let function = self.resolve(name, args.len())?;
        let mut tx = Transaction::new(ledger);
        let payload = match self.dispatch(&mut tx, function, args) {
            Ok(payload) => payload,
            Err(e) => {
                log::debug!("{function} failed: {e}");
                tx.discard();
                return Err(e);
            }
        };
        let commit = tx.commit()?;
        Ok(Response {
            payload,
            commit: Some(commit),
        })
    }

    /// Run `name(args)` and discard any writes (query semantics).
    pub fn evaluate<L, S>(&self, ledger: &mut L, name: &str, args: &[S]) -> Result<Response>
    where
        L: Ledger + ?Sized,
        S: AsRef<str>,
    {
        let function = self.resolve(name, args.len())?;
        let mut tx = Transaction::new(ledger);
        let payload = self.dispatch(&mut tx, function, args);
        tx.discard();
        Ok(Response {
            payload: payload?,
            commit: None,
        })
    }

    fn resolve(&self, name: &str, arg_count: usize) -> Result<Function> {
        let function = Function::from_name(name)?;
        function.check_arity(arg_count)?;
        if function == Function::InitLedger && !self.config.demo_seed {
            return Err(AttestError::InvalidArgument(
                "demo seeding is disabled".to_string(),
            ));
        }
        Ok(function)
    }

    fn dispatch<L, S>(&self, ledger: &mut L, function: Function, args: &[S]) -> Result<Vec<u8>>
    where
        L: Ledger + ?Sized,
        S: AsRef<str>,
    {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        let arg = |i: usize| args[i];
        log::debug!("dispatch {function} ({} args)", args.len());

        match function {
            Function::CreateId => {
                registry::create_identity(ledger, &IdentityId::new(arg(0)), arg(1), arg(2))?;
                Ok(Vec::new())
            }
            Function::QueryClaimsById => {
                let view = registry::query_claims(ledger, &IdentityId::new(arg(0)))?;
                to_payload(&view)
            }
            Function::RequestAttestation => {
                workflow::request_attestation(
                    ledger,
                    &AttesterId::new(arg(0)),
                    &IdentityId::new(arg(1)),
                    arg(2),
                    arg(3),
                )?;
                Ok(Vec::new())
            }
            Function::CreateAttestation => {
                workflow::create_attestation(
                    ledger,
                    &AttesterId::new(arg(0)),
                    &IdentityId::new(arg(1)),
                    arg(2),
                    arg(3),
                )?;
                Ok(Vec::new())
            }
            Function::QueryRequestAttestation => {
                let query = workflow::query_requests(ledger, &AttesterId::new(arg(0)))?;
                to_payload(&query)
            }
            Function::QueryAttestation => {
                let query = workflow::query_attestations(ledger, &AttesterId::new(arg(0)))?;
                to_payload(&query)
            }
            Function::ShareInfo => {
                let valid_days = sharing::parse_valid_days(arg(4))?;
                sharing::share_info(
                    ledger,
                    &IdentityId::new(arg(0)),
                    &AttesterId::new(arg(1)),
                    arg(2),
                    arg(3),
                    valid_days,
                )?;
                Ok(Vec::new())
            }
            Function::RemoveUser => {
                registry::remove_identity(ledger, &IdentityId::new(arg(0)))?;
                Ok(Vec::new())
            }
            Function::InitLedger => {
                seed::seed_ledger(ledger, &mut rand::thread_rng())?;
                Ok(Vec::new())
            }
        }
    }
}
