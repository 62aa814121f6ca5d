//! Error types for AgenticAttest.
//!
//! Every failure on the transaction path is returned to the caller as an
//! `AttestError`; nothing is retried or swallowed inside the core.

/// Attestation error types covering all operations.
#[derive(Debug, thiserror::Error)]
pub enum AttestError {
    #[error("Incorrect number of arguments. Expecting {expected}, got {actual}")]
    ArgumentCount { expected: usize, actual: usize },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid number for {field}: '{value}'")]
    Parse { field: &'static str, value: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid function name: {0}")]
    UnknownFunction(String),

    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AttestError {
    /// Return `true` for the not-found family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AttestError::NotFound(_))
    }
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, AttestError>;
