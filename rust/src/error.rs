//! Closed error taxonomy for enrollment and record handling.

use thiserror::Error;

/// The stored record itself is unusable. Verification reports these as a
/// failed match while keeping the kind visible for operators.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("malformed {field} encoding: {reason}")]
    MalformedEncoding { field: &'static str, reason: String },
    #[error("{field} length mismatch; expected {expected} bytes, got {actual}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("unsupported algorithm id {0:?}")]
    UnsupportedAlgorithmId(String),
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("entropy source unavailable: {0}")]
    EntropyUnavailable(String),
    #[error("salt length must be greater than zero")]
    InvalidSaltLength,
    #[error("hashing failed: {0}")]
    HashingFailed(String),
    #[error(transparent)]
    Record(#[from] RecordError),
}
