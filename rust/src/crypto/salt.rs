//! Salt generation backed by the operating system's CSPRNG.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::CredentialError;

/// Default raw salt length for every built-in algorithm.
pub const DEFAULT_SALT_LEN: usize = 16;

/// Source of unpredictable salt bytes.
pub trait SaltSource: Send + Sync {
    /// Returns exactly `len` fresh bytes or fails; never a weaker fallback.
    fn generate(&self, len: usize) -> Result<Vec<u8>, CredentialError>;
}

/// Reads salt directly from the OS entropy pool through `OsRng`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsSaltSource;

impl SaltSource for OsSaltSource {
    fn generate(&self, len: usize) -> Result<Vec<u8>, CredentialError> {
        if len == 0 {
            return Err(CredentialError::InvalidSaltLength);
        }
        let mut salt = vec![0u8; len];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| CredentialError::EntropyUnavailable(format!("{e}")))?;
        Ok(salt)
    }
}
