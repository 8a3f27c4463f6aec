//! One-way hash engines applied to `salt ‖ utf8(credential)`.
//!
//! The SHA-2 engines are a single fast pass with no iteration or truncation.
//! `Argon2idEngine` is the memory-hard alternative behind the same interface;
//! its parameters are fixed so that an algorithm id always names one exact
//! computation.

use std::marker::PhantomData;

use argon2::{Algorithm, Argon2, Params, Version};
use sha2::{Digest, Sha256, Sha512};

use crate::error::CredentialError;

/// Deterministic one-way transform over (salt, credential).
pub trait HashEngine: Send + Sync {
    /// Output length in bytes; constant for a given engine.
    fn digest_len(&self) -> usize;

    /// Hashes the salt followed by the UTF-8 bytes of `credential`.
    fn hash(&self, salt: &[u8], credential: &str) -> Result<Vec<u8>, CredentialError>;
}

/// Single-pass SHA-2 family engine.
pub struct ShaEngine<D>(PhantomData<fn() -> D>);

pub type Sha256Engine = ShaEngine<Sha256>;
pub type Sha512Engine = ShaEngine<Sha512>;

impl<D> ShaEngine<D> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<D> Default for ShaEngine<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Digest> HashEngine for ShaEngine<D> {
    fn digest_len(&self) -> usize {
        <D as Digest>::output_size()
    }

    fn hash(&self, salt: &[u8], credential: &str) -> Result<Vec<u8>, CredentialError> {
        let mut hasher = D::new();
        hasher.update(salt);
        hasher.update(credential.as_bytes());
        Ok(hasher.finalize().to_vec())
    }
}

/// Interactive-login profile: 19 MiB, 3 passes, a single lane.
const ARGON2_MEMORY_COST_KIB: u32 = 19 * 1024;
const ARGON2_TIME_COST: u32 = 3;
const ARGON2_PARALLELISM: u32 = 1;
const ARGON2_OUTPUT_LEN: usize = 32;

/// Argon2id with fixed parameters. Requires a salt of at least 8 bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2idEngine;

impl Argon2idEngine {
    fn argon2() -> Result<Argon2<'static>, CredentialError> {
        let params = Params::new(
            ARGON2_MEMORY_COST_KIB,
            ARGON2_TIME_COST,
            ARGON2_PARALLELISM,
            Some(ARGON2_OUTPUT_LEN),
        )
        .map_err(|e| CredentialError::HashingFailed(format!("{e}")))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl HashEngine for Argon2idEngine {
    fn digest_len(&self) -> usize {
        ARGON2_OUTPUT_LEN
    }

    fn hash(&self, salt: &[u8], credential: &str) -> Result<Vec<u8>, CredentialError> {
        let mut output = vec![0u8; ARGON2_OUTPUT_LEN];
        Self::argon2()?
            .hash_password_into(credential.as_bytes(), salt, &mut output)
            .map_err(|e| CredentialError::HashingFailed(format!("{e}")))?;
        Ok(output)
    }
}
