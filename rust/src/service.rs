//! Enrollment and verification. Both operations are stateless with respect
//! to the service, so one instance can be shared across threads freely.

use std::hint::black_box;

use crate::algorithm::AlgorithmId;
use crate::config::ServiceConfig;
use crate::crypto::compare::constant_time_eq;
use crate::crypto::salt::{OsSaltSource, SaltSource};
use crate::error::{CredentialError, RecordError};
use crate::record::CredentialRecord;

/// Detailed verification outcome. Callers deciding access only look at
/// `is_match`; the other variants exist for operators and migration tooling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Match,
    Mismatch,
    /// The stored record failed to decode or had the wrong lengths.
    Corrupt(RecordError),
    /// The record names an unknown or retired algorithm.
    Unsupported(String),
    HashingFailed(String),
}

impl Verification {
    pub fn is_match(&self) -> bool {
        matches!(self, Verification::Match)
    }
}

pub struct CredentialService {
    config: ServiceConfig,
    salt_source: Box<dyn SaltSource>,
}

impl CredentialService {
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_salt_source(config, OsSaltSource)
    }

    pub fn with_salt_source(config: ServiceConfig, salt_source: impl SaltSource + 'static) -> Self {
        Self {
            config,
            salt_source: Box::new(salt_source),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn current_algorithm(&self) -> AlgorithmId {
        self.config.current_algorithm
    }

    /// Produces a brand-new record with a fresh salt. Entropy failures abort
    /// the enrollment; there is no unsalted or weaker fallback.
    pub fn enroll(&self, plaintext: &str) -> Result<CredentialRecord, CredentialError> {
        let algorithm = self.current_algorithm();
        let salt = match self.salt_source.generate(algorithm.salt_len()) {
            Ok(salt) => salt,
            Err(err) => {
                tracing::error!(algorithm = %algorithm, error = %err, "salt generation failed");
                return Err(err);
            }
        };
        if salt.len() != algorithm.salt_len() {
            return Err(CredentialError::EntropyUnavailable(format!(
                "salt source returned {} bytes, expected {}",
                salt.len(),
                algorithm.salt_len()
            )));
        }

        let hash = algorithm.engine().hash(&salt, plaintext)?;
        tracing::debug!(algorithm = %algorithm, "credential enrolled");
        Ok(CredentialRecord::new(algorithm, &salt, &hash))
    }

    /// Returns `true` only when `plaintext` matches `record`. Corrupt or
    /// unsupported records are rejected and reported through logging.
    pub fn verify(&self, plaintext: &str, record: &CredentialRecord) -> bool {
        self.verify_detailed(plaintext, record).is_match()
    }

    pub fn verify_detailed(&self, plaintext: &str, record: &CredentialRecord) -> Verification {
        let decoded = match record.decode() {
            Ok(decoded) => decoded,
            Err(err) => {
                self.equalize_rejection(plaintext);
                return self.reject(record, err);
            }
        };

        if self.config.is_retired(decoded.algorithm) {
            self.equalize_rejection(plaintext);
            return self.reject(
                record,
                RecordError::UnsupportedAlgorithmId(decoded.algorithm.as_str().to_string()),
            );
        }

        let candidate = match decoded.algorithm.engine().hash(&decoded.salt, plaintext) {
            Ok(candidate) => candidate,
            Err(err) => {
                tracing::warn!(algorithm = %decoded.algorithm, error = %err, "verification hash failed");
                return Verification::HashingFailed(format!("{err}"));
            }
        };

        if constant_time_eq(&candidate, &decoded.hash) {
            Verification::Match
        } else {
            Verification::Mismatch
        }
    }

    /// True when the record should be re-enrolled under the current
    /// algorithm after the next successful verification.
    pub fn needs_rehash(&self, record: &CredentialRecord) -> bool {
        match record.algorithm() {
            Ok(algorithm) => algorithm != self.current_algorithm(),
            Err(_) => true,
        }
    }

    fn reject(&self, record: &CredentialRecord, err: RecordError) -> Verification {
        match err {
            RecordError::UnsupportedAlgorithmId(id) => {
                tracing::warn!(algorithm_id = %id, "record uses unsupported algorithm");
                Verification::Unsupported(id)
            }
            err => {
                tracing::warn!(
                    algorithm_id = %record.algorithm_id(),
                    error = %err,
                    "corrupt credential record"
                );
                Verification::Corrupt(err)
            }
        }
    }

    // Runs the same hash and comparison a mismatch would, so rejecting a bad
    // record costs about as much as rejecting a wrong password.
    fn equalize_rejection(&self, plaintext: &str) {
        let algorithm = self.current_algorithm();
        let dummy_salt = vec![0u8; algorithm.salt_len()];
        if let Ok(candidate) = algorithm.engine().hash(&dummy_salt, plaintext) {
            let expected = vec![0u8; candidate.len()];
            black_box(constant_time_eq(&candidate, &expected));
        }
    }
}

impl Default for CredentialService {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}
