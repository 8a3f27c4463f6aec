//! Algorithm identifiers stored alongside every credential record.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::crypto::engine::{Argon2idEngine, HashEngine, Sha256Engine, Sha512Engine};
use crate::crypto::salt::DEFAULT_SALT_LEN;
use crate::error::RecordError;

static SHA256_ENGINE: Sha256Engine = Sha256Engine::new();
static SHA512_ENGINE: Sha512Engine = Sha512Engine::new();
static ARGON2ID_ENGINE: Argon2idEngine = Argon2idEngine;

/// Names one exact (hash function, salt length, digest length) combination.
/// Identifiers are never reused for different parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlgorithmId {
    #[default]
    Sha256V1,
    Sha512V1,
    Argon2idV1,
}

impl AlgorithmId {
    pub const ALL: [AlgorithmId; 3] = [
        AlgorithmId::Sha256V1,
        AlgorithmId::Sha512V1,
        AlgorithmId::Argon2idV1,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmId::Sha256V1 => "sha256-v1",
            AlgorithmId::Sha512V1 => "sha512-v1",
            AlgorithmId::Argon2idV1 => "argon2id-v1",
        }
    }

    pub fn salt_len(&self) -> usize {
        DEFAULT_SALT_LEN
    }

    pub fn digest_len(&self) -> usize {
        self.engine().digest_len()
    }

    pub fn engine(&self) -> &'static dyn HashEngine {
        match self {
            AlgorithmId::Sha256V1 => &SHA256_ENGINE,
            AlgorithmId::Sha512V1 => &SHA512_ENGINE,
            AlgorithmId::Argon2idV1 => &ARGON2ID_ENGINE,
        }
    }
}

impl Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmId {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AlgorithmId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| RecordError::UnsupportedAlgorithmId(s.to_string()))
    }
}

impl Serialize for AlgorithmId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AlgorithmId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
