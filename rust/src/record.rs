//! The persisted credential artifact: algorithm tag, encoded salt, encoded
//! hash. Records are immutable values; rotating a password means enrolling a
//! new record, never editing an existing one.

use serde::{Deserialize, Serialize};

use crate::algorithm::AlgorithmId;
use crate::crypto::encoding;
use crate::error::RecordError;

/// Maps onto three columns of an external store. Fields stay private so a
/// record can only be built by enrollment, `parse`, or deserialization.
///
/// Records written before algorithm tagging existed deserialize with an
/// empty `algorithm_id` and are rejected as unsupported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    #[serde(default)]
    algorithm_id: String,
    salt_encoded: String,
    hash_encoded: String,
}

/// Raw material recovered from a validated record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRecord {
    pub algorithm: AlgorithmId,
    pub salt: Vec<u8>,
    pub hash: Vec<u8>,
}

impl CredentialRecord {
    /// Encodes freshly computed salt and hash bytes into a record.
    pub fn new(algorithm: AlgorithmId, salt: &[u8], hash: &[u8]) -> Self {
        Self {
            algorithm_id: algorithm.as_str().to_string(),
            salt_encoded: encoding::encode(salt),
            hash_encoded: encoding::encode(hash),
        }
    }

    /// Builds a record from stored columns, rejecting it unless both fields
    /// decode to exactly the lengths the algorithm mandates.
    pub fn parse(
        algorithm_id: &str,
        salt_encoded: &str,
        hash_encoded: &str,
    ) -> Result<Self, RecordError> {
        let record = Self {
            algorithm_id: algorithm_id.to_string(),
            salt_encoded: salt_encoded.to_string(),
            hash_encoded: hash_encoded.to_string(),
        };
        record.decode()?;
        Ok(record)
    }

    pub fn algorithm_id(&self) -> &str {
        &self.algorithm_id
    }

    pub fn salt_encoded(&self) -> &str {
        &self.salt_encoded
    }

    pub fn hash_encoded(&self) -> &str {
        &self.hash_encoded
    }

    pub fn algorithm(&self) -> Result<AlgorithmId, RecordError> {
        self.algorithm_id.parse()
    }

    /// Validates the record and returns its raw bytes. Called on every
    /// verification since deserialized records skip `parse`.
    pub fn decode(&self) -> Result<DecodedRecord, RecordError> {
        let algorithm = self.algorithm()?;
        let salt = decode_exact("salt", &self.salt_encoded, algorithm.salt_len())?;
        let hash = decode_exact("hash", &self.hash_encoded, algorithm.digest_len())?;
        Ok(DecodedRecord {
            algorithm,
            salt,
            hash,
        })
    }
}

fn decode_exact(field: &'static str, text: &str, expected: usize) -> Result<Vec<u8>, RecordError> {
    let bytes = encoding::decode(field, text)?;
    if bytes.len() != expected {
        return Err(RecordError::LengthMismatch {
            field,
            expected,
            actual: bytes.len(),
        });
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::CredentialRecord;
    use crate::algorithm::AlgorithmId;
    use crate::crypto::encoding::encode;
    use crate::error::RecordError;

    fn sample(algorithm: AlgorithmId) -> CredentialRecord {
        CredentialRecord::new(algorithm, &[3u8; 16], &vec![9u8; algorithm.digest_len()])
    }

    #[test]
    fn new_record_decodes_back() {
        for algorithm in AlgorithmId::ALL {
            let record = sample(algorithm);
            assert_eq!(record.algorithm_id(), algorithm.as_str());
            let decoded = record.decode().expect("valid record");
            assert_eq!(decoded.algorithm, algorithm);
            assert_eq!(decoded.salt, vec![3u8; 16]);
            assert_eq!(decoded.hash, vec![9u8; algorithm.digest_len()]);
        }
    }

    #[test]
    fn parse_accepts_valid_columns() {
        let original = sample(AlgorithmId::Sha512V1);
        let parsed = CredentialRecord::parse(
            original.algorithm_id(),
            original.salt_encoded(),
            original.hash_encoded(),
        )
        .expect("valid");
        assert_eq!(parsed, original);
    }

    #[test]
    fn parse_rejects_short_salt() {
        let err = CredentialRecord::parse("sha256-v1", &encode(&[1u8; 15]), &encode(&[0u8; 32]))
            .unwrap_err();
        assert_eq!(
            err,
            RecordError::LengthMismatch {
                field: "salt",
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn parse_rejects_hash_sized_for_other_algorithm() {
        // A 512-bit digest under a 256-bit tag is corrupt, never truncated.
        let err = CredentialRecord::parse("sha256-v1", &encode(&[1u8; 16]), &encode(&[0u8; 64]))
            .unwrap_err();
        assert!(matches!(
            err,
            RecordError::LengthMismatch {
                field: "hash",
                expected: 32,
                actual: 64
            }
        ));
    }

    #[test]
    fn parse_rejects_bad_encoding_and_unknown_algorithm() {
        let err = CredentialRecord::parse("sha256-v1", "@@@@", &encode(&[0u8; 32])).unwrap_err();
        assert!(matches!(err, RecordError::MalformedEncoding { field: "salt", .. }));

        let err = CredentialRecord::parse("md5", &encode(&[1u8; 16]), &encode(&[0u8; 16]))
            .unwrap_err();
        assert_eq!(err, RecordError::UnsupportedAlgorithmId("md5".to_string()));
    }

    #[test]
    fn serializes_as_three_fields() {
        let record = sample(AlgorithmId::Sha256V1);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["algorithm_id"], "sha256-v1");
        assert_eq!(value["salt_encoded"], record.salt_encoded());
        assert_eq!(value["hash_encoded"], record.hash_encoded());

        let back: CredentialRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn untagged_legacy_record_is_unsupported() {
        let json = format!(
            r#"{{"salt_encoded":"{}","hash_encoded":"{}"}}"#,
            encode(&[1u8; 16]),
            encode(&[2u8; 32])
        );
        let record: CredentialRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record.algorithm_id(), "");
        assert_eq!(
            record.decode().unwrap_err(),
            RecordError::UnsupportedAlgorithmId(String::new())
        );
    }
}
