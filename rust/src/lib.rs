//! Salted credential hashing and verification.
//!
//! A plaintext credential is never stored. Enrollment draws a fresh salt from
//! the OS, hashes `salt ‖ credential` under the configured algorithm, and
//! returns a [`CredentialRecord`] holding the algorithm tag plus the encoded
//! salt and hash. Verification recomputes the hash and compares it in
//! constant time.
//!
//! ```
//! use saltpass_rs::{CredentialService, ServiceConfig};
//!
//! let service = CredentialService::new(ServiceConfig::default());
//! let record = service.enroll("Tr0ub4dor&3").unwrap();
//! assert!(service.verify("Tr0ub4dor&3", &record));
//! assert!(!service.verify("tr0ub4dor&3", &record));
//! ```

pub mod algorithm;
pub mod config;
pub mod crypto;
pub mod error;
pub mod record;
pub mod service;

pub use algorithm::AlgorithmId;
pub use config::{ConfigError, ServiceConfig};
pub use error::{CredentialError, RecordError};
pub use record::CredentialRecord;
pub use service::{CredentialService, Verification};
