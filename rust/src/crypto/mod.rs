//! Cryptographic building blocks: salt generation, the hash engines, the
//! storage codec, and constant-time comparison. Each submodule does one job
//! so the security-relevant surface stays small and auditable.

pub mod compare;
pub mod encoding;
pub mod engine;
pub mod salt;
