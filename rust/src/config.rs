//! Service policy loaded from a small JSON document. The policy is injected
//! into `CredentialService`; nothing here is global.

use std::env::VarError;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::algorithm::AlgorithmId;

/// Environment variable naming the JSON config file.
pub const CONFIG_ENV_VAR: &str = "SALTPASS_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file unreadable: {0}")]
    Io(String),
    #[error("config parse failed: {0}")]
    Parse(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ServiceConfig {
    /// Algorithm used for every new enrollment.
    #[serde(default)]
    pub current_algorithm: AlgorithmId,
    /// Algorithms whose records must no longer verify.
    #[serde(default)]
    pub retired_algorithms: Vec<AlgorithmId>,
}

impl ServiceConfig {
    pub fn new(current_algorithm: AlgorithmId) -> Self {
        Self {
            current_algorithm,
            retired_algorithms: Vec::new(),
        }
    }

    pub fn with_retired(mut self, algorithm: AlgorithmId) -> Self {
        if !self.retired_algorithms.contains(&algorithm) {
            self.retired_algorithms.push(algorithm);
        }
        self
    }

    pub fn is_retired(&self, algorithm: AlgorithmId) -> bool {
        self.retired_algorithms.contains(&algorithm)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.is_retired(self.current_algorithm) {
            return Err(ConfigError::Invalid(format!(
                "current algorithm {} is listed as retired",
                self.current_algorithm
            )));
        }
        Ok(())
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: ServiceConfig =
            serde_json::from_str(raw).map_err(|e| ConfigError::Parse(format!("{e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(&path).map_err(|e| ConfigError::Io(format!("{e}")))?;
        Self::from_json(&raw)
    }

    /// Loads from the file named by `SALTPASS_CONFIG`, or defaults when the
    /// variable is unset. A set but unreadable variable is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_value(std::env::var(CONFIG_ENV_VAR))
    }

    fn from_env_value(value: Result<String, VarError>) -> Result<Self, ConfigError> {
        match value {
            Ok(path) => Self::load(path),
            Err(VarError::NotPresent) => Ok(Self::default()),
            Err(e) => Err(ConfigError::Io(format!("{CONFIG_ENV_VAR}: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ServiceConfig};
    use crate::algorithm::AlgorithmId;
    use std::env::VarError;
    use std::ffi::OsString;
    use std::fs;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_to_sha256_with_nothing_retired() {
        let config = ServiceConfig::from_json("{}").expect("empty object is valid");
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.current_algorithm, AlgorithmId::Sha256V1);
        assert!(config.retired_algorithms.is_empty());
    }

    #[test]
    fn loads_policy_from_file() {
        let file = NamedTempFile::new().expect("temp file");
        fs::write(
            file.path(),
            r#"{"currentAlgorithm":"argon2id-v1","retiredAlgorithms":["sha512-v1"]}"#,
        )
        .unwrap();

        let config = ServiceConfig::load(file.path()).expect("config should load");
        assert_eq!(config.current_algorithm, AlgorithmId::Argon2idV1);
        assert!(config.is_retired(AlgorithmId::Sha512V1));
        assert!(!config.is_retired(AlgorithmId::Sha256V1));
    }

    #[test]
    fn rejects_retiring_the_current_algorithm() {
        let err = ServiceConfig::from_json(
            r#"{"currentAlgorithm":"sha256-v1","retiredAlgorithms":["sha256-v1"]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_unknown_algorithm_and_fields() {
        assert!(matches!(
            ServiceConfig::from_json(r#"{"currentAlgorithm":"md5"}"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            ServiceConfig::from_json(r#"{"workFactor":12}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = ServiceConfig::load(dir.path().join("absent.json")).unwrap_err();
        assert!(format!("{err}").contains("config file unreadable"));
    }

    #[test]
    fn unset_env_var_falls_back_to_defaults() {
        let config = ServiceConfig::from_env_value(Err(VarError::NotPresent)).expect("defaults");
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn non_unicode_env_var_is_an_error() {
        let raw = OsString::from("not-utf8");
        let err = ServiceConfig::from_env_value(Err(VarError::NotUnicode(raw))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(ref msg) if msg.contains("SALTPASS_CONFIG")));
    }

    #[test]
    fn env_var_path_is_loaded() {
        let file = NamedTempFile::new().expect("temp file");
        fs::write(file.path(), r#"{"retiredAlgorithms":["argon2id-v1"]}"#).unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let config = ServiceConfig::from_env_value(Ok(path)).expect("config should load");
        assert!(config.is_retired(AlgorithmId::Argon2idV1));
    }
}
