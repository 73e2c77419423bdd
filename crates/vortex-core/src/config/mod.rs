//! Configuration types for the Vortex SDK.
//!
//! Configuration is loaded from a single YAML file (`vortex.yaml`). Every
//! field has a default, so an empty file (or no file at all) yields a working
//! configuration that reads the API credential from `VORTEX_API_KEY`.
//!
//! ```yaml
//! api:
//!   base_url: https://api.vortexsoftware.com
//!   timeout_secs: 30
//! credential:
//!   api_key_env: VORTEX_API_KEY
//!   api_key_file: ./secrets/vortex.key
//! ```

pub mod api;
pub mod credential;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use api::ApiConfig;
pub use credential::CredentialConfig;

/// Complete Vortex configuration loaded from a file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VortexConfig {
    /// Invitation service connection settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Where the API credential comes from.
    #[serde(default)]
    pub credential: CredentialConfig,
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl VortexConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // serde_yaml rejects an empty document; treat it as all defaults
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Config(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Config("api.base_url must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = VortexConfig::from_yaml("").unwrap();
        assert_eq!(config.api.base_url, api::DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout_secs, api::DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.credential.api_key_env.as_deref(), Some("VORTEX_API_KEY"));
        assert!(config.credential.api_key_file.is_none());
    }

    #[test]
    fn test_partial_yaml() {
        let config = VortexConfig::from_yaml(
            r#"
api:
  base_url: https://staging.example.com
"#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://staging.example.com");
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = VortexConfig::from_yaml("api:\n  timeout_secs: 0\n");
        assert!(matches!(result, Err(ConfigError::Config(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "credential:\n  api_key_file: /tmp/vortex.key").unwrap();

        let config = VortexConfig::from_file(file.path()).unwrap();
        assert_eq!(
            config.credential.api_key_file.as_deref(),
            Some(Path::new("/tmp/vortex.key"))
        );
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = VortexConfig::load_or_default(dir.path().join("vortex.yaml")).unwrap();
        assert_eq!(config.api.base_url, api::DEFAULT_BASE_URL);
    }
}
