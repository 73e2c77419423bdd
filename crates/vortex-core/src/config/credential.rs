//! API credential configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the API credential by default.
pub const DEFAULT_API_KEY_ENV: &str = "VORTEX_API_KEY";

/// Configuration describing where the API credential is read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialConfig {
    /// Environment variable containing the credential.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: Option<String>,

    /// Path to a file containing the credential.
    #[serde(default)]
    pub api_key_file: Option<PathBuf>,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            api_key_file: None,
        }
    }
}

impl CredentialConfig {
    /// Resolve the credential from environment or file.
    pub fn resolve_api_key(&self) -> Result<Option<String>, std::io::Error> {
        // Try environment variable first
        if let Some(env_var) = &self.api_key_env {
            if let Ok(key) = std::env::var(env_var) {
                if !key.trim().is_empty() {
                    return Ok(Some(key.trim().to_string()));
                }
            }
        }

        // Try file path
        if let Some(path) = &self.api_key_file {
            if path.exists() {
                let key = std::fs::read_to_string(path)?;
                return Ok(Some(key.trim().to_string()));
            }
            tracing::warn!(path = %path.display(), "Credential file does not exist");
        }

        Ok(None)
    }
}

fn default_api_key_env() -> Option<String> {
    Some(DEFAULT_API_KEY_ENV.to_string())
}
