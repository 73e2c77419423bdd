//! Invitation service connection configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Production endpoint of the invitation service.
pub const DEFAULT_BASE_URL: &str = "https://api.vortexsoftware.com";

/// Environment variable that overrides the base URL.
pub const DEFAULT_BASE_URL_ENV: &str = "VORTEX_API_BASE_URL";

/// Request timeout applied to every call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the invitation service connection.
///
/// The base URL is resolved in order of precedence:
/// 1. The environment variable named by `base_url_env` (if set and non-empty)
/// 2. `base_url`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the invitation service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Environment variable that overrides `base_url`.
    #[serde(default = "default_base_url_env", skip_serializing_if = "Option::is_none")]
    pub base_url_env: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Value of the `User-Agent` header. Defaults to the client's own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            base_url_env: default_base_url_env(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

impl ApiConfig {
    /// Resolve the effective base URL, without a trailing slash.
    pub fn resolve_base_url(&self) -> String {
        if let Some(env_var) = &self.base_url_env {
            if let Ok(url) = std::env::var(env_var) {
                if !url.trim().is_empty() {
                    tracing::debug!(env = %env_var, "Using base URL from environment");
                    return url.trim().trim_end_matches('/').to_string();
                }
            }
        }

        self.base_url.trim().trim_end_matches('/').to_string()
    }

    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_base_url_env() -> Option<String> {
    Some(DEFAULT_BASE_URL_ENV.to_string())
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
