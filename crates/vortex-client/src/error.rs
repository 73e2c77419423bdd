//! Error types for the invitation client.

use thiserror::Error;
use vortex_core::ConfigError;
use vortex_token::TokenError;

/// Errors returned by [`crate::VortexClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service answered with a 4xx or 5xx status.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        /// Raw response body.
        details: String,
    },

    /// Transport failure (connect, timeout, TLS, body read).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request or response body was not the expected JSON.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Token generation failed.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Base URL and path did not form a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// No credential was configured.
    #[error("API key not provided")]
    MissingApiKey,

    /// Configuration could not be resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// HTTP status for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
