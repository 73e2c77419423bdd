// Configuration types shared across all Vortex crates
pub mod config;

pub use config::{ApiConfig, ConfigError, CredentialConfig, VortexConfig};
pub use config::api::{DEFAULT_BASE_URL, DEFAULT_BASE_URL_ENV, DEFAULT_TIMEOUT_SECS};
pub use config::credential::DEFAULT_API_KEY_ENV;
