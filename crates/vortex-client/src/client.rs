//! HTTP client for the invitation service.

use crate::error::ClientError;
use crate::types::{
    AcceptInvitationRequest, InvitationResult, InvitationTarget, InvitationsResponse,
};
use reqwest::header::{CONTENT_TYPE, USER_AGENT as USER_AGENT_HEADER};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use vortex_core::{ApiConfig, ConfigError, DEFAULT_BASE_URL, VortexConfig};
use vortex_token::{Extra, TokenIssuer, User};

/// Default `User-Agent` header.
pub const USER_AGENT: &str = concat!("vortex-rust-sdk/", env!("CARGO_PKG_VERSION"));

const API_KEY_HEADER: &str = "x-api-key";
const INVITATIONS_PATH: [&str; 3] = ["api", "v1", "invitations"];

/// Client for the Vortex invitation service.
#[derive(Clone)]
pub struct VortexClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Arc<str>,
    user_agent: Arc<str>,
}

impl VortexClient {
    /// Create a client with default settings.
    ///
    /// The base URL comes from `VORTEX_API_BASE_URL` when set.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientError> {
        Self::from_api_config(api_key, &ApiConfig::default())
    }

    /// Create a client with an explicit base URL and optional HTTP client.
    ///
    /// An empty `base_url` falls back to the production endpoint.
    pub fn with_options(
        api_key: impl Into<String>,
        base_url: &str,
        http: Option<reqwest::Client>,
    ) -> Result<Self, ClientError> {
        let base_url = if base_url.trim().is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url
        };
        let http = match http {
            Some(http) => http,
            None => build_http_client(&ApiConfig::default())?,
        };
        Self::build(api_key.into(), base_url, http, USER_AGENT.to_string())
    }

    /// Create a client from a loaded configuration, resolving the credential.
    pub fn from_config(config: &VortexConfig) -> Result<Self, ClientError> {
        let api_key = config
            .credential
            .resolve_api_key()
            .map_err(ConfigError::from)?
            .ok_or(ClientError::MissingApiKey)?;
        Self::from_api_config(api_key, &config.api)
    }

    /// Create a client from connection settings.
    pub fn from_api_config(
        api_key: impl Into<String>,
        api: &ApiConfig,
    ) -> Result<Self, ClientError> {
        let http = build_http_client(api)?;
        let user_agent = api
            .user_agent
            .clone()
            .unwrap_or_else(|| USER_AGENT.to_string());
        Self::build(api_key.into(), &api.resolve_base_url(), http, user_agent)
    }

    fn build(
        api_key: String,
        base_url: &str,
        http: reqwest::Client,
        user_agent: String,
    ) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(format!(
                "{base_url}: cannot be used as a base URL"
            )));
        }

        Ok(Self {
            http,
            base_url,
            api_key: Arc::from(api_key),
            user_agent: Arc::from(user_agent),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Generate a signed token for `user`. Runs locally; no request is made.
    pub fn generate_jwt(&self, user: &User, extra: Option<&Extra>) -> Result<String, ClientError> {
        let issuer = TokenIssuer::new(&self.api_key)?;
        Ok(issuer.issue(user, extra)?)
    }

    /// List invitations sent to a target (e.g. `email`, `user@example.com`).
    #[tracing::instrument(skip(self))]
    pub async fn get_invitations_by_target(
        &self,
        target_type: &str,
        target_value: &str,
    ) -> Result<Vec<InvitationResult>, ClientError> {
        let mut url = self.url(&INVITATIONS_PATH)?;
        url.query_pairs_mut()
            .append_pair("targetType", target_type)
            .append_pair("targetValue", target_value);

        let body = self.send(self.request(Method::GET, url)).await?;
        let response: InvitationsResponse = decode(&body)?;
        Ok(response.invitations)
    }

    /// Fetch a single invitation.
    #[tracing::instrument(skip(self))]
    pub async fn get_invitation(&self, invitation_id: &str) -> Result<InvitationResult, ClientError> {
        let url = self.url(&invitation_path(&[invitation_id]))?;
        let body = self.send(self.request(Method::GET, url)).await?;
        decode(&body)
    }

    /// Revoke an invitation.
    #[tracing::instrument(skip(self))]
    pub async fn revoke_invitation(&self, invitation_id: &str) -> Result<(), ClientError> {
        let url = self.url(&invitation_path(&[invitation_id]))?;
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    /// Accept one or more invitations on behalf of `target`.
    #[tracing::instrument(skip(self))]
    pub async fn accept_invitations(
        &self,
        invitation_ids: &[String],
        target: &InvitationTarget,
    ) -> Result<InvitationResult, ClientError> {
        let url = self.url(&invitation_path(&["accept"]))?;
        let request = AcceptInvitationRequest {
            invitation_ids: invitation_ids.to_vec(),
            target: target.clone(),
        };

        let body = self
            .send(self.request(Method::POST, url).json(&request))
            .await?;
        decode(&body)
    }

    /// Delete every invitation attached to a group.
    #[tracing::instrument(skip(self))]
    pub async fn delete_invitations_by_group(
        &self,
        group_type: &str,
        group_id: &str,
    ) -> Result<(), ClientError> {
        let url = self.url(&invitation_path(&["by-group", group_type, group_id]))?;
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    /// List invitations attached to a group.
    #[tracing::instrument(skip(self))]
    pub async fn get_invitations_by_group(
        &self,
        group_type: &str,
        group_id: &str,
    ) -> Result<Vec<InvitationResult>, ClientError> {
        let url = self.url(&invitation_path(&["by-group", group_type, group_id]))?;
        let body = self.send(self.request(Method::GET, url)).await?;
        let response: InvitationsResponse = decode(&body)?;
        Ok(response.invitations)
    }

    /// Send an invitation again.
    #[tracing::instrument(skip(self))]
    pub async fn reinvite(&self, invitation_id: &str) -> Result<InvitationResult, ClientError> {
        let url = self.url(&invitation_path(&[invitation_id, "reinvite"]))?;
        let body = self.send(self.request(Method::POST, url)).await?;
        decode(&body)
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, self.api_key.as_ref())
            .header(USER_AGENT_HEADER, self.user_agent.as_ref())
    }

    /// Send a request and return the body. Empty bodies become `{}`.
    async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_client_error() || status.is_server_error() {
            tracing::debug!(status = status.as_u16(), "Invitation service returned an error");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: format!(
                    "Vortex API request failed: {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ),
                details: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        if body.is_empty() {
            return Ok(b"{}".to_vec());
        }
        Ok(body.to_vec())
    }
}

impl fmt::Debug for VortexClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VortexClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn build_http_client(api: &ApiConfig) -> Result<reqwest::Client, ClientError> {
    Ok(reqwest::Client::builder().timeout(api.timeout()).build()?)
}

fn invitation_path<'a>(rest: &[&'a str]) -> Vec<&'a str> {
    INVITATIONS_PATH.iter().copied().chain(rest.iter().copied()).collect()
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ClientError> {
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_with_options_custom_url() {
        let client =
            VortexClient::with_options("test-api-key", "https://custom.example.com", None).unwrap();
        assert_eq!(client.api_key(), "test-api-key");
        assert_eq!(client.base_url().as_str(), "https://custom.example.com/");
    }

    #[test]
    fn test_with_options_empty_url_uses_default() {
        let client = VortexClient::with_options("test-api-key", "", None).unwrap();
        assert_eq!(client.base_url().as_str(), "https://api.vortexsoftware.com/");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = VortexClient::with_options("test-api-key", "not a url", None);
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_url_encodes_segments() {
        let client =
            VortexClient::with_options("k", "https://custom.example.com/prefix/", None).unwrap();
        let url = client.url(&invitation_path(&["a b/c", "reinvite"])).unwrap();
        assert_eq!(
            url.as_str(),
            "https://custom.example.com/prefix/api/v1/invitations/a%20b%2Fc/reinvite"
        );
    }

    fn config_without_env(api_key_file: Option<std::path::PathBuf>) -> VortexConfig {
        let mut config = VortexConfig::default();
        config.api.base_url = "https://custom.example.com".to_string();
        config.api.base_url_env = None;
        config.credential.api_key_env = Some("VORTEX_CLIENT_TEST_UNSET_KEY".to_string());
        config.credential.api_key_file = api_key_file;
        config
    }

    #[test]
    fn test_from_config_reads_key_file() {
        let mut key_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(key_file, "VRTX.EjRWeBI0EjQSNBI0VniQEg.test-key").unwrap();

        let config = config_without_env(Some(key_file.path().to_path_buf()));
        let client = VortexClient::from_config(&config).unwrap();

        assert_eq!(client.api_key(), "VRTX.EjRWeBI0EjQSNBI0VniQEg.test-key");
        assert_eq!(client.base_url().as_str(), "https://custom.example.com/");
    }

    #[test]
    fn test_from_config_reads_key_env() {
        // SAFETY: We're in a test and controlling the environment
        unsafe {
            std::env::set_var("VORTEX_CLIENT_TEST_KEY", "env-api-key");
        }

        let mut config = config_without_env(None);
        config.credential.api_key_env = Some("VORTEX_CLIENT_TEST_KEY".to_string());
        let client = VortexClient::from_config(&config).unwrap();
        assert_eq!(client.api_key(), "env-api-key");

        unsafe {
            std::env::remove_var("VORTEX_CLIENT_TEST_KEY");
        }
    }

    #[test]
    fn test_from_config_without_key() {
        let config = config_without_env(None);
        assert!(matches!(
            VortexClient::from_config(&config),
            Err(ClientError::MissingApiKey)
        ));
    }

    #[test]
    fn test_new_uses_base_url_env() {
        // SAFETY: We're in a test and controlling the environment
        unsafe {
            std::env::set_var("VORTEX_API_BASE_URL", "https://env.example.com/");
        }

        let client = VortexClient::new("test-api-key").unwrap();
        assert_eq!(client.base_url().as_str(), "https://env.example.com/");
        assert_eq!(client.api_key(), "test-api-key");

        unsafe {
            std::env::remove_var("VORTEX_API_BASE_URL");
        }
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let client = VortexClient::with_options("secret-key", "", None).unwrap();
        assert!(!format!("{client:?}").contains("secret-key"));
    }

    #[test]
    fn test_generate_jwt() {
        let client =
            VortexClient::with_options("VRTX.EjRWeBI0EjQSNBI0VniQEg.test-key", "", None).unwrap();
        let user = User::new("user-123", "test@example.com").with_admin_scopes(["autoJoin"]);

        let token = client.generate_jwt(&user, None).unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_generate_jwt_invalid_key() {
        let client = VortexClient::with_options("invalid-key", "", None).unwrap();
        let user = User::new("user-123", "test@example.com");

        assert!(matches!(
            client.generate_jwt(&user, None),
            Err(ClientError::Token(_))
        ));
    }
}
