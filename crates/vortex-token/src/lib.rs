//! # vortex-token
//!
//! Stateless token issuance for the Vortex SDK.
//!
//! This crate provides functionality for:
//! - Parsing `VRTX.<id>.<secret>` API credentials
//! - Deriving a per-tenant HMAC-SHA256 signing key from the credential
//! - Building the header and claims envelope with a one hour expiry
//! - Encoding and signing compact `header.payload.signature` tokens
//! - Verifying and inspecting issued tokens
//!
//! ## Pipeline
//!
//! | Stage | Input | Output |
//! |-------|-------|--------|
//! | **Parse** | credential string | tenant id + secret |
//! | **Derive** | secret + tenant id | 32-byte signing key |
//! | **Build** | user claims + clock | header + payload |
//! | **Sign** | envelope + signing key | compact token |
//!
//! Every stage is a pure function of its inputs. Nothing is cached between
//! calls, so a [`TokenIssuer`] can be shared freely across threads.
//!
//! ```
//! use vortex_token::{TokenIssuer, User};
//!
//! let issuer = TokenIssuer::new("VRTX.EjRWeBI0EjQSNBI0VniQEg.test-key")?;
//! let user = User::new("user-123", "test@example.com").with_admin_scopes(["autoJoin"]);
//! let token = issuer.issue(&user, None)?;
//! assert_eq!(token.split('.').count(), 3);
//! # Ok::<(), vortex_token::TokenError>(())
//! ```

pub mod claims;
pub mod credential;
pub mod envelope;
pub mod error;
pub mod keys;
pub mod legacy;
pub mod token;

pub use claims::{AdminScopes, Extra, User};
pub use credential::{CREDENTIAL_PREFIX, Credential};
pub use envelope::{ALGORITHM, Envelope, Header, TOKEN_TTL_SECS, TOKEN_TYPE};
pub use error::TokenError;
pub use keys::SigningKey;
pub use legacy::{Group, Identifier, LegacyPayload};
pub use token::{
    TokenInfo, TokenIssuer, TokenVerifier, VerifiedToken, inspect_token_unverified, issue_token,
};
