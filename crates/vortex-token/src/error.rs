//! Error types for the token crate.

use thiserror::Error;

/// Errors that can occur while issuing or verifying tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Credential does not split into exactly three `.`-separated segments.
    #[error("malformed credential: expected 3 segments, found {segments}")]
    MalformedCredential { segments: usize },

    /// Credential prefix is not the expected literal tag.
    #[error("unrecognized credential prefix: {prefix:?}")]
    UnrecognizedPrefix { prefix: String },

    /// Credential identifier is not base64url or not a 16-byte UUID.
    #[error("invalid credential identifier encoding: {0}")]
    InvalidIdentifierEncoding(String),

    /// Failed to derive the signing key. HMAC takes keys of any length, so
    /// this is not produced today.
    #[error("failed to derive signing key: {0}")]
    KeyDerivationFailed(String),

    /// Header or payload could not be serialized.
    #[error("token serialization error: {0}")]
    SerializationError(String),

    /// Token is not a well-formed compact token.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// Signature does not match the recomputed one.
    #[error("token signature mismatch")]
    SignatureMismatch,

    /// Token has expired.
    #[error("token has expired at {expired_at}")]
    TokenExpired { expired_at: String },

    /// Token is missing required claim.
    #[error("token missing required claim: {claim}")]
    MissingClaim { claim: String },
}
