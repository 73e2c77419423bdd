//! Per-tenant signing key derivation.

use crate::error::TokenError;
use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Length of a derived key and of every signature it produces.
pub const SIGNING_KEY_LEN: usize = 32;

/// An HMAC-SHA256 key bound to a single tenant.
///
/// Derived as `HMAC-SHA256(key = secret, message = tenant_id)`, so the raw
/// credential secret is never used to sign tokens directly.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey {
    bytes: [u8; SIGNING_KEY_LEN],
}

impl SigningKey {
    /// Derive the signing key for a tenant.
    pub fn derive(secret: &[u8], tenant_id: &Uuid) -> Result<Self, TokenError> {
        let message = tenant_id.hyphenated().to_string();
        let bytes = hmac_sha256(secret, message.as_bytes())?;
        Ok(Self { bytes })
    }

    /// Raw key material.
    pub fn as_bytes(&self) -> &[u8; SIGNING_KEY_LEN] {
        &self.bytes
    }

    /// Compute the HMAC-SHA256 signature of `input`.
    pub fn sign(&self, input: &[u8]) -> Result<[u8; SIGNING_KEY_LEN], TokenError> {
        hmac_sha256(&self.bytes, input)
    }

    /// Check `signature` against `input` with a constant-time comparison.
    pub fn verify(&self, input: &[u8], signature: &[u8]) -> bool {
        match self.sign(input) {
            Ok(expected) => constant_time_eq(&expected, signature),
            Err(_) => false,
        }
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

// HMAC accepts keys of any length, so the error arm is never taken in
// practice; the `Result` only mirrors the `Mac` API.
fn hmac_sha256(key: &[u8], message: &[u8]) -> Result<[u8; SIGNING_KEY_LEN], TokenError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| TokenError::KeyDerivationFailed(e.to_string()))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().into())
}
