//! API credential parsing.
//!
//! A credential has the form `VRTX.<id>.<secret>` where `<id>` is the
//! unpadded base64url encoding of the tenant's 16-byte UUID.

use crate::error::TokenError;
use crate::keys::SigningKey;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Literal tag every credential starts with.
pub const CREDENTIAL_PREFIX: &str = "VRTX";

const TENANT_ID_LEN: usize = 16;

/// A parsed API credential.
///
/// The secret is never printed: `Debug` only shows the tenant id.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    raw: String,
    tenant_id: Uuid,
    secret: String,
}

impl Credential {
    /// Parse a credential string.
    pub fn parse(raw: &str) -> Result<Self, TokenError> {
        let segments: Vec<&str> = raw.split('.').collect();
        let [prefix, encoded_id, secret] = segments.as_slice() else {
            return Err(TokenError::MalformedCredential {
                segments: segments.len(),
            });
        };

        if *prefix != CREDENTIAL_PREFIX {
            return Err(TokenError::UnrecognizedPrefix {
                prefix: (*prefix).to_string(),
            });
        }

        let tenant_id = decode_tenant_id(encoded_id)?;

        Ok(Self {
            raw: raw.to_string(),
            tenant_id,
            secret: (*secret).to_string(),
        })
    }

    /// The tenant identifier embedded in the credential.
    pub fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }

    /// Canonical (lowercase, hyphenated) tenant id, used as the `kid` header.
    pub fn kid(&self) -> String {
        self.tenant_id.hyphenated().to_string()
    }

    /// The original credential string, as sent in the `x-api-key` header.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub(crate) fn secret(&self) -> &[u8] {
        self.secret.as_bytes()
    }

    /// Derive the signing key bound to this credential's tenant.
    pub fn signing_key(&self) -> Result<SigningKey, TokenError> {
        SigningKey::derive(self.secret(), &self.tenant_id)
    }
}

impl FromStr for Credential {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("tenant_id", &self.tenant_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

fn decode_tenant_id(encoded: &str) -> Result<Uuid, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|e| TokenError::InvalidIdentifierEncoding(e.to_string()))?;

    if bytes.len() != TENANT_ID_LEN {
        return Err(TokenError::InvalidIdentifierEncoding(format!(
            "expected {TENANT_ID_LEN} bytes, got {}",
            bytes.len()
        )));
    }

    Uuid::from_slice(&bytes).map_err(|e| TokenError::InvalidIdentifierEncoding(e.to_string()))
}
