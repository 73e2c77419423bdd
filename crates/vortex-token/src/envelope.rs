//! Header and payload construction.

use crate::claims::{CLAIM_EXPIRES, Extra, User};
use crate::error::TokenError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Lifetime of every issued token.
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Signature algorithm tag.
pub const ALGORITHM: &str = "HS256";

/// Token type tag.
pub const TOKEN_TYPE: &str = "JWT";

/// Token header. Serialized with keys in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Issued-at, unix seconds.
    pub iat: i64,
    pub alg: String,
    pub typ: String,
    /// Tenant id of the signing credential.
    pub kid: String,
}

impl Header {
    pub fn new(kid: impl Into<String>, issued_at: i64) -> Self {
        Self {
            iat: issued_at,
            alg: ALGORITHM.to_string(),
            typ: TOKEN_TYPE.to_string(),
            kid: kid.into(),
        }
    }
}

/// An unsigned token: header plus payload claims.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub header: Header,
    pub payload: Map<String, Value>,
}

impl Envelope {
    /// Build the envelope for a user.
    ///
    /// Claims are merged in order, later layers overriding earlier ones:
    /// required claims, then admin scopes, then `extra`.
    pub fn build(kid: &str, user: &User, extra: Option<&Extra>, now: DateTime<Utc>) -> Self {
        let issued_at = now.timestamp();
        let expires = issued_at + TOKEN_TTL_SECS;

        let mut payload = Map::new();
        merge(&mut payload, &user.required_claims(expires));
        merge(&mut payload, &user.admin_scope_claims());
        if let Some(extra) = extra {
            merge(&mut payload, extra);
        }

        Self {
            header: Header::new(kid, issued_at),
            payload,
        }
    }

    /// Build an envelope from an arbitrary claim set, adding the expiry last.
    pub fn from_claims(kid: &str, claims: &Map<String, Value>, now: DateTime<Utc>) -> Self {
        let issued_at = now.timestamp();

        let mut payload = Map::new();
        merge(&mut payload, claims);
        payload.insert(
            CLAIM_EXPIRES.to_string(),
            Value::from(issued_at + TOKEN_TTL_SECS),
        );

        Self {
            header: Header::new(kid, issued_at),
            payload,
        }
    }

    /// Serialize header and payload to JSON bytes.
    pub fn to_json(&self) -> Result<(Vec<u8>, Vec<u8>), TokenError> {
        let header = serde_json::to_vec(&self.header)
            .map_err(|e| TokenError::SerializationError(format!("header: {e}")))?;
        let payload = serde_json::to_vec(&self.payload)
            .map_err(|e| TokenError::SerializationError(format!("payload: {e}")))?;
        Ok((header, payload))
    }
}

fn merge(target: &mut Map<String, Value>, layer: &Map<String, Value>) {
    for (key, value) in layer {
        target.insert(key.clone(), value.clone());
    }
}
