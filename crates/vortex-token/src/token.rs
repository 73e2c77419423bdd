//! Token issuance and verification.

use crate::claims::{
    CLAIM_ADMIN_SCOPES, CLAIM_EXPIRES, CLAIM_USER_EMAIL, CLAIM_USER_ID, Extra, SCOPE_AUTO_JOIN,
    User,
};
use crate::credential::Credential;
use crate::envelope::{ALGORITHM, Envelope, Header};
use crate::error::TokenError;
use crate::legacy::LegacyPayload;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Issues signed tokens for a single credential.
///
/// The signing key is derived from the credential on every call and never
/// stored.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    credential: Credential,
}

impl TokenIssuer {
    /// Create an issuer from a credential string.
    pub fn new(credential: &str) -> Result<Self, TokenError> {
        Ok(Self::from_credential(Credential::parse(credential)?))
    }

    /// Create an issuer from an already parsed credential.
    pub fn from_credential(credential: Credential) -> Self {
        Self { credential }
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Issue a token for `user`, valid for one hour from now.
    pub fn issue(&self, user: &User, extra: Option<&Extra>) -> Result<String, TokenError> {
        self.issue_at(user, extra, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        user: &User,
        extra: Option<&Extra>,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let envelope = Envelope::build(&self.credential.kid(), user, extra, now);
        self.seal(&envelope)
    }

    /// Issue a token from the simplified inputs: id, email and an optional
    /// auto-join admin flag.
    pub fn issue_simple(
        &self,
        user_id: &str,
        email: &str,
        is_auto_join_admin: Option<bool>,
    ) -> Result<String, TokenError> {
        let mut user = User::new(user_id, email);
        if is_auto_join_admin == Some(true) {
            user = user.with_admin_scopes([SCOPE_AUTO_JOIN]);
        }
        self.issue(&user, None)
    }

    /// Issue a token carrying the legacy claim shape.
    pub fn issue_legacy(&self, payload: &LegacyPayload) -> Result<String, TokenError> {
        self.issue_legacy_at(payload, Utc::now())
    }

    pub fn issue_legacy_at(
        &self,
        payload: &LegacyPayload,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = payload.to_claims()?;
        let envelope = Envelope::from_claims(&self.credential.kid(), &claims, now);
        self.seal(&envelope)
    }

    /// Encode and sign an envelope into a compact token.
    fn seal(&self, envelope: &Envelope) -> Result<String, TokenError> {
        let (header_json, payload_json) = envelope.to_json()?;
        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header_json),
            URL_SAFE_NO_PAD.encode(payload_json)
        );

        let signature = self
            .credential
            .signing_key()?
            .sign(signing_input.as_bytes())?;

        tracing::debug!(
            kid = %envelope.header.kid,
            iat = envelope.header.iat,
            claims = envelope.payload.len(),
            "Issued token"
        );

        Ok(format!("{signing_input}.{}", URL_SAFE_NO_PAD.encode(signature)))
    }
}

/// Issue a token in one call: parse the credential, derive, build and sign.
pub fn issue_token(
    credential: &str,
    user: &User,
    extra: Option<&Extra>,
) -> Result<String, TokenError> {
    TokenIssuer::new(credential)?.issue(user, extra)
}

/// Verifies tokens issued for a credential.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    credential: Credential,
}

impl TokenVerifier {
    /// Create a verifier from a credential string.
    pub fn new(credential: &str) -> Result<Self, TokenError> {
        Ok(Self::from_credential(Credential::parse(credential)?))
    }

    pub fn from_credential(credential: Credential) -> Self {
        Self { credential }
    }

    /// Verify a token against the current time.
    pub fn verify(&self, token: &str) -> Result<VerifiedToken, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the current time were `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<VerifiedToken, TokenError> {
        let (header_b64, payload_b64, signature_b64) = split_token(token)?;

        let header: Header = decode_segment(header_b64, "header")?;
        if header.alg != ALGORITHM {
            return Err(TokenError::InvalidToken(format!(
                "unsupported algorithm: {}",
                header.alg
            )));
        }
        if header.kid != self.credential.kid() {
            return Err(TokenError::InvalidToken(
                "key id does not match credential".to_string(),
            ));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|e| TokenError::InvalidToken(format!("signature: {e}")))?;
        let signing_input = &token[..header_b64.len() + 1 + payload_b64.len()];
        if !self
            .credential
            .signing_key()?
            .verify(signing_input.as_bytes(), &signature)
        {
            return Err(TokenError::SignatureMismatch);
        }

        let payload: Map<String, Value> = decode_segment(payload_b64, "payload")?;
        let expires = payload
            .get(CLAIM_EXPIRES)
            .and_then(Value::as_i64)
            .ok_or_else(|| TokenError::MissingClaim {
                claim: CLAIM_EXPIRES.to_string(),
            })?;

        if now.timestamp() >= expires {
            let expired_at = DateTime::from_timestamp(expires, 0)
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| expires.to_string());
            return Err(TokenError::TokenExpired { expired_at });
        }

        Ok(VerifiedToken { header, payload })
    }
}

/// A verified token with its decoded claims.
#[derive(Debug, Clone)]
pub struct VerifiedToken {
    pub header: Header,
    pub payload: Map<String, Value>,
}

impl VerifiedToken {
    pub fn user_id(&self) -> Option<&str> {
        self.claim(CLAIM_USER_ID).and_then(Value::as_str)
    }

    pub fn user_email(&self) -> Option<&str> {
        self.claim(CLAIM_USER_EMAIL).and_then(Value::as_str)
    }

    /// Admin scopes, if the claim is present.
    pub fn admin_scopes(&self) -> Option<Vec<&str>> {
        self.claim(CLAIM_ADMIN_SCOPES)
            .and_then(Value::as_array)
            .map(|scopes| scopes.iter().filter_map(Value::as_str).collect())
    }

    /// Expiry as unix seconds.
    pub fn expires_at(&self) -> Option<i64> {
        self.claim(CLAIM_EXPIRES).and_then(Value::as_i64)
    }

    pub fn issued_at(&self) -> i64 {
        self.header.iat
    }

    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.payload.get(name)
    }
}

/// Decode a token without checking its signature (for debugging).
pub fn inspect_token_unverified(token: &str) -> Result<TokenInfo, TokenError> {
    let (header_b64, payload_b64, signature_b64) = split_token(token)?;

    let header: Header = decode_segment(header_b64, "header")?;
    let payload: Map<String, Value> = decode_segment(payload_b64, "payload")?;
    let signature_len = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|e| TokenError::InvalidToken(format!("signature: {e}")))?
        .len();

    Ok(TokenInfo {
        header,
        payload,
        signature_len,
    })
}

/// Information about a token (for inspection).
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub header: Header,
    pub payload: Map<String, Value>,
    /// Length of the decoded signature in bytes.
    pub signature_len: usize,
}

fn split_token(token: &str) -> Result<(&str, &str, &str), TokenError> {
    let segments: Vec<&str> = token.split('.').collect();
    match segments.as_slice() {
        [header, payload, signature]
            if !header.is_empty() && !payload.is_empty() && !signature.is_empty() =>
        {
            Ok((*header, *payload, *signature))
        }
        _ => Err(TokenError::InvalidToken(format!(
            "expected 3 non-empty segments, found {}",
            segments.len()
        ))),
    }
}

fn decode_segment<T: DeserializeOwned>(segment: &str, name: &str) -> Result<T, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| TokenError::InvalidToken(format!("{name}: {e}")))?;
    serde_json::from_slice(&bytes).map_err(|e| TokenError::InvalidToken(format!("{name}: {e}")))
}
