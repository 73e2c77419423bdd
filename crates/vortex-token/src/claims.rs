//! User claims carried in the token payload.

use serde_json::{Map, Value};

/// Claim holding the subject identifier.
pub const CLAIM_USER_ID: &str = "userId";
/// Claim holding the principal's email address.
pub const CLAIM_USER_EMAIL: &str = "userEmail";
/// Claim holding the admin scope list.
pub const CLAIM_ADMIN_SCOPES: &str = "adminScopes";
/// Claim holding the expiry as unix seconds.
pub const CLAIM_EXPIRES: &str = "expires";

/// Scope granting auto-join administration.
pub const SCOPE_AUTO_JOIN: &str = "autoJoin";

/// Extra claims merged verbatim into the payload after the required ones.
pub type Extra = Map<String, Value>;

/// Admin scopes granted to a user.
///
/// Kept as three states so "not provided" and "provided but empty" stay
/// distinguishable for callers. Only [`AdminScopes::Present`] is written to
/// the token payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AdminScopes {
    /// No scopes were supplied.
    #[default]
    Absent,
    /// An empty scope list was supplied.
    Empty,
    /// One or more scopes.
    Present(Vec<String>),
}

impl AdminScopes {
    /// Build from a list, mapping an empty list to [`AdminScopes::Empty`].
    pub fn new<I, S>(scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let scopes: Vec<String> = scopes.into_iter().map(Into::into).collect();
        if scopes.is_empty() {
            Self::Empty
        } else {
            Self::Present(scopes)
        }
    }

    /// Scopes to embed in the payload, if any.
    pub fn as_payload(&self) -> Option<&[String]> {
        match self {
            Self::Present(scopes) => Some(scopes),
            Self::Absent | Self::Empty => None,
        }
    }

    /// True when no scope list was supplied at all.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Check if a scope is granted.
    pub fn contains(&self, scope: &str) -> bool {
        self.as_payload()
            .is_some_and(|scopes| scopes.iter().any(|s| s == scope))
    }
}

impl From<Option<Vec<String>>> for AdminScopes {
    fn from(scopes: Option<Vec<String>>) -> Self {
        match scopes {
            None => Self::Absent,
            Some(scopes) => Self::new(scopes),
        }
    }
}

impl From<Vec<String>> for AdminScopes {
    fn from(scopes: Vec<String>) -> Self {
        Self::new(scopes)
    }
}

/// The user a token is issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Subject identifier (`userId`).
    pub id: String,

    /// Principal email (`userEmail`).
    pub email: String,

    /// Optional admin scopes (`adminScopes`).
    pub admin_scopes: AdminScopes,
}

impl User {
    /// Create a user without admin scopes.
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            admin_scopes: AdminScopes::Absent,
        }
    }

    /// Set the admin scopes.
    pub fn with_admin_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.admin_scopes = AdminScopes::new(scopes);
        self
    }

    /// Required claims: subject, email and expiry.
    pub(crate) fn required_claims(&self, expires: i64) -> Map<String, Value> {
        let mut claims = Map::new();
        claims.insert(CLAIM_USER_ID.to_string(), Value::String(self.id.clone()));
        claims.insert(CLAIM_USER_EMAIL.to_string(), Value::String(self.email.clone()));
        claims.insert(CLAIM_EXPIRES.to_string(), Value::from(expires));
        claims
    }

    /// Admin scope claim, empty unless scopes are present.
    pub(crate) fn admin_scope_claims(&self) -> Map<String, Value> {
        let mut claims = Map::new();
        if let Some(scopes) = self.admin_scopes.as_payload() {
            claims.insert(
                CLAIM_ADMIN_SCOPES.to_string(),
                Value::Array(scopes.iter().cloned().map(Value::String).collect()),
            );
        }
        claims
    }
}
