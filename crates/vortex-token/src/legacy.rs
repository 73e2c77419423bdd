//! Compatibility adapter for the legacy claim shape.
//!
//! Older integrations send `identifiers`, `groups` and `role` instead of
//! `userEmail` and `adminScopes`. These tokens are signed exactly like the
//! current ones; only the payload shape differs.

use crate::error::TokenError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A user identifier such as an email address or phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl Identifier {
    pub fn email(value: impl Into<String>) -> Self {
        Self {
            kind: "email".to_string(),
            value: value.into(),
        }
    }

    pub fn sms(value: impl Into<String>) -> Self {
        Self {
            kind: "sms".to_string(),
            value: value.into(),
        }
    }
}

/// A group the user belongs to.
///
/// `group_id` is preferred; `id` is still accepted from older callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,

    pub name: String,
}

impl Group {
    /// Create a group using the preferred `groupId` field.
    pub fn new(kind: impl Into<String>, group_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: None,
            group_id: Some(group_id.into()),
            name: name.into(),
        }
    }
}

/// Legacy token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPayload {
    pub user_id: String,

    #[serde(default)]
    pub identifiers: Vec<Identifier>,

    #[serde(default)]
    pub groups: Vec<Group>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl LegacyPayload {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            identifiers: Vec::new(),
            groups: Vec::new(),
            role: None,
        }
    }

    pub fn with_identifier(mut self, identifier: Identifier) -> Self {
        self.identifiers.push(identifier);
        self
    }

    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Convert to a claim map (`userId`, `identifiers`, `groups`, `role`).
    pub fn to_claims(&self) -> Result<Map<String, Value>, TokenError> {
        match serde_json::to_value(self) {
            Ok(Value::Object(claims)) => Ok(claims),
            Ok(other) => Err(TokenError::SerializationError(format!(
                "legacy payload serialized to non-object: {other}"
            ))),
            Err(e) => Err(TokenError::SerializationError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_group_serializes_preferred_field() {
        let group = Group::new("workspace", "workspace-123", "My Workspace");
        assert_eq!(
            serde_json::to_value(&group).unwrap(),
            json!({"type": "workspace", "groupId": "workspace-123", "name": "My Workspace"})
        );
    }

    #[test]
    fn test_group_accepts_legacy_id() {
        let group: Group =
            serde_json::from_str(r#"{"type":"workspace","id":"workspace-123","name":"My Workspace"}"#)
                .unwrap();
        assert_eq!(group.id.as_deref(), Some("workspace-123"));
        assert!(group.group_id.is_none());
    }

    #[test]
    fn test_to_claims() {
        let payload = LegacyPayload::new("user123")
            .with_identifier(Identifier::email("user@example.com"))
            .with_identifier(Identifier::sms("+1234567890"))
            .with_group(Group::new("team", "team-1", "Engineering"))
            .with_role("admin");

        let claims = payload.to_claims().unwrap();
        assert_eq!(claims["userId"], "user123");
        assert_eq!(claims["identifiers"][0]["type"], "email");
        assert_eq!(claims["identifiers"][1]["value"], "+1234567890");
        assert_eq!(claims["groups"][0]["groupId"], "team-1");
        assert_eq!(claims["role"], "admin");
    }

    #[test]
    fn test_role_omitted_when_none() {
        let claims = LegacyPayload::new("user123").to_claims().unwrap();
        assert!(!claims.contains_key("role"));
        assert_eq!(claims["groups"], json!([]));
    }
}
