//! Request and response bodies of the invitation service.
//!
//! Fields missing from a response fall back to their defaults, so partial
//! objects (and the `{}` returned for empty bodies) still decode.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The target of an invitation (e.g. an email address).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvitationTarget {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl InvitationTarget {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }

    pub fn email(value: impl Into<String>) -> Self {
        Self::new("email", value)
    }
}

/// A group associated with an invitation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvitationGroup {
    /// Vortex internal id.
    pub id: String,
    pub account_id: String,
    /// The customer's own group id.
    pub group_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub created_at: String,
}

/// A recorded acceptance of an invitation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvitationAcceptance {
    pub id: String,
    pub account_id: String,
    pub project_id: String,
    pub accepted_at: String,
    pub target: InvitationTarget,
}

/// A complete invitation object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvitationResult {
    pub id: String,
    pub account_id: String,
    pub click_throughs: i64,
    pub configuration_attributes: Option<Map<String, Value>>,
    pub attributes: Option<Map<String, Value>>,
    pub created_at: String,
    pub deactivated: bool,
    pub delivery_count: i64,
    pub delivery_types: Vec<String>,
    pub foreign_creator_id: String,
    pub invitation_type: String,
    pub modified_at: Option<String>,
    pub status: String,
    pub target: Vec<InvitationTarget>,
    pub views: i64,
    pub widget_configuration_id: String,
    pub project_id: String,
    pub groups: Vec<InvitationGroup>,
    pub accepts: Vec<InvitationAcceptance>,
}

/// Body of `POST /api/v1/invitations/accept`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptInvitationRequest {
    pub invitation_ids: Vec<String>,
    pub target: InvitationTarget,
}

/// List response wrapper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvitationsResponse {
    #[serde(default)]
    pub invitations: Vec<InvitationResult>,
}
