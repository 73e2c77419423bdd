//! # vortex-client
//!
//! Async client for the Vortex invitation service.
//!
//! The client is a thin pass-through: every call maps to one HTTPS request,
//! authenticated with the `x-api-key` header, and returns the decoded JSON
//! body. There are no retries. Token generation is delegated to
//! [`vortex_token`] and needs no network access.

pub mod client;
pub mod error;
pub mod types;

pub use client::{USER_AGENT, VortexClient};
pub use error::ClientError;
pub use types::{
    AcceptInvitationRequest, InvitationAcceptance, InvitationGroup, InvitationResult,
    InvitationTarget, InvitationsResponse,
};
pub use vortex_token::{AdminScopes, Extra, User};
