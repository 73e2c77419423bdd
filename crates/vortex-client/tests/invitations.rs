//! Invitation endpoint tests against a mock server.
//!
//! Run with: cargo test --package vortex-client --test invitations

use mockito::Matcher;
use serde_json::json;
use vortex_client::{ClientError, InvitationTarget, USER_AGENT, VortexClient};

const API_KEY: &str = "test-api-key";

fn invitation_body(id: &str) -> String {
    json!({
        "id": id,
        "accountId": "acc-1",
        "status": "delivered",
        "target": [{"type": "email", "value": "test@example.com"}],
        "groups": [{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "groupId": "workspace-123",
            "type": "workspace",
            "name": "My Workspace"
        }]
    })
    .to_string()
}

fn client_for(server: &mockito::ServerGuard) -> VortexClient {
    VortexClient::with_options(API_KEY, &server.url(), None).unwrap()
}

#[tokio::test]
async fn test_get_invitations_by_target_sends_query_and_headers() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/invitations")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("targetType".into(), "email".into()),
            Matcher::UrlEncoded("targetValue".into(), "test@example.com".into()),
        ]))
        .match_header("x-api-key", API_KEY)
        .match_header("content-type", "application/json")
        .match_header("user-agent", USER_AGENT)
        .with_status(200)
        .with_body(format!(r#"{{"invitations":[{}]}}"#, invitation_body("inv-1")))
        .create_async()
        .await;

    let invitations = client_for(&server)
        .get_invitations_by_target("email", "test@example.com")
        .await
        .unwrap();

    assert_eq!(invitations.len(), 1);
    assert_eq!(invitations[0].id, "inv-1");
    assert_eq!(invitations[0].groups[0].group_id, "workspace-123");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_invitation() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/invitations/inv-42")
        .with_status(200)
        .with_body(invitation_body("inv-42"))
        .create_async()
        .await;

    let invitation = client_for(&server).get_invitation("inv-42").await.unwrap();

    assert_eq!(invitation.id, "inv-42");
    assert_eq!(invitation.status, "delivered");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_not_found_is_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/v1/invitations/missing")
        .with_status(404)
        .with_body(r#"{"error":"not found"}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .get_invitation("missing")
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Vortex API request failed: 404 Not Found");
    match err {
        ClientError::Api { details, .. } => assert_eq!(details, r#"{"error":"not found"}"#),
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("DELETE", "/api/v1/invitations/inv-1")
        .with_status(500)
        .create_async()
        .await;

    let err = client_for(&server)
        .revoke_invitation("inv-1")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_revoke_with_empty_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/api/v1/invitations/inv-1")
        .with_status(204)
        .create_async()
        .await;

    client_for(&server).revoke_invitation("inv-1").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_accept_invitations_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/invitations/accept")
        .match_body(Matcher::Json(json!({
            "invitationIds": ["inv1", "inv2"],
            "target": {"type": "email", "value": "test@example.com"}
        })))
        .with_status(200)
        .with_body(invitation_body("inv1"))
        .create_async()
        .await;

    let ids = vec!["inv1".to_string(), "inv2".to_string()];
    let result = client_for(&server)
        .accept_invitations(&ids, &InvitationTarget::email("test@example.com"))
        .await
        .unwrap();

    assert_eq!(result.id, "inv1");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_group_endpoints() {
    let mut server = mockito::Server::new_async().await;
    let list = server
        .mock("GET", "/api/v1/invitations/by-group/workspace/ws-1")
        .with_status(200)
        .with_body(r#"{"invitations":[]}"#)
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/api/v1/invitations/by-group/workspace/ws-1")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = client_for(&server);
    let invitations = client
        .get_invitations_by_group("workspace", "ws-1")
        .await
        .unwrap();
    assert!(invitations.is_empty());

    client
        .delete_invitations_by_group("workspace", "ws-1")
        .await
        .unwrap();

    list.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn test_reinvite() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/invitations/inv-7/reinvite")
        .with_status(200)
        .with_body(invitation_body("inv-7"))
        .create_async()
        .await;

    let result = client_for(&server).reinvite("inv-7").await.unwrap();

    assert_eq!(result.id, "inv-7");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/v1/invitations/inv-1")
        .with_status(200)
        .with_body("{ invalid json }")
        .create_async()
        .await;

    let err = client_for(&server).get_invitation("inv-1").await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}
