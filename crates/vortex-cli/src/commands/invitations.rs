//! Invitation commands. Results are printed to stdout as JSON.

use serde::Serialize;
use vortex_client::{InvitationTarget, VortexClient};

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn by_target(
    client: &VortexClient,
    target_type: &str,
    target_value: &str,
) -> anyhow::Result<()> {
    let invitations = client
        .get_invitations_by_target(target_type, target_value)
        .await?;
    tracing::info!(count = invitations.len(), "Fetched invitations");
    print_json(&invitations)
}

pub async fn get(client: &VortexClient, invitation_id: &str) -> anyhow::Result<()> {
    print_json(&client.get_invitation(invitation_id).await?)
}

pub async fn revoke(client: &VortexClient, invitation_id: &str) -> anyhow::Result<()> {
    client.revoke_invitation(invitation_id).await?;
    println!("✔ Invitation revoked: {invitation_id}");
    Ok(())
}

pub async fn accept(
    client: &VortexClient,
    invitation_ids: &[String],
    target_type: &str,
    target_value: &str,
) -> anyhow::Result<()> {
    let target = InvitationTarget::new(target_type, target_value);
    print_json(&client.accept_invitations(invitation_ids, &target).await?)
}

pub async fn by_group(
    client: &VortexClient,
    group_type: &str,
    group_id: &str,
) -> anyhow::Result<()> {
    let invitations = client.get_invitations_by_group(group_type, group_id).await?;
    tracing::info!(count = invitations.len(), "Fetched invitations");
    print_json(&invitations)
}

pub async fn delete_by_group(
    client: &VortexClient,
    group_type: &str,
    group_id: &str,
) -> anyhow::Result<()> {
    client.delete_invitations_by_group(group_type, group_id).await?;
    println!("✔ Invitations deleted for group: {group_type}/{group_id}");
    Ok(())
}

pub async fn reinvite(client: &VortexClient, invitation_id: &str) -> anyhow::Result<()> {
    print_json(&client.reinvite(invitation_id).await?)
}
