use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "vortex", version, about = "Vortex CLI")]
struct Cli {
    /// API key (VRTX.<id>.<secret>)
    #[arg(long, global = true, env = "VORTEX_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Override the invitation service base URL
    #[arg(long, global = true, env = "VORTEX_API_BASE_URL")]
    base_url: Option<String>,

    /// Configuration file (ignored if it does not exist)
    #[arg(long, global = true, default_value = "vortex.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Token operations (issue/inspect/verify)
    Token {
        #[command(subcommand)]
        cmd: TokenCommand,
    },

    /// Invitation service operations
    Invitations {
        #[command(subcommand)]
        cmd: InvitationsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum TokenCommand {
    /// Issue a signed token for a user
    Issue {
        #[arg(long)]
        user_id: String,

        #[arg(long)]
        email: String,

        /// Admin scope (repeatable), e.g. --admin-scope autoJoin
        #[arg(long = "admin-scope")]
        admin_scopes: Vec<String>,

        /// Extra claim as key=value (repeatable). JSON values are kept as JSON.
        #[arg(long = "extra")]
        extras: Vec<String>,

        /// Write the token to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Decode a token without verifying it
    Inspect {
        /// Token string or path to a file containing it
        token: String,
    },

    /// Verify a token against the API key
    Verify {
        /// Token string or path to a file containing it
        token: String,
    },
}

#[derive(Subcommand, Debug)]
enum InvitationsCommand {
    /// List invitations sent to a target
    ByTarget {
        #[arg(long = "type", default_value = "email")]
        target_type: String,

        #[arg(long)]
        value: String,
    },

    /// Show one invitation
    Get { invitation_id: String },

    /// Revoke an invitation
    Revoke { invitation_id: String },

    /// Accept invitations on behalf of a target
    Accept {
        #[arg(required = true)]
        invitation_ids: Vec<String>,

        #[arg(long = "target-type", default_value = "email")]
        target_type: String,

        #[arg(long = "target-value")]
        target_value: String,
    },

    /// List invitations attached to a group
    ByGroup { group_type: String, group_id: String },

    /// Delete every invitation attached to a group
    DeleteByGroup { group_type: String, group_id: String },

    /// Send an invitation again
    Reinvite { invitation_id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries command output; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = commands::load_config(&cli.config, cli.base_url.as_deref())?;

    match cli.cmd {
        Command::Token { cmd } => match cmd {
            TokenCommand::Issue {
                user_id,
                email,
                admin_scopes,
                extras,
                output,
            } => {
                let api_key = commands::resolve_api_key(cli.api_key, &config)?;
                commands::token::issue(&api_key, &user_id, &email, admin_scopes, &extras, output)?
            }
            TokenCommand::Inspect { token } => commands::token::inspect(&token)?,
            TokenCommand::Verify { token } => {
                let api_key = commands::resolve_api_key(cli.api_key, &config)?;
                commands::token::verify(&api_key, &token)?
            }
        },

        Command::Invitations { cmd } => {
            let api_key = commands::resolve_api_key(cli.api_key, &config)?;
            let client = vortex_client::VortexClient::from_api_config(api_key, &config.api)?;
            run_invitations(&client, cmd).await?
        }
    }

    Ok(())
}

async fn run_invitations(
    client: &vortex_client::VortexClient,
    cmd: InvitationsCommand,
) -> anyhow::Result<()> {
    use commands::invitations;

    match cmd {
        InvitationsCommand::ByTarget { target_type, value } => {
            invitations::by_target(client, &target_type, &value).await
        }
        InvitationsCommand::Get { invitation_id } => invitations::get(client, &invitation_id).await,
        InvitationsCommand::Revoke { invitation_id } => {
            invitations::revoke(client, &invitation_id).await
        }
        InvitationsCommand::Accept {
            invitation_ids,
            target_type,
            target_value,
        } => invitations::accept(client, &invitation_ids, &target_type, &target_value).await,
        InvitationsCommand::ByGroup {
            group_type,
            group_id,
        } => invitations::by_group(client, &group_type, &group_id).await,
        InvitationsCommand::DeleteByGroup {
            group_type,
            group_id,
        } => invitations::delete_by_group(client, &group_type, &group_id).await,
        InvitationsCommand::Reinvite { invitation_id } => {
            invitations::reinvite(client, &invitation_id).await
        }
    }
}
