//! Token commands.
//!
//! `vortex token issue` - Issue a signed token for a user.
//! `vortex token inspect` - Decode a token without verifying it.
//! `vortex token verify` - Verify a token against the API key.

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use vortex_token::{Extra, TokenIssuer, TokenVerifier, User, inspect_token_unverified};

/// Load a token from a file if `token` names one, otherwise use it as is.
fn read_token(token: &str) -> anyhow::Result<String> {
    let path = Path::new(token);
    if path.exists() {
        return Ok(fs::read_to_string(path)
            .with_context(|| format!("Failed to read token from file: {}", path.display()))?
            .trim()
            .to_string());
    }
    Ok(token.trim().to_string())
}

/// Parse `key=value`. The value is taken as JSON when it parses, otherwise
/// as a plain string.
fn parse_extra(spec: &str) -> anyhow::Result<(String, Value)> {
    let (key, value) = spec
        .split_once('=')
        .with_context(|| format!("Invalid extra claim '{spec}'. Expected key=value"))?;
    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("Invalid extra claim '{spec}'. Key must not be empty");
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

fn format_timestamp(secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| secs.to_string())
}

/// Issue a token for a user.
pub fn issue(
    api_key: &str,
    user_id: &str,
    email: &str,
    admin_scopes: Vec<String>,
    extras: &[String],
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let issuer = TokenIssuer::new(api_key).context("Failed to parse API key")?;

    let mut user = User::new(user_id, email);
    if !admin_scopes.is_empty() {
        user = user.with_admin_scopes(admin_scopes);
    }

    let mut extra = Extra::new();
    for spec in extras {
        let (key, value) = parse_extra(spec)?;
        extra.insert(key, value);
    }
    let extra = (!extra.is_empty()).then_some(extra);

    let token = issuer.issue(&user, extra.as_ref())?;

    if let Some(output_path) = output {
        fs::write(&output_path, &token)
            .with_context(|| format!("Failed to write token: {}", output_path.display()))?;
        println!("✔ Token written to: {}", output_path.display());
        println!("  User: {user_id}");
        println!("  Key id: {}", issuer.credential().kid());
    } else {
        println!("{token}");
    }

    Ok(())
}

/// Inspect a token without verification.
pub fn inspect(token: &str) -> anyhow::Result<()> {
    let token = read_token(token)?;
    let info = inspect_token_unverified(&token)?;

    println!("Token Information:");
    println!("  Key id: {}", info.header.kid);
    println!("  Issued at: {}", format_timestamp(info.header.iat));
    println!("  Signature: {} bytes", info.signature_len);
    println!();
    println!("Header:");
    println!("{}", serde_json::to_string_pretty(&info.header)?);
    println!("Payload:");
    println!("{}", serde_json::to_string_pretty(&info.payload)?);

    Ok(())
}

/// Verify a token against the API key.
pub fn verify(api_key: &str, token: &str) -> anyhow::Result<()> {
    let verifier = TokenVerifier::new(api_key).context("Failed to parse API key")?;
    let token = read_token(token)?;

    match verifier.verify(&token) {
        Ok(verified) => {
            println!("✔ Token is valid");
            println!();
            println!("Token Details:");
            println!("  User: {}", verified.user_id().unwrap_or("(none)"));
            println!("  Email: {}", verified.user_email().unwrap_or("(none)"));
            match verified.admin_scopes() {
                Some(scopes) => println!("  Admin scopes: {}", scopes.join(", ")),
                None => println!("  Admin scopes: (none)"),
            }
            println!("  Issued at: {}", format_timestamp(verified.issued_at()));
            if let Some(expires) = verified.expires_at() {
                println!("  Expires: {}", format_timestamp(expires));
            }
        }
        Err(e) => {
            println!("✖ Token verification failed: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}
