//! CLI command implementations for the Vortex tool.

pub mod invitations;
pub mod token;

use anyhow::Context;
use std::path::Path;
use vortex_core::VortexConfig;

/// Load the config file (defaults when missing) and apply `--base-url`.
pub fn load_config(path: &Path, base_url: Option<&str>) -> anyhow::Result<VortexConfig> {
    let mut config = VortexConfig::load_or_default(path)
        .with_context(|| format!("Failed to load config: {}", path.display()))?;

    if let Some(url) = base_url.filter(|url| !url.trim().is_empty()) {
        config.api.base_url = url.to_string();
        config.api.base_url_env = None;
    }

    Ok(config)
}

/// Resolve the API key from `--api-key`/`VORTEX_API_KEY`, then the config file.
pub fn resolve_api_key(api_key: Option<String>, config: &VortexConfig) -> anyhow::Result<String> {
    if let Some(key) = api_key.filter(|key| !key.trim().is_empty()) {
        return Ok(key.trim().to_string());
    }

    config
        .credential
        .resolve_api_key()
        .context("Failed to read API key file")?
        .context("API key not provided. Either pass --api-key or set VORTEX_API_KEY env var")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_config_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = load_config(&dir.path().join("vortex.yaml"), None).unwrap();
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_load_config_base_url_override() {
        let dir = tempdir().unwrap();
        let config = load_config(
            &dir.path().join("vortex.yaml"),
            Some("http://localhost:8080"),
        )
        .unwrap();
        assert_eq!(config.api.resolve_base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_resolve_api_key_flag_wins() {
        let config = VortexConfig::default();
        let key = resolve_api_key(Some(" VRTX.a.b ".to_string()), &config).unwrap();
        assert_eq!(key, "VRTX.a.b");
    }

    #[test]
    fn test_resolve_api_key_from_file() {
        let dir = tempdir().unwrap();
        let key_path = dir.path().join("api.key");
        fs::write(&key_path, "VRTX.from.file\n").unwrap();

        let mut config = VortexConfig::default();
        config.credential.api_key_env = Some("VORTEX_CLI_TEST_UNSET_KEY".to_string());
        config.credential.api_key_file = Some(key_path);

        assert_eq!(resolve_api_key(None, &config).unwrap(), "VRTX.from.file");
    }

    #[test]
    fn test_resolve_api_key_missing() {
        let dir = tempdir().unwrap();
        let mut config = VortexConfig::default();
        config.credential.api_key_env = Some("VORTEX_CLI_TEST_UNSET_KEY".to_string());
        config.credential.api_key_file = Some(dir.path().join("missing.key"));

        assert!(resolve_api_key(None, &config).is_err());
    }
}
