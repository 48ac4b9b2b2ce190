//! App-level configuration for the Google backend.
//!
//! User-provided OAuth credentials stored at:
//!   ~/.config/shiftsync/google/app_config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Google OAuth client credentials (user-provided).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub client_id: String,
    pub client_secret: String,
}

pub fn base_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Could not determine config directory")?
        .join("shiftsync")
        .join("google"))
}

impl AppConfig {
    pub fn path() -> Result<PathBuf> {
        Ok(base_dir()?.join("app_config.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "Google credentials not found.\n\n\
                Create {} with:\n\n\
                client_id = \"your-client-id.apps.googleusercontent.com\"\n\
                client_secret = \"your-client-secret\"\n\n\
                See https://console.cloud.google.com/apis/credentials for setup.",
                path.display()
            );
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read credentials from {}", path.display()))?;

        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse credentials from {}", path.display()))?;

        if config.client_id.trim().is_empty() || config.client_secret.trim().is_empty() {
            anyhow::bail!("Incomplete credentials in {}", path.display());
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_dir_is_namespaced() {
        let dir = base_dir().unwrap();
        assert!(dir.ends_with("shiftsync/google"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_config.toml");
        std::fs::write(
            &path,
            "client_id = \"abc.apps.googleusercontent.com\"\nclient_secret = \"s3cret\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.client_id, "abc.apps.googleusercontent.com");
        assert_eq!(config.client_secret, "s3cret");
    }

    #[test]
    fn test_missing_file_explains_setup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_config.toml");

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Google credentials not found"));
    }

    #[test]
    fn test_blank_secret_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_config.toml");
        std::fs::write(&path, "client_id = \"abc\"\nclient_secret = \"  \"\n").unwrap();

        assert!(AppConfig::load_from(&path).is_err());
    }
}
