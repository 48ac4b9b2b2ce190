//! A valid Google session (access token) for calling the Calendar API.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use google_calendar::{AccessToken, Client};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::app_config::{AppConfig, base_dir};

/// Tokens are refreshed this long before Google would reject them.
const EXPIRY_MARGIN_SECONDS: i64 = 60;

pub struct Session {
    account_email: String,
    data: SessionData,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SessionData {
    access_token: String,
    refresh_token: String,
    expires_at: DateTime<Utc>,
}

impl From<&AccessToken> for SessionData {
    fn from(tokens: &AccessToken) -> Self {
        SessionData::from_tokens(
            tokens.access_token.clone(),
            tokens.refresh_token.clone(),
            tokens.expires_in,
        )
    }
}

impl SessionData {
    pub fn from_tokens(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        SessionData {
            access_token,
            refresh_token,
            expires_at: Utc::now() + Duration::seconds(expires_in),
        }
    }
}

impl Session {
    pub fn path_for_account_email(account_email: &str) -> Result<PathBuf> {
        Ok(Self::path_in(&base_dir()?, account_email))
    }

    fn path_in(dir: &Path, account_email: &str) -> PathBuf {
        let email_slug = account_email.replace(['/', '\\', ':'], "_");
        dir.join("session").join(format!("{}.toml", email_slug))
    }

    pub fn new(account_email: &str, data: SessionData) -> Self {
        Session {
            account_email: account_email.to_string(),
            data,
        }
    }

    pub fn account_email(&self) -> &str {
        &self.account_email
    }

    pub fn client(&self, app_config: &AppConfig) -> Client {
        Client::new(
            app_config.client_id.clone(),
            app_config.client_secret.clone(),
            String::new(),
            self.data.access_token.clone(),
            self.data.refresh_token.clone(),
        )
    }

    /// Load a session and refresh it if expired.
    pub async fn load_valid(account_email: &str, app_config: &AppConfig) -> Result<Self> {
        let mut session = Self::load(account_email)?;

        if session.is_expired() {
            session.refresh(app_config).await?;
        }

        Ok(session)
    }

    pub fn load(account_email: &str) -> Result<Self> {
        Self::load_from(&Self::path_for_account_email(account_email)?, account_email)
    }

    fn load_from(path: &Path, account_email: &str) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "Google OAuth session for {} not found!\n\
                Run `shiftsync auth` first.",
                account_email
            );
        }

        let contents = std::fs::read_to_string(path).with_context(|| {
            format!("Failed to read Google OAuth session from {}", path.display())
        })?;

        let data: SessionData = toml::from_str(&contents).with_context(|| {
            format!("Failed to parse Google OAuth session from {}", path.display())
        })?;

        Ok(Session {
            account_email: account_email.to_string(),
            data,
        })
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path_for_account_email(&self.account_email)?)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(&self.data).context("Failed to serialize session")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write session to {}", path.display()))?;

        // Owner-only, the file holds OAuth tokens
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("Failed to set permissions on {}", path.display()))?;
        }

        debug!(path = %path.display(), "session saved");
        Ok(())
    }

    fn is_expired(&self) -> bool {
        Utc::now() + Duration::seconds(EXPIRY_MARGIN_SECONDS) >= self.data.expires_at
    }

    async fn refresh(&mut self, app_config: &AppConfig) -> Result<()> {
        info!(account = %self.account_email, "refreshing Google access token");

        let mut tokens = self
            .client(app_config)
            .refresh_access_token()
            .await
            .context("Failed to refresh token")?;

        // Google usually omits the refresh token on refresh
        if tokens.refresh_token.is_empty() {
            tokens.refresh_token = self.data.refresh_token.clone();
        }

        self.data = (&tokens).into();
        self.save()
    }
}
