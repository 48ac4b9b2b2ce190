use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use shiftsync_core::constants::{DEFAULT_CALENDAR_NAME, DEFAULT_MONTHS};
use tracing::info;

pub const ENV_PREFIX: &str = "SHIFTSYNC";

const DEFAULT_CONFIG: &str = r#"# shiftsync configuration
#
# Every key can also be set through the environment, e.g. SHIFTSYNC_MONTHS=3.
# Command line flags win over both.

# Name of the Google calendar that receives the shifts (created if missing)
# calendar_name = "Rohlik směny"

# Google account connected with `shiftsync auth`
# google_account = "you@gmail.com"

# Schedule snapshot written by the browser driver
# snapshot = "~/shifts/snapshot.json"

# Number of months to collect, starting with the one shown first
# months = 2
"#;

fn default_calendar_name() -> String {
    DEFAULT_CALENDAR_NAME.to_string()
}

fn default_months() -> usize {
    DEFAULT_MONTHS
}

/// Global configuration at ~/.config/shiftsync/config.toml
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_calendar_name")]
    pub calendar_name: String,

    pub google_account: Option<String>,

    pub snapshot: Option<PathBuf>,

    #[serde(default = "default_months")]
    pub months: usize,
}

impl Settings {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("shiftsync");

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        write_default_if_missing(&path)?;
        Self::load_from(&path)
    }

    /// Settings from `path` (optional) overlaid with `SHIFTSYNC_*` variables.
    pub fn load_from(path: &Path) -> Result<Self> {
        let settings: Settings = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;

        Ok(settings)
    }

    /// Snapshot path with `~` expanded.
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        self.snapshot.as_deref().map(expand_path)
    }
}

pub fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

/// Create a commented config file on first run. Returns whether one was written.
pub fn write_default_if_missing(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write default config to {}", path.display()))?;

    info!(path = %path.display(), "default config created");
    Ok(true)
}
