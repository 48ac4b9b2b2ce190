use anyhow::Result;
use owo_colors::OwoColorize;
use shiftsync_provider_google::{AppConfig, Session};

use crate::config::{ENV_PREFIX, Settings};

pub fn run() -> Result<()> {
    let config_path = Settings::config_path()?;
    let settings = Settings::load()?;

    println!("{}", "Paths".bold());
    println!("  Config:       {}", config_path.display());
    println!("  Google app:   {}", AppConfig::path()?.display());
    if let Some(account) = &settings.google_account {
        println!(
            "  Session:      {}",
            Session::path_for_account_email(account)?.display()
        );
    }

    println!("\n{}", "Settings".bold());
    println!("  calendar_name:  {}", settings.calendar_name);
    println!(
        "  google_account: {}",
        settings.google_account.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  snapshot:       {}",
        settings
            .snapshot_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    );
    println!("  months:         {}", settings.months);
    println!(
        "\n{}",
        format!("Environment variables prefixed {}_ override the file.", ENV_PREFIX).dimmed()
    );

    Ok(())
}
