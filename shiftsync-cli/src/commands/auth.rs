use anyhow::Result;
use owo_colors::OwoColorize;

use crate::config::{ENV_PREFIX, Settings};

pub async fn run() -> Result<()> {
    println!("Authenticating with Google...");

    let account = shiftsync_provider_google::authenticate().await?;

    println!("Authenticated as: {}\n", account.bold());
    println!(
        "Set {} in {} (or {}_GOOGLE_ACCOUNT) to use it for `shiftsync sync`.",
        format!("google_account = \"{}\"", account).cyan(),
        Settings::config_path()?.display(),
        ENV_PREFIX
    );

    Ok(())
}
