mod commands;
mod config;
mod logging;
mod render;
mod utils;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::commands::sync::SyncArgs;
use crate::config::Settings;

#[derive(Parser)]
#[command(name = "shiftsync")]
#[command(about = "Sync work shifts from a schedule snapshot into Google Calendar")]
struct Cli {
    /// Log more (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect a Google account (opens a browser)
    Auth,
    /// Collect shifts from a snapshot and reconcile them into the calendar
    Sync(SyncArgs),
    /// Show configuration paths and resolved settings
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is the normal case
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Auth => commands::auth::run().await,
        Commands::Sync(args) => {
            let settings = Settings::load()?;
            let options = args.resolve(&settings)?;
            commands::sync::run(options).await
        }
        Commands::Config => commands::config::run(),
    }
}
