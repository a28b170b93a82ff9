//! Ads Analyzer CLI - Offline analysis and operator tools.
//!
//! # Usage
//!
//! ```bash
//! # Analyze a saved campaign list with the live thresholds
//! ads-cli analyze --input campaigns.json
//!
//! # Analyze with another preset
//! ads-cli analyze --input campaigns.json --preset demo
//!
//! # Analyze the built-in demo campaigns
//! ads-cli demo --preset offline
//!
//! # Show every scoring preset
//! ads-cli presets
//!
//! # Generate a session id
//! ads-cli session-id
//! ```
//!
//! Results are printed to stdout as JSON; logs go to stderr.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use ads_analyzer_core::Preset;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ads-cli")]
#[command(author, version, about = "Ads Analyzer CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a JSON file of campaigns
    Analyze {
        /// Campaign array, or an analyze request body with `campaignData`
        #[arg(short, long)]
        input: PathBuf,

        /// Scoring preset (`live`, `demo`, `offline`)
        #[arg(short, long, default_value = "live")]
        preset: Preset,
    },
    /// Score the built-in demo campaigns
    Demo {
        /// Scoring preset (`live`, `demo`, `offline`)
        #[arg(short, long, default_value = "live")]
        preset: Preset,
    },
    /// Print every scoring preset as JSON
    Presets,
    /// Print a freshly generated session id
    SessionId,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ads_analyzer_cli=info".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Analyze { input, preset } => commands::analyze::file(&input, preset).await?,
        Commands::Demo { preset } => commands::analyze::demo(preset)?,
        Commands::Presets => commands::presets::list()?,
        Commands::SessionId => commands::session::generate(),
    }
    Ok(())
}
