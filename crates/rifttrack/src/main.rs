//! rifttrack CLI binary.
//!
//! This binary prints a player's ranked standing and recent ranked games:
//! - `rifttrack lol record <game> <tag>`
//! - `rifttrack tft record <game> <tag>`
//! - `rifttrack lol|tft preset <name>` for Riot IDs saved in configuration

use clap::Parser;
use rifttrack::{ObservabilityConfig, failure_message, init_observability_with_config};
use std::process::ExitCode;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    use cli::{Cli, run_lookup};

    // .env is optional; RIOT_API_KEY may already be in the environment
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut observability = ObservabilityConfig::new().with_json_logs(cli.json_logs);
    if cli.verbose {
        observability = observability.with_log_level("debug");
    }
    if let Err(e) = init_observability_with_config(observability) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run_lookup(&cli).await {
        Ok(report) => {
            print!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", failure_message(&e));
            ExitCode::FAILURE
        }
    }
}
