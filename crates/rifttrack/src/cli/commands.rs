//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// rifttrack - ranked match history for League of Legends and TFT
#[derive(Parser, Debug)]
#[command(name = "rifttrack")]
#[command(about = "Ranked standing and recent ranked games for a Riot ID", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file to use instead of ./rifttrack.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// League of Legends lookups
    #[command(subcommand)]
    Lol(LookupCommands),

    /// Teamfight Tactics lookups
    #[command(subcommand)]
    Tft(LookupCommands),
}

/// Which player to look up
#[derive(Subcommand, Debug)]
pub enum LookupCommands {
    /// Tier and recent ranked games for a Riot ID
    Record {
        /// Riot ID name (the part before #)
        game: String,

        /// Riot ID tag (the part after #, e.g. KR1)
        tag: String,
    },

    /// Tier and recent ranked games for a saved Riot ID from [presets]
    Preset {
        /// Preset name
        name: String,
    },
}
