//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the rifttrack binary.

mod commands;
mod record;

pub use commands::{Cli, Commands, LookupCommands};
pub use record::run_lookup;
