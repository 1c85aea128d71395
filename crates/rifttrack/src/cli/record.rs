//! Record lookup command handler.

use super::{Cli, Commands, LookupCommands};
use rifttrack::{FetchMetrics, Game, RecordService, RiftConfig, RiftResult, RiotId};

fn target(command: &LookupCommands, config: &RiftConfig) -> RiftResult<RiotId> {
    match command {
        LookupCommands::Record { game, tag } => Ok(RiotId::new(game, tag)?),
        LookupCommands::Preset { name } => config.preset(name),
    }
}

/// Run the requested lookup and return the report text.
pub async fn run_lookup(cli: &Cli) -> RiftResult<String> {
    let config = match &cli.config {
        Some(path) => RiftConfig::load_from(path)?,
        None => RiftConfig::load()?,
    };
    let service = RecordService::from_config(&config)?;

    let (game, command) = match &cli.command {
        Commands::Lol(command) => (Game::Lol, command),
        Commands::Tft(command) => (Game::Tft, command),
    };
    let riot_id = target(command, &config)?;

    service.report(game, &riot_id, &FetchMetrics::new()).await
}
