//! Plain-text record reports and user-facing failure messages.

use crate::{LolRecord, TftRecord};
use rifttrack_error::{RiftError, RiftErrorKind};
use rifttrack_history::LolOutcome;
use rifttrack_riot::{LeagueEntry, QueueType};
use std::fmt;
use tracing::error;

const NO_GAMES: &str = "No ranked games found.";

/// `Tier: GOLD II 75LP`, with ` (Solo)` or ` (Ranked)` appended when `show_queue` is set,
/// or `Tier: Unranked`.
pub fn tier_line(entry: Option<&LeagueEntry>, show_queue: bool) -> String {
    let Some(entry) = entry else {
        return "Tier: Unranked".to_string();
    };

    let tier_rank = format!(
        "{} {}",
        entry.tier().as_deref().unwrap_or(""),
        entry.rank().as_deref().unwrap_or("")
    );
    let mut line = format!("Tier: {}", tier_rank.trim());
    if let Some(lp) = entry.league_points() {
        line.push_str(&format!(" {}LP", lp));
    }
    if show_queue {
        line.push_str(match entry.queue() {
            Some(QueueType::RankedSolo) => " (Solo)",
            _ => " (Ranked)",
        });
    }
    line
}

/// Keycap emoji for a TFT placement; a blank square outside 1-8.
pub fn placement_keycap(placement: u8) -> &'static str {
    match placement {
        1 => "1️⃣",
        2 => "2️⃣",
        3 => "3️⃣",
        4 => "4️⃣",
        5 => "5️⃣",
        6 => "6️⃣",
        7 => "7️⃣",
        8 => "8️⃣",
        _ => "▫️",
    }
}

fn result_mark(win: bool) -> &'static str {
    if win { "✅" } else { "❌" }
}

/// `1. Win Ahri 5/2/7 (2024-01-01)`
pub fn lol_game_line(index: usize, game: &LolOutcome) -> String {
    format!(
        "{}. {} {} {}/{}/{} ({})",
        index,
        if *game.win() { "Win" } else { "Loss" },
        game.champion(),
        game.kills(),
        game.deaths(),
        game.assists(),
        game.date().as_deref().unwrap_or("no date")
    )
}

impl fmt::Display for LolRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.account().riot_id())?;
        writeln!(f, "{}", tier_line(self.standing().as_ref(), true))?;
        writeln!(f, "Recent {} ranked games", self.target_limit())?;

        if self.games().is_empty() {
            return writeln!(f, "{}", NO_GAMES);
        }

        let marks: Vec<&str> = self.games().iter().map(|g| result_mark(*g.win())).collect();
        writeln!(f, "{}", marks.join(" "))?;
        writeln!(f)?;
        for (i, game) in self.games().iter().enumerate() {
            writeln!(f, "{}", lol_game_line(i + 1, game))?;
        }
        Ok(())
    }
}

impl fmt::Display for TftRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.account().riot_id())?;
        writeln!(f, "{}", tier_line(self.standing().as_ref(), false))?;
        writeln!(f, "Recent {} ranked games", self.target_limit())?;

        if self.games().is_empty() {
            return writeln!(f, "{}", NO_GAMES);
        }

        let keycaps: Vec<&str> = self
            .games()
            .iter()
            .map(|g| placement_keycap(*g.placement()))
            .collect();
        writeln!(f, "{}", keycaps.join(" "))
    }
}

/// The message to show a user for `err`.
///
/// Rate limits, bad keys, unknown Riot IDs and deadlines get specific messages; anything
/// else is logged and reported generically.
pub fn failure_message(err: &RiftError) -> String {
    match err.kind() {
        RiftErrorKind::Timeout(_) => {
            "The lookup took too long. Please try again.".to_string()
        }
        RiftErrorKind::Config(e) => format!("Configuration problem: {}", e.message),
        _ => match err.upstream_status() {
            Some(403) => {
                "403: The Riot API key lacks permission or has expired.".to_string()
            }
            Some(404) => "404: No player found with that Riot ID.".to_string(),
            Some(429) => {
                "429: Riot API rate limit reached. Please try again in a moment.".to_string()
            }
            _ => {
                error!(error = %err, "Record lookup failed");
                "Something went wrong while fetching the record. Please try again later."
                    .to_string()
            }
        },
    }
}
