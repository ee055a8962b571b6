//! Non-interactive leaderboard commands

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::leaderboard::{LeaderboardEntry, LeaderboardStore, ScoreSubmission};

/// Write the visible leaderboard, one ranked line per entry
pub fn write_leaderboard(out: &mut impl Write, entries: &[LeaderboardEntry]) -> Result<()> {
    if entries.is_empty() {
        writeln!(out, "No scores yet. Be the first!")?;
        return Ok(());
    }

    for (rank, entry) in entries.iter().enumerate() {
        writeln!(out, "{}", entry.display_line(rank))?;
    }
    Ok(())
}

pub fn show_leaderboard(path: Option<&Path>) -> Result<()> {
    let store = LeaderboardStore::open(path).context("Failed to open leaderboard")?;
    let entries = store.top().context("Failed to read leaderboard")?;
    write_leaderboard(&mut std::io::stdout().lock(), &entries)
}

pub fn submit_score(path: Option<&Path>, name: &str, score: f64) -> Result<()> {
    let submission = ScoreSubmission::new(name, score).context("Rejected score")?;
    let store = LeaderboardStore::open(path).context("Failed to open leaderboard")?;
    let entries = store
        .submit(submission)
        .with_context(|| format!("Failed to save score to {:?}", store.path()))?;
    write_leaderboard(&mut std::io::stdout().lock(), &entries)
}
