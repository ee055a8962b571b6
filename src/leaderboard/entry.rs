use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::error::LeaderboardError;

/// Longest player name kept, in characters
pub const MAX_NAME_CHARS: usize = 16;

/// One recorded score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    pub timestamp: DateTime<Utc>,
}

impl LeaderboardEntry {
    /// Higher scores first, newer entries first among equal scores
    pub fn rank_order(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
        b.score
            .cmp(&a.score)
            .then_with(|| b.timestamp.cmp(&a.timestamp))
    }

    /// `rank` is zero-based
    pub fn display_line(&self, rank: usize) -> String {
        format!(
            "{}. {} - {} ({})",
            rank + 1,
            self.name,
            self.score,
            self.timestamp.format("%Y-%m-%d")
        )
    }
}

/// A validated name/score pair ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSubmission {
    name: String,
    score: u32,
}

impl ScoreSubmission {
    pub fn new(name: &str, score: f64) -> Result<Self, LeaderboardError> {
        let name = sanitize_name(name).ok_or(LeaderboardError::InvalidSubmission {
            reason: "name is required",
        })?;
        let score = sanitize_score(score).ok_or(LeaderboardError::InvalidSubmission {
            reason: "score must be a non-negative number",
        })?;

        Ok(Self { name, score })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn into_entry(self, timestamp: DateTime<Utc>) -> LeaderboardEntry {
        LeaderboardEntry {
            name: self.name,
            score: self.score,
            timestamp,
        }
    }
}

/// Trim and cap at [`MAX_NAME_CHARS`]; `None` when nothing is left
pub fn sanitize_name(raw: &str) -> Option<String> {
    let name: String = raw.trim().chars().take(MAX_NAME_CHARS).collect();
    if name.is_empty() { None } else { Some(name) }
}

/// Floor a finite, non-negative score
pub fn sanitize_score(raw: f64) -> Option<u32> {
    if !raw.is_finite() || raw < 0.0 {
        return None;
    }
    Some(raw.floor().min(u32::MAX as f64) as u32)
}
