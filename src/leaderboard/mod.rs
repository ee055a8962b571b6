//! Persisted high-score table
//!
//! The game only hands over a final score; nothing here is needed to keep
//! playing, and every failure is reported as a [`LeaderboardError`].

pub mod entry;
pub mod error;
pub mod store;

pub use entry::{LeaderboardEntry, MAX_NAME_CHARS, ScoreSubmission, sanitize_name, sanitize_score};
pub use error::LeaderboardError;
pub use store::{LeaderboardStore, RETAINED_ENTRIES, VISIBLE_ENTRIES};
