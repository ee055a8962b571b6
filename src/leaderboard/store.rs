//! JSON-file leaderboard
//!
//! The whole board lives in one file as an array of entries. Only the best
//! [`RETAINED_ENTRIES`] are kept on disk, and readers only ever see the best
//! [`VISIBLE_ENTRIES`].

use chrono::{DateTime, Utc};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use super::entry::{LeaderboardEntry, ScoreSubmission};
use super::error::LeaderboardError;

/// Entries returned to readers
pub const VISIBLE_ENTRIES: usize = 10;
/// Entries kept on disk
pub const RETAINED_ENTRIES: usize = 40;

pub type Result<T> = std::result::Result<T, LeaderboardError>;

#[derive(Debug, Clone)]
pub struct LeaderboardStore {
    path: PathBuf,
}

impl LeaderboardStore {
    /// Open the board at `path`, creating an empty one if needed.
    ///
    /// `None` means no storage location was configured.
    pub fn open(path: Option<&Path>) -> Result<Self> {
        let path = path.ok_or(LeaderboardError::NotConfigured)?;
        let store = Self {
            path: path.to_path_buf(),
        };
        store.ensure_file()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The visible top of the board
    pub fn top(&self) -> Result<Vec<LeaderboardEntry>> {
        let mut entries = self.load()?;
        entries.sort_by(LeaderboardEntry::rank_order);
        entries.truncate(VISIBLE_ENTRIES);
        Ok(entries)
    }

    /// Record a score now and return the refreshed top of the board
    pub fn submit(&self, submission: ScoreSubmission) -> Result<Vec<LeaderboardEntry>> {
        self.submit_at(submission, Utc::now())
    }

    pub fn submit_at(
        &self,
        submission: ScoreSubmission,
        timestamp: DateTime<Utc>,
    ) -> Result<Vec<LeaderboardEntry>> {
        let mut entries = self.load()?;
        info!(
            "Recording score {} for {:?}",
            submission.score(),
            submission.name()
        );
        entries.push(submission.into_entry(timestamp));
        entries.sort_by(LeaderboardEntry::rank_order);
        entries.truncate(RETAINED_ENTRIES);
        self.persist(&entries)?;

        entries.truncate(VISIBLE_ENTRIES);
        Ok(entries)
    }

    fn ensure_file(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| LeaderboardError::io(parent, e))?;
            }
        }

        if !self.path.exists() {
            info!("Creating empty leaderboard at {:?}", self.path);
            fs::write(&self.path, "[]").map_err(|e| LeaderboardError::io(&self.path, e))?;
        }

        Ok(())
    }

    /// Read every stored entry; a corrupt file reads as an empty board
    fn load(&self) -> Result<Vec<LeaderboardEntry>> {
        self.ensure_file()?;
        let raw = fs::read_to_string(&self.path).map_err(|e| LeaderboardError::io(&self.path, e))?;

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                warn!("Unable to parse leaderboard file {:?}: {}", self.path, err);
                Ok(Vec::new())
            }
        }
    }

    fn persist(&self, entries: &[LeaderboardEntry]) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json).map_err(|e| LeaderboardError::io(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn submission(name: &str, score: u32) -> ScoreSubmission {
        ScoreSubmission::new(name, score as f64).unwrap()
    }

    #[test]
    fn test_not_configured() {
        let err = LeaderboardStore::open(None).unwrap_err();
        assert!(matches!(err, LeaderboardError::NotConfigured));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_open_creates_empty_board() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("leaderboard.json");

        let store = LeaderboardStore::open(Some(path.as_path())).unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        assert!(store.top().unwrap().is_empty());
    }

    #[test]
    fn test_submit_orders_by_score_then_recency() {
        let dir = TempDir::new().unwrap();
        let store = LeaderboardStore::open(Some(dir.path().join("board.json").as_path())).unwrap();

        store.submit_at(submission("first", 5), at(10)).unwrap();
        store.submit_at(submission("best", 12), at(20)).unwrap();
        let top = store.submit_at(submission("second", 5), at(30)).unwrap();

        let names: Vec<_> = top.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["best", "second", "first"]);
        assert_eq!(store.top().unwrap(), top);
    }

    #[test]
    fn test_readers_see_ten_and_disk_keeps_forty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.json");
        let store = LeaderboardStore::open(Some(path.as_path())).unwrap();

        for score in 0..45u32 {
            let top = store
                .submit_at(submission("p", score), at(score as i64))
                .unwrap();
            assert!(top.len() <= VISIBLE_ENTRIES);
        }

        let top = store.top().unwrap();
        assert_eq!(top.len(), VISIBLE_ENTRIES);
        assert_eq!(top[0].score, 44);
        assert_eq!(top[9].score, 35);

        let stored: Vec<LeaderboardEntry> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(stored.len(), RETAINED_ENTRIES);
        assert_eq!(stored.last().map(|e| e.score), Some(5));
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.json");
        fs::write(&path, "{ not json").unwrap();

        let store = LeaderboardStore::open(Some(path.as_path())).unwrap();
        assert!(store.top().unwrap().is_empty());

        let top = store.submit_at(submission("fresh", 1), at(0)).unwrap();
        assert_eq!(top.len(), 1);
    }

    #[test]
    fn test_reads_existing_board() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.json");
        fs::write(
            &path,
            r#"[
                {"name": "ada", "score": 3, "timestamp": "2024-05-01T10:00:00.000Z"},
                {"name": "bo", "score": 8, "timestamp": "2024-05-02T10:00:00.000Z"}
            ]"#,
        )
        .unwrap();

        let store = LeaderboardStore::open(Some(path.as_path())).unwrap();
        let top = store.top().unwrap();

        assert_eq!(top[0].name, "bo");
        assert_eq!(top[1].name, "ada");
    }
}
