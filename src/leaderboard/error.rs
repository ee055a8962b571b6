use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeaderboardError {
    #[error("Invalid score submission: {reason}")]
    InvalidSubmission { reason: &'static str },
    #[error("Leaderboard storage is not configured")]
    NotConfigured,
    #[error("Leaderboard file error at {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unable to encode leaderboard")]
    Serde {
        #[from]
        source: serde_json::Error,
    },
}

impl LeaderboardError {
    /// True when the caller sent bad data; everything else is a server-side fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, LeaderboardError::InvalidSubmission { .. })
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LeaderboardError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        let invalid = LeaderboardError::InvalidSubmission {
            reason: "name is empty",
        };
        assert!(invalid.is_client_error());
        assert_eq!(
            invalid.to_string(),
            "Invalid score submission: name is empty"
        );

        assert!(!LeaderboardError::NotConfigured.is_client_error());

        let io = LeaderboardError::io(
            "board.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!io.is_client_error());
    }
}
