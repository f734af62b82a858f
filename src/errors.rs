// errors.rs
use std::fmt;

/// Errors originating from the host layers (feed ingestion, snapshot
/// storage). The domain core itself has no failure modes.
#[derive(Debug)]
pub enum TrackerError {
    Feed(String),
    Storage(String),
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerError::Feed(msg) => write!(f, "Feed error: {msg}"),
            TrackerError::Storage(msg) => write!(f, "Storage error: {msg}"),
        }
    }
}

impl std::error::Error for TrackerError {}
