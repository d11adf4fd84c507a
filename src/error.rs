use crate::geometry::InvalidParError;
use crate::storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// One of the bulk reads for a round failed. Terminal for the view.
    #[error("could not load round: {0}")]
    LoadFailure(String),
    #[error(transparent)]
    InvalidPar(#[from] InvalidParError),
    /// A score upsert was rejected by the remote store.
    #[error("score write failed: {0}")]
    WriteFailure(String),
    #[error("invalid strokes {0}: must be a positive number")]
    InvalidStrokes(i32),
    #[error("hole {hole} is outside 1..={hole_count}")]
    InvalidHole { hole: u32, hole_count: u32 },
    #[error("unknown player: {0}")]
    UnknownPlayer(String),
    #[error("invalid round: {0}")]
    InvalidRound(String),
    #[error("db error: {0}")]
    Db(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("{0}")]
    Other(String),
}

impl CoreError {
    #[must_use]
    pub fn load(err: impl std::fmt::Display) -> Self {
        Self::LoadFailure(err.to_string())
    }
}

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        Self::Db(err.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<String> for CoreError {
    fn from(err: String) -> Self {
        Self::Other(err)
    }
}

impl From<&str> for CoreError {
    fn from(err: &str) -> Self {
        Self::Other(err.to_string())
    }
}
