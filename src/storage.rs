use crate::model::{ParEntry, Player, Round, RoundSetup, ScoreEntry};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub mod feed;
pub mod memory;
pub mod sqlite;

pub use feed::ChangeFeed;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageError {
    message: String,
}

impl StorageError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for StorageError {}

impl From<String> for StorageError {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for StorageError {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::new(value.to_string())
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Update,
}

/// Row-level notification delivered by a score subscription.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub row: ScoreEntry,
}

/// Live handle on a score feed. Dropping the handle also ends the feed;
/// `unsubscribe` consumes it so a feed is torn down at most once.
#[derive(Debug)]
pub struct Subscription {
    rx: mpsc::UnboundedReceiver<ChangeEvent>,
    token: CancellationToken,
}

impl Subscription {
    pub(crate) fn new(rx: mpsc::UnboundedReceiver<ChangeEvent>, token: CancellationToken) -> Self {
        Self { rx, token }
    }

    /// Next notification, or `None` once the feed has ended.
    pub async fn recv(&mut self) -> Option<ChangeEvent> {
        if self.token.is_cancelled() {
            return None;
        }
        self.rx.recv().await
    }

    /// Non-blocking variant of `recv`.
    pub fn try_recv(&mut self) -> Option<ChangeEvent> {
        if self.token.is_cancelled() {
            return None;
        }
        self.rx.try_recv().ok()
    }

    pub fn unsubscribe(self) {
        self.token.cancel();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Shared key-value row store with subscribe-on-change.
///
/// Reads are point-in-time. `upsert_score` is keyed on `(player_id, hole)` and
/// must be safe to repeat with an identical payload.
#[async_trait]
pub trait ChangeFeedStore: Send + Sync {
    async fn get_round(&self, round_id: &str) -> Result<Round, StorageError>;
    /// Players ordered by `display_order`.
    async fn get_players(&self, round_id: &str) -> Result<Vec<Player>, StorageError>;
    /// Pars ordered by hole.
    async fn get_pars(&self, round_id: &str) -> Result<Vec<ParEntry>, StorageError>;
    async fn get_scores(&self, round_id: &str) -> Result<Vec<ScoreEntry>, StorageError>;
    async fn upsert_score(&self, row: &ScoreEntry) -> Result<(), StorageError>;
    async fn subscribe_scores(&self, round_id: &str) -> Result<Subscription, StorageError>;
    async fn create_round(&self, setup: &RoundSetup) -> Result<(), StorageError>;
}
