use super::{ChangeEvent, ChangeFeed, ChangeFeedStore, ChangeKind, StorageError, Subscription};
use crate::model::{ParEntry, Player, Round, RoundSetup, ScoreEntry, ScoreKey};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Default)]
struct Tables {
    rounds: HashMap<String, Round>,
    players: HashMap<String, Vec<Player>>,
    pars: HashMap<String, Vec<ParEntry>>,
    scores: BTreeMap<ScoreKey, ScoreEntry>,
}

/// Mutex-guarded tables plus a change feed. Clones share the same data, which
/// lets tests hand one instance to several engines acting as separate clients.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    feed: ChangeFeed,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every read fail until switched off again.
    pub fn force_read_failure(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every score upsert fail until switched off again.
    pub fn force_write_failure(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn feed(&self) -> &ChangeFeed {
        &self.feed
    }

    /// Rows stored for the round, ordered by key.
    #[must_use]
    pub fn score_rows(&self, round_id: &str) -> Vec<ScoreEntry> {
        self.lock()
            .scores
            .values()
            .filter(|s| s.round_id == round_id)
            .cloned()
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_read(&self) -> Result<(), StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            Err(StorageError::new("forced read failure"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ChangeFeedStore for MemoryStore {
    async fn get_round(&self, round_id: &str) -> Result<Round, StorageError> {
        self.check_read()?;
        self.lock()
            .rounds
            .get(round_id)
            .cloned()
            .ok_or_else(|| StorageError::new(format!("round {round_id} not found")))
    }

    async fn get_players(&self, round_id: &str) -> Result<Vec<Player>, StorageError> {
        self.check_read()?;
        let mut players = self
            .lock()
            .players
            .get(round_id)
            .cloned()
            .unwrap_or_default();
        players.sort_by_key(|p| p.display_order);
        Ok(players)
    }

    async fn get_pars(&self, round_id: &str) -> Result<Vec<ParEntry>, StorageError> {
        self.check_read()?;
        let mut pars = self.lock().pars.get(round_id).cloned().unwrap_or_default();
        pars.sort_by_key(|p| p.hole);
        Ok(pars)
    }

    async fn get_scores(&self, round_id: &str) -> Result<Vec<ScoreEntry>, StorageError> {
        self.check_read()?;
        Ok(self.score_rows(round_id))
    }

    async fn upsert_score(&self, row: &ScoreEntry) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::new("forced write failure"));
        }
        let mut tables = self.lock();
        let kind = match tables.scores.insert(row.key(), row.clone()) {
            Some(_) => ChangeKind::Update,
            None => ChangeKind::Insert,
        };
        self.feed.publish(&ChangeEvent {
            kind,
            row: row.clone(),
        });
        Ok(())
    }

    async fn subscribe_scores(&self, round_id: &str) -> Result<Subscription, StorageError> {
        self.check_read()?;
        Ok(self.feed.subscribe(round_id))
    }

    async fn create_round(&self, setup: &RoundSetup) -> Result<(), StorageError> {
        let mut tables = self.lock();
        let round_id = setup.round.id.clone();
        tables.rounds.insert(round_id.clone(), setup.round.clone());
        tables.players.insert(round_id.clone(), setup.players.clone());
        tables.pars.insert(round_id, setup.pars.clone());
        Ok(())
    }
}
