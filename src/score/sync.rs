//! Keeps a local `ScoreStore` converged with the shared store.
//!
//! Local entries are applied immediately and written in the background;
//! remote notifications are merged in delivery order. A failed write leaves the
//! optimistic value in place and surfaces as `SyncEvent::WriteFailed`.

use crate::error::CoreError;
use crate::model::{ParEntry, Player, Round, ScoreEntry, ScoreKey};
use crate::mvu::runtime::run_scorecard;
use crate::mvu::scorecard::{Effect, Msg, ScorecardModel, SyncEvent, WriteStatus};
use crate::score::leaderboard::{Leaderboard, compute_leaderboard};
use crate::score::snapshot::load_round_snapshot;
use crate::score::store::ScoreStore;
use crate::storage::{ChangeEvent, ChangeFeedStore, Subscription};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

enum Wake {
    Change(Option<ChangeEvent>),
    Settled(Option<Msg>),
}

pub struct SyncEngine {
    store: Arc<dyn ChangeFeedStore>,
    runtime: Handle,
    model: ScorecardModel,
    subscription: Option<Subscription>,
    outcomes_tx: mpsc::UnboundedSender<Msg>,
    outcomes_rx: mpsc::UnboundedReceiver<Msg>,
    in_flight: usize,
    events: VecDeque<SyncEvent>,
}

impl SyncEngine {
    /// Opens the score feed, then bulk-reads the round and seeds the local
    /// store. Notifications that arrive during the read wait in the feed and
    /// are applied on top of the seeded state.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::LoadFailure` if the feed cannot be opened or any of
    /// the four reads fails; the feed is torn down before returning.
    pub async fn mount(store: Arc<dyn ChangeFeedStore>, round_id: &str) -> Result<Self, CoreError> {
        let runtime = Handle::try_current().map_err(CoreError::load)?;
        let subscription = store
            .subscribe_scores(round_id)
            .await
            .map_err(|e| CoreError::LoadFailure(format!("round {round_id}: {e}")))?;

        let snapshot = match load_round_snapshot(store.as_ref(), round_id).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                subscription.unsubscribe();
                return Err(e);
            }
        };

        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        let mut engine = Self {
            store,
            runtime,
            model: ScorecardModel::new(round_id),
            subscription: Some(subscription),
            outcomes_tx,
            outcomes_rx,
            in_flight: 0,
            events: VecDeque::new(),
        };
        engine.dispatch(Msg::Loaded(snapshot));
        info!(round_id, scores = engine.model.scores.len(), "scorecard mounted");
        Ok(engine)
    }

    /// Applies a local entry at once and starts the upsert without waiting for it.
    ///
    /// # Errors
    ///
    /// Rejects non-positive strokes, holes outside the round and unknown
    /// players; nothing is applied or written then.
    pub fn record_strokes(&mut self, player_id: &str, hole: u32, strokes: i32) -> Result<(), CoreError> {
        self.model.validate_entry(player_id, hole, strokes)?;
        self.dispatch(Msg::StrokesEntered {
            player_id: player_id.to_string(),
            hole,
            strokes,
        });
        Ok(())
    }

    /// Waits for the next observable event. `None` once the feed has closed
    /// and no writes are outstanding.
    pub async fn next_event(&mut self) -> Option<SyncEvent> {
        loop {
            if let Some(event) = self.events.pop_front() {
                return Some(event);
            }

            let wake = match self.subscription.as_mut() {
                Some(subscription) => {
                    let outcomes = &mut self.outcomes_rx;
                    tokio::select! {
                        change = subscription.recv() => Wake::Change(change),
                        settled = outcomes.recv() => Wake::Settled(settled),
                    }
                }
                None if self.in_flight > 0 => Wake::Settled(self.outcomes_rx.recv().await),
                None => return None,
            };

            match wake {
                Wake::Change(Some(change)) => self.dispatch(Msg::RemoteChange(change)),
                Wake::Change(None) => {
                    warn!(round_id = %self.model.round_id, "score feed closed");
                    self.subscription = None;
                }
                Wake::Settled(Some(msg)) => self.settle(msg),
                Wake::Settled(None) => return None,
            }
        }
    }

    /// Applies whatever is already waiting, without blocking, and returns the
    /// resulting events.
    pub fn process_ready(&mut self) -> Vec<SyncEvent> {
        loop {
            let mut progressed = false;
            if let Some(change) = self.subscription.as_mut().and_then(Subscription::try_recv) {
                self.dispatch(Msg::RemoteChange(change));
                progressed = true;
            }
            if let Ok(msg) = self.outcomes_rx.try_recv() {
                self.settle(msg);
                progressed = true;
            }
            if !progressed {
                break;
            }
        }
        self.events.drain(..).collect()
    }

    /// Waits until every write started so far has settled. Their events stay
    /// queued for `next_event` / `process_ready`.
    pub async fn flush_writes(&mut self) {
        while self.in_flight > 0 {
            match self.outcomes_rx.recv().await {
                Some(msg) => self.settle(msg),
                None => break,
            }
        }
    }

    /// Tears the feed down. In-flight writes keep running but are no longer observed.
    pub fn unmount(mut self) {
        self.teardown();
    }

    #[must_use]
    pub fn round(&self) -> Option<&Round> {
        self.model.round.as_ref()
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.model.players
    }

    #[must_use]
    pub fn pars(&self) -> &[ParEntry] {
        &self.model.pars
    }

    #[must_use]
    pub fn scores(&self) -> &ScoreStore {
        &self.model.scores
    }

    #[must_use]
    pub fn write_status(&self, key: &ScoreKey) -> Option<WriteStatus> {
        self.model.write_status(key)
    }

    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    #[must_use]
    pub fn leaderboard(&self) -> Leaderboard {
        compute_leaderboard(
            &self.model.players,
            &self.model.pars,
            &self.model.scores,
            self.model.hole_count(),
        )
    }

    fn settle(&mut self, msg: Msg) {
        if matches!(msg, Msg::WriteSettled { .. }) {
            self.in_flight = self.in_flight.saturating_sub(1);
        }
        self.dispatch(msg);
    }

    fn dispatch(&mut self, msg: Msg) {
        let store = &self.store;
        let runtime = &self.runtime;
        let outcomes_tx = &self.outcomes_tx;
        let events = &mut self.events;
        let in_flight = &mut self.in_flight;
        run_scorecard(&mut self.model, msg, |effect| match effect {
            Effect::Upsert(row) => {
                *in_flight += 1;
                spawn_upsert(runtime, Arc::clone(store), row, outcomes_tx.clone());
            }
            Effect::Emit(event) => {
                if let SyncEvent::WriteFailed { key, error, .. } = &event {
                    warn!(%key, %error, "keeping unsaved local score");
                }
                events.push_back(event);
            }
        });
    }

    fn teardown(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
            info!(round_id = %self.model.round_id, "scorecard unmounted");
        }
    }
}

impl Drop for SyncEngine {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn spawn_upsert(
    runtime: &Handle,
    store: Arc<dyn ChangeFeedStore>,
    row: ScoreEntry,
    outcomes: mpsc::UnboundedSender<Msg>,
) {
    runtime.spawn(async move {
        let result = store.upsert_score(&row).await;
        debug!(key = %row.key(), ok = result.is_ok(), "score upsert settled");
        // receiver gone means the scorecard was unmounted
        let _ = outcomes.send(Msg::WriteSettled { row, result });
    });
}
