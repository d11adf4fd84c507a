use crate::error::CoreError;
use crate::model::{ParEntry, Player, Round, ScoreEntry};
use crate::score::leaderboard::{Leaderboard, compute_leaderboard};
use crate::score::store::ScoreStore;
use crate::storage::ChangeFeedStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Point-in-time copy of everything a scorecard needs.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RoundSnapshot {
    pub round: Round,
    pub players: Vec<Player>,
    pub pars: Vec<ParEntry>,
    pub scores: Vec<ScoreEntry>,
}

impl RoundSnapshot {
    #[must_use]
    pub fn score_store(&self) -> ScoreStore {
        let mut store = ScoreStore::new();
        store.seed(&self.scores);
        store
    }

    #[must_use]
    pub fn leaderboard(&self) -> Leaderboard {
        compute_leaderboard(
            &self.players,
            &self.pars,
            &self.score_store(),
            self.round.hole_count,
        )
    }
}

/// Issues the four reads concurrently; any one failing fails the load.
///
/// # Errors
///
/// Returns `CoreError::LoadFailure` naming the round when any read fails.
pub async fn load_round_snapshot(
    store: &dyn ChangeFeedStore,
    round_id: &str,
) -> Result<RoundSnapshot, CoreError> {
    let (round, players, pars, scores) = futures::try_join!(
        store.get_round(round_id),
        store.get_players(round_id),
        store.get_pars(round_id),
        store.get_scores(round_id),
    )
    .map_err(|e| {
        warn!(round_id, error = %e, "round load failed");
        CoreError::LoadFailure(format!("round {round_id}: {e}"))
    })?;
    debug!(
        round_id,
        players = players.len(),
        scores = scores.len(),
        "round loaded"
    );
    Ok(RoundSnapshot {
        round,
        players,
        pars,
        scores,
    })
}
