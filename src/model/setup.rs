use crate::error::CoreError;
use crate::geometry::Par;
use crate::model::{ParEntry, Player, Round};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

static JOIN_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z0-9]{4,8}$").expect("join code pattern")
});

/// Everything written once when a round is started.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RoundSetup {
    pub round: Round,
    pub players: Vec<Player>,
    pub pars: Vec<ParEntry>,
}

impl RoundSetup {
    /// # Errors
    ///
    /// Returns `CoreError::InvalidRound` for a hole count other than 9 or 18, a
    /// malformed join code, duplicate or foreign players, or an incomplete par
    /// table, and `CoreError::InvalidPar` for a par outside 3..=5.
    pub fn validate(&self) -> Result<(), CoreError> {
        let round = &self.round;
        if round.hole_count != 9 && round.hole_count != 18 {
            return Err(CoreError::InvalidRound(format!(
                "hole count must be 9 or 18, got {}",
                round.hole_count
            )));
        }
        if !JOIN_CODE.is_match(&round.join_code) {
            return Err(CoreError::InvalidRound(format!(
                "join code '{}' must be 4-8 uppercase letters or digits",
                round.join_code
            )));
        }

        let mut seen = HashSet::new();
        for player in &self.players {
            if player.round_id != round.id {
                return Err(CoreError::InvalidRound(format!(
                    "player {} belongs to round {}",
                    player.id, player.round_id
                )));
            }
            if !seen.insert(player.id.as_str()) {
                return Err(CoreError::InvalidRound(format!(
                    "duplicate player id {}",
                    player.id
                )));
            }
        }

        for hole in 1..=round.hole_count {
            let entry = self
                .pars
                .iter()
                .find(|p| p.hole == hole)
                .ok_or_else(|| CoreError::InvalidRound(format!("missing par for hole {hole}")))?;
            Par::try_from(entry.par)?;
        }
        if self.pars.len() != round.hole_count as usize {
            return Err(CoreError::InvalidRound(format!(
                "expected {} par entries, got {}",
                round.hole_count,
                self.pars.len()
            )));
        }
        Ok(())
    }
}
