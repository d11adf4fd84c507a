use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type RoundId = String;
pub type PlayerId = String;

pub const DEFAULT_HOLE_COUNT: u32 = 18;
pub const DEFAULT_PAR: i32 = 4;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Round {
    pub id: RoundId,
    pub course_name: String,
    pub hole_count: u32,
    pub join_code: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub round_id: RoundId,
    pub name: String,
    pub handicap: i32,
    pub display_order: i32,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParEntry {
    pub hole: u32,
    pub par: i32,
}

/// One player's strokes on one hole. `(player_id, hole)` is the upsert key.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ScoreEntry {
    pub round_id: RoundId,
    pub player_id: PlayerId,
    pub hole: u32,
    pub strokes: i32,
    pub par: i32,
    pub updated_at: DateTime<Utc>,
}

impl ScoreEntry {
    #[must_use]
    pub fn key(&self) -> ScoreKey {
        ScoreKey::new(self.player_id.clone(), self.hole)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScoreKey {
    pub player_id: PlayerId,
    pub hole: u32,
}

impl ScoreKey {
    #[must_use]
    pub fn new(player_id: impl Into<PlayerId>, hole: u32) -> Self {
        Self {
            player_id: player_id.into(),
            hole,
        }
    }
}

impl std::fmt::Display for ScoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.player_id, self.hole)
    }
}

/// Par for `hole`, defaulting to 4 when the round has no entry for it.
#[must_use]
pub fn par_for_hole(pars: &[ParEntry], hole: u32) -> i32 {
    pars.iter()
        .find(|p| p.hole == hole)
        .map_or(DEFAULT_PAR, |p| p.par)
}
