use crate::error::CoreError;
use crate::model::{ParEntry, Player, Round, ScoreEntry, ScoreKey, par_for_hole};
use crate::score::snapshot::RoundSnapshot;
use crate::score::store::ScoreStore;
use crate::storage::{ChangeEvent, StorageError};
use ahash::RandomState;
use chrono::Utc;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Local,
    Remote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    Pending,
    Confirmed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    ScoreApplied {
        key: ScoreKey,
        strokes: i32,
        origin: Origin,
    },
    WriteConfirmed {
        key: ScoreKey,
        strokes: i32,
    },
    WriteFailed {
        key: ScoreKey,
        strokes: i32,
        error: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct KeyWrite {
    strokes: i32,
    status: WriteStatus,
}

#[derive(Debug, Clone)]
pub struct ScorecardModel {
    pub round_id: String,
    pub round: Option<Round>,
    pub players: Vec<Player>,
    pub pars: Vec<ParEntry>,
    pub scores: ScoreStore,
    writes: HashMap<ScoreKey, KeyWrite, RandomState>,
}

impl ScorecardModel {
    #[must_use]
    pub fn new(round_id: impl Into<String>) -> Self {
        Self {
            round_id: round_id.into(),
            round: None,
            players: Vec::new(),
            pars: Vec::new(),
            scores: ScoreStore::new(),
            writes: HashMap::default(),
        }
    }

    #[must_use]
    pub fn hole_count(&self) -> u32 {
        self.round
            .as_ref()
            .map_or(crate::model::DEFAULT_HOLE_COUNT, |r| r.hole_count)
    }

    /// Status of the last local write for `key`, if there was one.
    #[must_use]
    pub fn write_status(&self, key: &ScoreKey) -> Option<WriteStatus> {
        self.writes.get(key).map(|w| w.status)
    }

    /// Checks a local entry before it touches the store; returns the hole's par.
    ///
    /// # Errors
    ///
    /// `InvalidStrokes` for strokes below 1, `InvalidHole` outside the round,
    /// `UnknownPlayer` for a player not in this round.
    pub fn validate_entry(&self, player_id: &str, hole: u32, strokes: i32) -> Result<i32, CoreError> {
        if strokes <= 0 {
            return Err(CoreError::InvalidStrokes(strokes));
        }
        let hole_count = self.hole_count();
        if hole == 0 || hole > hole_count {
            return Err(CoreError::InvalidHole { hole, hole_count });
        }
        if !self.players.iter().any(|p| p.id == player_id) {
            return Err(CoreError::UnknownPlayer(player_id.to_string()));
        }
        Ok(par_for_hole(&self.pars, hole))
    }
}

#[derive(Debug, Clone)]
pub enum Msg {
    Loaded(RoundSnapshot),
    RemoteChange(ChangeEvent),
    StrokesEntered {
        player_id: String,
        hole: u32,
        strokes: i32,
    },
    WriteSettled {
        row: ScoreEntry,
        result: Result<(), StorageError>,
    },
}

#[derive(Debug, Clone)]
pub enum Effect {
    Upsert(ScoreEntry),
    Emit(SyncEvent),
}

pub fn update(model: &mut ScorecardModel, msg: Msg) -> Vec<Effect> {
    match msg {
        Msg::Loaded(snapshot) => {
            model.scores.seed(&snapshot.scores);
            model.round = Some(snapshot.round);
            model.players = snapshot.players;
            model.pars = snapshot.pars;
            vec![]
        }
        Msg::RemoteChange(change) => {
            let row = change.row;
            if row.round_id != model.round_id {
                return vec![];
            }
            model.scores.merge(&row);
            let key = row.key();
            // the store now holds this value, whatever we wrote locally
            model.writes.insert(
                key.clone(),
                KeyWrite {
                    strokes: row.strokes,
                    status: WriteStatus::Confirmed,
                },
            );
            vec![Effect::Emit(SyncEvent::ScoreApplied {
                key,
                strokes: row.strokes,
                origin: Origin::Remote,
            })]
        }
        Msg::StrokesEntered {
            player_id,
            hole,
            strokes,
        } => {
            let par = par_for_hole(&model.pars, hole);
            model.scores.set(&player_id, hole, strokes);
            let key = ScoreKey::new(player_id.clone(), hole);
            model.writes.insert(
                key.clone(),
                KeyWrite {
                    strokes,
                    status: WriteStatus::Pending,
                },
            );
            let row = ScoreEntry {
                round_id: model.round_id.clone(),
                player_id,
                hole,
                strokes,
                par,
                updated_at: Utc::now(),
            };
            vec![
                Effect::Emit(SyncEvent::ScoreApplied {
                    key,
                    strokes,
                    origin: Origin::Local,
                }),
                Effect::Upsert(row),
            ]
        }
        Msg::WriteSettled { row, result } => {
            let key = row.key();
            let status = if result.is_ok() {
                WriteStatus::Confirmed
            } else {
                WriteStatus::Failed
            };
            // an older write settling must not overwrite the status of a newer one
            if let Some(write) = model.writes.get_mut(&key) {
                if write.status == WriteStatus::Pending && write.strokes == row.strokes {
                    write.status = status;
                }
            }
            match result {
                Ok(()) => vec![Effect::Emit(SyncEvent::WriteConfirmed {
                    key,
                    strokes: row.strokes,
                })],
                Err(e) => vec![Effect::Emit(SyncEvent::WriteFailed {
                    key,
                    strokes: row.strokes,
                    error: CoreError::WriteFailure(e.to_string()).to_string(),
                })],
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ChangeKind;

    fn loaded_model() -> ScorecardModel {
        let mut model = ScorecardModel::new("r1");
        update(
            &mut model,
            Msg::Loaded(RoundSnapshot {
                round: Round {
                    id: "r1".into(),
                    course_name: "Riverside".into(),
                    hole_count: 9,
                    join_code: "ABCD".into(),
                },
                players: vec![Player {
                    id: "p1".into(),
                    round_id: "r1".into(),
                    name: "Ann".into(),
                    handicap: 0,
                    display_order: 0,
                }],
                pars: vec![ParEntry { hole: 1, par: 3 }],
                scores: vec![],
            }),
        );
        model
    }

    #[test]
    fn local_entry_is_applied_before_the_upsert() {
        let mut model = loaded_model();
        let effects = update(
            &mut model,
            Msg::StrokesEntered {
                player_id: "p1".into(),
                hole: 1,
                strokes: 4,
            },
        );
        assert_eq!(model.scores.get("p1", 1), Some(4));
        assert!(matches!(effects[0], Effect::Emit(SyncEvent::ScoreApplied { origin: Origin::Local, .. })));
        match &effects[1] {
            Effect::Upsert(row) => assert_eq!((row.hole, row.strokes, row.par), (1, 4, 3)),
            other => panic!("unexpected effect {other:?}"),
        }
        assert_eq!(model.write_status(&ScoreKey::new("p1", 1)), Some(WriteStatus::Pending));
    }

    #[test]
    fn stale_settlement_keeps_newer_write_pending() {
        let mut model = loaded_model();
        let mut rows = Vec::new();
        for strokes in [5, 6] {
            for effect in update(
                &mut model,
                Msg::StrokesEntered {
                    player_id: "p1".into(),
                    hole: 1,
                    strokes,
                },
            ) {
                if let Effect::Upsert(row) = effect {
                    rows.push(row);
                }
            }
        }
        update(
            &mut model,
            Msg::WriteSettled {
                row: rows[0].clone(),
                result: Ok(()),
            },
        );
        assert_eq!(model.write_status(&ScoreKey::new("p1", 1)), Some(WriteStatus::Pending));
        assert_eq!(model.scores.get("p1", 1), Some(6));
    }

    #[test]
    fn failed_write_keeps_optimistic_value() {
        let mut model = loaded_model();
        let effects = update(
            &mut model,
            Msg::StrokesEntered {
                player_id: "p1".into(),
                hole: 1,
                strokes: 2,
            },
        );
        let Some(Effect::Upsert(row)) = effects.into_iter().last() else {
            panic!("no upsert");
        };
        let effects = update(
            &mut model,
            Msg::WriteSettled {
                row,
                result: Err(StorageError::new("offline")),
            },
        );
        assert!(matches!(effects[0], Effect::Emit(SyncEvent::WriteFailed { .. })));
        assert_eq!(model.scores.get("p1", 1), Some(2));
        assert_eq!(model.write_status(&ScoreKey::new("p1", 1)), Some(WriteStatus::Failed));
    }

    #[test]
    fn remote_change_for_other_round_is_ignored() {
        let mut model = loaded_model();
        let effects = update(
            &mut model,
            Msg::RemoteChange(ChangeEvent {
                kind: ChangeKind::Insert,
                row: ScoreEntry {
                    round_id: "other".into(),
                    player_id: "p1".into(),
                    hole: 1,
                    strokes: 9,
                    par: 3,
                    updated_at: Utc::now(),
                },
            }),
        );
        assert!(effects.is_empty());
        assert_eq!(model.scores.get("p1", 1), None);
    }

    #[test]
    fn validation_rejects_bad_input() {
        let model = loaded_model();
        assert_eq!(model.validate_entry("p1", 1, 0), Err(CoreError::InvalidStrokes(0)));
        assert_eq!(
            model.validate_entry("p1", 10, 4),
            Err(CoreError::InvalidHole { hole: 10, hole_count: 9 })
        );
        assert_eq!(
            model.validate_entry("nobody", 1, 4),
            Err(CoreError::UnknownPlayer("nobody".into()))
        );
        assert_eq!(model.validate_entry("p1", 2, 4), Ok(4));
    }
}
