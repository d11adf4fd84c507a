use crate::model::{Player, ScoreEntry, ScoreKey};
use ahash::RandomState;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredScore {
    pub strokes: i32,
    pub updated_at: DateTime<Utc>,
}

/// Local view of `(player, hole) -> strokes` for one round.
///
/// Remote entries are merged last-write-wins by arrival order; timestamps are
/// carried along but never compared.
#[derive(Debug, Clone, Default)]
pub struct ScoreStore {
    entries: HashMap<ScoreKey, StoredScore, RandomState>,
}

impl ScoreStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk-load the result of the initial read.
    pub fn seed<'a>(&mut self, rows: impl IntoIterator<Item = &'a ScoreEntry>) {
        for row in rows {
            self.merge(row);
        }
    }

    #[must_use]
    pub fn get(&self, player_id: &str, hole: u32) -> Option<i32> {
        self.entries
            .get(&ScoreKey::new(player_id, hole))
            .map(|s| s.strokes)
    }

    /// Local overwrite. Callers reject non-positive strokes first.
    pub fn set(&mut self, player_id: &str, hole: u32, strokes: i32) {
        debug_assert!(strokes > 0, "strokes must be positive");
        self.entries.insert(
            ScoreKey::new(player_id, hole),
            StoredScore {
                strokes,
                updated_at: Utc::now(),
            },
        );
    }

    /// Applies a remote row; a later arrival for the same key always wins.
    pub fn merge(&mut self, row: &ScoreEntry) {
        self.entries.insert(
            row.key(),
            StoredScore {
                strokes: row.strokes,
                updated_at: row.updated_at,
            },
        );
    }

    #[must_use]
    pub fn holes_played(&self, player_id: &str, hole_count: u32) -> u32 {
        let played = (1..=hole_count)
            .filter(|&h| self.get(player_id, h).is_some())
            .count();
        u32::try_from(played).unwrap_or(u32::MAX)
    }

    /// Whether anyone in `players` has a score on `hole`.
    #[must_use]
    pub fn any_scored(&self, hole: u32, players: &[Player]) -> bool {
        players.iter().any(|p| self.get(&p.id, hole).is_some())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for ScoreStore {
    /// Equal when both hold the same strokes per key.
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.entries.get(k).is_some_and(|o| o.strokes == v.strokes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(player: &str, hole: u32, strokes: i32, secs: i64) -> ScoreEntry {
        ScoreEntry {
            round_id: "r1".into(),
            player_id: player.into(),
            hole,
            strokes,
            par: 4,
            updated_at: Utc.timestamp_opt(secs, 0).unwrap(),
        }
    }

    #[test]
    fn set_twice_is_same_as_once() {
        let mut once = ScoreStore::new();
        once.set("a", 1, 5);
        let mut twice = ScoreStore::new();
        twice.set("a", 1, 5);
        twice.set("a", 1, 5);
        assert_eq!(once, twice);
        assert_eq!(twice.len(), 1);
    }

    #[test]
    fn merge_trusts_arrival_order_over_timestamps() {
        let mut store = ScoreStore::new();
        store.merge(&row("a", 1, 4, 200));
        store.merge(&row("a", 1, 6, 100));
        assert_eq!(store.get("a", 1), Some(6));
    }

    #[test]
    fn merge_creates_missing_key_and_leaves_others() {
        let mut store = ScoreStore::new();
        store.set("a", 1, 4);
        store.merge(&row("b", 2, 3, 0));
        assert_eq!(store.get("a", 1), Some(4));
        assert_eq!(store.get("b", 2), Some(3));
        store.merge(&row("a", 1, 7, 0));
        assert_eq!(store.get("a", 1), Some(7));
        assert_eq!(store.get("b", 2), Some(3));
    }

    #[test]
    fn any_scored_only_counts_listed_players() {
        let players: Vec<Player> = ["a", "b"]
            .iter()
            .zip(0..)
            .map(|(id, order)| Player {
                id: (*id).into(),
                round_id: "r1".into(),
                name: id.to_uppercase(),
                handicap: 0,
                display_order: order,
            })
            .collect();
        let mut store = ScoreStore::new();
        store.set("b", 2, 4);
        store.set("x", 3, 4);
        assert!(store.any_scored(2, &players));
        assert!(!store.any_scored(1, &players));
        assert!(!store.any_scored(3, &players));
    }
}
