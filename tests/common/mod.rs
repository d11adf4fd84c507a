#![allow(dead_code)]

use std::sync::Arc;

use chrono::Utc;
use rusty_golf_scorecard::model::{ParEntry, Player, Round, RoundSetup, ScoreEntry};
use rusty_golf_scorecard::storage::{ChangeFeedStore, MemoryStore, StorageError};

pub const ROUND_ID: &str = "round-1";

/// Three-hole round with pars 4, 3, 5 and players Ann, Ben, Cal in that order.
pub fn three_hole_setup() -> RoundSetup {
    let players = ["ann", "ben", "cal"]
        .iter()
        .enumerate()
        .map(|(i, id)| Player {
            id: (*id).to_string(),
            round_id: ROUND_ID.to_string(),
            name: capitalize(id),
            handicap: i32::try_from(i).unwrap_or(0) * 2,
            display_order: i32::try_from(i).unwrap_or(0),
        })
        .collect();
    RoundSetup {
        round: Round {
            id: ROUND_ID.to_string(),
            course_name: "Riverside".to_string(),
            hole_count: 3,
            join_code: "RIVER3".to_string(),
        },
        players,
        pars: vec![
            ParEntry { hole: 1, par: 4 },
            ParEntry { hole: 2, par: 3 },
            ParEntry { hole: 3, par: 5 },
        ],
    }
}

pub fn score(player_id: &str, hole: u32, strokes: i32, par: i32) -> ScoreEntry {
    ScoreEntry {
        round_id: ROUND_ID.to_string(),
        player_id: player_id.to_string(),
        hole,
        strokes,
        par,
        updated_at: Utc::now(),
    }
}

pub async fn memory_store_with_round() -> Result<MemoryStore, StorageError> {
    let store = MemoryStore::new();
    store.create_round(&three_hole_setup()).await?;
    Ok(store)
}

pub fn shared(store: &MemoryStore) -> Arc<dyn ChangeFeedStore> {
    Arc::new(store.clone())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
