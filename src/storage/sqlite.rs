use super::{ChangeEvent, ChangeFeed, ChangeFeedStore, ChangeKind, StorageError, Subscription};
use crate::model::{ParEntry, Player, Round, RoundSetup, ScoreEntry};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::info;

const SCHEMA: [&str; 4] = [
    include_str!("../sql/schema/sqlite/01_round.sql"),
    include_str!("../sql/schema/sqlite/02_player.sql"),
    include_str!("../sql/schema/sqlite/03_par.sql"),
    include_str!("../sql/schema/sqlite/04_score.sql"),
];

const UPSERT_SCORE: &str = "INSERT INTO score (round_id, player_id, hole, strokes, par, updated_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)
     ON CONFLICT(player_id, hole) DO UPDATE SET
        round_id = excluded.round_id,
        strokes = excluded.strokes,
        par = excluded.par,
        updated_at = excluded.updated_at;";

/// SQLite-backed store. The connection lock is held across commit and
/// publish, so the feed delivers changes in commit order.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    feed: ChangeFeed,
}

impl SqliteStore {
    /// Opens (or creates) the database file and applies the schema.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the file cannot be opened or the schema fails.
    pub fn open(path: &str) -> Result<Self, StorageError> {
        let conn = if path.is_empty() || path == ":memory:" {
            Connection::open_in_memory()?
        } else {
            Connection::open(path)?
        };
        Self::with_connection(conn)
    }

    /// # Errors
    ///
    /// Will return `Err` if the schema fails to apply.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(&SCHEMA.join("\n"))?;
        info!("sqlite schema ready");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            feed: ChangeFeed::new(),
        })
    }

    #[must_use]
    pub fn feed(&self) -> &ChangeFeed {
        &self.feed
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn parse_ts(raw: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| StorageError::new(format!("bad updated_at '{raw}': {e}")))
}

#[async_trait]
impl ChangeFeedStore for SqliteStore {
    async fn get_round(&self, round_id: &str) -> Result<Round, StorageError> {
        let conn = self.lock();
        conn.query_row(
            "SELECT id, course_name, hole_count, join_code FROM round WHERE id = ?1",
            params![round_id],
            |row| {
                Ok(Round {
                    id: row.get(0)?,
                    course_name: row.get(1)?,
                    hole_count: row.get(2)?,
                    join_code: row.get(3)?,
                })
            },
        )
        .optional()?
        .ok_or_else(|| StorageError::new(format!("round {round_id} not found")))
    }

    async fn get_players(&self, round_id: &str) -> Result<Vec<Player>, StorageError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, round_id, name, handicap, display_order FROM player
             WHERE round_id = ?1 ORDER BY display_order",
        )?;
        let players = stmt
            .query_map(params![round_id], |row| {
                Ok(Player {
                    id: row.get(0)?,
                    round_id: row.get(1)?,
                    name: row.get(2)?,
                    handicap: row.get(3)?,
                    display_order: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(players)
    }

    async fn get_pars(&self, round_id: &str) -> Result<Vec<ParEntry>, StorageError> {
        let conn = self.lock();
        let mut stmt = conn.prepare("SELECT hole, par FROM par WHERE round_id = ?1 ORDER BY hole")?;
        let pars = stmt
            .query_map(params![round_id], |row| {
                Ok(ParEntry {
                    hole: row.get(0)?,
                    par: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(pars)
    }

    async fn get_scores(&self, round_id: &str) -> Result<Vec<ScoreEntry>, StorageError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT round_id, player_id, hole, strokes, par, updated_at FROM score
             WHERE round_id = ?1 ORDER BY player_id, hole",
        )?;
        let raw = stmt
            .query_map(params![round_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, u32>(2)?,
                    row.get::<_, i32>(3)?,
                    row.get::<_, i32>(4)?,
                    row.get::<_, String>(5)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        raw.into_iter()
            .map(|(round_id, player_id, hole, strokes, par, updated_at)| {
                Ok(ScoreEntry {
                    round_id,
                    player_id,
                    hole,
                    strokes,
                    par,
                    updated_at: parse_ts(&updated_at)?,
                })
            })
            .collect()
    }

    async fn upsert_score(&self, row: &ScoreEntry) -> Result<(), StorageError> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        let existed = tx
            .query_row(
                "SELECT 1 FROM score WHERE player_id = ?1 AND hole = ?2",
                params![row.player_id, row.hole],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        tx.execute(
            UPSERT_SCORE,
            params![
                row.round_id,
                row.player_id,
                row.hole,
                row.strokes,
                row.par,
                row.updated_at.to_rfc3339(),
            ],
        )?;
        tx.commit()?;

        self.feed.publish(&ChangeEvent {
            kind: if existed {
                ChangeKind::Update
            } else {
                ChangeKind::Insert
            },
            row: row.clone(),
        });
        Ok(())
    }

    async fn subscribe_scores(&self, round_id: &str) -> Result<Subscription, StorageError> {
        Ok(self.feed.subscribe(round_id))
    }

    async fn create_round(&self, setup: &RoundSetup) -> Result<(), StorageError> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        let round = &setup.round;
        tx.execute(
            "INSERT INTO round (id, course_name, hole_count, join_code) VALUES (?1, ?2, ?3, ?4)",
            params![round.id, round.course_name, round.hole_count, round.join_code],
        )?;
        for player in &setup.players {
            tx.execute(
                "INSERT INTO player (id, round_id, name, handicap, display_order)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    player.id,
                    player.round_id,
                    player.name,
                    player.handicap,
                    player.display_order
                ],
            )?;
        }
        for par in &setup.pars {
            tx.execute(
                "INSERT INTO par (round_id, hole, par) VALUES (?1, ?2, ?3)",
                params![round.id, par.hole, par.par],
            )?;
        }
        tx.commit()?;
        info!(round_id = %round.id, players = setup.players.len(), "round created");
        Ok(())
    }
}
