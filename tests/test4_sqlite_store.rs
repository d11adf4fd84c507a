mod common;

use std::sync::Arc;

use common::{ROUND_ID, score, three_hole_setup};
use rusty_golf_scorecard::SyncEngine;
use rusty_golf_scorecard::storage::{ChangeFeedStore, ChangeKind, SqliteStore};

#[tokio::test]
async fn test4_round_setup_round_trips() -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open_in_memory()?;
    let setup = three_hole_setup();
    store.create_round(&setup).await?;

    assert_eq!(store.get_round(ROUND_ID).await?, setup.round);
    let players = store.get_players(ROUND_ID).await?;
    let names: Vec<&str> = players.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Ann", "Ben", "Cal"]);
    assert_eq!(store.get_pars(ROUND_ID).await?, setup.pars);
    assert!(store.get_scores(ROUND_ID).await?.is_empty());
    assert!(store.get_round("nope").await.is_err());
    Ok(())
}

#[tokio::test]
async fn test4_upsert_reports_insert_then_update() -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open_in_memory()?;
    store.create_round(&three_hole_setup()).await?;
    let mut feed = store.subscribe_scores(ROUND_ID).await?;

    let first = score("ann", 1, 5, 4);
    store.upsert_score(&first).await?;
    store.upsert_score(&first).await?;
    let mut second = first.clone();
    second.strokes = 4;
    store.upsert_score(&second).await?;

    let kinds: Vec<ChangeKind> = std::iter::from_fn(|| feed.try_recv()).map(|c| c.kind).collect();
    assert_eq!(kinds, [ChangeKind::Insert, ChangeKind::Update, ChangeKind::Update]);

    let rows = store.get_scores(ROUND_ID).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].strokes, 4);
    assert_eq!(rows[0].par, 4);
    Ok(())
}

#[tokio::test]
async fn test4_duplicate_round_is_rejected_whole() -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open_in_memory()?;
    let setup = three_hole_setup();
    store.create_round(&setup).await?;
    assert!(store.create_round(&setup).await.is_err());
    assert_eq!(store.get_players(ROUND_ID).await?.len(), 3);
    Ok(())
}

#[tokio::test]
async fn test4_engine_over_sqlite() -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open_in_memory()?;
    store.create_round(&three_hole_setup()).await?;
    let shared: Arc<dyn ChangeFeedStore> = Arc::new(store.clone());

    let mut engine = SyncEngine::mount(Arc::clone(&shared), ROUND_ID).await?;
    engine.record_strokes("cal", 2, 2)?;
    engine.flush_writes().await;
    engine.process_ready();

    let rows = store.get_scores(ROUND_ID).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!((rows[0].player_id.as_str(), rows[0].strokes, rows[0].par), ("cal", 2, 3));
    assert_eq!(engine.leaderboard().standings[0].vs_par_display(), "-1");
    engine.unmount();
    assert_eq!(store.feed().subscriber_count(), 0);
    Ok(())
}
