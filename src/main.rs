use rusty_golf_scorecard::args;
use rusty_golf_scorecard::controller;
use rusty_golf_scorecard::storage::{ChangeFeedStore, SqliteStore};

use actix_web::web::Data;
use actix_web::{App, HttpServer};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = args::args_checks()?;
    let store: Arc<dyn ChangeFeedStore> = Arc::new(SqliteStore::open(&args.db_name)?);
    run_startup_tasks(&args, store.as_ref()).await?;

    let data: Data<dyn ChangeFeedStore> = Data::from(store);
    info!(bind = %args.bind, port = args.port, "starting scorecard server");
    HttpServer::new(move || App::new().app_data(data.clone()).configure(controller::configure))
        .bind(args.bind_addr())?
        .run()
        .await?;
    Ok(())
}

async fn run_startup_tasks(
    args: &args::CleanArgs,
    store: &dyn ChangeFeedStore,
) -> Result<(), Box<dyn std::error::Error>> {
    for setup in &args.rounds {
        if store.get_round(&setup.round.id).await.is_ok() {
            warn!(round_id = %setup.round.id, "round already exists, skipping");
            continue;
        }
        store.create_round(setup).await?;
    }
    Ok(())
}
