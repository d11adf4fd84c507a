use actix_web::web::{self, Data};
use actix_web::{HttpResponse, Responder};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use tracing::{error, warn};

use crate::error::CoreError;
use crate::geometry::generate_hole;
use crate::model::ScoreEntry;
use crate::mvu::scorecard::{Msg, ScorecardModel, update};
use crate::score::snapshot::load_round_snapshot;
use crate::storage::ChangeFeedStore;
use crate::view::{render_hole_map, render_leaderboard};

/// Body of `POST /scores`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ScoreSubmission {
    pub round_id: String,
    pub player_id: String,
    pub hole: u32,
    pub strokes: i32,
}

fn get_param_str<'a>(query: &'a HashMap<String, String>, key: &str) -> &'a str {
    query.get(key).map_or("", |s| s.trim())
}

fn wants_json(query: &HashMap<String, String>) -> bool {
    match get_param_str(query, "json") {
        "1" => true,
        "0" => false,
        other => other.parse().unwrap_or(false),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/hole", web::get().to(hole))
        .route("/leaderboard", web::get().to(leaderboard))
        .route("/scores", web::post().to(submit_score))
        .route("/health", web::get().to(HttpResponse::Ok));
}

pub async fn hole(query: web::Query<HashMap<String, String>>) -> impl Responder {
    let Ok(hole_number) = get_param_str(&query, "hole").parse::<u32>() else {
        return HttpResponse::BadRequest().json(json!({"error": "hole parameter is required"}));
    };
    if hole_number == 0 {
        return HttpResponse::BadRequest().json(json!({"error": "holes are numbered from 1"}));
    }
    let Ok(par) = get_param_str(&query, "par").parse::<i32>() else {
        return HttpResponse::BadRequest().json(json!({"error": "par parameter is required"}));
    };

    match generate_hole(hole_number, par) {
        Ok(geometry) => {
            if wants_json(&query) {
                HttpResponse::Ok().json(geometry)
            } else {
                HttpResponse::Ok()
                    .content_type("image/svg+xml")
                    .body(render_hole_map(&geometry).into_string())
            }
        }
        Err(e) => HttpResponse::BadRequest().json(json!({"error": e.to_string()})),
    }
}

pub async fn leaderboard(
    query: web::Query<HashMap<String, String>>,
    store: Data<dyn ChangeFeedStore>,
) -> impl Responder {
    let round_id = get_param_str(&query, "round");
    if round_id.is_empty() {
        return HttpResponse::BadRequest().json(json!({"error": "round parameter is required"}));
    }

    match load_round_snapshot(store.get_ref(), round_id).await {
        Ok(snapshot) => {
            let board = snapshot.leaderboard();
            if wants_json(&query) {
                HttpResponse::Ok().json(board)
            } else {
                HttpResponse::Ok()
                    .content_type("text/html")
                    .body(render_leaderboard(&snapshot, &board).into_string())
            }
        }
        Err(e) => HttpResponse::NotFound().json(json!({"error": e.to_string()})),
    }
}

/// Validates the entry against the round, then upserts it. Repeating the same
/// submission is harmless.
pub async fn submit_score(
    body: web::Json<ScoreSubmission>,
    store: Data<dyn ChangeFeedStore>,
) -> impl Responder {
    let submission = body.into_inner();
    let snapshot = match load_round_snapshot(store.get_ref(), &submission.round_id).await {
        Ok(snapshot) => snapshot,
        Err(e) => return HttpResponse::NotFound().json(json!({"error": e.to_string()})),
    };

    let mut model = ScorecardModel::new(submission.round_id.as_str());
    update(&mut model, Msg::Loaded(snapshot));
    let par = match model.validate_entry(&submission.player_id, submission.hole, submission.strokes) {
        Ok(par) => par,
        Err(e) => {
            warn!(round_id = %submission.round_id, error = %e, "rejected score");
            return HttpResponse::BadRequest().json(json!({"error": e.to_string()}));
        }
    };

    let row = ScoreEntry {
        round_id: submission.round_id,
        player_id: submission.player_id,
        hole: submission.hole,
        strokes: submission.strokes,
        par,
        updated_at: Utc::now(),
    };
    match store.upsert_score(&row).await {
        Ok(()) => HttpResponse::Ok().json(row),
        Err(e) => {
            let e = CoreError::WriteFailure(e.to_string());
            error!(key = %row.key(), error = %e, "score upsert failed");
            HttpResponse::InternalServerError().json(json!({"error": e.to_string()}))
        }
    }
}
