//! HTTP Surface
//!
//! Two routes: `/like` runs the full operation, `/health` reports
//! per-region token availability. Handlers only shape transport concerns;
//! all operation logic lives in the engine.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::like::orchestrator::LikeOrchestrator;
use crate::like::types::{LikeReport, LikeStatus};

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<LikeOrchestrator>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/like", get(like_player))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Deserialize)]
struct LikeParams {
    uid: Option<String>,
}

/// `GET /like?uid=<digits>`
///
/// Invalid input is the only 400 and an internal fault the only 500;
/// "player not found" is a well-formed 200 body with a null player.
async fn like_player(
    State(state): State<AppState>,
    Query(params): Query<LikeParams>,
) -> Response {
    let uid = params.uid.unwrap_or_default();
    let report = state.orchestrator.run(&uid).await;

    (http_status(report.status), Json(report_body(&report))).into_response()
}

fn http_status(status: LikeStatus) -> StatusCode {
    match status {
        LikeStatus::InvalidUid => StatusCode::BAD_REQUEST,
        LikeStatus::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::OK,
    }
}

fn report_body(report: &LikeReport) -> serde_json::Value {
    match report.status {
        LikeStatus::InvalidUid => serde_json::json!({
            "error": "Invalid uid",
            "message": "Valid numeric uid required",
            "status": report.status.code(),
        }),
        LikeStatus::Internal => serde_json::json!({
            "error": "Internal server error",
            "status": report.status.code(),
        }),
        LikeStatus::NotFound => serde_json::json!({
            "uid": report.uid,
            "server_used": "UNKNOWN",
            "player": null,
            "likes_before": 0,
            "likes_after": 0,
            "likes_added": 0,
            "status": report.status.code(),
            "message": "No usable tokens or player not found",
        }),
        LikeStatus::Liked | LikeStatus::Unchanged => serde_json::json!({
            "uid": report.uid,
            "server_used": report.region,
            "player": report.player,
            "likes_before": report.likes_before,
            "likes_after": report.likes_after,
            "likes_added": report.likes_added,
            "status": report.status.code(),
        }),
    }
}

/// `GET /health`
///
/// Degraded whenever any configured region currently has no tokens.
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let readiness = state.orchestrator.readiness().await;
    let degraded = readiness.iter().any(|(_, ready)| !ready);

    let mut regions = serde_json::Map::new();
    for (name, ready) in readiness {
        regions.insert(name, serde_json::Value::Bool(ready));
    }

    Json(serde_json::json!({
        "status": if degraded { "degraded" } else { "healthy" },
        "service": "likes-gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "regions": regions,
    }))
}
