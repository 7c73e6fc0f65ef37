use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/snapshot", get(latest_snapshot))
        .route("/signals", get(latest_signals))
        .route("/candles", get(candles))
        .route("/ichimoku", get(ichimoku))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ---------------------------------------------------------------------------
// Market state
// ---------------------------------------------------------------------------

async fn latest_snapshot(State(state): State<Arc<AppState>>) -> Response {
    match state.snapshot.read().await.clone() {
        Some(snapshot) => Json(snapshot).into_response(),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({"error": "no snapshot yet"})),
        )
            .into_response(),
    }
}

async fn latest_signals(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let signals = state.signals.read().await;
    let list: Vec<_> = signals.values().cloned().collect();
    Json(list)
}

// ---------------------------------------------------------------------------
// Chart series
// ---------------------------------------------------------------------------

async fn candles(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.candles.read().await.clone())
}

async fn ichimoku(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.ichimoku.read().await.clone())
}
