use axum::Json;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let stats_available = state.stats.read().await.is_some();
    Json(serde_json::json!({
        "ok": true,
        "stats_available": stats_available,
    }))
}

/// Latest generated stats file, uncached. 404 until the poller has run once.
pub async fn get_stats(State(state): State<AppState>) -> Response {
    let Some(stats) = state.stats.read().await.clone() else {
        return (StatusCode::NOT_FOUND, "stats not generated yet").into_response();
    };
    let mut response = Json(stats).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    response
}
