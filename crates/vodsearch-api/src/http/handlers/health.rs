//! Health/readiness endpoint.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::state::AppState;

/// GET /health - `ok` once the engine finished loading, `loading` with a
/// 503 before that.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    if state.engine().is_some() {
        (StatusCode::OK, Json(json!({ "status": "ok" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "loading" })),
        )
    }
}
