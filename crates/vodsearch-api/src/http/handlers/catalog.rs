//! Ingest, query, and save handlers.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use vodsearch_core::search::service::DEFAULT_TOP_K;
use vodsearch_types::record::{QueryHit, Record};

use crate::http::error::ApiError;
use crate::state::AppState;

/// POST /add request body.
#[derive(Debug, Deserialize)]
pub struct AddRequest {
    /// Records to ingest. A missing key reads as an empty batch and is
    /// rejected the same way.
    #[serde(default)]
    pub metadata: Vec<Record>,
}

/// POST /query request body.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub property: String,

    #[serde(default)]
    pub query: String,

    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

/// POST /query response body.
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub results: Vec<QueryHit>,
}

/// POST /add - Ingest a batch of catalog records.
pub async fn add_records(
    State(state): State<AppState>,
    Json(body): Json<AddRequest>,
) -> Result<Json<Value>, ApiError> {
    let engine = state.engine().ok_or(ApiError::NotReady)?;
    let added = engine.ingest(&body.metadata).await?;
    Ok(Json(json!({ "status": "success", "added": added })))
}

/// POST /query - Search one property semantically, or by substring for
/// the date-like property.
pub async fn query_records(
    State(state): State<AppState>,
    Json(body): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    let engine = state.engine().ok_or(ApiError::NotReady)?;
    let results = engine.query(&body.property, &body.query, body.top_k).await?;
    Ok(Json(QueryResponse { results }))
}

/// POST /save - Persist all indexes and metadata to the snapshot store.
pub async fn save_snapshot(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let engine = state.engine().ok_or(ApiError::NotReady)?;
    engine.save().await?;
    Ok(Json(
        json!({ "status": "success", "message": "Data saved successfully" }),
    ))
}
