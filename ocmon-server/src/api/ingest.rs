//! Reading ingestion endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use crate::ingest::{self, SensorReading};
use crate::state::RealtimeSnapshot;
use crate::{AppState, Result};

/// Response envelope returned to the posting producer
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub status: String,
    pub data: RealtimeSnapshot,
}

/// POST /ingest
///
/// Accepts one sensor reading, runs the derivation pipeline, and returns
/// the derived snapshot. Malformed bodies are rejected by the JSON
/// extractor before any state is touched.
pub async fn upload_reading(
    State(state): State<AppState>,
    Json(reading): Json<SensorReading>,
) -> Result<Json<IngestResponse>> {
    let data = ingest::ingest_reading(&state.shared, &state.db, &state.engine, reading).await?;

    Ok(Json(IngestResponse {
        status: "success".to_string(),
        data,
    }))
}
