//! Realtime and history read endpoints

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::db::records::{self, MonitorRecord};
use crate::{AppState, Result};

/// Query parameters for history
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Maximum number of records to return
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    50
}

/// GET /realtime
///
/// Latest derived snapshot, or an empty object before the first ingest.
pub async fn get_realtime(State(state): State<AppState>) -> Response {
    match state.shared.latest().await {
        Some(snapshot) => Json(snapshot).into_response(),
        None => Json(json!({})).into_response(),
    }
}

/// GET /history?limit=N
///
/// Up to `limit` most recent records, oldest to newest.
pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<MonitorRecord>>> {
    let records = records::recent_n(&state.db, query.limit).await?;
    Ok(Json(records))
}
