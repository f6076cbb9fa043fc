//! CSV export endpoint

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::db::records;
use crate::{AppState, Error, Result};

/// GET /export
///
/// Full record table as a downloadable CSV, one row per record in
/// insertion order. Column layout is fixed; downstream tooling parses it
/// positionally.
pub async fn export_csv(State(state): State<AppState>) -> Result<Response> {
    let records = records::all_records(&state.db).await?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "ID",
        "Timestamp",
        "Depth",
        "SurfaceVelocity",
        "FlowRate",
        "FroudeNumber",
        "Regime",
        "AlertMessage",
    ])?;

    for record in &records {
        writer.write_record([
            record.id.to_string(),
            record.timestamp.clone(),
            record.depth.to_string(),
            record.velocity_surf.to_string(),
            record.flow_rate.to_string(),
            record.fr_number.to_string(),
            record.regime.clone(),
            record.alert_msg.clone(),
        ])?;
    }

    let body = writer
        .into_inner()
        .map_err(|e| Error::Internal(format!("CSV flush failed: {}", e)))?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
        (
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"monitor_data.csv\"",
        ),
    ];

    Ok((headers, body).into_response())
}
