//! Operator control-command endpoints
//!
//! Commands are acknowledged and logged, newest first; they never enter
//! the ingestion path. The log lives for the process lifetime only.

use axum::{extract::State, Json};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ingest::TIMESTAMP_FORMAT;
use crate::state::ControlLogEntry;
use crate::AppState;

/// One operator command
#[derive(Debug, Deserialize)]
pub struct ControlCommand {
    pub action: String,
    pub operator: String,
    pub reason: String,
}

/// Acknowledgement returned to the operator console
#[derive(Debug, Serialize)]
pub struct ControlAck {
    pub status: String,
    pub msg: String,
}

/// POST /control
pub async fn send_command(
    State(state): State<AppState>,
    Json(command): Json<ControlCommand>,
) -> Json<ControlAck> {
    info!(action = %command.action, operator = %command.operator, "control command received");

    let entry = ControlLogEntry {
        time: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        action: command.action.clone(),
        operator: command.operator,
        reason: command.reason,
    };
    state.shared.record_control(entry).await;

    Json(ControlAck {
        status: "success".to_string(),
        msg: format!("Command [{}] dispatched", command.action),
    })
}

/// GET /control/logs
pub async fn list_control_logs(State(state): State<AppState>) -> Json<Vec<ControlLogEntry>> {
    Json(state.shared.control_logs().await)
}
