//! ocmon-server library — open-channel monitoring service
//!
//! Ingests periodic sensor readings (depth, surface velocity, sediment,
//! floating-object counts), derives hydraulic state through the pure
//! engine in [`hydraulics`], appends each result to the SQLite record
//! store, and serves latest/historical state over HTTP.

use axum::routing::{get, post};
use axum::Router;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod hydraulics;
pub mod ingest;
pub mod state;

pub use error::{Error, Result};

use config::Calibration;
use hydraulics::HydraulicEngine;
use state::SharedState;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Record store connection pool
    pub db: SqlitePool,
    /// Realtime cache, control log, and the ingest mutex
    pub shared: Arc<SharedState>,
    /// Stateless classification engine
    pub engine: HydraulicEngine,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, calibration: Calibration) -> Self {
        Self {
            db,
            shared: Arc::new(SharedState::new()),
            engine: HydraulicEngine::new(calibration),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ingest", post(api::upload_reading))
        .route("/realtime", get(api::get_realtime))
        .route("/history", get(api::get_history))
        .route("/export", get(api::export_csv))
        .route("/control", post(api::send_command))
        .route("/control/logs", get(api::list_control_logs))
        .merge(api::health_routes())
        .with_state(state)
        // Browser dashboard polls from another origin
        .layer(CorsLayer::permissive())
}
