//! HTTP API handlers for ocmon-server

pub mod control;
pub mod export;
pub mod health;
pub mod ingest;
pub mod query;

pub use control::{list_control_logs, send_command};
pub use export::export_csv;
pub use health::health_routes;
pub use ingest::upload_reading;
pub use query::{get_history, get_realtime};
