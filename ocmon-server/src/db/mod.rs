//! Persistent record store
//!
//! One append-only SQLite table of monitor records keyed by a monotonic
//! rowid. History survives restart; the realtime cache and control log do
//! not (see [`crate::state`]).

use crate::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::info;

pub mod records;

pub use records::{all_records, insert_record, most_recent, recent_n, MonitorRecord, NewRecord};

/// Initialize database connection and create the schema if needed.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // WAL allows concurrent readers while the ingest path writes
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;
    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    create_monitor_records_table(&pool).await?;

    Ok(pool)
}

async fn create_monitor_records_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS monitor_records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp TEXT NOT NULL,
            depth REAL NOT NULL,
            velocity_surf REAL NOT NULL,
            voltage REAL NOT NULL,
            sediment REAL NOT NULL DEFAULT 0.0,
            floating_count INTEGER NOT NULL DEFAULT 0,
            velocity_avg REAL NOT NULL,
            flow_rate REAL NOT NULL,
            fr_number REAL NOT NULL,
            regime TEXT NOT NULL,
            flow_type TEXT NOT NULL,
            alert_msg TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_monitor_records_timestamp ON monitor_records(timestamp)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
