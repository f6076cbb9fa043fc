//! Monitor record row type and store operations
//!
//! The store is append-only: insert and ordered reads, no update or delete.
//! Row ids are assigned by SQLite and strictly increase in insertion order.

use crate::Result;
use serde::Serialize;
use sqlx::SqlitePool;

/// One persisted monitoring sample with its derived fields.
///
/// Immutable once written; only ever read back in id order.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MonitorRecord {
    pub id: i64,
    pub timestamp: String,
    pub depth: f64,
    pub velocity_surf: f64,
    pub voltage: f64,
    pub sediment: f64,
    pub floating_count: i64,
    pub velocity_avg: f64,
    pub flow_rate: f64,
    pub fr_number: f64,
    pub regime: String,
    pub flow_type: String,
    pub alert_msg: String,
}

/// Fields for a record about to be inserted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub timestamp: String,
    pub depth: f64,
    pub velocity_surf: f64,
    pub voltage: f64,
    pub sediment: f64,
    pub floating_count: i64,
    pub velocity_avg: f64,
    pub flow_rate: f64,
    pub fr_number: f64,
    pub regime: String,
    pub flow_type: String,
    pub alert_msg: String,
}

const RECORD_COLUMNS: &str = "id, timestamp, depth, velocity_surf, voltage, sediment, \
     floating_count, velocity_avg, flow_rate, fr_number, regime, flow_type, alert_msg";

/// Append a record, returning the store-assigned id.
pub async fn insert_record(pool: &SqlitePool, record: &NewRecord) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO monitor_records
            (timestamp, depth, velocity_surf, voltage, sediment, floating_count,
             velocity_avg, flow_rate, fr_number, regime, flow_type, alert_msg)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&record.timestamp)
    .bind(record.depth)
    .bind(record.velocity_surf)
    .bind(record.voltage)
    .bind(record.sediment)
    .bind(record.floating_count)
    .bind(record.velocity_avg)
    .bind(record.flow_rate)
    .bind(record.fr_number)
    .bind(&record.regime)
    .bind(&record.flow_type)
    .bind(&record.alert_msg)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Most recently inserted record, or None on an empty store.
pub async fn most_recent(pool: &SqlitePool) -> Result<Option<MonitorRecord>> {
    let record = sqlx::query_as::<_, MonitorRecord>(&format!(
        "SELECT {RECORD_COLUMNS} FROM monitor_records ORDER BY id DESC LIMIT 1"
    ))
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Up to `limit` most recent records in chronological (ascending id) order.
pub async fn recent_n(pool: &SqlitePool, limit: i64) -> Result<Vec<MonitorRecord>> {
    let mut records = sqlx::query_as::<_, MonitorRecord>(&format!(
        "SELECT {RECORD_COLUMNS} FROM monitor_records ORDER BY id DESC LIMIT ?"
    ))
    .bind(limit.max(0))
    .fetch_all(pool)
    .await?;

    // Fetched newest-first; callers receive chronological order
    records.reverse();
    Ok(records)
}

/// Every record in insertion order, for export.
pub async fn all_records(pool: &SqlitePool) -> Result<Vec<MonitorRecord>> {
    let records = sqlx::query_as::<_, MonitorRecord>(&format!(
        "SELECT {RECORD_COLUMNS} FROM monitor_records ORDER BY id ASC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(records)
}
