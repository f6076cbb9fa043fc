//! Process-lifetime shared state
//!
//! Holds the realtime snapshot slot and the control-command log. Both start
//! empty at service start and live only as long as the process; the record
//! store is the durable side. The ingest mutex serializes the whole
//! read-last/append/overwrite sequence; concurrent producers commit one
//! at a time.

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};

/// Externally-relevant fields of the latest derived record.
///
/// Overwritten wholesale on every ingest; never cleared once populated.
#[derive(Debug, Clone, Serialize)]
pub struct RealtimeSnapshot {
    pub depth: f64,
    pub flow_rate: f64,
    pub velocity_avg: f64,
    pub fr_number: f64,
    pub regime: String,
    pub flow_type: String,
    pub alert_msg: String,
    pub sediment: f64,
    pub floating_count: i64,
}

/// One operator command, as recorded in the control log.
#[derive(Debug, Clone, Serialize)]
pub struct ControlLogEntry {
    pub time: String,
    pub action: String,
    pub operator: String,
    pub reason: String,
}

/// Shared state accessible by all handlers.
///
/// Uses RwLock so status polls read concurrently; only the ingest path and
/// the control endpoint write.
pub struct SharedState {
    realtime: RwLock<Option<RealtimeSnapshot>>,
    control_log: RwLock<Vec<ControlLogEntry>>,
    /// Guards read-last-record -> append -> cache-overwrite as one unit
    pub(crate) ingest_lock: Mutex<()>,
}

impl SharedState {
    pub fn new() -> Self {
        Self {
            realtime: RwLock::new(None),
            control_log: RwLock::new(Vec::new()),
            ingest_lock: Mutex::new(()),
        }
    }

    /// Latest snapshot, or None before the first ingest.
    pub async fn latest(&self) -> Option<RealtimeSnapshot> {
        self.realtime.read().await.clone()
    }

    /// Overwrite the snapshot slot with the newest derived record.
    pub async fn set_latest(&self, snapshot: RealtimeSnapshot) {
        *self.realtime.write().await = Some(snapshot);
    }

    /// Insert a control entry at the head (newest first).
    pub async fn record_control(&self, entry: ControlLogEntry) {
        self.control_log.write().await.insert(0, entry);
    }

    /// All control entries, newest first.
    pub async fn control_logs(&self) -> Vec<ControlLogEntry> {
        self.control_log.read().await.clone()
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn snapshot_starts_empty_and_overwrites() {
        let state = SharedState::new();
        assert!(state.latest().await.is_none());

        let snap = RealtimeSnapshot {
            depth: 2.0,
            flow_rate: 10.2,
            velocity_avg: 1.02,
            fr_number: 0.23,
            regime: "Subcritical".to_string(),
            flow_type: "Uninitialized".to_string(),
            alert_msg: "Normal".to_string(),
            sediment: 0.0,
            floating_count: 0,
        };
        state.set_latest(snap.clone()).await;

        let mut second = snap;
        second.depth = 2.1;
        state.set_latest(second.clone()).await;

        let latest = state.latest().await.unwrap();
        assert_eq!(latest.depth, 2.1);
    }

    #[tokio::test]
    async fn control_log_is_newest_first() {
        let state = SharedState::new();
        for action in ["open gate", "close gate"] {
            state
                .record_control(ControlLogEntry {
                    time: "2025-01-01 00:00:00".to_string(),
                    action: action.to_string(),
                    operator: "op".to_string(),
                    reason: "test".to_string(),
                })
                .await;
        }

        let logs = state.control_logs().await;
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].action, "close gate");
        assert_eq!(logs[1].action, "open gate");
    }
}
