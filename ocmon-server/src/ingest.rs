//! Ingestion pipeline
//!
//! The only writer of shared state. Each reading is processed as one
//! critical section: read the last stored depth, derive the hydraulic
//! state, compose alerts, append the record, then overwrite the realtime
//! cache. Ordering between concurrent producers is last-committer-wins;
//! consumers only depend on the latest committed state and an ordered
//! append history.

use crate::config::Calibration;
use crate::db::records::{self, NewRecord};
use crate::hydraulics::{round3, HydraulicEngine, RegimeClassification, RiskLevel};
use crate::state::{RealtimeSnapshot, SharedState};
use crate::Result;
use chrono::Local;
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::debug;

/// Timestamp format used for stored records and control entries.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One raw reading as posted by a producer. Consumed once; never stored
/// as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorReading {
    /// Water depth (m)
    pub depth: f64,
    /// Surface velocity (m/s)
    pub velocity_surf: f64,
    /// Sensor supply voltage (diagnostic only, not used in derivation)
    pub voltage: f64,
    /// Channel width (m)
    #[serde(default = "default_channel_width")]
    pub channel_width: f64,
    /// Sediment concentration (kg/m³)
    #[serde(default)]
    pub sediment: f64,
    /// Floating objects counted in frame
    #[serde(default)]
    pub floating_count: i64,
}

fn default_channel_width() -> f64 {
    5.0
}

/// Process one reading end to end and return the derived snapshot.
///
/// Holds the ingest mutex for the full read-derive-append-overwrite
/// sequence. If the append fails, the error propagates before the cache is
/// touched; the cache only ever holds persisted records.
pub async fn ingest_reading(
    state: &SharedState,
    pool: &SqlitePool,
    engine: &HydraulicEngine,
    reading: SensorReading,
) -> Result<RealtimeSnapshot> {
    let _guard = state.ingest_lock.lock().await;

    let last_depth = records::most_recent(pool).await?.map(|r| r.depth);

    let flow = engine.compute_flow(reading.depth, reading.channel_width, reading.velocity_surf);
    let classification = engine.classify_regime(flow.velocity_avg, reading.depth);
    let flow_type = engine.classify_uniformity(reading.depth, last_depth);

    let alert_msg = compose_alerts(engine.calibration(), &classification, &reading);

    let record = NewRecord {
        timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        depth: reading.depth,
        velocity_surf: reading.velocity_surf,
        voltage: reading.voltage,
        sediment: reading.sediment,
        floating_count: reading.floating_count,
        velocity_avg: round3(flow.velocity_avg),
        flow_rate: round3(flow.flow_rate),
        fr_number: classification.fr_number,
        regime: classification.regime.to_string(),
        flow_type: flow_type.to_string(),
        alert_msg,
    };

    let id = records::insert_record(pool, &record).await?;
    debug!(id, depth = record.depth, regime = %record.regime, "stored reading");

    let snapshot = RealtimeSnapshot {
        depth: record.depth,
        flow_rate: record.flow_rate,
        velocity_avg: record.velocity_avg,
        fr_number: record.fr_number,
        regime: record.regime,
        flow_type: record.flow_type,
        alert_msg: record.alert_msg,
        sediment: record.sediment,
        floating_count: record.floating_count,
    };
    state.set_latest(snapshot.clone()).await;

    Ok(snapshot)
}

/// Evaluate the alert conditions independently and join whichever fire.
fn compose_alerts(
    cal: &Calibration,
    classification: &RegimeClassification,
    reading: &SensorReading,
) -> String {
    let mut alerts = Vec::new();

    if classification.risk != RiskLevel::Normal {
        alerts.push(format!("Regime: {}", classification.regime));
    }
    if reading.floating_count > cal.floating_alert_count {
        alerts.push(format!(
            "Floating object accumulation ({})",
            reading.floating_count
        ));
    }
    if reading.sediment > cal.sediment_alert_threshold {
        alerts.push("Sediment concentration too high".to_string());
    }

    if alerts.is_empty() {
        "Normal".to_string()
    } else {
        alerts.join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(sediment: f64, floating_count: i64) -> SensorReading {
        SensorReading {
            depth: 2.0,
            velocity_surf: 1.2,
            voltage: 12.0,
            channel_width: 5.0,
            sediment,
            floating_count,
        }
    }

    fn classify(velocity_avg: f64, depth: f64) -> RegimeClassification {
        HydraulicEngine::new(Calibration::default()).classify_regime(velocity_avg, depth)
    }

    #[test]
    fn quiet_reading_is_normal() {
        let cal = Calibration::default();
        let msg = compose_alerts(&cal, &classify(1.02, 2.0), &reading(0.0, 0));
        assert_eq!(msg, "Normal");
    }

    #[test]
    fn floating_alert_fires_alone() {
        let cal = Calibration::default();
        let msg = compose_alerts(&cal, &classify(1.02, 2.0), &reading(0.2, 5));
        assert_eq!(msg, "Floating object accumulation (5)");
        assert!(!msg.contains("Sediment concentration too high"));
    }

    #[test]
    fn sediment_alert_fires_alone() {
        let cal = Calibration::default();
        let msg = compose_alerts(&cal, &classify(1.02, 2.0), &reading(2.0, 0));
        assert_eq!(msg, "Sediment concentration too high");
    }

    #[test]
    fn boundary_counts_do_not_fire() {
        let cal = Calibration::default();
        // Thresholds are strict: exactly 3 objects / 1.5 kg/m³ stay quiet
        let msg = compose_alerts(&cal, &classify(1.02, 2.0), &reading(1.5, 3));
        assert_eq!(msg, "Normal");
    }

    #[test]
    fn alerts_concatenate_in_order() {
        let cal = Calibration::default();
        let msg = compose_alerts(&cal, &classify(5.0, 0.5), &reading(2.0, 6));
        assert_eq!(
            msg,
            "Regime: Supercritical | Floating object accumulation (6) | Sediment concentration too high"
        );
    }

    #[test]
    fn dry_channel_reports_regime_alert() {
        // NoWater carries NoRisk, which is still not Normal
        let cal = Calibration::default();
        let msg = compose_alerts(&cal, &classify(1.0, 0.0), &reading(0.0, 0));
        assert_eq!(msg, "Regime: No water");
    }
}
