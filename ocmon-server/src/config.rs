//! Engine calibration configuration
//!
//! Calibration constants can be overridden from a TOML file; any key left
//! out of the file keeps its compiled default.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Calibration constants for the hydraulic engine and alert thresholds.
///
/// Defaults match the deployed sensor installation: rectangular channel,
/// 1 m streamwise sample spacing, Froude dead-band of [0.95, 1.05].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Calibration {
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,

    /// Surface-to-mean velocity correction factor
    pub velocity_correction: f64,

    /// Froude number below which flow is subcritical
    pub froude_lower: f64,

    /// Froude number above which flow is supercritical. Values in the
    /// inclusive band [froude_lower, froude_upper] classify as critical;
    /// the band is a stability margin against oscillation near Fr = 1.
    pub froude_upper: f64,

    /// Depth-change rate (m per unit distance) below which consecutive
    /// samples count as uniform flow
    pub uniform_rate_threshold: f64,

    /// Streamwise distance between consecutive samples (m)
    pub distance_step: f64,

    /// Floating-object count above which an accumulation alert fires
    pub floating_alert_count: i64,

    /// Sediment concentration (kg/m³) above which an alert fires
    pub sediment_alert_threshold: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            velocity_correction: 0.85,
            froude_lower: 0.95,
            froude_upper: 1.05,
            uniform_rate_threshold: 0.005,
            distance_step: 1.0,
            floating_alert_count: 3,
            sediment_alert_threshold: 1.5,
        }
    }
}

impl Calibration {
    /// Load calibration from a TOML file, or the compiled defaults when no
    /// file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid calibration file {}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_installation() {
        let cal = Calibration::default();
        assert_eq!(cal.gravity, 9.81);
        assert_eq!(cal.velocity_correction, 0.85);
        assert_eq!(cal.froude_lower, 0.95);
        assert_eq!(cal.froude_upper, 1.05);
        assert_eq!(cal.uniform_rate_threshold, 0.005);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cal: Calibration = toml::from_str("froude_lower = 0.9").unwrap();
        assert_eq!(cal.froude_lower, 0.9);
        assert_eq!(cal.froude_upper, 1.05);
        assert_eq!(cal.velocity_correction, 0.85);
    }
}
