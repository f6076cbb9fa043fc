//! Hydraulic classification engine
//!
//! Pure arithmetic over a single rectangular channel cross-section: flow
//! rate from depth/width/surface velocity, Froude-number regime
//! classification, and uniformity classification between consecutive depth
//! samples. No state, no I/O; callers own persistence and alerting.

use crate::config::Calibration;
use std::fmt;

/// Channel flow regime, classified by Froude number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowRegime {
    /// Depth at or below zero; no meaningful classification
    NoWater,
    Subcritical,
    Critical,
    Supercritical,
}

impl FlowRegime {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowRegime::NoWater => "No water",
            FlowRegime::Subcritical => "Subcritical",
            FlowRegime::Critical => "Critical",
            FlowRegime::Supercritical => "Supercritical",
        }
    }

    /// The one regime-to-risk mapping; alerting and responses both use it.
    pub fn risk(&self) -> RiskLevel {
        match self {
            FlowRegime::NoWater => RiskLevel::NoRisk,
            FlowRegime::Subcritical => RiskLevel::Normal,
            FlowRegime::Critical => RiskLevel::Unstable,
            FlowRegime::Supercritical => RiskLevel::HighRisk,
        }
    }
}

impl fmt::Display for FlowRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operational risk derived from the flow regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    /// Dry channel
    NoRisk,
    Normal,
    /// Near-critical flow; surface may oscillate
    Unstable,
    /// Supercritical flow; scour warning
    HighRisk,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::NoRisk => "No risk",
            RiskLevel::Normal => "Normal",
            RiskLevel::Unstable => "Unstable",
            RiskLevel::HighRisk => "High risk (scour warning)",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniformity of flow between two consecutive depth samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Uniformity {
    /// No prior sample to compare against
    Uninitialized,
    Uniform,
    /// Rising water, backwater effect
    Backwater,
    /// Falling water
    Drawdown,
}

impl Uniformity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Uniformity::Uninitialized => "Uninitialized",
            Uniformity::Uniform => "Uniform",
            Uniformity::Backwater => "NonUniform-Backwater",
            Uniformity::Drawdown => "NonUniform-Drawdown",
        }
    }
}

impl fmt::Display for Uniformity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cross-section quantities derived from one reading, unrounded.
#[derive(Debug, Clone, Copy)]
pub struct FlowComputation {
    /// Cross-sectional flow area (m²)
    pub area: f64,
    /// Mean velocity after surface correction (m/s)
    pub velocity_avg: f64,
    /// Discharge Q = A·V (m³/s)
    pub flow_rate: f64,
}

/// Froude classification result.
///
/// `fr_number` is rounded to 3 decimals for reporting; the regime decision
/// is made on the unrounded value.
#[derive(Debug, Clone, Copy)]
pub struct RegimeClassification {
    pub fr_number: f64,
    pub regime: FlowRegime,
    pub risk: RiskLevel,
}

/// Stateless hydraulic calculator, parameterized by calibration constants.
#[derive(Debug, Clone)]
pub struct HydraulicEngine {
    cal: Calibration,
}

impl HydraulicEngine {
    pub fn new(cal: Calibration) -> Self {
        Self { cal }
    }

    pub fn calibration(&self) -> &Calibration {
        &self.cal
    }

    /// Compute area, mean velocity, and discharge for a rectangular section.
    ///
    /// Accepts any float input; non-positive depth or width propagate into
    /// the results and are handled by [`classify_regime`](Self::classify_regime).
    pub fn compute_flow(&self, depth: f64, width: f64, velocity_surf: f64) -> FlowComputation {
        let area = depth * width;
        let velocity_avg = velocity_surf * self.cal.velocity_correction;
        let flow_rate = area * velocity_avg;
        FlowComputation {
            area,
            velocity_avg,
            flow_rate,
        }
    }

    /// Classify the flow regime from mean velocity and depth.
    ///
    /// Depth at or below zero short-circuits to the dry-channel case with
    /// Fr = 0 (no division).
    pub fn classify_regime(&self, velocity_avg: f64, depth: f64) -> RegimeClassification {
        if depth <= 0.0 {
            return RegimeClassification {
                fr_number: 0.0,
                regime: FlowRegime::NoWater,
                risk: RiskLevel::NoRisk,
            };
        }

        let fr = velocity_avg / (self.cal.gravity * depth).sqrt();

        let regime = if fr < self.cal.froude_lower {
            FlowRegime::Subcritical
        } else if fr > self.cal.froude_upper {
            FlowRegime::Supercritical
        } else {
            FlowRegime::Critical
        };

        RegimeClassification {
            fr_number: round3(fr),
            regime,
            risk: regime.risk(),
        }
    }

    /// Classify uniformity from the depth change since the previous sample.
    pub fn classify_uniformity(&self, current_depth: f64, last_depth: Option<f64>) -> Uniformity {
        let Some(last_depth) = last_depth else {
            return Uniformity::Uninitialized;
        };

        let rate = (current_depth - last_depth).abs() / self.cal.distance_step;
        if rate < self.cal.uniform_rate_threshold {
            Uniformity::Uniform
        } else if current_depth > last_depth {
            Uniformity::Backwater
        } else {
            Uniformity::Drawdown
        }
    }
}

/// Round to 3 decimal places for reported values.
pub fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> HydraulicEngine {
        HydraulicEngine::new(Calibration::default())
    }

    /// Engine with gravity 1.0 so Froude numbers can be set exactly.
    fn unit_gravity_engine() -> HydraulicEngine {
        let cal = Calibration {
            gravity: 1.0,
            ..Calibration::default()
        };
        HydraulicEngine::new(cal)
    }

    #[test]
    fn flow_rate_is_area_times_corrected_velocity() {
        let flow = engine().compute_flow(2.0, 5.0, 1.2);
        assert_eq!(flow.area, 2.0 * 5.0);
        assert_eq!(flow.velocity_avg, 1.2 * 0.85);
        assert_eq!(flow.flow_rate, (2.0 * 5.0) * (1.2 * 0.85));
    }

    #[test]
    fn froude_matches_definition() {
        let c = engine().classify_regime(1.02, 2.0);
        let expected = 1.02 / (9.81f64 * 2.0).sqrt();
        assert_eq!(c.fr_number, round3(expected));
        assert_eq!(c.regime, FlowRegime::Subcritical);
        assert_eq!(c.risk, RiskLevel::Normal);
    }

    #[test]
    fn zero_depth_is_dry_channel() {
        let c = engine().classify_regime(1.5, 0.0);
        assert_eq!(c.fr_number, 0.0);
        assert_eq!(c.regime, FlowRegime::NoWater);
        assert_eq!(c.risk, RiskLevel::NoRisk);

        let c = engine().classify_regime(1.5, -0.2);
        assert_eq!(c.regime, FlowRegime::NoWater);
    }

    #[test]
    fn dead_band_boundaries_are_critical() {
        // gravity = 1, depth = 1 makes fr exactly equal to velocity_avg
        let e = unit_gravity_engine();
        assert_eq!(e.classify_regime(0.94, 1.0).regime, FlowRegime::Subcritical);
        assert_eq!(e.classify_regime(0.95, 1.0).regime, FlowRegime::Critical);
        assert_eq!(e.classify_regime(1.0, 1.0).regime, FlowRegime::Critical);
        assert_eq!(e.classify_regime(1.05, 1.0).regime, FlowRegime::Critical);
        assert_eq!(e.classify_regime(1.06, 1.0).regime, FlowRegime::Supercritical);
    }

    #[test]
    fn supercritical_is_high_risk() {
        let c = engine().classify_regime(5.0, 0.5);
        assert_eq!(c.regime, FlowRegime::Supercritical);
        assert_eq!(c.risk, RiskLevel::HighRisk);
    }

    #[test]
    fn uniformity_without_prior_sample() {
        assert_eq!(
            engine().classify_uniformity(2.0, None),
            Uniformity::Uninitialized
        );
    }

    #[test]
    fn uniformity_transitions() {
        let e = engine();
        assert_eq!(e.classify_uniformity(2.000, Some(2.000)), Uniformity::Uniform);
        assert_eq!(e.classify_uniformity(2.004, Some(2.000)), Uniformity::Uniform);
        assert_eq!(e.classify_uniformity(2.010, Some(2.000)), Uniformity::Backwater);
        assert_eq!(e.classify_uniformity(2.000, Some(2.010)), Uniformity::Drawdown);
    }

    #[test]
    fn round3_rounds_reported_values() {
        assert_eq!(round3(0.230276), 0.23);
        assert_eq!(round3(2.71828), 2.718);
        assert_eq!(round3(0.0), 0.0);
    }
}
