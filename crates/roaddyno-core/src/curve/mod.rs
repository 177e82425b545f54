//! Dyno Curve Post-Processing
//!
//! Turns the raw derived-sample sequence into something a renderer can draw:
//! a plausibility filter drops points that cannot belong to a pull (engine
//! braking, idle, noise around zero acceleration), a Savitzky-Golay filter
//! cleans the remaining power and torque traces, and peak detection finds the
//! headline figures. No drawing happens here.

mod savgol;

pub use savgol::savgol_smooth;

use serde::{Deserialize, Serialize};

use crate::dyno::DerivedSample;

/// Default Savitzky-Golay window for the final curves
pub const DEFAULT_SMOOTHING_WINDOW: usize = 21;

/// One point of the finished power/torque-vs-RPM curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Engine speed, RPM
    pub rpm: f64,
    /// Power in the estimator's reporting unit
    pub power: f64,
    /// Engine torque, N·m
    pub torque_nm: f64,
}

/// Plausibility filters applied before curve smoothing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveFilters {
    /// Minimum RPM for a point to count as part of the pull
    pub min_rpm: f64,
    /// Minimum power; non-positive power is engine braking or noise
    pub min_power: f64,
    /// Minimum smoothed acceleration, m/s²
    pub min_accel_ms2: f64,
}

impl Default for CurveFilters {
    fn default() -> Self {
        Self {
            min_rpm: 1500.0,
            min_power: 0.0,
            min_accel_ms2: 0.2,
        }
    }
}

impl CurveFilters {
    /// Check whether a derived sample is plausible pull data
    pub fn passes(&self, sample: &DerivedSample) -> bool {
        sample.rpm > self.min_rpm
            && sample.power > self.min_power
            && sample.accel_smooth_ms2 > self.min_accel_ms2
    }
}

/// Peak figures of a finished curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveSummary {
    /// Point of maximum power
    pub peak_power: CurvePoint,
    /// Point of maximum torque
    pub peak_torque: CurvePoint,
}

/// Build the final curve from a derived-sample sequence
///
/// Filters implausible points, then smooths power and torque with a cubic
/// Savitzky-Golay filter of the given window. Returns an empty curve when
/// nothing survives the filters.
pub fn build_curve(
    derived: &[DerivedSample],
    filters: &CurveFilters,
    smoothing_window: usize,
) -> Vec<CurvePoint> {
    let plausible: Vec<&DerivedSample> = derived.iter().filter(|s| filters.passes(s)).collect();
    if plausible.is_empty() {
        tracing::warn!("no samples survived the plausibility filters");
        return Vec::new();
    }

    let power: Vec<f64> = plausible.iter().map(|s| s.power).collect();
    let torque: Vec<f64> = plausible.iter().map(|s| s.engine_torque_nm).collect();
    let power = savgol_smooth(&power, smoothing_window);
    let torque = savgol_smooth(&torque, smoothing_window);

    plausible
        .iter()
        .zip(power.into_iter().zip(torque))
        .map(|(sample, (power, torque_nm))| CurvePoint {
            rpm: sample.rpm,
            power,
            torque_nm,
        })
        .collect()
}

/// Find the power and torque peaks of a curve
pub fn summarize(curve: &[CurvePoint]) -> Option<CurveSummary> {
    let peak_power = *curve
        .iter()
        .max_by(|a, b| a.power.total_cmp(&b.power))?;
    let peak_torque = *curve
        .iter()
        .max_by(|a, b| a.torque_nm.total_cmp(&b.torque_nm))?;
    Some(CurveSummary {
        peak_power,
        peak_torque,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derived(rpm: f64, power: f64, accel: f64) -> DerivedSample {
        DerivedSample {
            time_s: 0.0,
            speed_kmh: 80.0,
            rpm,
            velocity_ms: 22.2,
            accel_raw_ms2: accel,
            accel_smooth_ms2: accel,
            drag_force_n: 100.0,
            rolling_force_n: 156.0,
            engine_force_n: 1000.0,
            power,
            engine_torque_nm: power * 1.2,
        }
    }

    #[test]
    fn test_filters_reject_implausible_points() {
        let filters = CurveFilters::default();
        assert!(filters.passes(&derived(3000.0, 60.0, 1.5)));
        assert!(!filters.passes(&derived(1200.0, 60.0, 1.5))); // below min RPM
        assert!(!filters.passes(&derived(3000.0, -5.0, 1.5))); // engine braking
        assert!(!filters.passes(&derived(3000.0, 60.0, 0.1))); // coasting
    }

    #[test]
    fn test_build_curve_empty_when_all_filtered() {
        let samples = vec![derived(900.0, 10.0, 0.05); 30];
        let curve = build_curve(&samples, &CurveFilters::default(), 21);
        assert!(curve.is_empty());
        assert!(summarize(&curve).is_none());
    }

    #[test]
    fn test_summarize_peaks() {
        let samples: Vec<DerivedSample> = (0..50)
            .map(|i| {
                let rpm = 2000.0 + 100.0 * i as f64;
                // parabolic power curve peaking mid-range
                let power = 100.0 - 0.1 * (i as f64 - 30.0) * (i as f64 - 30.0);
                derived(rpm, power, 2.0)
            })
            .collect();
        let curve = build_curve(&samples, &CurveFilters::default(), 21);
        assert_eq!(curve.len(), 50);

        let summary = summarize(&curve).unwrap();
        assert!((summary.peak_power.rpm - 5000.0).abs() < 300.0);
        assert!(summary.peak_power.power > 95.0);
    }
}
