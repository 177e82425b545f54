//! Dyno Estimation Pipeline
//!
//! Converts an irregularly sampled speed/RPM log from a single-gear pull into
//! a power and torque curve referenced to engine RPM:
//!
//! raw samples → resample to a fixed step → differentiate and smooth
//! acceleration → longitudinal force model → power and torque per sample.
//!
//! The whole pipeline is a synchronous batch transform: it borrows the input
//! read-only, owns its working buffers and returns a freshly allocated output
//! sequence. Plausibility filtering of the result belongs to [`crate::curve`],
//! never to this module.

mod differentiate;
mod error;
mod forces;
mod resample;

pub use error::DynoError;
pub use forces::DerivedSample;

use serde::{Deserialize, Serialize};

use crate::vehicle::VehicleProfile;

/// One row of the telemetry log
///
/// Timestamps are seconds on a shared monotonic axis and must be strictly
/// increasing after cleaning; the log source owns that cleaning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Time in seconds, strictly increasing within a pull
    pub time_s: f64,
    /// Vehicle speed, km/h
    pub speed_kmh: f64,
    /// Engine speed, RPM
    pub rpm: f64,
}

impl Sample {
    /// Create a new sample
    pub fn new(time_s: f64, speed_kmh: f64, rpm: f64) -> Self {
        Self {
            time_s,
            speed_kmh,
            rpm,
        }
    }
}

/// Tunable settings of the estimation pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorSettings {
    /// Resampling step, seconds
    pub step_s: f64,
    /// Moving-average window for acceleration smoothing, in resampled samples
    pub smoothing_window: usize,
    /// Watts per reported power unit (metric horsepower by default)
    pub watts_per_power_unit: f64,
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        Self {
            step_s: 0.010,
            smoothing_window: 80, // ≈0.8 s at the 10 ms step
            watts_per_power_unit: crate::units::WATTS_PER_METRIC_HP,
        }
    }
}

/// Estimate power and torque for a single-gear pull
///
/// Runs the full pipeline as one atomic computation. The selected gear must
/// exist in the profile's ratio map and is assumed constant for the whole log;
/// the model is undefined across a gear change.
///
/// # Errors
/// - [`DynoError::InvalidGear`] if `gear` is not in the profile's ratio map
/// - [`DynoError::EmptyInput`] if fewer than two distinct timestamps remain
/// - [`DynoError::NonMonotonic`] if a timestamp goes backwards
pub fn estimate_pull(
    samples: &[Sample],
    profile: &VehicleProfile,
    gear: u8,
    settings: &EstimatorSettings,
) -> Result<Vec<DerivedSample>, DynoError> {
    // Validate the gear before touching the data so an invalid selection
    // produces no partial output.
    let total_ratio = profile.total_ratio(gear)?;

    let cleaned = clean(samples)?;
    let resampled = resample::resample(&cleaned, settings.step_s);

    let accel_raw = differentiate::backward_difference(&resampled);
    let accel_smooth = differentiate::centered_moving_average(&accel_raw, settings.smoothing_window);

    Ok(forces::derive(
        &resampled,
        &accel_raw,
        &accel_smooth,
        profile,
        total_ratio,
        settings.watts_per_power_unit,
    ))
}

/// Validate ordering and collapse duplicate timestamps
///
/// A strictly decreasing timestamp is a structural violation and aborts the
/// run. Consecutive equal timestamps are collapsed to the first occurrence so
/// interpolation never divides by a zero-width interval.
fn clean(samples: &[Sample]) -> Result<Vec<Sample>, DynoError> {
    let mut cleaned: Vec<Sample> = Vec::with_capacity(samples.len());
    for (index, sample) in samples.iter().enumerate() {
        match cleaned.last() {
            Some(prev) if sample.time_s < prev.time_s => {
                return Err(DynoError::NonMonotonic { index });
            }
            Some(prev) if sample.time_s == prev.time_s => {
                tracing::warn!(index, time_s = sample.time_s, "degenerate interval, sample dropped");
            }
            _ => cleaned.push(*sample),
        }
    }
    if cleaned.len() < 2 {
        return Err(DynoError::EmptyInput);
    }
    Ok(cleaned)
}
