//! Longitudinal force model
//!
//! Turns smoothed acceleration plus the vehicle profile into engine force,
//! power and torque per resampled sample. Every sample gets a value, however
//! implausible; negative force during lift-off is data, not an error.

use super::Sample;
use crate::units::{kmh_to_ms, AIR_DENSITY_KG_M3, GRAVITY_MS2};
use crate::vehicle::VehicleProfile;

/// One resampled sample with all derived quantities attached
///
/// Create-once, immutable thereafter; the source RPM rides along unchanged so
/// a power/torque-vs-RPM curve can be built downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedSample {
    /// Time in seconds on the resampled grid
    pub time_s: f64,
    /// Interpolated vehicle speed, km/h
    pub speed_kmh: f64,
    /// Interpolated engine speed, RPM
    pub rpm: f64,
    /// Velocity, m/s
    pub velocity_ms: f64,
    /// Raw backward-difference acceleration, m/s² (zero where undefined)
    pub accel_raw_ms2: f64,
    /// Smoothed acceleration, m/s²
    pub accel_smooth_ms2: f64,
    /// Aerodynamic drag force, N
    pub drag_force_n: f64,
    /// Rolling resistance force, N
    pub rolling_force_n: f64,
    /// Total force at the wheels attributed to the engine, N
    pub engine_force_n: f64,
    /// Power in the configured unit (metric horsepower by default)
    pub power: f64,
    /// Torque at the engine, N·m
    pub engine_torque_nm: f64,
}

/// Apply the force model to the resampled series
///
/// `total_ratio` is the already-validated drivetrain ratio for the selected
/// gear; `watts_per_power_unit` converts watts into the reporting unit.
pub(super) fn derive(
    resampled: &[Sample],
    accel_raw: &[Option<f64>],
    accel_smooth: &[f64],
    profile: &VehicleProfile,
    total_ratio: f64,
    watts_per_power_unit: f64,
) -> Vec<DerivedSample> {
    // Speed-independent, so constant across the whole pull.
    let rolling_force_n = profile.rolling_resistance * profile.mass_kg * GRAVITY_MS2;

    resampled
        .iter()
        .zip(accel_raw.iter().zip(accel_smooth.iter()))
        .map(|(sample, (raw, smooth))| {
            let velocity_ms = kmh_to_ms(sample.speed_kmh);
            let drag_force_n = 0.5
                * AIR_DENSITY_KG_M3
                * profile.frontal_area_m2
                * profile.drag_coefficient
                * velocity_ms
                * velocity_ms;
            let inertial_force_n = profile.mass_kg * smooth;
            let engine_force_n = inertial_force_n + drag_force_n + rolling_force_n;

            let power = engine_force_n * velocity_ms / watts_per_power_unit;
            let wheel_torque_nm = engine_force_n * profile.wheel_radius_m;
            let engine_torque_nm = wheel_torque_nm / total_ratio;

            DerivedSample {
                time_s: sample.time_s,
                speed_kmh: sample.speed_kmh,
                rpm: sample.rpm,
                velocity_ms,
                accel_raw_ms2: raw.unwrap_or(0.0),
                accel_smooth_ms2: *smooth,
                drag_force_n,
                rolling_force_n,
                engine_force_n,
                power,
                engine_torque_nm,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derive_constant_speed(speed_kmh: f64, n: usize) -> Vec<DerivedSample> {
        let samples: Vec<Sample> = (0..n)
            .map(|i| Sample::new(i as f64 * 0.010, speed_kmh, 3000.0))
            .collect();
        let accel_raw = vec![Some(0.0); n];
        let accel_smooth = vec![0.0; n];
        let profile = VehicleProfile::default();
        let total_ratio = profile.total_ratio(3).unwrap();
        derive(
            &samples,
            &accel_raw,
            &accel_smooth,
            &profile,
            total_ratio,
            crate::units::WATTS_PER_METRIC_HP,
        )
    }

    #[test]
    fn test_constant_speed_balance() {
        // At constant 100 km/h the inertial term vanishes: engine force is
        // exactly drag + rolling.
        let derived = derive_constant_speed(100.0, 10);
        let v = 100.0 / 3.6;
        let expected_drag = 0.5 * 1.225 * 2.08 * 0.367 * v * v;
        let expected_rolling = 0.015 * 1060.0 * 9.81;

        for d in &derived {
            assert!((d.drag_force_n - expected_drag).abs() < 1e-9);
            assert!((d.rolling_force_n - expected_rolling).abs() < 1e-9);
            assert!((d.engine_force_n - (expected_drag + expected_rolling)).abs() < 1e-9);
            assert!((d.power - (expected_drag + expected_rolling) * v / 735.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rolling_force_constant_across_speeds() {
        let slow = derive_constant_speed(30.0, 3);
        let fast = derive_constant_speed(160.0, 3);
        assert_eq!(slow[0].rolling_force_n, fast[0].rolling_force_n);
        assert!(fast[0].drag_force_n > slow[0].drag_force_n);
    }

    #[test]
    fn test_engine_torque_through_drivetrain() {
        let derived = derive_constant_speed(100.0, 3);
        let d = &derived[0];
        let wheel_torque = d.engine_force_n * 0.301;
        // gear 3: 3.625 × 1.36 = 4.93
        assert!((d.engine_torque_nm - wheel_torque / 4.93).abs() < 1e-9);
    }

    #[test]
    fn test_negative_acceleration_passes_through() {
        let samples = vec![Sample::new(0.0, 50.0, 2500.0), Sample::new(0.010, 50.0, 2500.0)];
        let profile = VehicleProfile::default();
        let derived = derive(
            &samples,
            &[Some(-3.0), Some(-3.0)],
            &[-3.0, -3.0],
            &profile,
            profile.total_ratio(3).unwrap(),
            crate::units::WATTS_PER_METRIC_HP,
        );
        // lift-off: strongly negative net force is reported, never discarded
        assert_eq!(derived.len(), 2);
        assert!(derived[0].engine_force_n < 0.0);
        assert!(derived[0].power < 0.0);
    }
}
