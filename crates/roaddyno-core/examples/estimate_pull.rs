//! Run the estimation pipeline over a synthetic third-gear pull and print
//! the headline figures.
//!
//! ```sh
//! cargo run --example estimate_pull
//! ```

use anyhow::Result;
use roaddyno_core::curve::{build_curve, summarize, CurveFilters, DEFAULT_SMOOTHING_WINDOW};
use roaddyno_core::dyno::{estimate_pull, EstimatorSettings, Sample};
use roaddyno_core::vehicle::VehicleProfile;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let profile = VehicleProfile::default();
    let gear = 3u8;
    let total_ratio = profile.total_ratio(gear)?;
    let ms_per_rpm = 2.0 * std::f64::consts::PI * profile.wheel_radius_m / (60.0 * total_ratio);

    // Synthetic pull: 2000 → 6200 RPM with acceleration tailing off up top,
    // sampled at an uneven ~20 Hz like a real adapter.
    let mut samples = Vec::new();
    let mut t = 0.0f64;
    let mut v = 2000.0 * ms_per_rpm;
    while v / ms_per_rpm < 6200.0 {
        let rpm = v / ms_per_rpm;
        samples.push(Sample::new(t, v * 3.6, rpm));
        let accel = 3.0 * (1.0 - (rpm - 2000.0) / 8000.0);
        let dt = if samples.len() % 3 == 0 { 0.06 } else { 0.045 };
        v += accel * dt;
        t += dt;
    }
    println!("synthesized {} log rows over {:.1} s", samples.len(), t);

    let derived = estimate_pull(&samples, &profile, gear, &EstimatorSettings::default())?;
    println!("resampled to {} derived samples", derived.len());

    let curve = build_curve(&derived, &CurveFilters::default(), DEFAULT_SMOOTHING_WINDOW);
    let summary = summarize(&curve).expect("curve should not be empty");

    println!(
        "peak power:  {:.1} cv @ {:.0} RPM",
        summary.peak_power.power, summary.peak_power.rpm
    );
    println!(
        "peak torque: {:.1} N·m @ {:.0} RPM",
        summary.peak_torque.torque_nm, summary.peak_torque.rpm
    );
    Ok(())
}
