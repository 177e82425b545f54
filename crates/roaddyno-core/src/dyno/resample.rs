//! Resampling onto a uniform time grid
//!
//! Telemetry logs arrive at whatever rate the adapter managed; the
//! differentiator needs a fixed step. All channels are linearly interpolated
//! in time, never extrapolated past the original range.

use super::Sample;

/// Resample a cleaned (strictly increasing) log onto a uniform grid
///
/// The grid starts at the first original timestamp and advances by `step_s`
/// for ⌈(t_last − t_first)/step⌉ points, so the last grid point never passes
/// the end of the original data.
pub(super) fn resample(samples: &[Sample], step_s: f64) -> Vec<Sample> {
    debug_assert!(samples.len() >= 2);
    debug_assert!(step_s > 0.0);

    let t_first = samples[0].time_s;
    let t_last = samples[samples.len() - 1].time_s;
    // Small bias keeps float noise in the division from adding a point past
    // the original range.
    let count = ((t_last - t_first) / step_s - 1e-9).ceil().max(1.0) as usize;

    let mut output = Vec::with_capacity(count);
    let mut cursor = 0;
    for i in 0..count {
        let t = t_first + i as f64 * step_s;

        // The grid is monotonic, so the source cursor only moves forward.
        while cursor + 2 < samples.len() && samples[cursor + 1].time_s <= t {
            cursor += 1;
        }
        let left = &samples[cursor];
        let right = &samples[cursor + 1];

        let dt = right.time_s - left.time_s;
        let alpha = ((t - left.time_s) / dt).clamp(0.0, 1.0);
        output.push(Sample {
            time_s: t,
            speed_kmh: lerp(left.speed_kmh, right.speed_kmh, alpha),
            rpm: lerp(left.rpm, right.rpm, alpha),
        });
    }
    output
}

fn lerp(a: f64, b: f64, alpha: f64) -> f64 {
    a * (1.0 - alpha) + b * alpha
}
