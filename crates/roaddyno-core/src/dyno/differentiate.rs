//! Discrete differentiation and acceleration smoothing
//!
//! Acceleration comes from a backward difference of the resampled velocity
//! series. Raw differences are noisy enough to swamp the force model, so a
//! centered moving average (shrinking to a single sample at the boundaries)
//! runs over them before any physics is applied.

use super::Sample;
use crate::units::kmh_to_ms;

/// Backward-difference acceleration in m/s²
///
/// The first sample has no predecessor and carries no defined value; a zero
/// time delta is masked out instead of propagating an infinity. Masked entries
/// are excluded from the moving average downstream.
pub(super) fn backward_difference(samples: &[Sample]) -> Vec<Option<f64>> {
    let mut accel = Vec::with_capacity(samples.len());
    for (i, sample) in samples.iter().enumerate() {
        if i == 0 {
            accel.push(None);
            continue;
        }
        let dt = sample.time_s - samples[i - 1].time_s;
        if dt <= 0.0 {
            tracing::warn!(index = i, "zero-duration interval masked in differentiation");
            accel.push(None);
            continue;
        }
        let dv = kmh_to_ms(sample.speed_kmh) - kmh_to_ms(samples[i - 1].speed_kmh);
        accel.push(Some(dv / dt));
    }
    accel
}

/// Centered moving average over `window` samples
///
/// Boundary windows shrink (minimum one sample) so every index produces a
/// defined value. Masked input entries are skipped; an all-masked window
/// yields zero.
pub(super) fn centered_moving_average(values: &[Option<f64>], window: usize) -> Vec<f64> {
    let window = window.max(1);
    // A centered even window leans one sample towards the future, matching
    // the reference pandas rolling(center=True) behaviour.
    let before = (window - 1) / 2;
    let after = window / 2;

    let mut smoothed = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        let start = i.saturating_sub(before);
        let end = (i + after + 1).min(values.len());

        let mut sum = 0.0;
        let mut n = 0usize;
        for value in values[start..end].iter().flatten() {
            sum += value;
            n += 1;
        }
        smoothed.push(if n > 0 { sum / n as f64 } else { 0.0 });
    }
    smoothed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_ramp(n: usize) -> Vec<Sample> {
        // 10 m/s² ramp: 0.36 km/h per 10 ms step
        (0..n)
            .map(|i| Sample::new(i as f64 * 0.010, 0.36 * i as f64, 3000.0))
            .collect()
    }

    #[test]
    fn test_backward_difference_ramp() {
        let accel = backward_difference(&uniform_ramp(100));
        assert_eq!(accel[0], None);
        for a in accel.iter().skip(1) {
            assert!((a.unwrap() - 10.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_first_sample_masked_not_nan() {
        let accel = backward_difference(&uniform_ramp(5));
        assert!(accel[0].is_none());
        assert!(accel.iter().flatten().all(|a| a.is_finite()));
    }

    #[test]
    fn test_zero_dt_masked() {
        let samples = vec![
            Sample::new(0.0, 0.0, 1000.0),
            Sample::new(0.1, 3.6, 1000.0),
            Sample::new(0.1, 7.2, 1000.0),
            Sample::new(0.2, 10.8, 1000.0),
        ];
        let accel = backward_difference(&samples);
        assert!(accel[2].is_none());
        assert!(accel.iter().flatten().all(|a| a.is_finite()));

        // the mask must not poison the smoothed series either
        let smoothed = centered_moving_average(&accel, 4);
        assert!(smoothed.iter().all(|a| a.is_finite()));
    }

    #[test]
    fn test_moving_average_no_gaps() {
        let accel = backward_difference(&uniform_ramp(200));
        let smoothed = centered_moving_average(&accel, 80);
        assert_eq!(smoothed.len(), 200);
        assert!(smoothed.iter().all(|a| a.is_finite()));
        // interior of a constant-acceleration ramp stays at the ramp value
        assert!((smoothed[100] - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_moving_average_boundary_shrinks() {
        let values: Vec<Option<f64>> = vec![Some(2.0), Some(4.0), Some(6.0)];
        let smoothed = centered_moving_average(&values, 100);
        // window shrinks to whatever exists; every index is defined
        assert_eq!(smoothed, vec![4.0, 4.0, 4.0]);
    }

    #[test]
    fn test_moving_average_all_masked_is_zero() {
        let values: Vec<Option<f64>> = vec![None, None];
        assert_eq!(centered_moving_average(&values, 10), vec![0.0, 0.0]);
    }

    #[test]
    fn test_moving_average_window_one() {
        let values: Vec<Option<f64>> = vec![Some(1.0), Some(3.0), Some(5.0)];
        assert_eq!(centered_moving_average(&values, 1), vec![1.0, 3.0, 5.0]);
    }
}
