//! Savitzky-Golay smoothing
//!
//! Least-squares polynomial smoothing via fixed convolution weights. The
//! closed-form weights below are for cubic (and quadratic, which shares them)
//! fits over a symmetric window of 2m+1 points:
//!
//!   c_i = (3(3m² + 3m − 1) − 15i²) / ((2m+3)(2m+1)(2m−1)),  i = −m..m

/// Smooth a series with a cubic Savitzky-Golay filter
///
/// `window` must be odd; it is clamped down to the nearest odd value
/// otherwise. Near the boundaries the window shrinks symmetrically; where
/// fewer than five points fit, the cubic fit is exact and the input value
/// passes through unchanged.
pub fn savgol_smooth(values: &[f64], window: usize) -> Vec<f64> {
    let window = if window % 2 == 0 {
        window.saturating_sub(1)
    } else {
        window
    };
    let m = (window / 2) as isize;

    let n = values.len();
    let mut smoothed = Vec::with_capacity(n);
    for i in 0..n {
        let reach = m.min(i as isize).min((n - 1 - i) as isize);
        if reach < 2 {
            smoothed.push(values[i]);
            continue;
        }
        smoothed.push(convolve_at(values, i, reach));
    }
    smoothed
}

fn convolve_at(values: &[f64], center: usize, m: isize) -> f64 {
    let mf = m as f64;
    let denom = (2.0 * mf + 3.0) * (2.0 * mf + 1.0) * (2.0 * mf - 1.0);
    let base = 3.0 * (3.0 * mf * mf + 3.0 * mf - 1.0);

    let mut sum = 0.0;
    for offset in -m..=m {
        let weight = (base - 15.0 * (offset * offset) as f64) / denom;
        sum += weight * values[(center as isize + offset) as usize];
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window5_weights_match_reference() {
        // Classic window-5 cubic weights are (−3, 12, 17, 12, −3)/35.
        let values = vec![0.0, 0.0, 1.0, 0.0, 0.0];
        let smoothed = savgol_smooth(&values, 5);
        assert!((smoothed[2] - 17.0 / 35.0).abs() < 1e-12);
    }

    #[test]
    fn test_preserves_cubic() {
        // A cubic polynomial is reproduced exactly by a cubic fit.
        let values: Vec<f64> = (0..40)
            .map(|i| {
                let x = i as f64;
                0.02 * x * x * x - 0.5 * x * x + 3.0 * x + 7.0
            })
            .collect();
        let smoothed = savgol_smooth(&values, 21);
        for (a, b) in smoothed.iter().zip(values.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_attenuates_noise() {
        let noisy: Vec<f64> = (0..100)
            .map(|i| 50.0 + if i % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        let smoothed = savgol_smooth(&noisy, 21);
        // interior alternating noise shrinks well below its raw amplitude
        for v in &smoothed[10..90] {
            assert!((v - 50.0).abs() < 0.3);
        }
    }

    #[test]
    fn test_short_series_passes_through() {
        let values = vec![1.0, 2.0, 3.0];
        assert_eq!(savgol_smooth(&values, 21), values);
    }

    #[test]
    fn test_output_length() {
        let values: Vec<f64> = (0..7).map(|i| i as f64).collect();
        assert_eq!(savgol_smooth(&values, 21).len(), 7);
    }
}
