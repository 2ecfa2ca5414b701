use log::debug;

use crate::error::DataError;
use super::model::{FilterConfig, FilterKind, FilteredSeries, Sample, Series};

/// Fixed coefficients of the low-pass FIR stage (31 taps, symmetric).
const LOW_PASS_TAPS: [f64; 31] = [
    -0.003265, -0.005486, -0.005708, -0.001495, 0.009986,
    0.028543, 0.052008, 0.074376, 0.087962, 0.086341,
    0.066852, 0.032775, -0.010089, -0.050012, -0.075348,
    -0.076921, -0.051134, -0.003789, 0.053634, 0.110723,
    0.153328, 0.170111, 0.153328, 0.110723, 0.053634,
    -0.003789, -0.051134, -0.076921, -0.075348, -0.050012,
    -0.010089,
];

/// Run the configured filter over a series.
///
/// The input is read-only; a fresh [`FilteredSeries`] is returned with the
/// input's timestamps copied verbatim (filtering changes values, never
/// timing) and the configuration attached for downstream tagging.
///
/// Fails atomically — no partial output — with:
/// * [`DataError::EmptySeries`] when the series has no samples,
/// * [`DataError::Config`] when `window_size` is 0 or exceeds the length.
pub fn apply(series: &Series, config: &FilterConfig) -> Result<FilteredSeries, DataError> {
    if series.is_empty() {
        return Err(DataError::EmptySeries);
    }
    if config.window_size == 0 || config.window_size > series.len() {
        return Err(DataError::Config(format!(
            "window size {} outside 1..={}",
            config.window_size,
            series.len()
        )));
    }

    let values: Vec<f64> = series.values().collect();
    let smoothed = match config.kind {
        FilterKind::MovingAverage => moving_average(&values, config.window_size),
        FilterKind::LowPass => low_pass(&values, config.window_size),
    };
    debug!(
        "applied {} (window {}) over {} samples",
        config.label,
        config.window_size,
        series.len()
    );

    let samples = series
        .timestamps()
        .zip(smoothed)
        .map(|(timestamp, value)| Sample { timestamp, value })
        .collect();
    Ok(FilteredSeries {
        // timestamps come straight from a valid Series, so this cannot fail
        series: Series::from_samples(samples)?,
        config: config.clone(),
    })
}

/// Trailing moving average with a window that shrinks at the series start.
///
/// Output index `i` is the mean of the window ending at `i`: the sample
/// itself plus up to `window - 1` predecessors. For the first `window - 1`
/// indices fewer samples exist, so the sum is divided by the actual count —
/// output length always equals input length. Kept as a running sum, O(1)
/// state per step.
fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (i, &v) in values.iter().enumerate() {
        sum += v;
        if i >= window {
            sum -= values[i - window];
        }
        let count = (i + 1).min(window);
        out.push(sum / count as f64);
    }
    out
}

/// Low-pass filter: moving average (same shrink rule) followed by an FIR
/// convolution with [`LOW_PASS_TAPS`]. The convolution is trailing too and
/// simply drops out-of-range terms near the start.
fn low_pass(values: &[f64], window: usize) -> Vec<f64> {
    let smoothed = moving_average(values, window);
    smoothed
        .iter()
        .enumerate()
        .map(|(i, _)| {
            LOW_PASS_TAPS
                .iter()
                .enumerate()
                .take(i + 1)
                .map(|(j, tap)| tap * smoothed[i - j])
                .sum()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn hour(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 10, 13)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + Duration::hours(h.into())
    }

    fn series(values: &[f64]) -> Series {
        Series::from_parts(
            (0..values.len() as u32).map(hour).collect(),
            values.to_vec(),
        )
        .unwrap()
    }

    fn variance(values: &[f64]) -> f64 {
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
    }

    #[test]
    fn window_one_is_identity() {
        let s = series(&[3.0, 1.0, 4.0, 1.0, 5.0]);
        let filtered = apply(&s, &FilterConfig::moving_average(1)).unwrap();
        assert_eq!(filtered.series, s);
    }

    #[test]
    fn boundary_window_shrinks_to_available_samples() {
        let s = series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let filtered = apply(&s, &FilterConfig::moving_average(3)).unwrap();
        let values: Vec<f64> = filtered.series.values().collect();
        // trailing window: [1], [1,2], [1,2,3], [2,3,4], [3,4,5]
        assert_eq!(values, vec![1.0, 1.5, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn original_worked_example() {
        let s = series(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let filtered = apply(&s, &FilterConfig::moving_average(3)).unwrap();
        let values: Vec<f64> = filtered.series.values().collect();
        assert_eq!(values, vec![10.0, 15.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn length_and_timestamps_survive_every_valid_window() {
        let s = series(&[2.0, 7.0, 1.0, 8.0, 2.0, 8.0]);
        for window in 1..=s.len() {
            let filtered = apply(&s, &FilterConfig::moving_average(window)).unwrap();
            assert_eq!(filtered.series.len(), s.len());
            assert!(filtered.series.timestamps().eq(s.timestamps()));
        }
    }

    #[test]
    fn refiltering_reduces_variance() {
        let s = series(&[5.0, -3.0, 8.0, -1.0, 6.0, -4.0, 7.0, 0.0]);
        let config = FilterConfig::moving_average(3);
        let once = apply(&s, &config).unwrap();
        let twice = apply(&once.series, &config).unwrap();
        let once_values: Vec<f64> = once.series.values().collect();
        let twice_values: Vec<f64> = twice.series.values().collect();
        assert_ne!(once_values, twice_values); // smoothing is lossy, not idempotent
        assert!(variance(&twice_values) <= variance(&once_values));
    }

    #[test]
    fn label_is_carried_verbatim() {
        let s = series(&[1.0, 2.0]);
        let mut config = FilterConfig::moving_average(2);
        config.label = "MA (2h)".to_string();
        let filtered = apply(&s, &config).unwrap();
        assert_eq!(filtered.config.label, "MA (2h)");
    }

    #[test]
    fn empty_series_is_rejected() {
        let empty = Series::from_samples(Vec::new()).unwrap();
        let err = apply(&empty, &FilterConfig::moving_average(1)).unwrap_err();
        assert!(matches!(err, DataError::EmptySeries));
    }

    #[test]
    fn out_of_range_windows_are_config_errors() {
        let s = series(&[1.0, 2.0, 3.0]);
        for window in [0, s.len() + 1] {
            let err = apply(&s, &FilterConfig::moving_average(window)).unwrap_err();
            assert!(matches!(err, DataError::Config(_)));
        }
    }

    #[test]
    fn low_pass_preserves_length_and_timestamps() {
        let values: Vec<f64> = (0..100).map(|i| (i as f64 * 0.3).sin() * 10.0).collect();
        let s = series(&values);
        let filtered = apply(&s, &FilterConfig::low_pass(5)).unwrap();
        assert_eq!(filtered.series.len(), s.len());
        assert!(filtered.series.timestamps().eq(s.timestamps()));
        assert_eq!(filtered.config.label, "Low Pass");
    }

    #[test]
    fn low_pass_validates_like_moving_average() {
        let s = series(&[1.0, 2.0, 3.0]);
        let err = apply(&s, &FilterConfig::low_pass(4)).unwrap_err();
        assert!(matches!(err, DataError::Config(_)));
        let empty = Series::from_samples(Vec::new()).unwrap();
        let err = apply(&empty, &FilterConfig::low_pass(1)).unwrap_err();
        assert!(matches!(err, DataError::EmptySeries));
    }
}
