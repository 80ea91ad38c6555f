//! Seasonality detection via autocorrelation.

use crate::average::simple_moving_average;
use crate::stats::demand_variance;

/// Default maximum lag searched for a seasonal period.
pub const DEFAULT_MAX_PERIOD: usize = 12;

/// Minimum autocorrelation at a lag to count as a seasonal signal.
const CORRELATION_THRESHOLD: f64 = 0.5;

/// Find the lag in `1..=max_period` with the highest autocorrelation above
/// 0.5, or 0 when no seasonal pattern is detected.
///
/// Needs at least `2 * max_period` points; shorter or zero-variance series
/// always return 0.
pub fn detect_seasonality(data: &[f64], max_period: usize) -> usize {
    if max_period == 0 || data.len() < max_period * 2 {
        return 0;
    }

    let stats = demand_variance(data);
    if stats.variance == 0.0 {
        return 0;
    }

    let mut best_correlation = 0.0;
    let mut seasonal_period = 0;

    for lag in 1..=max_period {
        let n = data.len() - lag;
        let mut correlation = 0.0;
        for i in 0..n {
            correlation += (data[i] - stats.mean) * (data[i + lag] - stats.mean);
        }
        correlation /= n as f64 * stats.variance;

        if correlation > best_correlation && correlation > CORRELATION_THRESHOLD {
            best_correlation = correlation;
            seasonal_period = lag;
        }
    }

    seasonal_period
}

/// Per-position seasonal factors for a known period, normalized so the
/// average factor is 1.0.
///
/// Detrends with a simple moving average; positions where the trend is zero
/// are skipped. A zero period or a series shorter than two full cycles yields
/// a flat all-ones profile.
pub fn seasonal_indices(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || data.len() < period * 2 {
        return vec![1.0; period];
    }

    let trend = simple_moving_average(data, period);

    let mut sums = vec![0.0; period];
    let mut counts = vec![0u32; period];
    for (i, &value) in data.iter().enumerate() {
        if trend[i] != 0.0 {
            sums[i % period] += value / trend[i];
            counts[i % period] += 1;
        }
    }

    let indices: Vec<f64> = sums
        .iter()
        .zip(&counts)
        .map(|(&sum, &count)| if count > 0 { sum / count as f64 } else { 1.0 })
        .collect();

    let avg = indices.iter().sum::<f64>() / period as f64;
    if avg == 0.0 {
        return indices;
    }
    indices.iter().map(|&idx| idx / avg).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cyclical(period: usize, cycles: usize) -> Vec<f64> {
        // One pronounced spike per cycle.
        let mut data = Vec::with_capacity(period * cycles);
        for _ in 0..cycles {
            for i in 0..period {
                data.push(if i == 0 { 20.0 } else { 2.0 });
            }
        }
        data
    }

    #[test]
    fn detects_a_weekly_cycle() {
        let data = cyclical(7, 8);
        assert_eq!(detect_seasonality(&data, 12), 7);
    }

    #[test]
    fn short_series_never_reports_seasonality() {
        let data = cyclical(7, 1);
        assert_eq!(detect_seasonality(&data, 12), 0);
    }

    #[test]
    fn flat_series_has_no_seasonality() {
        let data = vec![10.0; 100];
        assert_eq!(detect_seasonality(&data, 12), 0);
    }

    #[test]
    fn empty_series_has_no_seasonality() {
        assert_eq!(detect_seasonality(&[], 12), 0);
    }

    #[test]
    fn indices_for_zero_period_are_empty() {
        assert!(seasonal_indices(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn indices_default_to_flat_profile_on_short_input() {
        let indices = seasonal_indices(&[1.0, 2.0, 3.0], 4);
        assert_eq!(indices, vec![1.0; 4]);
    }

    #[test]
    fn indices_average_to_one() {
        let data = cyclical(4, 6);
        let indices = seasonal_indices(&data, 4);
        let avg = indices.iter().sum::<f64>() / indices.len() as f64;
        assert!((avg - 1.0).abs() < 1e-9);
        // The spike position carries the largest factor.
        let max = indices.iter().cloned().fold(f64::MIN, f64::max);
        assert_eq!(indices[0], max);
    }
}
