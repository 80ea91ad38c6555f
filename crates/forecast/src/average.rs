//! Moving averages: simple, exponential, weighted.

fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / (xs.len() as f64)
}

/// Simple moving average.
///
/// For index `i`, the average of the last `period` values ending at `i`.
/// Positions with fewer than `period` values average over the prefix that
/// exists, so the output has the same length as the input and never contains
/// NaN. A series shorter than `period` everywhere collapses to the overall
/// mean at every position.
pub fn simple_moving_average(data: &[f64], period: usize) -> Vec<f64> {
    let period = period.max(1);
    if data.len() < period {
        let overall = mean(data);
        return vec![overall; data.len()];
    }

    let mut sma = Vec::with_capacity(data.len());
    for i in 0..data.len() {
        let start = (i + 1).saturating_sub(period);
        sma.push(mean(&data[start..=i]));
    }
    sma
}

/// Exponential moving average with smoothing factor `alpha = 2 / (period + 1)`.
///
/// The first output equals the first input; each subsequent output is
/// `alpha * value + (1 - alpha) * previous`.
pub fn exponential_moving_average(data: &[f64], period: usize) -> Vec<f64> {
    let Some(&first) = data.first() else {
        return Vec::new();
    };

    let alpha = 2.0 / (period.max(1) as f64 + 1.0);
    let mut ema = Vec::with_capacity(data.len());
    ema.push(first);
    for &value in &data[1..] {
        let prev = *ema.last().unwrap_or(&first);
        ema.push(alpha * value + (1.0 - alpha) * prev);
    }
    ema
}

/// Weighted moving average with linear weights `1..=period`, the most recent
/// point weighted heaviest.
///
/// Partial windows at the start use a truncated weight set renormalized to
/// sum to 1.
pub fn weighted_moving_average(data: &[f64], period: usize) -> Vec<f64> {
    let period = period.max(1).min(data.len().max(1));

    let mut wma = Vec::with_capacity(data.len());
    for i in 0..data.len() {
        let window = (i + 1).min(period);
        let start = i + 1 - window;
        let slice = &data[start..=i];

        let weight_sum = (window * (window + 1)) as f64 / 2.0;
        let weighted: f64 = slice
            .iter()
            .enumerate()
            .map(|(j, &value)| value * (j + 1) as f64)
            .sum();
        wma.push(weighted / weight_sum);
    }
    wma
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sma_averages_full_windows() {
        let sma = simple_moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(sma.len(), 5);
        assert!((sma[4] - 4.0).abs() < 1e-9);
        assert!((sma[2] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn sma_uses_prefix_for_early_positions() {
        let sma = simple_moving_average(&[2.0, 4.0, 6.0], 3);
        assert!((sma[0] - 2.0).abs() < 1e-9);
        assert!((sma[1] - 3.0).abs() < 1e-9);
    }

    #[test]
    fn sma_short_series_repeats_overall_mean() {
        let sma = simple_moving_average(&[1.0, 3.0], 5);
        assert_eq!(sma, vec![2.0, 2.0]);
    }

    #[test]
    fn sma_empty_input_yields_empty_output() {
        assert!(simple_moving_average(&[], 3).is_empty());
    }

    #[test]
    fn ema_starts_at_first_value() {
        let ema = exponential_moving_average(&[10.0, 20.0], 3);
        assert_eq!(ema[0], 10.0);
        // alpha = 0.5 for period 3
        assert!((ema[1] - 15.0).abs() < 1e-9);
    }

    #[test]
    fn ema_empty_input_yields_empty_output() {
        assert!(exponential_moving_average(&[], 7).is_empty());
    }

    #[test]
    fn wma_favors_most_recent_point() {
        // Weights 1,2,3 over [1,2,3]: (1 + 4 + 9) / 6
        let wma = weighted_moving_average(&[1.0, 2.0, 3.0], 3);
        assert!((wma[2] - 14.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn wma_renormalizes_partial_windows() {
        let wma = weighted_moving_average(&[4.0, 8.0], 3);
        assert!((wma[0] - 4.0).abs() < 1e-9);
        // Weights 1,2 over [4,8]: (4 + 16) / 3
        assert!((wma[1] - 20.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn constant_series_is_a_fixed_point_of_all_averages() {
        let data = vec![5.0; 20];
        for out in [
            simple_moving_average(&data, 7),
            exponential_moving_average(&data, 7),
            weighted_moving_average(&data, 7),
        ] {
            assert!(out.iter().all(|v| (v - 5.0).abs() < 1e-9));
        }
    }
}
