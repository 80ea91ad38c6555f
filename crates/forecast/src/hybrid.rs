//! Hybrid forecast combining moving averages and trend extrapolation.

use serde::{Deserialize, Serialize};

use crate::average::{exponential_moving_average, simple_moving_average};
use crate::seasonality::{DEFAULT_MAX_PERIOD, detect_seasonality};
use crate::stats::demand_variance;
use crate::trend::{TrendDirection, linear_regression, predict_next_value};

/// Near-term demand forecast with a confidence score and trend label.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Predicted near-term demand (never negative).
    pub predicted: f64,
    /// Confidence in [0, 1].
    pub confidence: f64,
    pub trend: TrendDirection,
    /// Multiplier >= 1.0; 1.1 when a seasonal cycle was detected.
    pub seasonality_factor: f64,
}

impl ForecastResult {
    fn zero() -> Self {
        Self {
            predicted: 0.0,
            confidence: 0.0,
            trend: TrendDirection::Stable,
            seasonality_factor: 1.0,
        }
    }
}

/// Weighted blend of the latest SMA (30%), latest EMA (40%), and one-step
/// trend prediction (30%), bumped by 1.1 when seasonality is detected.
///
/// Confidence mixes demand stability (0.4 weight on `1 - CV`, floored at 0),
/// trend fit (0.3 on R²), and sample size (0.3 on `min(1, n/30)`), clamped to
/// [0, 1]. Empty input yields a zero/stable forecast.
pub fn hybrid_forecast(data: &[f64], periods: usize) -> ForecastResult {
    if data.is_empty() {
        return ForecastResult::zero();
    }

    let sma = simple_moving_average(data, periods);
    let ema = exponential_moving_average(data, periods);
    let fit = linear_regression(data);
    let next = predict_next_value(data);

    let last_sma = sma.last().copied().unwrap_or(0.0);
    let last_ema = ema.last().copied().unwrap_or(0.0);
    let predicted = 0.3 * last_sma + 0.4 * last_ema + 0.3 * next;

    let stats = demand_variance(data);
    let variance_confidence = (1.0 - stats.coefficient_of_variation).max(0.0);
    let sample_confidence = (data.len() as f64 / 30.0).min(1.0);
    let confidence =
        0.4 * variance_confidence + 0.3 * fit.r_squared + 0.3 * sample_confidence;

    let seasonality_factor = if detect_seasonality(data, DEFAULT_MAX_PERIOD) > 0 {
        1.1
    } else {
        1.0
    };

    ForecastResult {
        predicted: (predicted * seasonality_factor).max(0.0),
        confidence: confidence.clamp(0.0, 1.0),
        trend: fit.direction,
        seasonality_factor,
    }
}
