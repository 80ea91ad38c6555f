//! Trend detection via ordinary least squares.

use serde::{Deserialize, Serialize};

/// Direction label for a fitted trend.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

/// Least-squares fit over index-as-x, value-as-y.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub direction: TrendDirection,
}

impl TrendAnalysis {
    fn neutral() -> Self {
        Self {
            slope: 0.0,
            intercept: 0.0,
            r_squared: 0.0,
            direction: TrendDirection::Stable,
        }
    }
}

/// Slope threshold below which a fitted trend counts as stable.
const STABLE_SLOPE_EPSILON: f64 = 0.1;

/// Ordinary least squares over `(i, data[i])`.
///
/// Empty input yields a neutral zero/stable result, never an error. A flat
/// series has zero slope and zero R² (no variance to explain).
pub fn linear_regression(data: &[f64]) -> TrendAnalysis {
    let n = data.len();
    if n == 0 {
        return TrendAnalysis::neutral();
    }

    let nf = n as f64;
    let x_mean = (nf - 1.0) / 2.0;
    let y_mean = data.iter().sum::<f64>() / nf;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, &y) in data.iter().enumerate() {
        let dx = i as f64 - x_mean;
        numerator += dx * (y - y_mean);
        denominator += dx * dx;
    }

    let slope = if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    };
    let intercept = y_mean - slope * x_mean;

    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (i, &y) in data.iter().enumerate() {
        let predicted = slope * i as f64 + intercept;
        ss_res += (y - predicted) * (y - predicted);
        ss_tot += (y - y_mean) * (y - y_mean);
    }
    let r_squared = if ss_tot == 0.0 { 0.0 } else { 1.0 - ss_res / ss_tot };

    let direction = if slope.abs() > STABLE_SLOPE_EPSILON {
        if slope > 0.0 {
            TrendDirection::Increasing
        } else {
            TrendDirection::Decreasing
        }
    } else {
        TrendDirection::Stable
    };

    TrendAnalysis {
        slope,
        intercept,
        r_squared,
        direction,
    }
}

/// Evaluate the regression line one step beyond the series, floored at 0.
pub fn predict_next_value(data: &[f64]) -> f64 {
    let fit = linear_regression(data);
    let next = fit.slope * data.len() as f64 + fit.intercept;
    next.max(0.0)
}
