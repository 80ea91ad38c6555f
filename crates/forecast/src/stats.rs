//! Demand variability statistics.

use serde::{Deserialize, Serialize};

/// Spread of a demand series: population variance, standard deviation, and
/// the scale-free coefficient of variation.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandVariance {
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
    /// `std_dev / mean`, or 0 when the mean is 0.
    pub coefficient_of_variation: f64,
}

impl DemandVariance {
    fn zero() -> Self {
        Self {
            mean: 0.0,
            variance: 0.0,
            std_dev: 0.0,
            coefficient_of_variation: 0.0,
        }
    }
}

/// Population variance statistics for a demand series.
///
/// Empty input yields all-zero statistics.
pub fn demand_variance(data: &[f64]) -> DemandVariance {
    if data.is_empty() {
        return DemandVariance::zero();
    }

    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    let variance = data
        .iter()
        .map(|&x| {
            let d = x - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    let std_dev = variance.sqrt();
    let coefficient_of_variation = if mean != 0.0 { std_dev / mean } else { 0.0 };

    DemandVariance {
        mean,
        variance,
        std_dev,
        coefficient_of_variation,
    }
}
