//! Reorder point and safety stock.

use serde::{Deserialize, Serialize};

/// Demand and supply characteristics of one product.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryMetrics {
    /// Average units sold per day.
    pub average_daily_demand: f64,
    /// Standard deviation of daily demand.
    pub demand_std_dev: f64,
    /// Supplier lead time in days.
    pub lead_time_days: f64,
    /// Target service level in (0, 1).
    pub service_level: f64,
}

/// Reorder point calculation output.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderPoint {
    /// Stock level at which a new order should be placed.
    pub rop: u32,
    /// Buffer absorbing demand variability during lead time.
    pub safety_stock: u32,
    /// Expected demand over one lead time.
    pub demand_during_lead_time: u32,
    /// Confidence in [0, 1].
    pub confidence: f64,
}

/// Z-score for a service level of roughly 95%.
pub const DEFAULT_Z_SCORE: f64 = 1.65;

/// Approximate z-score for a target service level.
///
/// Fixed lookup table for the service levels replenishment planning actually
/// uses; anything below 85% falls back to the 80% score.
pub fn z_score_for_service_level(service_level: f64) -> f64 {
    if service_level >= 0.99 {
        2.33
    } else if service_level >= 0.98 {
        2.05
    } else if service_level >= 0.95 {
        1.65
    } else if service_level >= 0.90 {
        1.28
    } else if service_level >= 0.85 {
        1.04
    } else {
        0.84
    }
}

/// Reorder point: `average daily demand x lead time + safety stock`, where
/// safety stock is `z x sigma x sqrt(lead time)`.
///
/// All stock figures are rounded up to whole units and floored at 0.
/// Confidence is `min(1, service_level * 0.7 + 0.3)` when demand variability
/// is observable, without the 0.3 bonus otherwise.
pub fn calculate_reorder_point(metrics: &InventoryMetrics, z_score: f64) -> ReorderPoint {
    let demand_during_lead_time = metrics.average_daily_demand * metrics.lead_time_days;
    let safety_stock = z_score * metrics.demand_std_dev * metrics.lead_time_days.sqrt();
    let rop = demand_during_lead_time + safety_stock;

    let variability_bonus = if metrics.demand_std_dev > 0.0 { 0.3 } else { 0.0 };
    let confidence = (metrics.service_level * 0.7 + variability_bonus).min(1.0);

    ReorderPoint {
        rop: ceil_units(rop),
        safety_stock: ceil_units(safety_stock),
        demand_during_lead_time: ceil_units(demand_during_lead_time),
        confidence,
    }
}

/// Safety stock sized for a target service level.
///
/// With a fixed lead time this is `z x sigma_demand x sqrt(lead time)`. When
/// the lead time itself varies, demand and lead-time variance are combined:
/// `z x sqrt(lead_time x sigma_d^2 + demand^2 x sigma_lt^2)`.
pub fn calculate_safety_stock(
    average_daily_demand: f64,
    demand_std_dev: f64,
    lead_time_days: f64,
    lead_time_std_dev: f64,
    service_level: f64,
) -> u32 {
    let z = z_score_for_service_level(service_level);

    let raw = if lead_time_std_dev == 0.0 {
        z * demand_std_dev * lead_time_days.sqrt()
    } else {
        let demand_var = demand_std_dev * demand_std_dev;
        let lead_time_var = lead_time_std_dev * lead_time_std_dev;
        z * (lead_time_days * demand_var
            + average_daily_demand * average_daily_demand * lead_time_var)
            .sqrt()
    };

    ceil_units(raw)
}

fn ceil_units(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.ceil() as u32
}
