//! Inventory health: dead stock, turnover, days of supply, risk scoring.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use scentstock_core::TimeSeriesPoint;
use scentstock_forecast::calculate_velocity;

/// Overall health label derived from the two risk scores.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

impl HealthStatus {
    /// Single source of truth for the status thresholds: critical when
    /// dead-stock risk exceeds 0.6 or understock risk exceeds 0.7, warning
    /// when either exceeds 0.3 / 0.4, healthy otherwise.
    pub fn from_risks(dead_stock_risk: f64, understock_risk: f64) -> Self {
        if dead_stock_risk > 0.6 || understock_risk > 0.7 {
            HealthStatus::Critical
        } else if dead_stock_risk > 0.3 || understock_risk > 0.4 {
            HealthStatus::Warning
        } else {
            HealthStatus::Healthy
        }
    }
}

/// Composite health assessment for one product.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryHealth {
    /// Annualized turnover ratio (>= 0).
    pub turnover_ratio: f64,
    /// Days the current stock lasts at the current rate; infinite when
    /// demand is zero.
    pub days_of_supply: f64,
    /// Risk of the stock never moving, in [0, 1].
    pub dead_stock_risk: f64,
    /// Risk of running out before replenishment, in [0, 1].
    pub understock_risk: f64,
    pub status: HealthStatus,
}

/// True when there are no sales (or only zero-quantity movements) within the
/// threshold window before `now`. An empty history is always dead stock.
pub fn detect_dead_stock(
    sales: &[TimeSeriesPoint],
    threshold_days: i64,
    now: DateTime<Utc>,
) -> bool {
    if sales.is_empty() {
        return true;
    }

    let cutoff = now - Duration::days(threshold_days);
    let recent_total: f64 = sales
        .iter()
        .filter(|p| p.occurred_at > cutoff)
        .map(|p| p.quantity)
        .sum();

    recent_total == 0.0
}

/// Cost of goods sold over average inventory value; 0 when there is no
/// inventory to turn.
pub fn calculate_turnover_ratio(cost_of_goods_sold: f64, average_inventory_value: f64) -> f64 {
    if average_inventory_value == 0.0 {
        return 0.0;
    }
    cost_of_goods_sold / average_inventory_value
}

/// Days the current stock lasts at the average daily rate; infinite when the
/// rate is zero.
pub fn calculate_days_of_supply(current_stock: u32, average_daily_demand: f64) -> f64 {
    if average_daily_demand == 0.0 {
        return f64::INFINITY;
    }
    current_stock as f64 / average_daily_demand
}

/// Weighted risk scoring over turnover, days of supply, and recent movement.
///
/// Dead-stock risk sums +0.3 for turnover below 2, +0.4 for more than 180
/// days of supply, +0.3 for no movement within the dead-stock window
/// (typically 90 days), capped at 1. Understock risk is 0 above the reorder
/// point, otherwise `min(1, (rop - stock) / rop + 0.5)`.
pub fn assess_inventory_health(
    current_stock: u32,
    reorder_point: u32,
    sales: &[TimeSeriesPoint],
    unit_cost: f64,
    dead_stock_threshold_days: i64,
    now: DateTime<Utc>,
) -> InventoryHealth {
    let velocity = calculate_velocity(sales);
    let annual_demand = velocity.daily * 365.0;

    let turnover_ratio = calculate_turnover_ratio(
        annual_demand * unit_cost,
        current_stock as f64 * unit_cost,
    );
    let days_of_supply = calculate_days_of_supply(current_stock, velocity.daily);

    let mut dead_stock_risk: f64 = 0.0;
    if turnover_ratio < 2.0 {
        dead_stock_risk += 0.3;
    }
    if days_of_supply > 180.0 {
        dead_stock_risk += 0.4;
    }
    if detect_dead_stock(sales, dead_stock_threshold_days, now) {
        dead_stock_risk += 0.3;
    }
    dead_stock_risk = dead_stock_risk.min(1.0);

    let understock_risk = if reorder_point > 0 && current_stock <= reorder_point {
        let shortfall = (reorder_point - current_stock) as f64 / reorder_point as f64;
        (shortfall + 0.5).min(1.0)
    } else {
        0.0
    };

    InventoryHealth {
        turnover_ratio,
        days_of_supply,
        dead_stock_risk,
        understock_risk,
        status: HealthStatus::from_risks(dead_stock_risk, understock_risk),
    }
}
