//! The engine's output record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use scentstock_core::ProductId;
use scentstock_forecast::TrendDirection;
use scentstock_optimizer::{AbcClass, InventoryHealth, ReplenishmentStrategy};

/// How soon action is needed. Ordered most-urgent-first so sorting ascending
/// puts critical items at the top.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Critical,
    High,
    Medium,
    Low,
}

/// How much the sales history can be trusted, from sample size and demand
/// variability.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

/// Predicted demand at three granularities.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedDemand {
    pub daily: f64,
    pub weekly: f64,
    pub monthly: f64,
}

impl PredictedDemand {
    pub fn zero() -> Self {
        Self {
            daily: 0.0,
            weekly: 0.0,
            monthly: 0.0,
        }
    }
}

/// One complete, explainable restock recommendation.
///
/// Created fresh per prediction run and never mutated by the engine;
/// ownership passes to the caller for display, notification, or persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestockPrediction {
    pub product_id: ProductId,
    pub product_name: String,

    // Current state
    pub current_stock: u32,
    /// Days the current stock lasts; infinite when demand is zero.
    pub days_of_supply: f64,

    // Recommendation
    pub should_reorder: bool,
    pub recommended_order_quantity: u32,
    pub reorder_point: u32,
    pub safety_stock: u32,
    pub urgency: Urgency,

    // Forecast
    pub predicted_demand: PredictedDemand,
    pub trend: TrendDirection,
    pub seasonality_factor: f64,

    // Confidence & quality
    pub confidence: f64,
    pub data_quality: DataQuality,

    // Financials
    pub economic_order_quantity: u32,
    pub estimated_order_cost: f64,
    pub estimated_value: f64,

    // Classification
    pub abc_class: Option<AbcClass>,
    pub inventory_health: InventoryHealth,
    pub replenishment_strategy: ReplenishmentStrategy,

    // Timing
    pub estimated_stockout_date: Option<DateTime<Utc>>,
    /// `None` when demand is zero and no reorder is due.
    pub recommended_order_date: Option<DateTime<Utc>>,
    pub expected_delivery_date: Option<DateTime<Utc>>,

    // Explanations
    pub warnings: Vec<String>,
    pub insights: Vec<String>,
}
