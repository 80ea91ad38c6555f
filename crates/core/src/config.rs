//! Engine configuration.
//!
//! The original defaults (service level 0.95, ordering cost 50, holding rate
//! 0.25) live in an explicit value object passed into every prediction, so
//! tests can override them per case without shared state.

use serde::{Deserialize, Serialize};

/// Configuration for a prediction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictorConfig {
    /// Target service level used for safety-stock sizing (0..1).
    pub service_level: f64,
    /// Fixed cost per order, used when no supplier cost model is given.
    pub default_ordering_cost: f64,
    /// Annual holding cost as a fraction of unit cost, used when no supplier
    /// cost model is given.
    pub default_holding_cost_rate: f64,
    /// Order quantity recommended for products with no sales history and no
    /// minimum order quantity.
    pub fallback_order_quantity: u32,
    /// Days without sales after which stock counts as dead.
    pub dead_stock_threshold_days: i64,
    /// Worker threads used by batch prediction.
    pub max_concurrent: usize,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            service_level: 0.95,
            default_ordering_cost: 50.0,
            default_holding_cost_rate: 0.25,
            fallback_order_quantity: 10,
            dead_stock_threshold_days: 90,
            max_concurrent: 4,
        }
    }
}

impl PredictorConfig {
    pub fn with_service_level(mut self, service_level: f64) -> Self {
        self.service_level = service_level;
        self
    }

    pub fn with_default_ordering_cost(mut self, cost: f64) -> Self {
        self.default_ordering_cost = cost;
        self
    }

    pub fn with_default_holding_cost_rate(mut self, rate: f64) -> Self {
        self.default_holding_cost_rate = rate;
        self
    }

    pub fn with_fallback_order_quantity(mut self, quantity: u32) -> Self {
        self.fallback_order_quantity = quantity;
        self
    }

    pub fn with_dead_stock_threshold_days(mut self, days: i64) -> Self {
        self.dead_stock_threshold_days = days;
        self
    }

    pub fn with_max_concurrent(mut self, max: usize) -> Self {
        self.max_concurrent = max.max(1);
        self
    }
}
