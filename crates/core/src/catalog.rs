//! Catalog inputs to a prediction run.
//!
//! These records are owned by the caller (catalog/ledger collaborator) and are
//! read-only inputs to the engine: nothing here is persisted or mutated by a
//! prediction run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::id::ProductId;

/// One outbound stock movement observation.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub occurred_at: DateTime<Utc>,
    /// Units moved out of stock (>= 0).
    pub quantity: f64,
}

impl TimeSeriesPoint {
    pub fn new(occurred_at: DateTime<Utc>, quantity: f64) -> Self {
        Self {
            occurred_at,
            quantity,
        }
    }
}

/// Per-product time-ordered outbound-movement history.
///
/// May be empty or sparse; must be sorted ascending by timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesHistory {
    pub product_id: ProductId,
    pub sales: Vec<TimeSeriesPoint>,
}

impl SalesHistory {
    pub fn new(product_id: ProductId, sales: Vec<TimeSeriesPoint>) -> Self {
        Self { product_id, sales }
    }

    pub fn empty(product_id: ProductId) -> Self {
        Self {
            product_id,
            sales: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    /// Movement quantities in observation order.
    pub fn quantities(&self) -> Vec<f64> {
        self.sales.iter().map(|p| p.quantity).collect()
    }

    /// Total units moved across the whole history.
    pub fn total_quantity(&self) -> f64 {
        self.sales.iter().map(|p| p.quantity).sum()
    }

    /// Check the structural contract: non-negative finite quantities,
    /// timestamps non-decreasing.
    pub fn validate(&self) -> EngineResult<()> {
        for point in &self.sales {
            if !point.quantity.is_finite() || point.quantity < 0.0 {
                return Err(EngineError::invalid_input(format!(
                    "sales history for {} contains a negative or non-finite quantity",
                    self.product_id
                )));
            }
        }
        for pair in self.sales.windows(2) {
            if pair[1].occurred_at < pair[0].occurred_at {
                return Err(EngineError::invalid_input(format!(
                    "sales history for {} is not sorted ascending by timestamp",
                    self.product_id
                )));
            }
        }
        Ok(())
    }
}

/// Immutable snapshot of one catalog product at prediction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    /// Units currently on hand.
    pub current_stock: u32,
    pub unit_cost: f64,
    pub selling_price: f64,
    /// Supplier lead time in days (> 0).
    pub lead_time_days: f64,
    /// Standard deviation of the lead time in days, when known.
    pub lead_time_std_dev: Option<f64>,
    /// Maximum units that can be stored, when constrained.
    pub storage_capacity: Option<u32>,
    /// Supplier-imposed minimum order size, when any.
    pub minimum_order_quantity: Option<u32>,
}

impl ProductSnapshot {
    /// Check the structural contract: positive lead time, finite non-negative
    /// money amounts and variability.
    pub fn validate(&self) -> EngineResult<()> {
        if !(self.lead_time_days.is_finite() && self.lead_time_days > 0.0) {
            return Err(EngineError::invalid_input(format!(
                "product {}: lead time must be a positive number of days",
                self.id
            )));
        }
        if !self.unit_cost.is_finite() || self.unit_cost < 0.0 {
            return Err(EngineError::invalid_input(format!(
                "product {}: unit cost must be finite and non-negative",
                self.id
            )));
        }
        if !self.selling_price.is_finite() || self.selling_price < 0.0 {
            return Err(EngineError::invalid_input(format!(
                "product {}: selling price must be finite and non-negative",
                self.id
            )));
        }
        if let Some(sd) = self.lead_time_std_dev {
            if !sd.is_finite() || sd < 0.0 {
                return Err(EngineError::invalid_input(format!(
                    "product {}: lead time variability must be finite and non-negative",
                    self.id
                )));
            }
        }
        Ok(())
    }
}

/// One quantity-discount tier: at or above `min_quantity`, pay `unit_price`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreak {
    pub min_quantity: u32,
    pub unit_price: f64,
}

/// Supplier cost structure for order sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierCostModel {
    /// Fixed cost per order placed (>= 0).
    pub ordering_cost: f64,
    /// Annual holding cost as a fraction of unit cost (typically 0..1).
    pub holding_cost_rate: f64,
    /// Discount tiers sorted ascending by `min_quantity`.
    pub price_breaks: Vec<PriceBreak>,
}

impl SupplierCostModel {
    pub fn new(ordering_cost: f64, holding_cost_rate: f64) -> Self {
        Self {
            ordering_cost,
            holding_cost_rate,
            price_breaks: Vec::new(),
        }
    }

    pub fn with_price_breaks(mut self, price_breaks: Vec<PriceBreak>) -> Self {
        self.price_breaks = price_breaks;
        self
    }

    pub fn validate(&self) -> EngineResult<()> {
        if !self.ordering_cost.is_finite() || self.ordering_cost < 0.0 {
            return Err(EngineError::invalid_input(
                "ordering cost must be finite and non-negative",
            ));
        }
        if !self.holding_cost_rate.is_finite() || self.holding_cost_rate < 0.0 {
            return Err(EngineError::invalid_input(
                "holding cost rate must be finite and non-negative",
            ));
        }
        for brk in &self.price_breaks {
            if !brk.unit_price.is_finite() || brk.unit_price < 0.0 {
                return Err(EngineError::invalid_input(
                    "price break unit price must be finite and non-negative",
                ));
            }
        }
        Ok(())
    }
}
