//! `scentstock-optimizer` — replenishment math over demand statistics.
//!
//! Reorder points, safety stock, order sizing (EOQ and quantity discounts),
//! ABC revenue classification, and inventory health scoring. All functions are
//! pure; the only inputs are numbers and movement histories.

pub mod abc;
pub mod eoq;
pub mod health;
pub mod reorder;
pub mod strategy;

pub use abc::{AbcClass, AbcClassification, abc_classification};
pub use eoq::{OptimalOrder, calculate_eoq, optimal_order_quantity};
pub use health::{
    HealthStatus, InventoryHealth, assess_inventory_health, calculate_days_of_supply,
    calculate_turnover_ratio, detect_dead_stock,
};
pub use reorder::{
    DEFAULT_Z_SCORE, InventoryMetrics, ReorderPoint, calculate_reorder_point,
    calculate_safety_stock, z_score_for_service_level,
};
pub use strategy::{ReplenishmentPolicy, ReplenishmentStrategy, recommend_replenishment_strategy};
