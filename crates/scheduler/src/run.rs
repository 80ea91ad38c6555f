//! Daily and on-demand prediction runs.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use scentstock_core::{
    EngineResult, ProductId, ProductSnapshot, SalesHistory, SupplierCostModel,
};
use scentstock_predictor::{
    BatchFailure, RestockPrediction, predict_restock, predict_restock_batch,
};

use crate::config::SchedulerConfig;
use crate::notifications::{
    NotificationTrigger, notifications_for_batch, notifications_for_product,
};
use crate::report::{PredictionSummary, summarize_predictions};

/// Everything one daily run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRunOutcome {
    pub predictions: Vec<RestockPrediction>,
    pub failures: Vec<BatchFailure>,
    pub notifications: Vec<NotificationTrigger>,
    pub summary: PredictionSummary,
    /// Stored predictions with a timestamp before this should be archived by
    /// the persistence layer.
    pub archive_cutoff: DateTime<Utc>,
}

/// Result of refreshing a single product after new sales land.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRunOutcome {
    pub prediction: RestockPrediction,
    pub notifications: Vec<NotificationTrigger>,
}

/// Stateless batch-run driver. Holds configuration only; every run is a pure
/// function of the inputs handed to it, so identical inputs give identical
/// outcomes.
#[derive(Debug, Clone, Default)]
pub struct PredictionScheduler {
    config: SchedulerConfig,
}

impl PredictionScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Run predictions for the whole catalog and derive notifications, the
    /// daily summary, and the archive cutoff.
    pub fn run_daily_predictions(
        &self,
        products: &[ProductSnapshot],
        histories: &HashMap<ProductId, SalesHistory>,
        supplier_costs: Option<&HashMap<ProductId, SupplierCostModel>>,
        now: DateTime<Utc>,
    ) -> DailyRunOutcome {
        info!(products = products.len(), "starting daily prediction run");

        let outcome = predict_restock_batch(
            products,
            histories,
            supplier_costs,
            &self.config.predictor,
            now,
        );
        let notifications = notifications_for_batch(
            &outcome.predictions,
            self.config.enable_notifications,
            now,
        );
        let summary = summarize_predictions(&outcome.predictions, now);
        let archive_cutoff = now - Duration::days(self.config.retention_days);

        info!(
            predictions = outcome.predictions.len(),
            failures = outcome.failures.len(),
            notifications = notifications.len(),
            %archive_cutoff,
            "daily prediction run complete"
        );

        DailyRunOutcome {
            predictions: outcome.predictions,
            failures: outcome.failures,
            notifications,
            summary,
            archive_cutoff,
        }
    }

    /// Refresh one product's prediction, typically after a new sale is
    /// recorded. The product keeps whatever ABC class the last full batch
    /// assigned; a single product cannot be classified in isolation.
    pub fn update_predictions_for_product(
        &self,
        product: &ProductSnapshot,
        history: &SalesHistory,
        supplier_costs: Option<&SupplierCostModel>,
        now: DateTime<Utc>,
    ) -> EngineResult<ProductRunOutcome> {
        info!(product_id = %product.id, "refreshing single-product prediction");

        let prediction = predict_restock(
            product,
            history,
            supplier_costs,
            None,
            &self.config.predictor,
            now,
        )?;
        let notifications = notifications_for_product(&prediction);

        Ok(ProductRunOutcome {
            prediction,
            notifications,
        })
    }
}
