//! Scheduler run configuration.

use scentstock_core::PredictorConfig;

/// Configuration for scheduled prediction runs.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerConfig {
    /// Tuning for the underlying per-product predictor.
    pub predictor: PredictorConfig,
    /// Predictions older than this many days are past the archive cutoff.
    pub retention_days: i64,
    /// When false, the low-priority daily summary notification is suppressed.
    /// Critical and reorder notifications are always emitted.
    pub enable_notifications: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            predictor: PredictorConfig::default(),
            retention_days: 90,
            enable_notifications: true,
        }
    }
}

impl SchedulerConfig {
    pub fn with_predictor(mut self, predictor: PredictorConfig) -> Self {
        self.predictor = predictor;
        self
    }

    pub fn with_retention_days(mut self, days: i64) -> Self {
        self.retention_days = days.max(0);
        self
    }

    pub fn with_notifications_enabled(mut self, enabled: bool) -> Self {
        self.enable_notifications = enabled;
        self
    }
}
