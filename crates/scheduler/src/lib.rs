//! `scentstock-scheduler` — batch prediction runs, notifications, reporting.
//!
//! Stateless: each run is a pure function of the catalog snapshot it is
//! given, so repeated runs over identical inputs produce identical output.
//! Persistence and cron triggering belong to the embedding service.

pub mod config;
pub mod notifications;
pub mod report;
pub mod run;
pub mod telemetry;

pub use config::SchedulerConfig;
pub use notifications::{
    NotificationKind, NotificationPriority, NotificationTrigger, notifications_for_batch,
    notifications_for_product,
};
pub use report::{
    AccuracyMetrics, AccuracyScore, PerformanceReport, PredictionRecord, PredictionSummary,
    calculate_prediction_accuracy, generate_performance_report, summarize_predictions,
};
pub use run::{DailyRunOutcome, PredictionScheduler, ProductRunOutcome};
