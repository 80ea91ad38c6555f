//! Aggregate views over prediction batches: summaries, accuracy scoring,
//! and performance reports. All derived on demand, never stored here.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use scentstock_core::ProductId;
use scentstock_optimizer::{AbcClass, HealthStatus};
use scentstock_predictor::{RestockPrediction, Urgency};

/// Counts and totals over one prediction batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionSummary {
    pub total_products: usize,
    pub needs_reorder: usize,
    pub critical: usize,
    pub high: usize,
    pub total_inventory_value: f64,
    pub total_estimated_order_cost: f64,
    pub by_abc_class: AbcCounts,
    pub by_health_status: HealthCounts,
    pub average_confidence: f64,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AbcCounts {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HealthCounts {
    pub healthy: usize,
    pub warning: usize,
    pub critical: usize,
}

/// A stored prediction, as the persistence layer would hand it back for
/// accuracy evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: Uuid,
    pub product_id: ProductId,
    pub timestamp: DateTime<Utc>,
    pub prediction: RestockPrediction,
    pub archived: bool,
}

impl PredictionRecord {
    pub fn new(prediction: RestockPrediction, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            product_id: prediction.product_id,
            timestamp,
            prediction,
            archived: false,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccuracyScore {
    Excellent,
    Good,
    NeedsImprovement,
}

/// Inverted-MAPE accuracy over a set of historical predictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyMetrics {
    pub average_accuracy: f64,
    pub total_predictions: usize,
    /// How many records had a positive predicted demand and could be scored.
    pub evaluated_predictions: usize,
    pub accuracy_score: AccuracyScore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPerformance {
    pub product_id: ProductId,
    pub product_name: String,
    pub confidence: f64,
    pub turnover_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttentionItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub confidence: f64,
    pub warnings: Vec<String>,
}

/// Summary, accuracy, and the best/worst performers in one view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub summary: PredictionSummary,
    pub accuracy: AccuracyMetrics,
    pub top_performers: Vec<ProductPerformance>,
    pub needs_attention: Vec<AttentionItem>,
    pub generated_at: DateTime<Utc>,
}

/// Roll a batch of predictions up into counts and totals.
///
/// Order cost is summed only over products that actually need reordering;
/// inventory value is summed over everything. Average confidence of an empty
/// batch is 0.
pub fn summarize_predictions(
    predictions: &[RestockPrediction],
    now: DateTime<Utc>,
) -> PredictionSummary {
    let mut summary = PredictionSummary {
        total_products: predictions.len(),
        needs_reorder: 0,
        critical: 0,
        high: 0,
        total_inventory_value: 0.0,
        total_estimated_order_cost: 0.0,
        by_abc_class: AbcCounts::default(),
        by_health_status: HealthCounts::default(),
        average_confidence: 0.0,
        generated_at: now,
    };

    let mut confidence_sum = 0.0;
    for prediction in predictions {
        confidence_sum += prediction.confidence;
        summary.total_inventory_value += prediction.estimated_value;

        if prediction.should_reorder {
            summary.needs_reorder += 1;
            summary.total_estimated_order_cost += prediction.estimated_order_cost;
        }
        match prediction.urgency {
            Urgency::Critical => summary.critical += 1,
            Urgency::High => summary.high += 1,
            _ => {}
        }
        match prediction.abc_class {
            Some(AbcClass::A) => summary.by_abc_class.a += 1,
            Some(AbcClass::B) => summary.by_abc_class.b += 1,
            Some(AbcClass::C) => summary.by_abc_class.c += 1,
            None => {}
        }
        match prediction.inventory_health.status {
            HealthStatus::Healthy => summary.by_health_status.healthy += 1,
            HealthStatus::Warning => summary.by_health_status.warning += 1,
            HealthStatus::Critical => summary.by_health_status.critical += 1,
        }
    }

    if !predictions.is_empty() {
        summary.average_confidence = confidence_sum / predictions.len() as f64;
    }
    summary
}

/// Score historical predictions against observed sales.
///
/// Each evaluable record scores `1 - min(1, |actual - predicted| / actual)`,
/// an inverted absolute percentage error. Records with predicted daily demand
/// <= 0 are excluded from the average instead of dragging it to zero; a
/// missing actual counts as zero sales.
pub fn calculate_prediction_accuracy(
    historical: &[PredictionRecord],
    actual_sales: &HashMap<ProductId, f64>,
) -> AccuracyMetrics {
    let mut scores = Vec::new();

    for record in historical {
        let predicted = record.prediction.predicted_demand.daily;
        if predicted <= 0.0 {
            continue;
        }
        let actual = actual_sales.get(&record.product_id).copied().unwrap_or(0.0);
        let ape = ((actual - predicted) / actual).abs();
        scores.push(1.0 - ape.min(1.0));
    }

    let average_accuracy = if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    };

    let accuracy_score = if average_accuracy >= 0.8 {
        AccuracyScore::Excellent
    } else if average_accuracy >= 0.6 {
        AccuracyScore::Good
    } else {
        AccuracyScore::NeedsImprovement
    };

    AccuracyMetrics {
        average_accuracy,
        total_predictions: historical.len(),
        evaluated_predictions: scores.len(),
        accuracy_score,
    }
}

/// Build the full report: batch summary, historical accuracy, and the five
/// most and least confident predictions.
pub fn generate_performance_report(
    predictions: &[RestockPrediction],
    historical: &[PredictionRecord],
    actual_sales: &HashMap<ProductId, f64>,
    now: DateTime<Utc>,
) -> PerformanceReport {
    let summary = summarize_predictions(predictions, now);
    let accuracy = calculate_prediction_accuracy(historical, actual_sales);

    let mut by_confidence: Vec<&RestockPrediction> = predictions.iter().collect();
    by_confidence.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let top_performers = by_confidence
        .iter()
        .take(5)
        .map(|p| ProductPerformance {
            product_id: p.product_id,
            product_name: p.product_name.clone(),
            confidence: p.confidence,
            turnover_ratio: p.inventory_health.turnover_ratio,
        })
        .collect();

    let needs_attention = by_confidence
        .iter()
        .rev()
        .take(5)
        .map(|p| AttentionItem {
            product_id: p.product_id,
            product_name: p.product_name.clone(),
            confidence: p.confidence,
            warnings: p.warnings.clone(),
        })
        .collect();

    PerformanceReport {
        summary,
        accuracy,
        top_performers,
        needs_attention,
        generated_at: now,
    }
}
