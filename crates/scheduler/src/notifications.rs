//! Notification triggers derived from prediction batches.
//!
//! These are pure functions of the prediction list; delivery (email, push,
//! webhook) is the embedding service's concern.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};

use scentstock_core::ProductId;
use scentstock_predictor::{RestockPrediction, Urgency};

use crate::report::summarize_predictions;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Critical,
    Reorder,
    Summary,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    High,
    Medium,
    Low,
}

/// One notification to hand to the delivery layer.
///
/// `payload` carries free-form structured context for the consumer (current
/// stock, recommended quantity, or a full summary) without committing this
/// crate to a delivery schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationTrigger {
    pub kind: NotificationKind,
    pub product_id: Option<ProductId>,
    pub message: String,
    pub priority: NotificationPriority,
    pub payload: JsonValue,
}

/// Derive notifications for a whole batch: one per critical product, one per
/// product that needs reordering but is not critical, and (when enabled) a
/// single low-priority daily summary.
pub fn notifications_for_batch(
    predictions: &[RestockPrediction],
    include_summary: bool,
    now: DateTime<Utc>,
) -> Vec<NotificationTrigger> {
    let mut notifications = Vec::new();

    for prediction in predictions.iter().filter(|p| p.urgency == Urgency::Critical) {
        notifications.push(NotificationTrigger {
            kind: NotificationKind::Critical,
            product_id: Some(prediction.product_id),
            message: format!(
                "URGENT: {} is at critical stock level ({} units, {:.1} days)",
                prediction.product_name, prediction.current_stock, prediction.days_of_supply
            ),
            priority: NotificationPriority::High,
            payload: json!({
                "currentStock": prediction.current_stock,
                "reorderPoint": prediction.reorder_point,
                "recommendedQuantity": prediction.recommended_order_quantity,
            }),
        });
    }

    for prediction in predictions
        .iter()
        .filter(|p| p.should_reorder && p.urgency != Urgency::Critical)
    {
        notifications.push(NotificationTrigger {
            kind: NotificationKind::Reorder,
            product_id: Some(prediction.product_id),
            message: format!(
                "{} needs restocking. Order {} units.",
                prediction.product_name, prediction.recommended_order_quantity
            ),
            priority: if prediction.urgency == Urgency::High {
                NotificationPriority::High
            } else {
                NotificationPriority::Medium
            },
            payload: json!({
                "currentStock": prediction.current_stock,
                "recommendedQuantity": prediction.recommended_order_quantity,
                "estimatedCost": prediction.estimated_order_cost,
            }),
        });
    }

    if include_summary {
        let summary = summarize_predictions(predictions, now);
        notifications.push(NotificationTrigger {
            kind: NotificationKind::Summary,
            product_id: None,
            message: format!(
                "Daily Inventory Summary: {} products analyzed, {} need restocking, {} critical",
                summary.total_products, summary.needs_reorder, summary.critical
            ),
            priority: NotificationPriority::Low,
            payload: serde_json::to_value(&summary).unwrap_or(JsonValue::Null),
        });
    }

    notifications
}

/// Derive notifications for a single refreshed product: at most one, critical
/// taking precedence over reorder. The full prediction rides in the payload.
pub fn notifications_for_product(prediction: &RestockPrediction) -> Vec<NotificationTrigger> {
    let payload = serde_json::to_value(prediction).unwrap_or(JsonValue::Null);

    if prediction.urgency == Urgency::Critical {
        vec![NotificationTrigger {
            kind: NotificationKind::Critical,
            product_id: Some(prediction.product_id),
            message: format!(
                "URGENT: {} is at critical stock level",
                prediction.product_name
            ),
            priority: NotificationPriority::High,
            payload,
        }]
    } else if prediction.should_reorder {
        vec![NotificationTrigger {
            kind: NotificationKind::Reorder,
            product_id: Some(prediction.product_id),
            message: format!("{} needs restocking", prediction.product_name),
            priority: if prediction.urgency == Urgency::High {
                NotificationPriority::High
            } else {
                NotificationPriority::Medium
            },
            payload,
        }]
    } else {
        Vec::new()
    }
}
