//! Replenishment strategy selection.

use serde::{Deserialize, Serialize};

use crate::abc::AbcClass;

/// Review policy family.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReplenishmentPolicy {
    ContinuousReview,
    PeriodicReview,
    MinMax,
}

/// A chosen policy with its review cadence and a human-readable rationale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplenishmentStrategy {
    pub policy: ReplenishmentPolicy,
    pub review_period_days: u32,
    pub reasoning: String,
}

/// CV above which B-class demand counts as volatile.
const VOLATILE_CV_THRESHOLD: f64 = 0.5;

/// Pick a replenishment policy from revenue class, demand variability, and
/// lead time.
///
/// A-class items get continuous daily review; B-class items get continuous
/// weekly review when demand is volatile, periodic bi-weekly otherwise;
/// C-class items use a monthly min-max scheme.
pub fn recommend_replenishment_strategy(
    abc_class: AbcClass,
    demand_variability: f64,
    _lead_time_days: f64,
) -> ReplenishmentStrategy {
    match abc_class {
        AbcClass::A => ReplenishmentStrategy {
            policy: ReplenishmentPolicy::ContinuousReview,
            review_period_days: 1,
            reasoning: "High-value item requires continuous monitoring to minimize stockouts \
                        and excess inventory"
                .to_string(),
        },
        AbcClass::B => {
            if demand_variability > VOLATILE_CV_THRESHOLD {
                ReplenishmentStrategy {
                    policy: ReplenishmentPolicy::ContinuousReview,
                    review_period_days: 7,
                    reasoning: "Moderate value with high variability needs regular review"
                        .to_string(),
                }
            } else {
                ReplenishmentStrategy {
                    policy: ReplenishmentPolicy::PeriodicReview,
                    review_period_days: 14,
                    reasoning: "Moderate value with stable demand can use periodic review"
                        .to_string(),
                }
            }
        }
        AbcClass::C => ReplenishmentStrategy {
            policy: ReplenishmentPolicy::MinMax,
            review_period_days: 30,
            reasoning: "Low-value item can use simple min-max system with infrequent review"
                .to_string(),
        },
    }
}
