//! Catalog-wide batch prediction.

use std::collections::HashMap;
use std::thread;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use scentstock_core::{
    EngineError, EngineResult, PredictorConfig, ProductId, ProductSnapshot, SalesHistory,
    SupplierCostModel,
};
use scentstock_optimizer::{AbcClass, abc_classification};

use crate::predict::predict_restock;
use crate::prediction::RestockPrediction;

/// A product whose prediction could not be produced.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchFailure {
    pub product_id: ProductId,
    pub error: EngineError,
}

/// Result of one batch run: predictions in catalog input order, plus the
/// products that failed (isolated, never aborting the batch).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchOutcome {
    pub predictions: Vec<RestockPrediction>,
    pub failures: Vec<BatchFailure>,
}

/// Predict restocks for a whole catalog.
///
/// ABC classification runs first as a single sequential pass (every product
/// needs its class before prediction), with revenue taken as total historical
/// units times selling price. Per-product predictions then fan out across
/// `config.max_concurrent` worker threads; each reads only its own inputs and
/// writes only its own output, and results are reassembled in input order.
pub fn predict_restock_batch(
    products: &[ProductSnapshot],
    histories: &HashMap<ProductId, SalesHistory>,
    supplier_costs: Option<&HashMap<ProductId, SupplierCostModel>>,
    config: &PredictorConfig,
    now: DateTime<Utc>,
) -> BatchOutcome {
    if products.is_empty() {
        return BatchOutcome::default();
    }

    let revenue: Vec<(ProductId, f64)> = products
        .iter()
        .map(|p| {
            let total_units = histories
                .get(&p.id)
                .map(|h| h.total_quantity())
                .unwrap_or(0.0);
            (p.id, total_units * p.selling_price)
        })
        .collect();
    let abc_classes = abc_classification(&revenue);

    let worker_count = config.max_concurrent.max(1).min(products.len());
    let chunk_size = products.len().div_ceil(worker_count);
    debug!(
        products = products.len(),
        workers = worker_count,
        "starting batch prediction fan-out"
    );

    let mut indexed: Vec<(usize, EngineResult<RestockPrediction>)> =
        Vec::with_capacity(products.len());

    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(worker_count);

        for (chunk_no, chunk) in products.chunks(chunk_size).enumerate() {
            let offset = chunk_no * chunk_size;
            let abc_classes = &abc_classes;
            let handle = scope.spawn(move || {
                chunk
                    .iter()
                    .enumerate()
                    .map(|(i, product)| {
                        let history = histories.get(&product.id);
                        let owned_empty;
                        let history = match history {
                            Some(h) => h,
                            None => {
                                owned_empty = SalesHistory::empty(product.id);
                                &owned_empty
                            }
                        };
                        let costs = supplier_costs.and_then(|m| m.get(&product.id));
                        let abc = abc_classes.get(&product.id);
                        (
                            offset + i,
                            predict_restock(product, history, costs, abc, config, now),
                        )
                    })
                    .collect::<Vec<_>>()
            });
            handles.push((offset, chunk.len(), handle));
        }

        for (offset, len, handle) in handles {
            match handle.join() {
                Ok(results) => indexed.extend(results),
                // A panicking worker loses only its own chunk.
                Err(_) => indexed.extend((offset..offset + len).map(|i| {
                    (
                        i,
                        Err(EngineError::invalid_input("prediction worker panicked")),
                    )
                })),
            }
        }
    });

    indexed.sort_by_key(|(i, _)| *i);

    let mut outcome = BatchOutcome::default();
    for (i, result) in indexed {
        match result {
            Ok(prediction) => outcome.predictions.push(prediction),
            Err(error) => {
                warn!(product_id = %products[i].id, %error, "prediction failed");
                outcome.failures.push(BatchFailure {
                    product_id: products[i].id,
                    error,
                });
            }
        }
    }
    outcome
}

/// Order reorder-worthy predictions for action.
///
/// Filters to `should_reorder`, then sorts by urgency (critical first), ABC
/// class (A first, unclassified counts as C), and descending confidence.
/// The order is a deterministic function of the predictions regardless of how
/// the batch was parallelized.
pub fn prioritize_restocks(predictions: &[RestockPrediction]) -> Vec<RestockPrediction> {
    let mut due: Vec<RestockPrediction> = predictions
        .iter()
        .filter(|p| p.should_reorder)
        .cloned()
        .collect();

    due.sort_by(|a, b| {
        a.urgency
            .cmp(&b.urgency)
            .then_with(|| {
                a.abc_class
                    .unwrap_or(AbcClass::C)
                    .cmp(&b.abc_class.unwrap_or(AbcClass::C))
            })
            .then_with(|| {
                b.confidence
                    .partial_cmp(&a.confidence)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });
    due
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use scentstock_core::TimeSeriesPoint;
    use scentstock_forecast::TrendDirection;
    use scentstock_optimizer::{
        HealthStatus, InventoryHealth, ReplenishmentPolicy, ReplenishmentStrategy,
    };

    use crate::prediction::{DataQuality, PredictedDemand, Urgency};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn product(name: &str, stock: u32, price: f64) -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId::new(),
            name: name.to_string(),
            current_stock: stock,
            unit_cost: price * 0.4,
            selling_price: price,
            lead_time_days: 5.0,
            lead_time_std_dev: None,
            storage_capacity: None,
            minimum_order_quantity: None,
        }
    }

    fn steady_history(id: ProductId, per_day: f64, days: i64) -> SalesHistory {
        let sales = (0..days)
            .rev()
            .map(|d| TimeSeriesPoint::new(now() - Duration::days(d), per_day))
            .collect();
        SalesHistory::new(id, sales)
    }

    #[test]
    fn batch_preserves_input_order() {
        let products = vec![
            product("Vetiver", 100, 40.0),
            product("Santal", 50, 90.0),
            product("Iris", 10, 30.0),
        ];
        let histories: HashMap<_, _> = products
            .iter()
            .map(|p| (p.id, steady_history(p.id, 2.0, 30)))
            .collect();

        let outcome = predict_restock_batch(
            &products,
            &histories,
            None,
            &PredictorConfig::default(),
            now(),
        );

        assert!(outcome.failures.is_empty());
        let names: Vec<_> = outcome
            .predictions
            .iter()
            .map(|p| p.product_name.as_str())
            .collect();
        assert_eq!(names, vec!["Vetiver", "Santal", "Iris"]);
    }

    #[test]
    fn missing_history_falls_back_to_zero_data_path() {
        let products = vec![product("Neroli", 5, 55.0)];
        let outcome = predict_restock_batch(
            &products,
            &HashMap::new(),
            None,
            &PredictorConfig::default(),
            now(),
        );
        assert_eq!(outcome.predictions.len(), 1);
        assert_eq!(outcome.predictions[0].data_quality, DataQuality::Poor);
        assert_eq!(outcome.predictions[0].confidence, 0.0);
    }

    #[test]
    fn one_bad_product_does_not_abort_the_batch() {
        let mut bad = product("Broken", 5, 50.0);
        bad.lead_time_days = 0.0;
        let good = product("Fine", 20, 50.0);
        let products = vec![bad.clone(), good.clone()];
        let histories: HashMap<_, _> = products
            .iter()
            .map(|p| (p.id, steady_history(p.id, 1.0, 20)))
            .collect();

        let outcome = predict_restock_batch(
            &products,
            &histories,
            None,
            &PredictorConfig::default(),
            now(),
        );

        assert_eq!(outcome.predictions.len(), 1);
        assert_eq!(outcome.predictions[0].product_name, "Fine");
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].product_id, bad.id);
    }

    #[test]
    fn abc_classes_are_assigned_across_the_catalog() {
        // One product dwarfs the others in revenue.
        let products = vec![
            product("Flagship", 100, 500.0),
            product("Mid", 100, 10.0),
            product("Tail", 100, 1.0),
        ];
        let histories: HashMap<_, _> = products
            .iter()
            .map(|p| (p.id, steady_history(p.id, 3.0, 60)))
            .collect();

        let outcome = predict_restock_batch(
            &products,
            &histories,
            None,
            &PredictorConfig::default(),
            now(),
        );

        assert_eq!(outcome.predictions[0].abc_class, Some(AbcClass::A));
        assert_eq!(outcome.predictions[2].abc_class, Some(AbcClass::C));
    }

    #[test]
    fn single_worker_matches_many_workers() {
        let products: Vec<_> = (0..9)
            .map(|i| product(&format!("P{i}"), 10 + i, 20.0 + i as f64))
            .collect();
        let histories: HashMap<_, _> = products
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id, steady_history(p.id, 1.0 + i as f64, 40)))
            .collect();

        let serial = predict_restock_batch(
            &products,
            &histories,
            None,
            &PredictorConfig::default().with_max_concurrent(1),
            now(),
        );
        let parallel = predict_restock_batch(
            &products,
            &histories,
            None,
            &PredictorConfig::default().with_max_concurrent(4),
            now(),
        );
        assert_eq!(serial, parallel);
    }

    fn bare_prediction(urgency: Urgency, abc: Option<AbcClass>, confidence: f64) -> RestockPrediction {
        RestockPrediction {
            product_id: ProductId::new(),
            product_name: "test".to_string(),
            current_stock: 1,
            days_of_supply: 3.0,
            should_reorder: true,
            recommended_order_quantity: 10,
            reorder_point: 5,
            safety_stock: 2,
            urgency,
            predicted_demand: PredictedDemand::zero(),
            trend: TrendDirection::Stable,
            seasonality_factor: 1.0,
            confidence,
            data_quality: DataQuality::Fair,
            economic_order_quantity: 10,
            estimated_order_cost: 100.0,
            estimated_value: 50.0,
            abc_class: abc,
            inventory_health: InventoryHealth {
                turnover_ratio: 4.0,
                days_of_supply: 3.0,
                dead_stock_risk: 0.0,
                understock_risk: 0.0,
                status: HealthStatus::Healthy,
            },
            replenishment_strategy: ReplenishmentStrategy {
                policy: ReplenishmentPolicy::MinMax,
                review_period_days: 30,
                reasoning: String::new(),
            },
            estimated_stockout_date: None,
            recommended_order_date: None,
            expected_delivery_date: None,
            warnings: Vec::new(),
            insights: Vec::new(),
        }
    }

    #[test]
    fn prioritize_sorts_by_urgency_class_then_confidence() {
        let mut low = bare_prediction(Urgency::Low, Some(AbcClass::A), 0.9);
        low.should_reorder = true;
        let critical_c = bare_prediction(Urgency::Critical, Some(AbcClass::C), 0.2);
        let critical_a = bare_prediction(Urgency::Critical, Some(AbcClass::A), 0.2);
        let high_confident = bare_prediction(Urgency::High, Some(AbcClass::B), 0.9);
        let high_uncertain = bare_prediction(Urgency::High, Some(AbcClass::B), 0.3);
        let mut skipped = bare_prediction(Urgency::Critical, Some(AbcClass::A), 1.0);
        skipped.should_reorder = false;

        let ordered = prioritize_restocks(&[
            low.clone(),
            high_uncertain.clone(),
            critical_c.clone(),
            skipped,
            high_confident.clone(),
            critical_a.clone(),
        ]);

        let ids: Vec<_> = ordered.iter().map(|p| p.product_id).collect();
        assert_eq!(
            ids,
            vec![
                critical_a.product_id,
                critical_c.product_id,
                high_confident.product_id,
                high_uncertain.product_id,
                low.product_id
            ]
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_urgency() -> impl Strategy<Value = Urgency> {
            prop_oneof![
                Just(Urgency::Critical),
                Just(Urgency::High),
                Just(Urgency::Medium),
                Just(Urgency::Low),
            ]
        }

        fn arb_abc() -> impl Strategy<Value = Option<AbcClass>> {
            prop_oneof![
                Just(None),
                Just(Some(AbcClass::A)),
                Just(Some(AbcClass::B)),
                Just(Some(AbcClass::C)),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: for any two adjacent prioritized entries, urgency is
            /// non-decreasing, then ABC class, then confidence descending.
            #[test]
            fn prioritized_order_is_a_total_order(
                entries in prop::collection::vec(
                    (arb_urgency(), arb_abc(), 0.0f64..1.0, any::<bool>()),
                    0..30
                )
            ) {
                let predictions: Vec<RestockPrediction> = entries
                    .iter()
                    .map(|&(urgency, abc, confidence, reorder)| {
                        let mut p = bare_prediction(urgency, abc, confidence);
                        p.should_reorder = reorder;
                        p
                    })
                    .collect();

                let ranked = prioritize_restocks(&predictions);
                prop_assert!(ranked.iter().all(|p| p.should_reorder));
                prop_assert_eq!(
                    ranked.len(),
                    predictions.iter().filter(|p| p.should_reorder).count()
                );

                for pair in ranked.windows(2) {
                    let (a, b) = (&pair[0], &pair[1]);
                    prop_assert!(a.urgency <= b.urgency);
                    if a.urgency == b.urgency {
                        let class_a = a.abc_class.unwrap_or(AbcClass::C);
                        let class_b = b.abc_class.unwrap_or(AbcClass::C);
                        prop_assert!(class_a <= class_b);
                        if class_a == class_b {
                            prop_assert!(a.confidence >= b.confidence);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn unclassified_products_sort_as_class_c() {
        let classified = bare_prediction(Urgency::Medium, Some(AbcClass::B), 0.5);
        let unclassified = bare_prediction(Urgency::Medium, None, 0.9);
        let ordered = prioritize_restocks(&[unclassified.clone(), classified.clone()]);
        assert_eq!(ordered[0].product_id, classified.product_id);
        assert_eq!(ordered[1].product_id, unclassified.product_id);
    }
}
