//! Single-product restock prediction.

use chrono::{DateTime, Duration, Utc};

use scentstock_core::{
    EngineError, EngineResult, PredictorConfig, ProductSnapshot, SalesHistory, SupplierCostModel,
};
use scentstock_forecast::{
    DEFAULT_MAX_PERIOD, TrendDirection, calculate_velocity, demand_variance, detect_seasonality,
    hybrid_forecast,
};
use scentstock_optimizer::{
    AbcClass, AbcClassification, HealthStatus, InventoryHealth, InventoryMetrics,
    ReplenishmentPolicy, ReplenishmentStrategy, assess_inventory_health, calculate_eoq,
    calculate_reorder_point, calculate_safety_stock, optimal_order_quantity,
    recommend_replenishment_strategy, z_score_for_service_level,
};

use crate::prediction::{DataQuality, PredictedDemand, RestockPrediction, Urgency};

/// Forecast horizon (days) fed into the hybrid forecast.
const FORECAST_PERIODS: usize = 7;

/// Histories shorter than this get a limited-history warning.
const SPARSE_HISTORY_POINTS: usize = 7;

/// Generate a restock prediction for one product.
///
/// Structural contract violations (bad product fields, unsorted history,
/// mismatched ids) fail fast; every numeric edge case inside the math
/// degrades gracefully instead. An empty history takes a conservative
/// zero-data path that never touches the forecasting math.
pub fn predict_restock(
    product: &ProductSnapshot,
    history: &SalesHistory,
    supplier_costs: Option<&SupplierCostModel>,
    abc: Option<&AbcClassification>,
    config: &PredictorConfig,
    now: DateTime<Utc>,
) -> EngineResult<RestockPrediction> {
    product.validate()?;
    history.validate()?;
    if let Some(costs) = supplier_costs {
        costs.validate()?;
    }
    if history.product_id != product.id {
        return Err(EngineError::invalid_input(format!(
            "sales history belongs to {} but product is {}",
            history.product_id, product.id
        )));
    }

    let mut warnings = Vec::new();
    let mut insights = Vec::new();

    if history.len() < SPARSE_HISTORY_POINTS {
        warnings.push("Limited sales history - predictions may be less accurate".to_string());
    }

    if history.is_empty() {
        return Ok(zero_data_prediction(product, config, warnings, now));
    }

    let quantities = history.quantities();
    let velocity = calculate_velocity(&history.sales);
    let demand_stats = demand_variance(&quantities);
    let forecast = hybrid_forecast(&quantities, FORECAST_PERIODS);

    let seasonal_period = detect_seasonality(&quantities, DEFAULT_MAX_PERIOD);
    if seasonal_period > 0 {
        insights.push(format!(
            "Detected {seasonal_period}-period seasonality pattern"
        ));
    }

    // Reorder point and safety stock.
    let metrics = InventoryMetrics {
        average_daily_demand: velocity.daily,
        demand_std_dev: demand_stats.std_dev,
        lead_time_days: product.lead_time_days,
        service_level: config.service_level,
    };
    let z_score = z_score_for_service_level(config.service_level);
    let rop_calc = calculate_reorder_point(&metrics, z_score);

    // A known-variable lead time widens the buffer via the combined-variance
    // formula; the reorder point shifts with it.
    let (reorder_point, safety_stock) = match product.lead_time_std_dev {
        Some(lead_sd) if lead_sd > 0.0 => {
            let safety = calculate_safety_stock(
                velocity.daily,
                demand_stats.std_dev,
                product.lead_time_days,
                lead_sd,
                config.service_level,
            );
            (rop_calc.demand_during_lead_time + safety, safety)
        }
        _ => (rop_calc.rop, rop_calc.safety_stock),
    };

    // Order sizing: EOQ, then quantity discounts, then hard constraints.
    let ordering_cost = supplier_costs
        .map(|c| c.ordering_cost)
        .unwrap_or(config.default_ordering_cost);
    let holding_rate = supplier_costs
        .map(|c| c.holding_cost_rate)
        .unwrap_or(config.default_holding_cost_rate);
    let holding_cost = product.unit_cost * holding_rate;
    let annual_demand = velocity.daily * 365.0;

    let eoq = calculate_eoq(annual_demand, ordering_cost, holding_cost);
    let mut order_quantity = eoq;
    let mut order_cost = product.unit_cost * eoq as f64;

    if let Some(costs) = supplier_costs {
        if !costs.price_breaks.is_empty() {
            if let Some(optimal) = optimal_order_quantity(
                annual_demand,
                ordering_cost,
                holding_rate,
                &costs.price_breaks,
                product.storage_capacity,
            ) {
                order_quantity = optimal.quantity;
                order_cost = optimal.total_annual_cost;

                if optimal.unit_price < product.unit_cost {
                    let savings =
                        (product.unit_cost - optimal.unit_price) * optimal.quantity as f64;
                    insights.push(format!(
                        "Bulk discount available: {:.2} per unit (save {savings:.2})",
                        optimal.unit_price
                    ));
                }
            }
        }
    }

    if let Some(moq) = product.minimum_order_quantity {
        order_quantity = order_quantity.max(moq);
    }
    if let Some(capacity) = product.storage_capacity {
        if order_quantity > capacity {
            order_quantity = capacity;
            warnings.push("Order quantity limited by storage capacity".to_string());
        }
    }

    let days_of_supply = if velocity.daily > 0.0 {
        product.current_stock as f64 / velocity.daily
    } else {
        f64::INFINITY
    };

    let inventory_health = assess_inventory_health(
        product.current_stock,
        reorder_point,
        &history.sales,
        product.unit_cost,
        config.dead_stock_threshold_days,
        now,
    );

    let should_reorder = product.current_stock <= reorder_point;

    let urgency = if product.current_stock <= safety_stock {
        warnings.push("Stock below safety level - immediate action required".to_string());
        Urgency::Critical
    } else if (product.current_stock as f64) <= reorder_point as f64 * 0.5 {
        warnings.push("Stock approaching critical levels".to_string());
        Urgency::High
    } else if should_reorder {
        Urgency::Medium
    } else {
        Urgency::Low
    };

    // Timing. With zero demand nothing runs out and nothing is due, so the
    // dates stay empty rather than extrapolating from a zero rate.
    let estimated_stockout_date = (velocity.daily > 0.0)
        .then(|| add_days(now, product.current_stock as f64 / velocity.daily));

    let recommended_order_date = if should_reorder {
        Some(now)
    } else if velocity.daily > 0.0 {
        let days_until_reorder = (days_of_supply
            - product.lead_time_days
            - safety_stock as f64 / velocity.daily)
            .max(0.0);
        Some(add_days(now, days_until_reorder))
    } else {
        None
    };
    let expected_delivery_date =
        recommended_order_date.map(|d| add_days(d, product.lead_time_days));

    let data_quality = classify_data_quality(
        history.len(),
        demand_stats.coefficient_of_variation,
    );

    let abc_class = abc.map(|c| c.class);
    let replenishment_strategy = recommend_replenishment_strategy(
        abc_class.unwrap_or(AbcClass::C),
        demand_stats.coefficient_of_variation,
        product.lead_time_days,
    );

    match forecast.trend {
        TrendDirection::Increasing => {
            insights
                .push("Demand is trending upward - consider increasing safety stock".to_string());
        }
        TrendDirection::Decreasing => {
            insights.push("Demand is trending downward - monitor for overstocking".to_string());
        }
        TrendDirection::Stable => {}
    }

    if inventory_health.dead_stock_risk > 0.5 {
        warnings.push("High dead stock risk - consider reducing order quantities".to_string());
    }

    if inventory_health.turnover_ratio < 2.0 {
        insights.push(format!(
            "Low turnover ratio ({:.2}) - inventory moving slowly",
            inventory_health.turnover_ratio
        ));
    } else if inventory_health.turnover_ratio > 12.0 {
        insights.push(format!(
            "High turnover ratio ({:.2}) - fast-moving item",
            inventory_health.turnover_ratio
        ));
    }

    Ok(RestockPrediction {
        product_id: product.id,
        product_name: product.name.clone(),
        current_stock: product.current_stock,
        days_of_supply,
        should_reorder,
        recommended_order_quantity: order_quantity,
        reorder_point,
        safety_stock,
        urgency,
        predicted_demand: PredictedDemand {
            daily: velocity.daily,
            weekly: velocity.weekly,
            monthly: velocity.monthly,
        },
        trend: forecast.trend,
        seasonality_factor: forecast.seasonality_factor,
        confidence: forecast.confidence * rop_calc.confidence,
        data_quality,
        economic_order_quantity: eoq,
        estimated_order_cost: order_cost,
        estimated_value: product.current_stock as f64 * product.selling_price,
        abc_class,
        inventory_health,
        replenishment_strategy,
        estimated_stockout_date,
        recommended_order_date,
        expected_delivery_date,
        warnings,
        insights,
    })
}

/// Conservative prediction for a product with no sales history at all.
///
/// No forecasting or optimizer math runs on empty input: the recommendation
/// is the minimum order quantity (or the configured fallback), with zero
/// confidence and a nudge to collect data.
fn zero_data_prediction(
    product: &ProductSnapshot,
    config: &PredictorConfig,
    mut warnings: Vec<String>,
    now: DateTime<Utc>,
) -> RestockPrediction {
    warnings.push("No sales history available - using conservative estimates".to_string());

    let quantity = product
        .minimum_order_quantity
        .unwrap_or(config.fallback_order_quantity);
    let safety_stock = quantity.div_ceil(2);

    // Nothing has ever moved, so the stock is dead by definition.
    let dead_stock_risk = 1.0;
    let understock_risk = 0.0;
    let inventory_health = InventoryHealth {
        turnover_ratio: 0.0,
        days_of_supply: f64::INFINITY,
        dead_stock_risk,
        understock_risk,
        status: HealthStatus::from_risks(dead_stock_risk, understock_risk),
    };

    RestockPrediction {
        product_id: product.id,
        product_name: product.name.clone(),
        current_stock: product.current_stock,
        days_of_supply: f64::INFINITY,
        should_reorder: false,
        recommended_order_quantity: quantity,
        reorder_point: quantity,
        safety_stock,
        urgency: Urgency::Low,
        predicted_demand: PredictedDemand::zero(),
        trend: TrendDirection::Stable,
        seasonality_factor: 1.0,
        confidence: 0.0,
        data_quality: DataQuality::Poor,
        economic_order_quantity: quantity,
        estimated_order_cost: product.unit_cost * quantity as f64,
        estimated_value: product.current_stock as f64 * product.selling_price,
        abc_class: None,
        inventory_health,
        replenishment_strategy: ReplenishmentStrategy {
            policy: ReplenishmentPolicy::MinMax,
            review_period_days: 30,
            reasoning: "No data available - using simple min-max approach".to_string(),
        },
        estimated_stockout_date: None,
        recommended_order_date: Some(now),
        expected_delivery_date: Some(add_days(now, product.lead_time_days)),
        warnings,
        insights: vec!["Collect more sales data to improve predictions".to_string()],
    }
}

fn classify_data_quality(points: usize, coefficient_of_variation: f64) -> DataQuality {
    if points >= 90 && coefficient_of_variation < 0.3 {
        DataQuality::Excellent
    } else if points >= 30 && coefficient_of_variation < 0.5 {
        DataQuality::Good
    } else if points >= 14 {
        DataQuality::Fair
    } else {
        DataQuality::Poor
    }
}

fn add_days(from: DateTime<Utc>, days: f64) -> DateTime<Utc> {
    from + Duration::seconds((days * 86_400.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use scentstock_core::{PriceBreak, ProductId, TimeSeriesPoint};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn product(id: ProductId, stock: u32) -> ProductSnapshot {
        ProductSnapshot {
            id,
            name: "Oud Royale 100ml".to_string(),
            current_stock: stock,
            unit_cost: 20.0,
            selling_price: 65.0,
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
    fn empty_history_takes_the_conservative_path() {
        let id = ProductId::new();
        let prediction = predict_restock(
            &product(id, 3),
            &SalesHistory::empty(id),
            None,
            None,
            &PredictorConfig::default(),
            now(),
        )
        .unwrap();

        assert!(!prediction.should_reorder);
        assert_eq!(prediction.recommended_order_quantity, 10);
        assert_eq!(prediction.safety_stock, 5);
        assert_eq!(prediction.confidence, 0.0);
        assert_eq!(prediction.data_quality, DataQuality::Poor);
        assert_eq!(prediction.urgency, Urgency::Low);
        assert!(prediction.days_of_supply.is_infinite());
        assert!(
            prediction
                .warnings
                .iter()
                .any(|w| w.contains("No sales history"))
        );
        assert_eq!(
            prediction.insights,
            vec!["Collect more sales data to improve predictions".to_string()]
        );
    }

    #[test]
    fn zero_data_prediction_honors_minimum_order_quantity() {
        let id = ProductId::new();
        let mut p = product(id, 0);
        p.minimum_order_quantity = Some(24);
        let prediction = predict_restock(
            &p,
            &SalesHistory::empty(id),
            None,
            None,
            &PredictorConfig::default(),
            now(),
        )
        .unwrap();
        assert_eq!(prediction.recommended_order_quantity, 24);
        assert_eq!(prediction.safety_stock, 12);
    }

    #[test]
    fn low_stock_against_steady_demand_is_critical() {
        let id = ProductId::new();
        // ~1.2/day over 30 days with bursty spikes, lead time 5: the demand
        // std dev (~2.4) puts the safety stock near 9, above current stock.
        let mut quantities: Vec<f64> = Vec::new();
        for d in 0..30 {
            quantities.push(if d % 5 == 0 { 6.0 } else { 0.0 });
        }
        let sales = quantities
            .iter()
            .enumerate()
            .map(|(d, &q)| TimeSeriesPoint::new(now() - Duration::days(29 - d as i64), q))
            .collect();
        let history = SalesHistory::new(id, sales);

        let prediction = predict_restock(
            &product(id, 5),
            &history,
            None,
            None,
            &PredictorConfig::default(),
            now(),
        )
        .unwrap();

        assert!(prediction.should_reorder);
        assert_eq!(prediction.urgency, Urgency::Critical);
        assert!(prediction.current_stock <= prediction.safety_stock);
        assert_eq!(prediction.recommended_order_date, Some(now()));
    }

    #[test]
    fn ample_stock_is_low_urgency() {
        let id = ProductId::new();
        let history = steady_history(id, 1.0, 60);
        let prediction = predict_restock(
            &product(id, 500),
            &history,
            None,
            None,
            &PredictorConfig::default(),
            now(),
        )
        .unwrap();
        assert!(!prediction.should_reorder);
        assert_eq!(prediction.urgency, Urgency::Low);
        assert!(prediction.recommended_order_date.unwrap() > now());
        assert!(prediction.estimated_stockout_date.is_some());
    }

    #[test]
    fn capacity_clamps_the_order_and_warns() {
        let id = ProductId::new();
        let mut p = product(id, 10);
        p.storage_capacity = Some(15);
        let history = steady_history(id, 8.0, 60);
        let prediction =
            predict_restock(&p, &history, None, None, &PredictorConfig::default(), now())
                .unwrap();
        assert_eq!(prediction.recommended_order_quantity, 15);
        assert!(
            prediction
                .warnings
                .iter()
                .any(|w| w.contains("storage capacity"))
        );
    }

    #[test]
    fn minimum_order_quantity_raises_small_orders() {
        let id = ProductId::new();
        let mut p = product(id, 200);
        p.minimum_order_quantity = Some(5000);
        let history = steady_history(id, 1.0, 60);
        let prediction =
            predict_restock(&p, &history, None, None, &PredictorConfig::default(), now())
                .unwrap();
        assert_eq!(prediction.recommended_order_quantity, 5000);
    }

    #[test]
    fn bulk_discount_adds_an_insight() {
        let id = ProductId::new();
        let history = steady_history(id, 10.0, 90);
        let costs = SupplierCostModel::new(50.0, 0.25).with_price_breaks(vec![
            PriceBreak {
                min_quantity: 1,
                unit_price: 20.0,
            },
            PriceBreak {
                min_quantity: 500,
                unit_price: 15.0,
            },
        ]);
        let prediction = predict_restock(
            &product(id, 100),
            &history,
            Some(&costs),
            None,
            &PredictorConfig::default(),
            now(),
        )
        .unwrap();
        assert!(
            prediction
                .insights
                .iter()
                .any(|i| i.contains("Bulk discount"))
        );
    }

    #[test]
    fn mismatched_history_is_rejected() {
        let id = ProductId::new();
        let other = ProductId::new();
        let err = predict_restock(
            &product(id, 5),
            &SalesHistory::empty(other),
            None,
            None,
            &PredictorConfig::default(),
            now(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn sparse_history_carries_a_warning() {
        let id = ProductId::new();
        let history = steady_history(id, 2.0, 4);
        let prediction = predict_restock(
            &product(id, 50),
            &history,
            None,
            None,
            &PredictorConfig::default(),
            now(),
        )
        .unwrap();
        assert!(
            prediction
                .warnings
                .iter()
                .any(|w| w.contains("Limited sales history"))
        );
        assert_eq!(prediction.data_quality, DataQuality::Poor);
    }

    #[test]
    fn long_stable_history_is_excellent_quality() {
        let id = ProductId::new();
        let history = steady_history(id, 3.0, 100);
        let prediction = predict_restock(
            &product(id, 100),
            &history,
            None,
            None,
            &PredictorConfig::default(),
            now(),
        )
        .unwrap();
        assert_eq!(prediction.data_quality, DataQuality::Excellent);
    }

    #[test]
    fn confidence_is_product_of_forecast_and_rop_confidence() {
        let id = ProductId::new();
        let history = steady_history(id, 3.0, 60);
        let prediction = predict_restock(
            &product(id, 100),
            &history,
            None,
            None,
            &PredictorConfig::default(),
            now(),
        )
        .unwrap();
        assert!((0.0..=1.0).contains(&prediction.confidence));
    }

    #[test]
    fn variable_lead_time_widens_the_buffer() {
        let id = ProductId::new();
        // Alternating demand gives a non-zero std dev.
        let sales = (0..60)
            .rev()
            .map(|d| {
                TimeSeriesPoint::new(
                    now() - Duration::days(d),
                    if d % 2 == 0 { 1.0 } else { 5.0 },
                )
            })
            .collect();
        let history = SalesHistory::new(id, sales);

        let fixed = predict_restock(
            &product(id, 300),
            &history,
            None,
            None,
            &PredictorConfig::default(),
            now(),
        )
        .unwrap();

        let mut varied_product = product(id, 300);
        varied_product.lead_time_std_dev = Some(2.0);
        let varied = predict_restock(
            &varied_product,
            &history,
            None,
            None,
            &PredictorConfig::default(),
            now(),
        )
        .unwrap();

        assert!(varied.safety_stock >= fixed.safety_stock);
        assert!(varied.reorder_point >= fixed.reorder_point);
    }
}
