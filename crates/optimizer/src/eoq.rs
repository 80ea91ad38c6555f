//! Economic order quantity and quantity-discount order sizing.

use serde::{Deserialize, Serialize};

use scentstock_core::PriceBreak;

/// Order size chosen from a supplier's discount tiers.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalOrder {
    pub quantity: u32,
    /// Total annual cost at that quantity: purchase + ordering + holding.
    pub total_annual_cost: f64,
    pub unit_price: f64,
}

/// Economic order quantity: `sqrt(2 x D x S / H)`, rounded up, minimum 1.
///
/// A zero holding cost makes the formula undefined; that case returns 0, read
/// downstream as "no EOQ signal".
pub fn calculate_eoq(annual_demand: f64, ordering_cost: f64, holding_cost_per_unit: f64) -> u32 {
    if holding_cost_per_unit <= 0.0 {
        return 0;
    }

    let eoq = (2.0 * annual_demand * ordering_cost / holding_cost_per_unit).sqrt();
    if !eoq.is_finite() {
        return 0;
    }
    (eoq.ceil() as u32).max(1)
}

/// Pick the discount tier minimizing total annual cost.
///
/// For each tier (ascending by minimum quantity) the holding cost is derived
/// from that tier's unit price, the EOQ recomputed, and the order quantity is
/// the larger of the EOQ and the tier minimum. Tiers whose minimum quantity
/// exceeds `storage_capacity` are skipped: clamping afterwards would forfeit
/// the discount the tier was chosen for. Returns `None` when no tier is
/// viable.
pub fn optimal_order_quantity(
    annual_demand: f64,
    ordering_cost: f64,
    holding_cost_rate: f64,
    price_breaks: &[PriceBreak],
    storage_capacity: Option<u32>,
) -> Option<OptimalOrder> {
    let mut tiers: Vec<PriceBreak> = price_breaks
        .iter()
        .copied()
        .filter(|brk| storage_capacity.is_none_or(|cap| brk.min_quantity <= cap))
        .collect();
    tiers.sort_by_key(|brk| brk.min_quantity);

    let mut best: Option<OptimalOrder> = None;

    for tier in tiers {
        let holding_cost = tier.unit_price * holding_cost_rate;
        let eoq = calculate_eoq(annual_demand, ordering_cost, holding_cost);
        let quantity = eoq.max(tier.min_quantity).max(1);

        let purchase = annual_demand * tier.unit_price;
        let ordering = annual_demand / quantity as f64 * ordering_cost;
        let holding = quantity as f64 / 2.0 * holding_cost;
        let total_annual_cost = purchase + ordering + holding;

        let better = best.is_none_or(|b| total_annual_cost < b.total_annual_cost);
        if better {
            best = Some(OptimalOrder {
                quantity,
                total_annual_cost,
                unit_price: tier.unit_price,
            });
        }
    }

    best
}
