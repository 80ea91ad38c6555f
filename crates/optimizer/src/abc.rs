//! ABC revenue classification.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use scentstock_core::ProductId;

/// Revenue tier: A carries the top 80% of cumulative revenue, B the next 15%,
/// C the tail.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AbcClass {
    A,
    B,
    C,
}

/// Classification for one product.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbcClassification {
    pub class: AbcClass,
    pub annual_revenue: f64,
    /// Cumulative revenue share at this product's rank, in percent.
    pub cumulative_share: f64,
    /// 1-based rank in descending revenue order.
    pub rank: usize,
}

/// Classify products by their share of cumulative revenue.
///
/// Products are sorted by descending revenue (stable, so ties keep input
/// order), then walked accumulating revenue share: A while the cumulative
/// share is <= 80%, B while <= 95%, C after. The top-ranked product is always
/// class A, even when it alone carries more than 80% of revenue. With zero
/// total revenue every product lands in class A at 0% share.
pub fn abc_classification(
    products: &[(ProductId, f64)],
) -> HashMap<ProductId, AbcClassification> {
    let mut sorted: Vec<(ProductId, f64)> = products.to_vec();
    sorted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let total: f64 = sorted.iter().map(|(_, revenue)| revenue).sum();

    let mut classifications = HashMap::with_capacity(sorted.len());
    let mut cumulative = 0.0;

    for (rank, (product_id, revenue)) in sorted.into_iter().enumerate() {
        cumulative += revenue;
        let cumulative_share = if total > 0.0 {
            cumulative / total * 100.0
        } else {
            0.0
        };

        let class = if rank == 0 || cumulative_share <= 80.0 {
            AbcClass::A
        } else if cumulative_share <= 95.0 {
            AbcClass::B
        } else {
            AbcClass::C
        };

        classifications.insert(
            product_id,
            AbcClassification {
                class,
                annual_revenue: revenue,
                cumulative_share,
                rank: rank + 1,
            },
        );
    }

    classifications
}
