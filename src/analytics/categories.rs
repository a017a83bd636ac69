use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use tracing::debug;

use crate::{
    model::{ProductOrService, SaleRecord, SalesCategory},
    store::Catalog,
};

use super::Totals;

/// What to do with lines whose product (or its sales category) is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryPolicy {
    /// Leave the line out.
    Strict,
    /// Count the line under the given category.
    Inclusive(SalesCategory),
}

impl Default for CategoryPolicy {
    fn default() -> Self {
        Self::Inclusive(SalesCategory::Grabado)
    }
}

impl CategoryPolicy {
    pub fn resolve(self, product: Option<&ProductOrService>) -> Option<SalesCategory> {
        match (product.and_then(|p| p.sales_category), self) {
            (Some(category), _) => Some(category),
            (None, Self::Inclusive(fallback)) => Some(fallback),
            (None, Self::Strict) => None,
        }
    }
}

/// Revenue per sales category over every line of every sale.
pub fn category_totals<C: Catalog>(
    sales: &[SaleRecord],
    catalog: &C,
    policy: CategoryPolicy,
) -> Totals<SalesCategory> {
    let mut totals = Totals::seeded(&SalesCategory::ALL);
    for sale in sales {
        for item in &sale.items {
            let product = catalog.product(&item.product_id);
            match policy.resolve(product) {
                Some(category) => totals.add(category, item.amount()),
                None => debug!(sale = %sale.id, product = %item.product_id, "line left out of category totals"),
            }
        }
    }
    totals
}

/// Number of sales with at least one line in each category. A sale touching
/// two categories counts once for each.
pub fn category_order_counts<C: Catalog>(
    sales: &[SaleRecord],
    catalog: &C,
    policy: CategoryPolicy,
) -> BTreeMap<SalesCategory, usize> {
    let mut counts: BTreeMap<SalesCategory, usize> =
        SalesCategory::ALL.into_iter().map(|c| (c, 0)).collect();
    for sale in sales {
        let touched: BTreeSet<SalesCategory> = sale
            .items
            .iter()
            .filter_map(|item| policy.resolve(catalog.product(&item.product_id)))
            .collect();
        for category in touched {
            *counts.entry(category).or_default() += 1;
        }
    }
    counts
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryShare {
    pub category: SalesCategory,
    pub amount: Decimal,
    /// Whole percent of the grand total, rounded half away from zero.
    pub percent: u32,
}

/// Non-zero categories with their share of the total.
pub fn category_breakdown(totals: &Totals<SalesCategory>) -> Vec<CategoryShare> {
    let grand_total = totals.grand_total();
    if grand_total.is_zero() {
        return Vec::new();
    }
    totals
        .iter()
        .filter(|(_, amount)| !amount.is_zero())
        .map(|(category, amount)| CategoryShare {
            category,
            amount,
            percent: (amount * Decimal::ONE_HUNDRED / grand_total)
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_u32()
                .unwrap_or_default(),
        })
        .collect()
}
