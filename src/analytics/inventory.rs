use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    model::{InventoryItem, ProductOrService},
    store::Catalog,
};

#[derive(Debug, Clone, PartialEq)]
pub struct StockRow<'a> {
    pub item: &'a InventoryItem,
    pub product: Option<&'a ProductOrService>,
    /// Zero when the product cannot be resolved.
    pub stock_value: Decimal,
    pub is_low: bool,
}

pub fn stock_rows<'a, C: Catalog>(inventory: &'a [InventoryItem], catalog: &'a C) -> Vec<StockRow<'a>> {
    inventory
        .iter()
        .map(|item| {
            let product = catalog.product(&item.product_id);
            if product.is_none() {
                debug!(item = %item.id, product = %item.product_id, "inventory row without product");
            }
            StockRow {
                item,
                product,
                stock_value: product.map_or(Decimal::ZERO, |p| {
                    p.unit_price * Decimal::from(item.quantity_on_hand)
                }),
                is_low: item.is_low_stock(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InventoryKpis {
    pub total_skus: usize,
    pub total_stock: u64,
    pub low_stock_skus: usize,
    pub stock_value: Decimal,
}

pub fn inventory_kpis<C: Catalog>(inventory: &[InventoryItem], catalog: &C) -> InventoryKpis {
    stock_rows(inventory, catalog)
        .iter()
        .fold(InventoryKpis::default(), |mut kpis, row| {
            kpis.total_skus += 1;
            kpis.total_stock += u64::from(row.item.quantity_on_hand);
            kpis.low_stock_skus += usize::from(row.is_low);
            kpis.stock_value += row.stock_value;
            kpis
        })
}
