use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::model::{PLACEHOLDER, ProductOrService, SaleRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct ProductSales<'a> {
    pub product: &'a ProductOrService,
    pub units: u64,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductSalesSummary {
    pub total_revenue: Decimal,
    pub total_units: u64,
    /// Products with at least one unit sold.
    pub skus_sold: usize,
    pub avg_revenue_per_sku: Decimal,
    pub top_product: String,
    pub top_revenue: Decimal,
}

/// Units and revenue for every catalog product, highest revenue first.
/// Products without sales are listed with zeros; equal revenue keeps
/// catalog order. Lines referencing unknown products are not counted.
pub fn product_sales<'a>(
    products: &'a [ProductOrService],
    sales: &[SaleRecord],
) -> (Vec<ProductSales<'a>>, ProductSalesSummary) {
    let mut per_product: HashMap<&str, (u64, Decimal)> = HashMap::new();
    for item in sales.iter().flat_map(|sale| &sale.items) {
        let entry = per_product.entry(item.product_id.as_str()).or_default();
        entry.0 += u64::from(item.quantity);
        entry.1 += item.amount();
    }

    let mut rows: Vec<ProductSales<'a>> = products
        .iter()
        .map(|product| {
            let (units, revenue) = per_product
                .get(product.id.as_str())
                .copied()
                .unwrap_or_default();
            ProductSales {
                product,
                units,
                revenue,
            }
        })
        .collect();
    rows.sort_by(|a, b| b.revenue.cmp(&a.revenue));

    let total_revenue: Decimal = rows.iter().map(|row| row.revenue).sum();
    let total_units: u64 = rows.iter().map(|row| row.units).sum();
    let skus_sold = rows.iter().filter(|row| row.units > 0).count();
    let avg_revenue_per_sku = if skus_sold > 0 {
        total_revenue / Decimal::from(skus_sold)
    } else {
        Decimal::ZERO
    };
    let summary = ProductSalesSummary {
        total_revenue,
        total_units,
        skus_sold,
        avg_revenue_per_sku,
        top_product: rows
            .first()
            .map_or_else(|| PLACEHOLDER.to_string(), |row| row.product.name.clone()),
        top_revenue: rows.first().map(|row| row.revenue).unwrap_or_default(),
    };
    (rows, summary)
}
