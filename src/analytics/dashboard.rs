//! Headline figures and the year/month/sale type/client filter of the
//! dashboard.

use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;

use crate::{
    model::{Invoice, SaleRecord, SaleType, SalesCategory},
    store::Catalog,
};

use super::{
    Totals,
    categories::{CategoryPolicy, category_order_counts, category_totals},
    invoices::{paid_total, pending_receivables},
    ranking::NO_CLIENT_LABEL,
    total_sales,
};

pub const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Lowercase Spanish month name for a 1-based month number.
pub fn month_name(month: u32) -> Option<&'static str> {
    let idx = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTHS.get(idx).copied()
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardKpis {
    pub total_sales: Decimal,
    pub accounts_receivable: Decimal,
    pub paid: Decimal,
    pub by_category: Totals<SalesCategory>,
    pub orders_by_category: BTreeMap<SalesCategory, usize>,
    pub avg_monthly_sales: Decimal,
}

pub fn dashboard_kpis<C: Catalog>(
    sales: &[SaleRecord],
    invoices: &[Invoice],
    catalog: &C,
    policy: CategoryPolicy,
) -> DashboardKpis {
    let total = total_sales(sales);
    DashboardKpis {
        total_sales: total,
        accounts_receivable: pending_receivables(invoices),
        paid: paid_total(invoices),
        by_category: category_totals(sales, catalog, policy),
        orders_by_category: category_order_counts(sales, catalog, policy),
        avg_monthly_sales: total / Decimal::from(12),
    }
}

/// One sale line flattened for the dashboard filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesRow {
    pub year: i32,
    pub month: &'static str,
    /// `None` when the product is unknown.
    pub sale_type: Option<SaleType>,
    pub client: String,
    pub category: Option<SalesCategory>,
    pub amount: Decimal,
}

pub fn sales_rows<C: Catalog>(sales: &[SaleRecord], catalog: &C, policy: CategoryPolicy) -> Vec<SalesRow> {
    let mut rows = Vec::new();
    for sale in sales {
        let client = sale
            .client_id
            .as_deref()
            .and_then(|id| catalog.client(id))
            .map_or_else(|| NO_CLIENT_LABEL.to_string(), |c| c.full_name.clone());
        for item in &sale.items {
            let product = catalog.product(&item.product_id);
            rows.push(SalesRow {
                year: sale.date.year(),
                month: MONTHS[sale.date.month0() as usize],
                sale_type: product.map(|p| p.category.sale_type()),
                client: client.clone(),
                category: policy.resolve(product),
                amount: item.amount(),
            });
        }
    }
    rows
}

/// Each set field must match exactly. Unset fields and empty strings do not
/// constrain anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardFilter {
    pub year: Option<i32>,
    pub month: Option<String>,
    pub sale_type: Option<SaleType>,
    pub client: Option<String>,
}

fn text_matches(selected: Option<&str>, value: &str) -> bool {
    match selected {
        Some(selected) if !selected.is_empty() => selected == value,
        _ => true,
    }
}

impl DashboardFilter {
    pub fn matches(&self, row: &SalesRow) -> bool {
        self.year.is_none_or(|year| year == row.year)
            && text_matches(self.month.as_deref(), row.month)
            && self.sale_type.is_none_or(|sale_type| row.sale_type == Some(sale_type))
            && text_matches(self.client.as_deref(), &row.client)
    }

    pub fn apply<'a>(&self, rows: &'a [SalesRow]) -> Vec<&'a SalesRow> {
        rows.iter().filter(|row| self.matches(row)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredKpis {
    pub total: Decimal,
    pub by_category: Totals<SalesCategory>,
    /// Filtered rows per category.
    pub rows_by_category: BTreeMap<SalesCategory, usize>,
}

pub fn filtered_kpis(rows: &[&SalesRow]) -> FilteredKpis {
    let mut by_category = Totals::seeded(&SalesCategory::ALL);
    let mut rows_by_category: BTreeMap<SalesCategory, usize> =
        SalesCategory::ALL.into_iter().map(|c| (c, 0)).collect();
    for row in rows {
        if let Some(category) = row.category {
            by_category.add(category, row.amount);
            *rows_by_category.entry(category).or_default() += 1;
        }
    }
    FilteredKpis {
        total: rows.iter().map(|row| row.amount).sum(),
        by_category,
        rows_by_category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{analytics::test_support::*, model::InvoiceStatus};

    fn sample() -> crate::store::Store {
        store(
            vec![
                sale("s1", (2024, 2, 10), Some("a"), vec![line("bor", 2, 100), line("gra", 1, 50)]),
                sale("s2", (2024, 3, 1), Some("b"), vec![line("uv", 1, 300)]),
                sale("s3", (2023, 2, 5), None, vec![line("ghost", 1, 10)]),
            ],
            vec![client("a", "Acme SA"), client("b", "Beta SRL")],
        )
    }

    #[test]
    fn month_names() {
        assert_eq!(month_name(1), Some("enero"));
        assert_eq!(month_name(12), Some("diciembre"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn kpis_over_everything() {
        let store = sample();
        let invoices = vec![
            invoice("1", InvoiceStatus::Sent, 500),
            invoice("2", InvoiceStatus::Paid, 700),
            invoice("3", InvoiceStatus::Void, 900),
        ];
        let kpis = dashboard_kpis(store.sales(), &invoices, &store, CategoryPolicy::default());
        assert_eq!(kpis.total_sales, Decimal::from(560));
        assert_eq!(kpis.accounts_receivable, Decimal::from(500));
        assert_eq!(kpis.paid, Decimal::from(700));
        assert_eq!(kpis.by_category.get(SalesCategory::Grabado), Decimal::from(60));
        assert_eq!(kpis.orders_by_category[&SalesCategory::Grabado], 2);
        assert_eq!(kpis.avg_monthly_sales, Decimal::from(560) / Decimal::from(12));
    }

    #[test]
    fn flattened_rows_resolve_labels() {
        let store = sample();
        let rows = sales_rows(store.sales(), &store, CategoryPolicy::default());
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].month, "febrero");
        assert_eq!(rows[0].sale_type, Some(SaleType::Servicio));
        assert_eq!(rows[0].client, "Acme SA");
        assert_eq!(rows[3].client, NO_CLIENT_LABEL);
        assert_eq!(rows[3].sale_type, None);
        assert_eq!(rows[3].category, Some(SalesCategory::Grabado));

        let strict = sales_rows(store.sales(), &store, CategoryPolicy::Strict);
        assert_eq!(strict[3].category, None);
    }

    #[test]
    fn filter_is_an_and_of_optional_fields() {
        let store = sample();
        let rows = sales_rows(store.sales(), &store, CategoryPolicy::default());

        assert_eq!(DashboardFilter::default().apply(&rows).len(), 4);

        let february = DashboardFilter {
            month: Some("febrero".to_string()),
            ..Default::default()
        };
        assert_eq!(february.apply(&rows).len(), 3);

        let narrow = DashboardFilter {
            year: Some(2024),
            month: Some("febrero".to_string()),
            sale_type: Some(SaleType::Producto),
            client: Some(String::new()),
        };
        let hits = narrow.apply(&rows);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].amount, Decimal::from(50));

        let nobody = DashboardFilter {
            client: Some("Gamma".to_string()),
            ..Default::default()
        };
        assert!(nobody.apply(&rows).is_empty());
    }

    #[test]
    fn filtered_totals() {
        let store = sample();
        let rows = sales_rows(store.sales(), &store, CategoryPolicy::default());
        let year_2024 = DashboardFilter {
            year: Some(2024),
            ..Default::default()
        };
        let kpis = filtered_kpis(&year_2024.apply(&rows));
        assert_eq!(kpis.total, Decimal::from(550));
        assert_eq!(kpis.by_category.get(SalesCategory::Bordado), Decimal::from(200));
        assert_eq!(kpis.rows_by_category[&SalesCategory::Uv], 1);
        assert_eq!(kpis.rows_by_category[&SalesCategory::Grabado], 1);
    }
}
