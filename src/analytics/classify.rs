//! Per-client labels derived from sales history.
//!
//! Each label is resolved in tiers: an explicit value carried by the client
//! (imported sale type only), the category with the strictly largest revenue
//! across the client's sales, a keyword found in the client's `interest`, and
//! finally no label at all (rendered as [`PLACEHOLDER`](crate::model::PLACEHOLDER)).

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::{
    model::{Client, ClientId, SaleRecord, SaleType, SalesCategory},
    store::Catalog,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientClassification {
    pub sale_type: Option<SaleType>,
    pub job_type: Option<SalesCategory>,
}

/// Key with the strictly largest positive sum. Ties for the top spot and
/// all-zero sums yield `None`.
fn dominant<K: Copy>(sums: &[(K, Decimal)]) -> Option<K> {
    let mut best: Option<(K, Decimal)> = None;
    let mut tied = false;
    for &(key, amount) in sums {
        match best {
            Some((_, top)) if amount < top => {}
            Some((_, top)) if amount == top => tied = true,
            _ => {
                best = Some((key, amount));
                tied = false;
            }
        }
    }
    best.filter(|(_, amount)| !tied && *amount > Decimal::ZERO)
        .map(|(key, _)| key)
}

fn client_sales<'a>(client: &'a Client, sales: &'a [SaleRecord]) -> impl Iterator<Item = &'a SaleRecord> {
    sales
        .iter()
        .filter(move |sale| sale.client_id.as_deref() == Some(client.id.as_str()))
}

pub fn sale_type_of<C: Catalog>(client: &Client, sales: &[SaleRecord], catalog: &C) -> Option<SaleType> {
    if client.sale_type.is_some() {
        return client.sale_type;
    }
    let mut sums = SaleType::ALL.map(|sale_type| (sale_type, Decimal::ZERO));
    for sale in client_sales(client, sales) {
        for item in &sale.items {
            let Some(product) = catalog.product(&item.product_id) else {
                continue;
            };
            let sale_type = product.category.sale_type();
            if let Some(slot) = sums.iter_mut().find(|(key, _)| *key == sale_type) {
                slot.1 += item.amount();
            }
        }
    }
    dominant(&sums).or_else(|| SaleType::detect(&client.interest))
}

pub fn job_type_of<C: Catalog>(client: &Client, sales: &[SaleRecord], catalog: &C) -> Option<SalesCategory> {
    let mut sums = SalesCategory::ALL.map(|category| (category, Decimal::ZERO));
    for sale in client_sales(client, sales) {
        for item in &sale.items {
            let Some(category) = catalog
                .product(&item.product_id)
                .and_then(|product| product.sales_category)
            else {
                continue;
            };
            if let Some(slot) = sums.iter_mut().find(|(key, _)| *key == category) {
                slot.1 += item.amount();
            }
        }
    }
    dominant(&sums).or_else(|| SalesCategory::detect(&client.interest))
}

/// Labels for every client, keyed by client id.
pub fn classify_clients<C: Catalog>(
    clients: &[Client],
    sales: &[SaleRecord],
    catalog: &C,
) -> HashMap<ClientId, ClientClassification> {
    clients
        .iter()
        .map(|client| {
            let classification = ClientClassification {
                sale_type: sale_type_of(client, sales, catalog),
                job_type: job_type_of(client, sales, catalog),
            };
            (client.id.clone(), classification)
        })
        .collect()
}
