use std::io::Write;

use chrono::NaiveDate;
use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    analytics::{
        classify::ClientClassification, inventory::StockRow, products::ProductSales,
        ranking::RankedClient, timeline::Bucket,
    },
    model::{Client, InvoiceStatus, PLACEHOLDER, PaymentCondition, ProposalStatus, SalesCategory},
};

#[derive(Debug, Serialize)]
pub struct ClientRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub status: ProposalStatus,
    pub created_at: NaiveDate,
    pub invoice_total: Option<Decimal>,
    pub sale_type: &'static str,
    pub job_type: &'static str,
}

impl<'a> ClientRow<'a> {
    pub fn new(client: &'a Client, labels: Option<ClientClassification>) -> Self {
        let labels = labels.unwrap_or_default();
        Self {
            id: &client.id,
            name: &client.full_name,
            status: client.status,
            created_at: client.created_at,
            invoice_total: client.invoice_total,
            sale_type: labels.sale_type.map_or(PLACEHOLDER, |t| t.as_str()),
            job_type: labels.job_type.map_or(PLACEHOLDER, |t| t.as_str()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryRow {
    pub category: SalesCategory,
    pub amount: Decimal,
    pub percent: u32,
    pub orders: usize,
}

#[derive(Debug, Serialize)]
pub struct BucketRow {
    pub period: String,
    pub amount: Decimal,
}

impl From<Bucket> for BucketRow {
    fn from(bucket: Bucket) -> Self {
        Self {
            period: bucket.key,
            amount: bucket.amount,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RankedRow {
    pub client: String,
    pub amount: Decimal,
}

impl From<RankedClient> for RankedRow {
    fn from(ranked: RankedClient) -> Self {
        Self {
            client: ranked.name,
            amount: ranked.amount,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InventoryRow<'a> {
    pub item: &'a str,
    pub product: &'a str,
    pub on_hand: u32,
    pub reorder_point: Option<u32>,
    pub stock_value: Decimal,
    pub low_stock: bool,
}

impl<'a> From<&StockRow<'a>> for InventoryRow<'a> {
    fn from(row: &StockRow<'a>) -> Self {
        Self {
            item: &row.item.id,
            product: row.product.map_or(PLACEHOLDER, |p| p.name.as_str()),
            on_hand: row.item.quantity_on_hand,
            reorder_point: row.item.reorder_point,
            stock_value: row.stock_value,
            low_stock: row.is_low,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusRow {
    pub status: InvoiceStatus,
    pub amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct ProductRow<'a> {
    pub product: &'a str,
    pub units: u64,
    pub revenue: Decimal,
}

impl<'a> From<&ProductSales<'a>> for ProductRow<'a> {
    fn from(row: &ProductSales<'a>) -> Self {
        Self {
            product: &row.product.name,
            units: row.units,
            revenue: row.revenue,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaymentRow {
    pub condition: PaymentCondition,
    pub amount: Decimal,
}

pub fn print_rows<W, T>(output: &mut W, rows: impl Iterator<Item = T>) -> anyhow::Result<()>
where
    W: Write,
    T: Serialize,
{
    let mut writer = Writer::from_writer(output);
    for row in rows {
        if let Err(err) = writer.serialize(row) {
            anyhow::bail!("Failed to write to CSV: {err}")
        }
    }
    // Ensure all data is flushed to the output
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush CSV writer: {err}")
    }
    Ok(())
}
