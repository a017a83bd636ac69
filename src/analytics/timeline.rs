use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::model::SaleRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Year,
    Month,
}

impl Granularity {
    /// `YYYY` or `YYYY-MM`, zero padded so lexical order is chronological.
    pub fn bucket(self, date: NaiveDate) -> String {
        match self {
            Self::Year => format!("{:04}", date.year()),
            Self::Month => format!("{:04}-{:02}", date.year(), date.month()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub key: String,
    pub amount: Decimal,
}

/// Sale revenue per time bucket, oldest bucket first. Buckets without sales
/// are not emitted.
pub fn rollup(sales: &[SaleRecord], granularity: Granularity) -> Vec<Bucket> {
    let mut buckets: BTreeMap<String, Decimal> = BTreeMap::new();
    for sale in sales {
        *buckets.entry(granularity.bucket(sale.date)).or_default() += sale.amount();
    }
    buckets
        .into_iter()
        .map(|(key, amount)| Bucket { key, amount })
        .collect()
}

pub fn monthly_sales(sales: &[SaleRecord]) -> Vec<Bucket> {
    rollup(sales, Granularity::Month)
}

pub fn annual_sales(sales: &[SaleRecord]) -> Vec<Bucket> {
    rollup(sales, Granularity::Year)
}
