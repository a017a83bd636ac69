//! Pure reducers over record slices. Nothing here mutates its input or keeps
//! state between calls; every result is recomputed from scratch.
//!
//! Unresolved product or client references never fail an aggregation: they
//! fall back to a zero, a placeholder label or a default bucket.

use std::{
    collections::{BTreeMap, HashMap},
    hash::Hash,
};

use rust_decimal::Decimal;

use crate::model::SaleRecord;

pub mod categories;
pub mod classify;
pub mod dashboard;
pub mod inventory;
pub mod invoices;
pub mod payments;
pub mod products;
pub mod ranking;
pub mod timeline;

pub fn total_sales(sales: &[SaleRecord]) -> Decimal {
    sales.iter().map(SaleRecord::amount).sum()
}

/// Sums keyed by a closed set of values. Every key is present from the
/// start, so empty keys still report zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Totals<K: Ord> {
    sums: BTreeMap<K, Decimal>,
}

impl<K: Ord + Copy> Totals<K> {
    pub fn seeded(keys: &[K]) -> Self {
        Self {
            sums: keys.iter().map(|key| (*key, Decimal::ZERO)).collect(),
        }
    }

    pub fn add(&mut self, key: K, amount: Decimal) {
        *self.sums.entry(key).or_default() += amount;
    }

    pub fn get(&self, key: K) -> Decimal {
        self.sums.get(&key).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, Decimal)> + '_ {
        self.sums.iter().map(|(key, amount)| (*key, *amount))
    }

    pub fn len(&self) -> usize {
        self.sums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }

    pub fn grand_total(&self) -> Decimal {
        self.sums.values().copied().sum()
    }
}

/// Sums in first-seen key order, for outputs whose order is not otherwise
/// defined (ties in rankings keep this order).
#[derive(Debug)]
pub(crate) struct OrderedSums<K> {
    positions: HashMap<K, usize>,
    entries: Vec<(K, Decimal)>,
}

impl<K> Default for OrderedSums<K> {
    fn default() -> Self {
        Self {
            positions: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> OrderedSums<K> {
    pub(crate) fn add(&mut self, key: K, amount: Decimal) {
        match self.positions.get(&key).copied() {
            Some(idx) => self.entries[idx].1 += amount,
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, amount));
            }
        }
    }

    pub(crate) fn into_entries(self) -> Vec<(K, Decimal)> {
        self.entries
    }
}
