//! Inventory records and record sets.
//!
//! A record mirrors one row of the stock report. Quantities are `f64` because
//! the source file may carry fractional units and blank cells, which are kept
//! as `NaN` rather than coerced to zero.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One row of the stock report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub product: String,
    pub manufacturer: String,
    pub physical_quantity: f64,
    pub requested_quantity: f64,
    pub reserved_quantity: f64,
    /// Taken as-is from the source. It is never recomputed from
    /// `physical_quantity - reserved_quantity`.
    pub available_quantity: f64,
    pub damaged_quantity: f64,
    pub unit_net_cost: f64,
    pub last_purchase_date: NaiveDate,
}

impl InventoryRecord {
    pub fn purchase_year(&self) -> i32 {
        self.last_purchase_date.year()
    }

    pub fn purchase_month(&self) -> u32 {
        self.last_purchase_date.month()
    }

    /// Whole days between the last purchase and `today`.
    pub fn days_since_last_purchase(&self, today: NaiveDate) -> i64 {
        (today - self.last_purchase_date).num_days()
    }

    /// Physical quantity times unit net cost. `NaN` when either side is missing.
    pub fn stock_value(&self) -> f64 {
        self.physical_quantity * self.unit_net_cost
    }

    pub fn has_product(&self) -> bool {
        !self.product.trim().is_empty()
    }

    pub fn has_manufacturer(&self) -> bool {
        !self.manufacturer.trim().is_empty()
    }
}

/// Ordered collection of records.
///
/// Sets are never mutated after construction: every narrowing returns a new
/// set that keeps the relative order of the source rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordSet {
    records: Vec<InventoryRecord>,
}

impl RecordSet {
    pub fn new(records: Vec<InventoryRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InventoryRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[InventoryRecord] {
        &self.records
    }

    /// Returns a new set holding the records that satisfy `predicate`.
    pub fn retain_where<F>(&self, predicate: F) -> RecordSet
    where
        F: Fn(&InventoryRecord) -> bool,
    {
        self.records
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    /// Largest `available_quantity` in the set, ignoring missing values.
    pub fn max_available_quantity(&self) -> Option<f64> {
        self.records
            .iter()
            .map(|r| r.available_quantity)
            .filter(|v| !v.is_nan())
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
    }
}

impl FromIterator<InventoryRecord> for RecordSet {
    fn from_iter<I: IntoIterator<Item = InventoryRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a InventoryRecord;
    type IntoIter = std::slice::Iter<'a, InventoryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
