//! Manufacturer rollups: the top-10 chart and the performance table.

use std::collections::HashSet;

use estoque_models::{ChartPoint, ManufacturerPerformance, ManufacturerQuantity, RecordSet};
use indexmap::IndexMap;

use crate::grouping::{descending, Sum};

pub const TOP_MANUFACTURERS_LIMIT: usize = 10;

/// The ten manufacturers with the most units on hand.
pub fn top_manufacturers(records: &RecordSet) -> Vec<ManufacturerQuantity> {
    let mut groups: IndexMap<String, Sum> = IndexMap::new();
    for record in records.iter().filter(|r| r.has_manufacturer()) {
        groups
            .entry(record.manufacturer.clone())
            .or_default()
            .add(record.physical_quantity);
    }

    let mut rows: Vec<ManufacturerQuantity> = groups
        .into_iter()
        .map(|(manufacturer, sum)| ManufacturerQuantity {
            manufacturer,
            physical_quantity: sum.value(),
        })
        .collect();

    rows.sort_by(|a, b| descending(a.physical_quantity, b.physical_quantity));
    rows.truncate(TOP_MANUFACTURERS_LIMIT);
    rows
}

pub fn top_manufacturers_chart(rows: &[ManufacturerQuantity]) -> Vec<ChartPoint> {
    rows.iter()
        .map(|row| ChartPoint {
            category: row.manufacturer.clone(),
            value: row.physical_quantity,
        })
        .collect()
}

#[derive(Default)]
struct PerformanceAcc {
    physical: Sum,
    damaged: Sum,
    available: Sum,
    requested: Sum,
    products: HashSet<String>,
}

/// Per-manufacturer totals, largest stock first.
pub fn manufacturer_performance(records: &RecordSet) -> Vec<ManufacturerPerformance> {
    let mut groups: IndexMap<String, PerformanceAcc> = IndexMap::new();
    for record in records.iter().filter(|r| r.has_manufacturer()) {
        let acc = groups.entry(record.manufacturer.clone()).or_default();
        acc.physical.add(record.physical_quantity);
        acc.damaged.add(record.damaged_quantity);
        acc.available.add(record.available_quantity);
        acc.requested.add(record.requested_quantity);
        if record.has_product() {
            acc.products.insert(record.product.clone());
        }
    }

    let mut rows: Vec<ManufacturerPerformance> = groups
        .into_iter()
        .map(|(manufacturer, acc)| ManufacturerPerformance {
            manufacturer,
            total_physical_quantity: acc.physical.value(),
            total_damaged_quantity: acc.damaged.value(),
            total_available_quantity: acc.available.value(),
            total_requested_quantity: acc.requested.value(),
            product_count: acc.products.len(),
        })
        .collect();

    rows.sort_by(|a, b| descending(a.total_physical_quantity, b.total_physical_quantity));
    rows
}
