//! Availability against demand: per-product comparison, low availability
//! and critical products.

use estoque_models::{
    ChartPoint, ChartSeries, CriticalProductRow, LowAvailabilityRow, ProductQuantities, RecordSet,
};
use indexmap::IndexMap;

use crate::grouping::{descending, Sum};

#[derive(Default)]
struct QuantityAcc {
    physical: Sum,
    requested: Sum,
    reserved: Sum,
    available: Sum,
}

/// Physical, requested, reserved and available totals per product, in first-seen order.
pub fn quantity_comparison(records: &RecordSet) -> Vec<ProductQuantities> {
    let mut groups: IndexMap<String, QuantityAcc> = IndexMap::new();
    for record in records.iter().filter(|r| r.has_product()) {
        let acc = groups.entry(record.product.clone()).or_default();
        acc.physical.add(record.physical_quantity);
        acc.requested.add(record.requested_quantity);
        acc.reserved.add(record.reserved_quantity);
        acc.available.add(record.available_quantity);
    }

    groups
        .into_iter()
        .map(|(product, acc)| ProductQuantities {
            product,
            physical_quantity: acc.physical.value(),
            requested_quantity: acc.requested.value(),
            reserved_quantity: acc.reserved.value(),
            available_quantity: acc.available.value(),
        })
        .collect()
}

/// Records with `0 <= available < threshold`, most requested first.
///
/// Negative availability (backorders) is left to the critical view.
pub fn low_availability(records: &RecordSet, threshold: i64) -> Vec<LowAvailabilityRow> {
    let limit = threshold as f64;
    let mut rows: Vec<LowAvailabilityRow> = records
        .iter()
        .filter(|r| r.available_quantity >= 0.0 && r.available_quantity < limit)
        .map(|r| LowAvailabilityRow {
            product: r.product.clone(),
            manufacturer: r.manufacturer.clone(),
            physical_quantity: r.physical_quantity,
            requested_quantity: r.requested_quantity,
            reserved_quantity: r.reserved_quantity,
            available_quantity: r.available_quantity,
        })
        .collect();

    rows.sort_by(|a, b| descending(a.requested_quantity, b.requested_quantity));
    rows
}

/// Records with `available < threshold` that still have open requests, most requested first.
pub fn critical_products(records: &RecordSet, threshold: i64) -> Vec<CriticalProductRow> {
    let limit = threshold as f64;
    let mut rows: Vec<CriticalProductRow> = records
        .iter()
        .filter(|r| r.available_quantity < limit && r.requested_quantity > 0.0)
        .map(|r| CriticalProductRow {
            product: r.product.clone(),
            manufacturer: r.manufacturer.clone(),
            physical_quantity: r.physical_quantity,
            requested_quantity: r.requested_quantity,
            available_quantity: r.available_quantity,
        })
        .collect();

    rows.sort_by(|a, b| descending(a.requested_quantity, b.requested_quantity));
    rows
}

/// Grouped bars for the critical products: one series for available, one for requested.
pub fn critical_chart(rows: &[CriticalProductRow]) -> Vec<ChartSeries> {
    if rows.is_empty() {
        return Vec::new();
    }

    let series = |name: &str, value: fn(&CriticalProductRow) -> f64| ChartSeries {
        name: name.to_string(),
        points: rows
            .iter()
            .map(|row| ChartPoint {
                category: row.product.clone(),
                value: value(row),
            })
            .collect(),
    };

    vec![
        series("available_quantity", |row| row.available_quantity),
        series("requested_quantity", |row| row.requested_quantity),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use estoque_models::InventoryRecord;

    fn record(product: &str, available: f64, requested: f64) -> InventoryRecord {
        InventoryRecord {
            product: product.to_string(),
            manufacturer: "Eurofarma".to_string(),
            physical_quantity: 20.0,
            requested_quantity: requested,
            reserved_quantity: 2.0,
            available_quantity: available,
            damaged_quantity: 0.0,
            unit_net_cost: 1.0,
            last_purchase_date: NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
        }
    }

    fn products<T>(rows: &[T], name: impl Fn(&T) -> &str) -> Vec<&str> {
        rows.iter().map(name).collect()
    }

    #[test]
    fn test_quantity_comparison_groups_by_product() {
        let records = RecordSet::new(vec![
            record("Luva P", 5.0, 1.0),
            record("Mascara", 1.0, 0.0),
            record("Luva P", 3.0, 2.0),
        ]);
        let rows = quantity_comparison(&records);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].product, "Luva P");
        assert_eq!(rows[0].physical_quantity, 40.0);
        assert_eq!(rows[0].requested_quantity, 3.0);
        assert_eq!(rows[0].reserved_quantity, 4.0);
        assert_eq!(rows[0].available_quantity, 8.0);
        assert_eq!(rows[1].product, "Mascara");
    }

    #[test]
    fn test_quantity_comparison_keeps_first_seen_order() {
        let records = RecordSet::new(vec![
            record("Zinco", 1.0, 1.0),
            record("Aspirina", 1.0, 1.0),
            record("Zinco", 1.0, 1.0),
        ]);
        let products: Vec<_> = quantity_comparison(&records)
            .into_iter()
            .map(|row| row.product)
            .collect();
        assert_eq!(products, vec!["Zinco", "Aspirina"]);
    }

    #[test]
    fn test_low_availability_excludes_negative() {
        let records = RecordSet::new(vec![
            record("neg", -3.0, 50.0),
            record("zero", 0.0, 1.0),
            record("low", 9.0, 7.0),
            record("edge", 10.0, 99.0),
            record("missing", f64::NAN, 99.0),
        ]);
        let rows = low_availability(&records, 10);
        assert_eq!(products(&rows, |r| r.product.as_str()), vec!["low", "zero"]);
    }

    #[test]
    fn test_low_availability_zero_threshold_is_empty() {
        let records = RecordSet::new(vec![record("zero", 0.0, 1.0)]);
        assert!(low_availability(&records, 0).is_empty());
    }

    #[test]
    fn test_critical_requires_open_requests() {
        let records = RecordSet::new(vec![
            record("no demand", 1.0, 0.0),
            record("backorder", -4.0, 3.0),
            record("urgent", 2.0, 30.0),
            record("plenty", 50.0, 30.0),
        ]);
        let rows = critical_products(&records, 5);
        assert_eq!(products(&rows, |r| r.product.as_str()), vec!["urgent", "backorder"]);
    }

    #[test]
    fn test_ties_keep_source_order() {
        let records = RecordSet::new(vec![
            record("first", 1.0, 5.0),
            record("second", 2.0, 5.0),
            record("third", 3.0, 5.0),
        ]);
        let rows = critical_products(&records, 5);
        assert_eq!(products(&rows, |r| r.product.as_str()), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_critical_chart_series() {
        let rows = critical_products(&RecordSet::new(vec![record("urgent", 2.0, 30.0)]), 5);
        let chart = critical_chart(&rows);
        assert_eq!(chart.len(), 2);
        assert_eq!(chart[0].name, "available_quantity");
        assert_eq!(chart[0].points[0].value, 2.0);
        assert_eq!(chart[1].name, "requested_quantity");
        assert_eq!(chart[1].points[0].category, "urgent");
        assert!(critical_chart(&[]).is_empty());
    }

    #[test]
    fn test_empty_set() {
        let empty = RecordSet::default();
        assert!(quantity_comparison(&empty).is_empty());
        assert!(low_availability(&empty, 10).is_empty());
        assert!(critical_products(&empty, 5).is_empty());
    }
}
