use std::collections::HashSet;

use estoque_models::{OverviewTotals, RecordSet};

use crate::grouping::nan_sum;

/// Distinct products, units on hand and stock value of the set.
pub fn overview_totals(records: &RecordSet) -> OverviewTotals {
    let distinct_products = records
        .iter()
        .filter(|r| r.has_product())
        .map(|r| r.product.as_str())
        .collect::<HashSet<_>>()
        .len();

    OverviewTotals {
        distinct_products,
        total_physical_quantity: nan_sum(records.iter().map(|r| r.physical_quantity)),
        total_stock_value: nan_sum(records.iter().map(|r| r.stock_value())),
    }
}
