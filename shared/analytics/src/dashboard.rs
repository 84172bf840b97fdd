//! One recomputation pass: filter the loaded set, then compute every view.

use chrono::NaiveDate;
use estoque_models::{DashboardSnapshot, PeriodFilter, RecordSet, ThresholdBounds, Thresholds};
use estoque_utils::{validate_thresholds, InventoryResult};
use tracing::{debug, instrument};

use crate::filter::apply_filters;
use crate::views::{
    critical_chart, critical_products, damage_analysis, low_availability, manufacturer_performance,
    overview_totals, quantity_comparison, stale_stock, top_manufacturers,
};

pub const NO_DATA_NOTICE: &str = "No data to display for the selected filters.";

/// Builds every view for `period` and `thresholds` from the loaded `records`.
///
/// Only invalid thresholds fail; an empty filtered set yields empty views and a notice.
#[instrument(skip(records), fields(loaded = records.len()))]
pub fn build_snapshot(
    records: &RecordSet,
    period: PeriodFilter,
    thresholds: &Thresholds,
    today: NaiveDate,
) -> InventoryResult<DashboardSnapshot> {
    validate_thresholds(thresholds)?;

    let filtered = apply_filters(records, period);
    let critical = critical_products(&filtered, thresholds.critical_availability);

    let snapshot = DashboardSnapshot {
        period,
        thresholds: *thresholds,
        threshold_bounds: ThresholdBounds::for_records(&filtered),
        record_count: filtered.len(),
        notice: filtered.is_empty().then(|| NO_DATA_NOTICE.to_string()),
        overview: overview_totals(&filtered),
        top_manufacturers: top_manufacturers(&filtered),
        quantity_comparison: quantity_comparison(&filtered),
        low_availability: low_availability(&filtered, thresholds.low_availability),
        damage: damage_analysis(&filtered),
        stale_stock: stale_stock(&filtered, thresholds.stale_days, today),
        critical_chart: critical_chart(&critical),
        critical_products: critical,
        manufacturer_performance: manufacturer_performance(&filtered),
    };

    debug!(
        filtered = snapshot.record_count,
        critical = snapshot.critical_products.len(),
        stale = snapshot.stale_stock.len(),
        "Dashboard snapshot built"
    );
    Ok(snapshot)
}
