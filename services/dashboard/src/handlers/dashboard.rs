//! Dashboard Handler
//!
//! Inventory analysis views over the loaded stock report. Filters and
//! thresholds arrive with each request; nothing is remembered between calls.

use axum::{
    extract::{Query, State},
    response::Json,
};
use chrono::{Local, NaiveDate};
use estoque_analytics::{
    apply_filters, build_snapshot, critical_chart, critical_products, damage_analysis,
    low_availability, manufacturer_performance, overview_totals, quantity_comparison, stale_stock,
    top_manufacturers, top_manufacturers_chart, FilterState, NO_DATA_NOTICE,
};
use estoque_models::{
    ChartPoint, ChartSeries, CriticalProductRow, DamageRow, DashboardSnapshot, LowAvailabilityRow,
    ManufacturerPerformance, ManufacturerQuantity, OverviewTotals, PeriodFilter, ProductQuantities,
    RecordSet, StaleStockRow, ThresholdBounds, Thresholds,
};
use estoque_utils::{
    format_currency, format_quantity, parse_month, parse_threshold, parse_year, validate_thresholds,
    InventoryResult,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::is_all_selection;
use crate::error::ApiResult;
use crate::AppState;

// ===== Request parameters =====

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// A year, or `all`.
    pub year: Option<String>,
    /// A month number or label (`Jan`..`Dez`), or `all`. Requires a year.
    pub month: Option<String>,
    pub low_availability: Option<String>,
    pub stale_days: Option<String>,
    pub critical_availability: Option<String>,
}

/// A blank override keeps the configured default.
fn threshold_override(field: &str, value: Option<&str>, default: i64) -> InventoryResult<i64> {
    match value {
        Some(value) if !value.trim().is_empty() => parse_threshold(field, value),
        _ => Ok(default),
    }
}

impl DashboardQuery {
    pub fn filter_state(&self, records: &RecordSet) -> InventoryResult<FilterState> {
        let year = match self.year.as_deref() {
            Some(value) if !is_all_selection(value) => Some(parse_year(value)?),
            _ => None,
        };
        let month = match self.month.as_deref() {
            Some(value) if !is_all_selection(value) => Some(parse_month(value)?),
            _ => None,
        };

        let mut state = FilterState::new();
        state.select_year(records, year)?;
        state.select_month(records, month)?;
        Ok(state)
    }

    pub fn thresholds(&self, defaults: &Thresholds) -> InventoryResult<Thresholds> {
        let thresholds = Thresholds {
            low_availability: threshold_override(
                "low_availability",
                self.low_availability.as_deref(),
                defaults.low_availability,
            )?,
            stale_days: threshold_override("stale_days", self.stale_days.as_deref(), defaults.stale_days)?,
            critical_availability: threshold_override(
                "critical_availability",
                self.critical_availability.as_deref(),
                defaults.critical_availability,
            )?,
        };
        validate_thresholds(&thresholds)?;
        Ok(thresholds)
    }
}

struct Selection {
    period: PeriodFilter,
    thresholds: Thresholds,
    filtered: RecordSet,
}

fn select(state: &AppState, query: &DashboardQuery) -> InventoryResult<Selection> {
    let period = query.filter_state(&state.inventory)?.period();
    let thresholds = query.thresholds(&state.config.thresholds)?;
    let filtered = apply_filters(&state.inventory, period);
    Ok(Selection {
        period,
        thresholds,
        filtered,
    })
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ===== Responses =====

#[derive(Debug, Serialize)]
pub struct ViewResponse<T, C = ()> {
    pub period: PeriodFilter,
    pub record_count: usize,
    pub notice: Option<String>,
    pub rows: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<C>,
}

impl<T, C> ViewResponse<T, C> {
    fn new(selection: &Selection, rows: Vec<T>) -> Self {
        Self {
            period: selection.period,
            record_count: selection.filtered.len(),
            notice: selection
                .filtered
                .is_empty()
                .then(|| NO_DATA_NOTICE.to_string()),
            rows,
            chart: None,
        }
    }

    fn with_chart(mut self, chart: C) -> Self {
        self.chart = Some(chart);
        self
    }
}

#[derive(Debug, Serialize)]
pub struct OverviewDisplay {
    pub distinct_products: String,
    pub total_physical_quantity: String,
    pub total_stock_value: String,
}

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub period: PeriodFilter,
    pub record_count: usize,
    pub notice: Option<String>,
    pub totals: OverviewTotals,
    pub display: OverviewDisplay,
}

// ===== Full snapshot =====

/// GET /api/v1/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<DashboardSnapshot>> {
    let period = query.filter_state(&state.inventory)?.period();
    let thresholds = query.thresholds(&state.config.thresholds)?;

    let snapshot = build_snapshot(&state.inventory, period, &thresholds, today())?;
    state.metrics.view_served("dashboard");
    info!(?period, records = snapshot.record_count, "Dashboard computed");

    Ok(Json(snapshot))
}

// ===== Overview =====

/// GET /api/v1/dashboard/overview
pub async fn get_overview(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<OverviewResponse>> {
    let selection = select(&state, &query)?;
    let totals = overview_totals(&selection.filtered);
    state.metrics.view_served("overview");

    Ok(Json(OverviewResponse {
        period: selection.period,
        record_count: selection.filtered.len(),
        notice: selection
            .filtered
            .is_empty()
            .then(|| NO_DATA_NOTICE.to_string()),
        display: OverviewDisplay {
            distinct_products: format_quantity(totals.distinct_products as f64),
            total_physical_quantity: format_quantity(totals.total_physical_quantity),
            total_stock_value: format_currency(totals.total_stock_value),
        },
        totals,
    }))
}

// ===== Manufacturers =====

/// GET /api/v1/dashboard/top-manufacturers
pub async fn get_top_manufacturers(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<ViewResponse<ManufacturerQuantity, Vec<ChartPoint>>>> {
    let selection = select(&state, &query)?;
    let rows = top_manufacturers(&selection.filtered);
    let chart = top_manufacturers_chart(&rows);
    state.metrics.view_served("top_manufacturers");

    Ok(Json(ViewResponse::new(&selection, rows).with_chart(chart)))
}

/// GET /api/v1/dashboard/manufacturers
pub async fn get_manufacturer_performance(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<ViewResponse<ManufacturerPerformance>>> {
    let selection = select(&state, &query)?;
    let rows = manufacturer_performance(&selection.filtered);
    state.metrics.view_served("manufacturer_performance");

    Ok(Json(ViewResponse::new(&selection, rows)))
}

// ===== Availability vs. demand =====

/// GET /api/v1/dashboard/quantities
pub async fn get_quantity_comparison(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<ViewResponse<ProductQuantities>>> {
    let selection = select(&state, &query)?;
    let rows = quantity_comparison(&selection.filtered);
    state.metrics.view_served("quantity_comparison");

    Ok(Json(ViewResponse::new(&selection, rows)))
}

/// GET /api/v1/dashboard/low-availability
pub async fn get_low_availability(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<ViewResponse<LowAvailabilityRow>>> {
    let selection = select(&state, &query)?;
    let rows = low_availability(&selection.filtered, selection.thresholds.low_availability);
    state.metrics.view_served("low_availability");

    Ok(Json(ViewResponse::new(&selection, rows)))
}

/// GET /api/v1/dashboard/critical
pub async fn get_critical_products(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<ViewResponse<CriticalProductRow, Vec<ChartSeries>>>> {
    let selection = select(&state, &query)?;
    let rows = critical_products(&selection.filtered, selection.thresholds.critical_availability);
    let chart = critical_chart(&rows);
    state.metrics.view_served("critical_products");

    Ok(Json(ViewResponse::new(&selection, rows).with_chart(chart)))
}

// ===== Damage and stale stock =====

/// GET /api/v1/dashboard/damage
pub async fn get_damage(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<ViewResponse<DamageRow>>> {
    let selection = select(&state, &query)?;
    let rows = damage_analysis(&selection.filtered);
    state.metrics.view_served("damage");

    Ok(Json(ViewResponse::new(&selection, rows)))
}

/// GET /api/v1/dashboard/stale-stock
pub async fn get_stale_stock(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<ViewResponse<StaleStockRow>>> {
    let selection = select(&state, &query)?;
    let rows = stale_stock(&selection.filtered, selection.thresholds.stale_days, today());
    state.metrics.view_served("stale_stock");

    Ok(Json(ViewResponse::new(&selection, rows)))
}

// ===== Threshold selectors =====

/// GET /api/v1/dashboard/thresholds
pub async fn get_threshold_bounds(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<ThresholdBounds>> {
    let period = query.filter_state(&state.inventory)?.period();
    let filtered = apply_filters(&state.inventory, period);

    Ok(Json(ThresholdBounds::for_records(&filtered)))
}
