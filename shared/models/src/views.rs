//! Output rows of the aggregate views.
//!
//! Each view is either a list of named-column rows (tables) or a list of
//! (category, value) pairs (charts). Numbers are left unformatted; display
//! formatting belongs to the presenter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::period::PeriodFilter;
use crate::thresholds::{ThresholdBounds, Thresholds};

// ===== Overview =====

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OverviewTotals {
    pub distinct_products: usize,
    pub total_physical_quantity: f64,
    pub total_stock_value: f64,
}

// ===== Manufacturers =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManufacturerQuantity {
    pub manufacturer: String,
    pub physical_quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManufacturerPerformance {
    pub manufacturer: String,
    pub total_physical_quantity: f64,
    pub total_damaged_quantity: f64,
    pub total_available_quantity: f64,
    pub total_requested_quantity: f64,
    pub product_count: usize,
}

// ===== Availability vs. demand =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductQuantities {
    pub product: String,
    pub physical_quantity: f64,
    pub requested_quantity: f64,
    pub reserved_quantity: f64,
    pub available_quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowAvailabilityRow {
    pub product: String,
    pub manufacturer: String,
    pub physical_quantity: f64,
    pub requested_quantity: f64,
    pub reserved_quantity: f64,
    pub available_quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalProductRow {
    pub product: String,
    pub manufacturer: String,
    pub physical_quantity: f64,
    pub requested_quantity: f64,
    pub available_quantity: f64,
}

// ===== Damage =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageRow {
    pub product: String,
    pub manufacturer: String,
    pub physical_quantity: f64,
    pub damaged_quantity: f64,
    /// Always finite; an undefined ratio is reported as 0.
    pub damage_pct: f64,
}

// ===== Stale stock =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaleStockRow {
    pub product: String,
    pub manufacturer: String,
    pub physical_quantity: f64,
    pub last_purchase_date: NaiveDate,
    pub days_since_last_purchase: i64,
}

// ===== Charts =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub category: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub points: Vec<ChartPoint>,
}

// ===== Snapshot =====

/// Every view computed from one filtered set in a single pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub period: PeriodFilter,
    pub thresholds: Thresholds,
    pub threshold_bounds: ThresholdBounds,
    pub record_count: usize,
    /// Set when the filtered set is empty.
    pub notice: Option<String>,
    pub overview: OverviewTotals,
    pub top_manufacturers: Vec<ManufacturerQuantity>,
    pub quantity_comparison: Vec<ProductQuantities>,
    pub low_availability: Vec<LowAvailabilityRow>,
    pub damage: Vec<DamageRow>,
    pub stale_stock: Vec<StaleStockRow>,
    pub critical_products: Vec<CriticalProductRow>,
    pub critical_chart: Vec<ChartSeries>,
    pub manufacturer_performance: Vec<ManufacturerPerformance>,
}

impl DashboardSnapshot {
    pub fn has_data(&self) -> bool {
        self.record_count > 0
    }
}
