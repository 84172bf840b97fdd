//! Filter engine: narrows a record set by purchase year and month.

use std::collections::BTreeSet;

use estoque_models::{month_label, PeriodFilter, RecordSet};
use estoque_utils::{InventoryError, InventoryResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Records whose purchase date falls in `period`, in their original order.
pub fn apply_filters(records: &RecordSet, period: PeriodFilter) -> RecordSet {
    let filtered = records.retain_where(|record| period.matches(record));
    debug!(
        ?period,
        input = records.len(),
        output = filtered.len(),
        "Applied period filter"
    );
    filtered
}

/// Distinct purchase years, most recent first.
pub fn available_years(records: &RecordSet) -> Vec<i32> {
    let years: BTreeSet<i32> = records.iter().map(|r| r.purchase_year()).collect();
    years.into_iter().rev().collect()
}

/// Distinct purchase months within `year`, January first. Empty when no year is selected.
pub fn available_months(records: &RecordSet, year: Option<i32>) -> Vec<u32> {
    let Some(year) = year else {
        return Vec::new();
    };
    let months: BTreeSet<u32> = records
        .iter()
        .filter(|r| r.purchase_year() == year)
        .map(|r| r.purchase_month())
        .collect();
    months.into_iter().collect()
}

/// Current value of the year and month selectors.
///
/// `None` means "all". The month selector depends on the year selector: it
/// can only hold a month present in the selected year, and it goes back to
/// "all" whenever the year changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    year: Option<i32>,
    month: Option<u32>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a state from raw selector values without checking them against
    /// the data. A month without a year is ignored.
    pub fn from_selection(year: Option<i32>, month: Option<u32>) -> Self {
        match year {
            Some(year) => Self { year: Some(year), month },
            None => Self { year: None, month: None },
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn month(&self) -> Option<u32> {
        self.month
    }

    /// Selects a year (or "all") present in `records`. Always resets the month.
    pub fn select_year(&mut self, records: &RecordSet, year: Option<i32>) -> InventoryResult<()> {
        if let Some(year) = year {
            if !records.iter().any(|r| r.purchase_year() == year) {
                return Err(InventoryError::validation(
                    "year",
                    format!("No purchases recorded in {}", year),
                ));
            }
        }
        self.year = year;
        self.month = None;
        Ok(())
    }

    /// Selects a month (or "all") among the months offered for the current year.
    pub fn select_month(&mut self, records: &RecordSet, month: Option<u32>) -> InventoryResult<()> {
        let Some(month) = month else {
            self.month = None;
            return Ok(());
        };
        if self.year.is_none() {
            return Err(InventoryError::InvalidFilterCombination);
        }
        if !available_months(records, self.year).contains(&month) {
            let label = month_label(month).unwrap_or("?");
            return Err(InventoryError::validation(
                "month",
                format!("Month {} ({}) is not available for the selected year", month, label),
            ));
        }
        self.month = Some(month);
        Ok(())
    }

    pub fn period(&self) -> PeriodFilter {
        match (self.year, self.month) {
            (None, _) => PeriodFilter::All,
            (Some(year), None) => PeriodFilter::Year { year },
            (Some(year), Some(month)) => PeriodFilter::YearMonth { year, month },
        }
    }
}
