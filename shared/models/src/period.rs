//! Purchase-period filters and month labels.

use serde::{Deserialize, Serialize};

use crate::record::InventoryRecord;

/// Month abbreviations shown by the month selector, January first.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// Label for a 1-based month number.
pub fn month_label(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_ABBREVIATIONS.get(index).copied()
}

/// Month number for a label, case-insensitive.
pub fn month_from_label(label: &str) -> Option<u32> {
    let label = label.trim();
    MONTH_ABBREVIATIONS
        .iter()
        .position(|abbrev| abbrev.eq_ignore_ascii_case(label))
        .map(|index| index as u32 + 1)
}

/// Narrowing applied to a record set by purchase date.
///
/// A month can only be expressed together with a year, so a month-only filter
/// cannot be constructed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum PeriodFilter {
    #[default]
    All,
    Year { year: i32 },
    YearMonth { year: i32, month: u32 },
}

impl PeriodFilter {
    pub fn year(&self) -> Option<i32> {
        match self {
            Self::All => None,
            Self::Year { year } | Self::YearMonth { year, .. } => Some(*year),
        }
    }

    pub fn month(&self) -> Option<u32> {
        match self {
            Self::YearMonth { month, .. } => Some(*month),
            _ => None,
        }
    }

    pub fn matches(&self, record: &InventoryRecord) -> bool {
        match self {
            Self::All => true,
            Self::Year { year } => record.purchase_year() == *year,
            Self::YearMonth { year, month } => {
                record.purchase_year() == *year && record.purchase_month() == *month
            }
        }
    }
}
