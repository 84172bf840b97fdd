//! User-adjustable limits for the threshold views.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::record::RecordSet;

pub const DEFAULT_LOW_AVAILABILITY: i64 = 10;
pub const DEFAULT_STALE_DAYS: i64 = 180;
pub const DEFAULT_CRITICAL_AVAILABILITY: i64 = 5;

pub const MIN_STALE_DAYS: i64 = 30;
pub const MAX_STALE_DAYS: i64 = 730;

/// Upper bound offered for the low-availability limit when the set is empty.
pub const FALLBACK_LOW_AVAILABILITY_MAX: i64 = 1000;
/// Upper bound offered for the critical limit when the set is empty.
pub const FALLBACK_CRITICAL_MAX: i64 = 50;

/// Limits applied by the low-availability, stale-stock and critical views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Thresholds {
    /// Records with `0 <= available < low_availability` are listed.
    #[validate(range(min = 0, message = "Low availability limit cannot be negative"))]
    pub low_availability: i64,
    /// Records last purchased more than this many days ago are stale.
    #[validate(range(min = 30, max = 730, message = "Stale stock limit must be between 30 and 730 days"))]
    pub stale_days: i64,
    /// Records with `available < critical_availability` and open requests are critical.
    #[validate(range(min = 0, message = "Critical availability limit cannot be negative"))]
    pub critical_availability: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low_availability: DEFAULT_LOW_AVAILABILITY,
            stale_days: DEFAULT_STALE_DAYS,
            critical_availability: DEFAULT_CRITICAL_AVAILABILITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bound {
    pub min: i64,
    pub max: i64,
    pub default: i64,
}

/// Selector ranges for each threshold, derived from the filtered set.
///
/// These drive the input widgets only; the views accept any value that passes
/// [`Thresholds`] validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdBounds {
    pub low_availability: Bound,
    pub stale_days: Bound,
    pub critical_availability: Bound,
}

impl ThresholdBounds {
    pub fn for_records(records: &RecordSet) -> Self {
        // Truncated toward zero like an integer cast, never below the minimum.
        let max_available = records
            .max_available_quantity()
            .map(|max| (max.trunc() as i64).max(0));

        Self {
            low_availability: Bound {
                min: 0,
                max: max_available.unwrap_or(FALLBACK_LOW_AVAILABILITY_MAX),
                default: DEFAULT_LOW_AVAILABILITY,
            },
            stale_days: Bound {
                min: MIN_STALE_DAYS,
                max: MAX_STALE_DAYS,
                default: DEFAULT_STALE_DAYS,
            },
            critical_availability: Bound {
                min: 0,
                max: max_available.unwrap_or(FALLBACK_CRITICAL_MAX),
                default: DEFAULT_CRITICAL_AVAILABILITY,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::InventoryRecord;
    use chrono::NaiveDate;

    fn with_available(values: &[f64]) -> RecordSet {
        values
            .iter()
            .map(|available| InventoryRecord {
                product: "Seringa 5ml".to_string(),
                manufacturer: "BD".to_string(),
                physical_quantity: 1.0,
                requested_quantity: 0.0,
                reserved_quantity: 0.0,
                available_quantity: *available,
                damaged_quantity: 0.0,
                unit_net_cost: 1.0,
                last_purchase_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            })
            .collect()
    }

    #[test]
    fn test_thresholds_validation() {
        assert!(Thresholds::default().validate().is_ok());

        let too_short = Thresholds { stale_days: 29, ..Thresholds::default() };
        assert!(too_short.validate().is_err());

        let too_long = Thresholds { stale_days: 731, ..Thresholds::default() };
        assert!(too_long.validate().is_err());

        let negative = Thresholds { critical_availability: -1, ..Thresholds::default() };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_bounds_follow_max_available() {
        let bounds = ThresholdBounds::for_records(&with_available(&[3.0, 41.7, -2.0]));
        assert_eq!(bounds.low_availability.max, 41);
        assert_eq!(bounds.critical_availability.max, 41);
        assert_eq!(bounds.stale_days.min, 30);
        assert_eq!(bounds.stale_days.max, 730);
    }

    #[test]
    fn test_bounds_fallback_when_empty() {
        let bounds = ThresholdBounds::for_records(&RecordSet::default());
        assert_eq!(bounds.low_availability.max, 1000);
        assert_eq!(bounds.critical_availability.max, 50);
    }

    #[test]
    fn test_bounds_never_below_zero() {
        let bounds = ThresholdBounds::for_records(&with_available(&[-10.0, -4.0]));
        assert_eq!(bounds.low_availability.max, 0);
    }

    #[test]
    fn test_partial_thresholds_deserialize_with_defaults() {
        let thresholds: Thresholds = serde_json::from_str(r#"{"stale_days": 365}"#).unwrap();
        assert_eq!(thresholds.stale_days, 365);
        assert_eq!(thresholds.low_availability, 10);
    }
}
