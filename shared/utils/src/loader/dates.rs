//! Tolerant purchase-date parsing.
//!
//! Accepts the shapes a spreadsheet export usually produces. Slash dates are
//! read month-first and fall back to day-first when month-first is impossible
//! (`25/01/2024`). Anything that does not parse yields `None` and the row is
//! dropped by the loader.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Day zero of the spreadsheet serial calendar (1900 date system, leap-bug adjusted).
fn serial_epoch() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1899, 12, 30)
}

pub fn parse_purchase_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.date_naive());
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime.date());
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// Converts a spreadsheet serial day number to a date. The time-of-day fraction is discarded.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    serial_epoch()?.checked_add_signed(Duration::days(serial.trunc() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_iso_dates() {
        assert_eq!(parse_purchase_date("2024-01-10"), date(2024, 1, 10));
        assert_eq!(parse_purchase_date(" 2024/06/01 "), date(2024, 6, 1));
        assert_eq!(parse_purchase_date("2023-03-01 14:30:00"), date(2023, 3, 1));
        assert_eq!(parse_purchase_date("2023-03-01T08:00:00"), date(2023, 3, 1));
        assert_eq!(parse_purchase_date("2023-03-01T08:00:00-03:00"), date(2023, 3, 1));
    }

    #[test]
    fn test_slash_dates_prefer_month_first() {
        assert_eq!(parse_purchase_date("02/03/2024"), date(2024, 2, 3));
        assert_eq!(parse_purchase_date("25/01/2024"), date(2024, 1, 25));
        assert_eq!(parse_purchase_date("25/01/2024 10:15"), date(2024, 1, 25));
    }

    #[test]
    fn test_day_first_with_other_separators() {
        assert_eq!(parse_purchase_date("15-08-2022"), date(2022, 8, 15));
        assert_eq!(parse_purchase_date("15.08.2022"), date(2022, 8, 15));
    }

    #[test]
    fn test_unparseable_dates() {
        assert_eq!(parse_purchase_date(""), None);
        assert_eq!(parse_purchase_date("sem data"), None);
        assert_eq!(parse_purchase_date("2024-13-01"), None);
        assert_eq!(parse_purchase_date("31/31/2024"), None);
    }

    #[test]
    fn test_excel_serial() {
        assert_eq!(excel_serial_to_date(45301.0), date(2024, 1, 10));
        assert_eq!(excel_serial_to_date(45301.75), date(2024, 1, 10));
        assert_eq!(excel_serial_to_date(0.0), None);
        assert_eq!(excel_serial_to_date(f64::NAN), None);
    }
}
