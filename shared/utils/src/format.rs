//! Display formatting for the presenter.
//!
//! Brazilian convention: `.` groups thousands and `,` separates decimals.
//! The aggregator never formats; only presentation code calls these.

use num_format::{Locale, ToFormattedString};

pub const CURRENCY_SYMBOL: &str = "R$";

/// Formats a monetary value as `R$ 1.234,56`. Missing values render as an empty string.
pub fn format_currency(value: f64) -> String {
    format_currency_with(value, CURRENCY_SYMBOL)
}

pub fn format_currency_with(value: f64, symbol: &str) -> String {
    if value.is_nan() {
        return String::new();
    }
    format!("{} {}", symbol, format_decimal(value, 2))
}

/// Formats a unit count with no decimals, e.g. `12.345`.
pub fn format_quantity(value: f64) -> String {
    if value.is_nan() {
        return String::new();
    }
    format_decimal(value, 0)
}

/// Formats a percentage with one decimal, e.g. `12,5%`.
pub fn format_percentage(value: f64) -> String {
    if value.is_nan() {
        return String::new();
    }
    format!("{}%", format_decimal(value, 1))
}

fn format_decimal(value: f64, decimals: usize) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "∞".to_string() } else { "-∞".to_string() };
    }

    let rendered = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match rendered.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (rendered.as_str(), None),
    };
    let grouped = integer
        .parse::<u128>()
        .map(|whole| whole.to_formatted_string(&Locale::pt))
        .unwrap_or_else(|_| integer.to_string());

    // No sign when the value rounds to zero
    let negative = value < 0.0 && rendered.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };

    match fraction {
        Some(fraction) => format!("{}{},{}", sign, grouped, fraction),
        None => format!("{}{}", sign, grouped),
    }
}
