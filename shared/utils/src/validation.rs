use crate::error::{InventoryError, InventoryResult};
use estoque_models::{month_from_label, Thresholds};
use validator::{Validate, ValidationErrors};

pub fn validate_model<T: Validate>(model: &T) -> InventoryResult<()> {
    match model.validate() {
        Ok(()) => Ok(()),
        Err(errors) => {
            let field = errors
                .field_errors()
                .keys()
                .next()
                .map(|field| field.to_string())
                .unwrap_or_else(|| "model".to_string());
            Err(InventoryError::validation(field, format_validation_errors(&errors)))
        }
    }
}

pub fn validate_thresholds(thresholds: &Thresholds) -> InventoryResult<()> {
    validate_model(thresholds)
}

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();

    let mut field_errors: Vec<_> = errors.field_errors().into_iter().collect();
    field_errors.sort_by_key(|(field, _)| *field);

    for (field, field_errors) in field_errors {
        for error in field_errors {
            let message = match (&error.message, error.code.as_ref()) {
                (Some(message), _) => message.to_string(),
                (None, "range") => format!("Value out of range for field '{}'", field),
                (None, "required") => format!("Field '{}' is required", field),
                (None, code) => format!("Validation failed for field '{}': {}", field, code),
            };
            messages.push(message);
        }
    }

    messages.join(", ")
}

/// Parses a month given either as a number (`1`..`12`) or a selector label (`Fev`).
pub fn parse_month(value: &str) -> InventoryResult<u32> {
    let trimmed = value.trim();
    let month = match trimmed.parse::<u32>() {
        Ok(month) => Some(month),
        Err(_) => month_from_label(trimmed),
    };

    match month {
        Some(month) if (1..=12).contains(&month) => Ok(month),
        _ => Err(InventoryError::validation(
            "month",
            format!("'{}' is not a month. Expected 1-12 or a label such as 'Jan'", trimmed),
        )),
    }
}

pub fn parse_year(value: &str) -> InventoryResult<i32> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| InventoryError::validation("year", format!("'{}' is not a year", value.trim())))
}

/// Parses a threshold override; range checks happen in [`validate_thresholds`].
pub fn parse_threshold(field: &str, value: &str) -> InventoryResult<i64> {
    value.trim().parse::<i64>().map_err(|_| {
        InventoryError::validation(field, format!("'{}' is not a whole number", value.trim()))
    })
}
