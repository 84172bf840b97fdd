use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InventoryError {
    #[error("Inventory file not found: {path}")]
    FileNotFound { path: String },

    #[error("Inventory file is empty or has no rows with a valid purchase date: {path}")]
    EmptyDataset { path: String },

    #[error("Malformed inventory input: {message}")]
    MalformedInput { message: String },

    #[error("A month filter requires a specific year")]
    InvalidFilterCombination,

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl InventoryError {
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn empty_dataset(path: impl Into<String>) -> Self {
        Self::EmptyDataset { path: path.into() }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => "FILE_NOT_FOUND",
            Self::EmptyDataset { .. } => "EMPTY_DATASET",
            Self::MalformedInput { .. } => "MALFORMED_INPUT",
            Self::InvalidFilterCombination => "INVALID_FILTER_COMBINATION",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::Internal { .. } => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::FileNotFound { .. } => 404,
            Self::EmptyDataset { .. } => 422,
            Self::MalformedInput { .. } => 422,
            Self::InvalidFilterCombination => 400,
            Self::Validation { .. } => 400,
            Self::Configuration { .. } => 500,
            Self::Internal { .. } => 500,
        }
    }
}

pub type InventoryResult<T> = Result<T, InventoryError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl From<InventoryError> for ErrorResponse {
    fn from(error: InventoryError) -> Self {
        let details = match &error {
            InventoryError::Validation { field, .. } => Some(serde_json::json!({ "field": field })),
            _ => None,
        };
        Self {
            error: error.error_code().to_string(),
            code: error.error_code().to_string(),
            message: error.to_string(),
            details,
        }
    }
}

// Conversion from common error types
impl From<csv::Error> for InventoryError {
    fn from(error: csv::Error) -> Self {
        Self::malformed(error.to_string())
    }
}

impl From<calamine::Error> for InventoryError {
    fn from(error: calamine::Error) -> Self {
        Self::malformed(error.to_string())
    }
}

impl From<config::ConfigError> for InventoryError {
    fn from(error: config::ConfigError) -> Self {
        Self::configuration(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_errors_are_malformed() {
        let error = InventoryError::from(calamine::Error::Msg("corrupt sheet"));
        assert_eq!(error.error_code(), "MALFORMED_INPUT");
        assert_eq!(error.http_status_code(), 422);
    }

    #[test]
    fn test_error_response_carries_code() {
        let response = ErrorResponse::from(InventoryError::InvalidFilterCombination);
        assert_eq!(response.code, "INVALID_FILTER_COMBINATION");
        assert!(response.details.is_none());

        let response = ErrorResponse::from(InventoryError::validation("month", "not in year"));
        assert_eq!(response.code, "VALIDATION_ERROR");
        assert_eq!(response.details.unwrap()["field"], "month");
    }
}
