use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use estoque_utils::{ErrorResponse, InventoryError};

/// Handler error: an [`InventoryError`] rendered as a JSON body with its HTTP status.
#[derive(Debug)]
pub struct ApiError(pub InventoryError);

impl From<InventoryError> for ApiError {
    fn from(error: InventoryError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse::from(self.0))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
