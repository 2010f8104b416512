//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use hearth_domain::error::{HearthError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Failure of an API handler.
#[derive(Debug)]
pub enum ApiError {
    /// Error raised by a service or by domain validation.
    Domain(HearthError),
    /// The request needs a current user and carried none.
    Unauthenticated,
}

impl From<HearthError> for ApiError {
    fn from(err: HearthError) -> Self {
        Self::Domain(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Domain(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "authentication required".to_string(),
            ),
            Self::Domain(HearthError::Validation(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Domain(HearthError::NotFound(err)) => (StatusCode::NOT_FOUND, err.to_string()),
            Self::Domain(HearthError::Conflict(err)) => (StatusCode::CONFLICT, err.to_string()),
            Self::Domain(HearthError::Storage(err)) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
