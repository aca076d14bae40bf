use crate::application::loan::LoanServiceError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API layer error type.
///
/// Maps application errors onto HTTP responses. Lookup misses become a 404
/// with an empty body; anything else surfaces as a generic 500 so that
/// store internals never leak to the client.
#[derive(Debug)]
pub enum ApiError {
    NotFound,
    Internal(LoanServiceError),
}

impl From<LoanServiceError> for ApiError {
    fn from(err: LoanServiceError) -> Self {
        ApiError::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("An unexpected error occurred")),
            )
                .into_response(),
        }
    }
}
