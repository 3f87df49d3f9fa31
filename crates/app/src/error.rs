use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use catalog_core::ValidationError;
use catalog_storage::CatalogError;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Request-level failures, rendered as `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Product not found")]
    NotFound,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Invalid JSON body")]
    MalformedBody,
    #[error("Invalid query string")]
    MalformedQuery,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::MalformedBody | Self::MalformedQuery => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(_) => Self::NotFound,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
