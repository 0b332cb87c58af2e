//! Custom error types for the gateway service

use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::UpstreamError;
use thiserror::Error;
use tracing::error;

use crate::{filter::FilterError, models::ResponseEnvelope};

/// Custom error type for the gateway service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or empty required parameter
    #[error("{0}")]
    Validation(String),

    /// The upstream reported the resource as absent
    #[error("{0}")]
    NotFound(String),

    /// Any other upstream failure
    #[error(transparent)]
    Upstream(UpstreamError),
}

impl ApiError {
    /// HTTP status this error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::NotFound(resource) => ApiError::NotFound(format!("{} not found", resource)),
            other => ApiError::Upstream(other),
        }
    }
}

impl From<FilterError> for ApiError {
    fn from(err: FilterError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let ApiError::Upstream(err) = &self {
            error!("Upstream request failed: {}", err);
        }

        let body = Json(ResponseEnvelope::<()>::failure(self.to_string()));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
