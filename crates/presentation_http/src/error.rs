//! API error handling
//!
//! Every failure is rendered as `{"error": <message>, "code": <kind>}`.
//! Messages are the user-facing `LookupError` texts; upstream details stay
//! in the logs.

use application::LookupError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request itself is unusable (blank address)
    #[error("Bad request: {message}")]
    BadRequest {
        /// User-facing message
        message: String,
        /// Machine-readable code
        code: &'static str,
    },

    /// The request was understood but no forecast could be produced
    #[error("Unprocessable: {message}")]
    Unprocessable {
        /// User-facing message
        message: String,
        /// Machine-readable code
        code: &'static str,
    },
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
}

impl ApiError {
    /// HTTP status for this error
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (Self::BadRequest { message, code } | Self::Unprocessable { message, code }) = self;

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        let code = err.kind();
        let message = err.to_string();
        match err {
            LookupError::EmptyInput => Self::BadRequest { message, code },
            LookupError::NoLocationFound
            | LookupError::InvalidZip(_)
            | LookupError::UpstreamUnavailable => Self::Unprocessable { message, code },
        }
    }
}
