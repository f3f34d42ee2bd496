//! Error type shared by the service layer and the HTTP boundary.

use std::error::Error;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::store::StoreError;

/// Error type for API operations. Each variant carries the client-facing
/// message and maps to a fixed HTTP status.
#[derive(Debug)]
pub enum ApiError {
    /// Request payload failed validation. `errors` lists every failed field
    /// check; `message` is the first of them.
    Validation {
        message: String,
        errors: Vec<String>,
    },
    /// Missing or unverifiable credentials.
    Authentication(String),
    /// Authenticated but not permitted.
    Forbidden(String),
    /// Target record does not exist.
    NotFound(String),
    /// Uniqueness violation (duplicate email).
    Conflict(String),
    /// Purchase exceeds available stock.
    OutOfStock(String),
    /// Document store failure.
    Storage(StoreError),
    /// Anything else that should surface as a generic server failure.
    Internal(String),
}

impl ApiError {
    /// Validation failure from a list of field errors. The first error
    /// doubles as the headline message.
    pub fn validation(errors: Vec<String>) -> Self {
        let message = errors
            .first()
            .cloned()
            .unwrap_or_else(|| "Validation failed".to_string());
        ApiError::Validation { message, errors }
    }

    /// Validation failure with a single message and no field list.
    pub fn invalid(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// Map this error to its HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Validation { .. } => 400,
            ApiError::Authentication(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::Conflict(_) => 409,
            ApiError::OutOfStock(_) => 400,
            ApiError::Storage(_) => 500,
            ApiError::Internal(_) => 500,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation { message, .. } => write!(f, "{}", message),
            ApiError::Authentication(msg) => write!(f, "{}", msg),
            ApiError::Forbidden(msg) => write!(f, "{}", msg),
            ApiError::NotFound(msg) => write!(f, "{}", msg),
            ApiError::Conflict(msg) => write!(f, "{}", msg),
            ApiError::OutOfStock(msg) => write!(f, "{}", msg),
            ApiError::Storage(e) => write!(f, "storage error: {}", e),
            ApiError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Storage(err)
    }
}

impl IntoResponse for ApiError {
    /// Render the uniform failure envelope. Server-side failures (500) log
    /// the detail and return a generic body.
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            let body = json!({ "success": false, "message": "Internal server error" });
            return (status, Json(body)).into_response();
        }

        let mut body = json!({ "success": false, "message": self.to_string() });
        if let ApiError::Validation { errors, .. } = &self {
            if !errors.is_empty() {
                body["errors"] = json!(errors);
            }
        }
        (status, Json(body)).into_response()
    }
}
