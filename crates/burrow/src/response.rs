//! Failure responses
//!
//! Validation failures and handler errors leave the server the same way: a
//! status code plus a `{"error": message}` JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use burrow_schema::ValidationError;
use serde_json::{json, Value};

/// A request that could not be served
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    status: StatusCode,
    message: String,
}

impl ErrorResponse {
    /// 400, for input the client can fix
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// 500, for failures on the handler's side
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn body(&self) -> Value {
        json!({ "error": self.message })
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body())).into_response()
    }
}

// The structured path stays server side; the client sees the composed message.
impl From<ValidationError> for ErrorResponse {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.message())
    }
}

/// Typed access (`body_as`, `query_as`, ..) failing to deserialize
impl From<serde_json::Error> for ErrorResponse {
    fn from(err: serde_json::Error) -> Self {
        Self::bad_request(err.to_string())
    }
}
