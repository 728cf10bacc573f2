// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::services::CategoryInputError;

/// HTTP API error with a status code and a fixed, client-safe message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    InvalidJson(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::InvalidJson(msg)
            | ApiError::NotFound(msg)
            | ApiError::InternalServerError(msg) => msg,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({ "error": self.message() })
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

impl From<CategoryInputError> for ApiError {
    fn from(err: CategoryInputError) -> Self {
        match err {
            CategoryInputError::InvalidJson(ref cause) => {
                tracing::debug!("Rejected category body: {}", cause);
                ApiError::invalid_json(err.to_string())
            }
            CategoryInputError::MissingField => ApiError::bad_request(err.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_error_envelope() {
        let err = ApiError::not_found("Product not found");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_json(), json!({ "error": "Product not found" }));
    }

    #[test]
    fn category_input_errors_map_to_bad_request() {
        let missing: ApiError = CategoryInputError::MissingField.into();
        assert_eq!(missing, ApiError::bad_request("Missing code or name"));

        let parse_err = serde_json::from_str::<Value>("{").unwrap_err();
        let invalid: ApiError = CategoryInputError::InvalidJson(parse_err).into();
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid.message(), "Invalid JSON body");
    }
}
