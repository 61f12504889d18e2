// HTTP API Error Types
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use crate::database::DatabaseError;
use crate::services::ServiceError;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    Validation(String),
    Duplicate(String),
    InvalidCredentials,

    // 401 Unauthorized
    Unauthenticated(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Duplicate(_) | ApiError::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::InvalidCredentials => "Invalid credentials",
            ApiError::Validation(msg)
            | ApiError::Duplicate(msg)
            | ApiError::Unauthenticated(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Internal(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Duplicate(_) => "DUPLICATE",
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::Unauthenticated(_) => "UNAUTHENTICATED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "error": self.message(),
            "code": self.error_code()
        })
    }
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        ApiError::Unauthenticated(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(msg) => ApiError::Validation(msg),
            ServiceError::DuplicateEmail | ServiceError::DuplicateDrawerName => {
                ApiError::Duplicate(err.to_string())
            }
            ServiceError::InvalidCredentials => ApiError::InvalidCredentials,
            ServiceError::NotFound => ApiError::not_found("Note not found"),
            ServiceError::Forbidden => ApiError::Forbidden("Not allowed to access this note".to_string()),
            ServiceError::Database(e) => e.into(),
            ServiceError::Password(e) => {
                tracing::error!("Password hashing error: {}", e);
                ApiError::internal("An error occurred while processing your request")
            }
            ServiceError::Token(e) => {
                tracing::error!("Token issuance error: {}", e);
                ApiError::internal("An error occurred while processing your request")
            }
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        // Don't expose internal store errors to clients
        tracing::error!("Database error: {}", err);
        ApiError::internal("Database error occurred")
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_status_codes() {
        let cases = [
            (ServiceError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::DuplicateEmail, StatusCode::BAD_REQUEST),
            (ServiceError::DuplicateDrawerName, StatusCode::BAD_REQUEST),
            (ServiceError::InvalidCredentials, StatusCode::BAD_REQUEST),
            (ServiceError::Forbidden, StatusCode::FORBIDDEN),
            (ServiceError::NotFound, StatusCode::NOT_FOUND),
            (ServiceError::Database(DatabaseError::Corrupt("x".into())), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status_code(), status);
        }
    }

    #[test]
    fn body_carries_error_message() {
        let body = ApiError::from(ServiceError::InvalidCredentials).to_json();
        assert_eq!(body["error"], "Invalid credentials");
        assert_eq!(body["code"], "INVALID_CREDENTIALS");
        assert_eq!(body["success"], false);
    }

    #[test]
    fn internal_details_are_not_leaked() {
        let err = ApiError::from(DatabaseError::Corrupt("owner_type='bogus'".into()));
        assert!(!err.message().contains("bogus"));
    }
}
