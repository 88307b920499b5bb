//! Error types for the Library API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Request must contain JSON data")]
    MalformedRequest,

    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("{0}")]
    NotFound(String),

    #[error("Endpoint not found")]
    RouteNotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn book_not_found(id: i64) -> Self {
        AppError::NotFound(format!("Book with ID {} not found", id))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedRequest | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::RouteNotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error summary
    pub error: String,
    /// Field-level violations, present only on validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Validation(details) => ErrorResponse {
                error: "Validation failed".to_string(),
                details: Some(details),
            },
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ErrorResponse::new("Internal server error")
            }
            other => ErrorResponse::new(other.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(AppError::MalformedRequest.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Validation(vec![]).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::book_not_found(7).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::RouteNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            AppError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_message_names_the_id() {
        assert_eq!(AppError::book_not_found(42).to_string(), "Book with ID 42 not found");
    }

    #[test]
    fn error_body_omits_details_unless_present() {
        let plain = serde_json::to_value(ErrorResponse::new("Endpoint not found")).unwrap();
        assert_eq!(plain, serde_json::json!({ "error": "Endpoint not found" }));

        let detailed = serde_json::to_value(ErrorResponse {
            error: "Validation failed".into(),
            details: Some(vec!["'title' is required".into()]),
        })
        .unwrap();
        assert_eq!(detailed["details"][0], "'title' is required");
    }
}
