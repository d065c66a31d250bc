//! Error types for Libris server

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::models::user::Role;

/// Machine-oriented error codes carried in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Unauthenticated,
    Forbidden,
    NotFound,
    Conflict,
    BadValue,
    Unexpected,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or unusable credential
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Credential present but not acceptable (bad signature, wrong role)
    #[error("Authorization failed: {message}")]
    Authorization { message: String, role: Option<Role> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Forbidden without echoing a role
    pub fn forbidden(message: impl Into<String>) -> Self {
        AppError::Authorization {
            message: message.into(),
            role: None,
        }
    }

    /// Forbidden because the caller holds `role`, which is echoed back
    pub fn wrong_role(role: Role) -> Self {
        AppError::Authorization {
            message: "Forbidden".to_string(),
            role: Some(role),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::Authorization { .. } => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: String,
    pub message: String,
    /// Caller's role, present on role mismatches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (code, message, role) = match self {
            AppError::Authentication(msg) => (ErrorCode::Unauthenticated, msg, None),
            AppError::Authorization { message, role } => (ErrorCode::Forbidden, message, role),
            AppError::NotFound(msg) => (ErrorCode::NotFound, msg, None),
            AppError::Validation(msg) => (ErrorCode::BadValue, msg, None),
            AppError::Conflict(msg) => (ErrorCode::Conflict, msg, None),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (ErrorCode::Unexpected, "Internal Server Error".to_string(), None)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (ErrorCode::Unexpected, "Internal Server Error".to_string(), None)
            }
        };

        let body = Json(ErrorResponse {
            status: status.as_u16(),
            error: format!("{:?}", code),
            message,
            role,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::Authentication("x".into()).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::forbidden("x").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::wrong_role(Role::Member).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Conflict("x".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::Validation("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_internal_detail_is_not_leaked() {
        let response = AppError::Internal("pool exhausted at 10.0.0.3".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Internal Server Error");
        assert_eq!(body["error"], "Unexpected");
        assert!(body.get("role").is_none());
    }

    #[tokio::test]
    async fn test_wrong_role_echoes_role() {
        let response = AppError::wrong_role(Role::Member).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], 403);
        assert_eq!(body["message"], "Forbidden");
        assert_eq!(body["role"], "member");
    }
}
