//! API handlers for Libris REST endpoints

pub mod auth;
pub mod books;
pub mod dashboard;
pub mod health;
pub mod members;
pub mod openapi;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    middleware::Next,
    response::Response,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{policy::Operation, user::Principal},
    AppState,
};

/// Short status body returned by every mutating endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub status: u16,
    pub message: String,
}

impl MessageResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
        }
    }
}

/// JSON request body whose rejections are reported as [`AppError`]
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Second whitespace-delimited segment of an Authorization header value
pub fn bearer_token(header: &str) -> Option<&str> {
    header.split_whitespace().nth(1)
}

/// Access gate: turns the bearer token into a [`Principal`] stored in the
/// request extensions, or rejects the request before any handler runs
pub async fn access_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| AppError::Authentication("Unauthorized".to_string()))?;

    let principal = state.services.tokens.verify(token)?;

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

/// Role check for one operation, run after the access gate
pub async fn enforce_policy(
    State(operation): State<Operation>,
    request: Request,
    next: Next,
) -> AppResult<Response> {
    let principal = request
        .extensions()
        .get::<Principal>()
        .ok_or_else(|| AppError::Authentication("Unauthorized".to_string()))?;

    principal.authorize(operation)?;
    Ok(next.run(request).await)
}

/// Extractor for the principal attached by the access gate
pub struct AuthenticatedUser(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or_else(|| AppError::Authentication("Unauthorized".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_segments() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("Bearer   abc"), Some("abc"));
        // The scheme word itself is not checked
        assert_eq!(bearer_token("Token abc"), Some("abc"));
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token(""), None);
    }
}
