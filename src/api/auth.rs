//! Signup and login endpoints (outside the access gate)

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::user::{LoginRequest, Role, SignupRequest},
};

use super::{JsonBody, MessageResponse};

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub status: u16,
    pub message: String,
    /// Bearer token for the Authorization header
    pub token: String,
    pub role: Role,
    pub username: String,
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/signup",
    tag = "auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created", body = MessageResponse),
        (status = 409, description = "Username already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn signup(
    State(state): State<crate::AppState>,
    JsonBody(request): JsonBody<SignupRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state.services.auth.signup(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(StatusCode::CREATED, "User created")),
    ))
}

/// Authenticate and receive a bearer token
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "No user matches username, password and role", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (token, principal) = state.services.auth.login(request).await?;

    Ok(Json(LoginResponse {
        status: StatusCode::OK.as_u16(),
        message: "Login successful".to_string(),
        token,
        role: principal.role,
        username: principal.username,
    }))
}
