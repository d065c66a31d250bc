//! Member management endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::user::{AddMemberRequest, DeleteMemberRequest, UpdateMemberRequest},
};

use super::{JsonBody, MessageResponse};

/// Create a member account (librarian)
#[utoipa::path(
    post,
    path = "/addmember",
    tag = "members",
    security(("bearer_auth" = [])),
    request_body = AddMemberRequest,
    responses(
        (status = 201, description = "Member added", body = MessageResponse),
        (status = 403, description = "Invalid token or not a librarian", body = crate::error::ErrorResponse),
        (status = 409, description = "Username already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_member(
    State(state): State<crate::AppState>,
    JsonBody(request): JsonBody<AddMemberRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state.services.members.add_member(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(StatusCode::CREATED, "Member added")),
    ))
}

/// Change a user's username and password (librarian)
#[utoipa::path(
    put,
    path = "/updatemembers",
    tag = "members",
    security(("bearer_auth" = [])),
    request_body = UpdateMemberRequest,
    responses(
        (status = 200, description = "Member updated", body = MessageResponse),
        (status = 403, description = "Invalid token or not a librarian", body = crate::error::ErrorResponse),
        (status = 404, description = "Member not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_member(
    State(state): State<crate::AppState>,
    JsonBody(request): JsonBody<UpdateMemberRequest>,
) -> AppResult<Json<MessageResponse>> {
    state.services.members.update_member(request).await?;
    Ok(Json(MessageResponse::new(StatusCode::OK, "Member updated")))
}

/// Delete a user record (any authenticated caller)
#[utoipa::path(
    delete,
    path = "/deletemember",
    tag = "members",
    security(("bearer_auth" = [])),
    request_body = DeleteMemberRequest,
    responses(
        (status = 200, description = "Member deleted", body = MessageResponse),
        (status = 404, description = "Member not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_member(
    State(state): State<crate::AppState>,
    JsonBody(request): JsonBody<DeleteMemberRequest>,
) -> AppResult<Json<MessageResponse>> {
    state.services.members.delete_member(&request.record_id).await?;
    Ok(Json(MessageResponse::new(StatusCode::OK, "Member deleted")))
}
