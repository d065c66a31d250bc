//! Dashboard endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{book::Book, user::User},
};

use super::AuthenticatedUser;

#[derive(Serialize, ToSchema)]
pub struct LibrarianDashboard {
    pub status: u16,
    pub message: String,
    pub books: Vec<Book>,
    /// All user records, librarians included
    pub members: Vec<User>,
}

#[derive(Serialize, ToSchema)]
pub struct MemberDashboard {
    pub status: u16,
    pub message: String,
    pub books: Vec<Book>,
    /// The caller's own record
    pub member: User,
}

/// Every book and every user (librarian)
#[utoipa::path(
    get,
    path = "/librarian",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard data", body = LibrarianDashboard),
        (status = 403, description = "Invalid token or not a librarian", body = crate::error::ErrorResponse)
    )
)]
pub async fn librarian_dashboard(
    State(state): State<crate::AppState>,
) -> AppResult<Json<LibrarianDashboard>> {
    let books = state.services.catalog.list_books().await?;
    let members = state.services.members.list_members().await?;

    Ok(Json(LibrarianDashboard {
        status: StatusCode::OK.as_u16(),
        message: "Success".to_string(),
        books,
        members,
    }))
}

/// Every book plus the caller's record (member)
#[utoipa::path(
    get,
    path = "/member",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard data", body = MemberDashboard),
        (status = 403, description = "Invalid token or not a member", body = crate::error::ErrorResponse),
        (status = 404, description = "Caller's record no longer exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn member_dashboard(
    State(state): State<crate::AppState>,
    AuthenticatedUser(principal): AuthenticatedUser,
) -> AppResult<Json<MemberDashboard>> {
    let member = state.services.members.get_member(&principal.username).await?;
    let books = state.services.catalog.list_books().await?;

    Ok(Json(MemberDashboard {
        status: StatusCode::OK.as_u16(),
        message: "Success".to_string(),
        books,
        member,
    }))
}
