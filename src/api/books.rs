//! Book inventory endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::book::{AddBookRequest, BookIdRequest, Circulation, UpdateBookRequest},
};

use super::{JsonBody, MessageResponse};

/// Add a book (librarian)
#[utoipa::path(
    post,
    path = "/addbook",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = AddBookRequest,
    responses(
        (status = 201, description = "Book added", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 403, description = "Invalid token or not a librarian", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_book(
    State(state): State<crate::AppState>,
    JsonBody(request): JsonBody<AddBookRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state.services.catalog.add_book(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(StatusCode::CREATED, "Book added")),
    ))
}

/// Overwrite a book's id, title and status (librarian)
#[utoipa::path(
    put,
    path = "/updatebook",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = UpdateBookRequest,
    responses(
        (status = 200, description = "Book updated", body = MessageResponse),
        (status = 403, description = "Invalid token or not a librarian", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    JsonBody(request): JsonBody<UpdateBookRequest>,
) -> AppResult<Json<MessageResponse>> {
    state.services.catalog.update_book(request).await?;
    Ok(Json(MessageResponse::new(StatusCode::OK, "Book updated")))
}

/// Delete a book by its book id (librarian)
#[utoipa::path(
    delete,
    path = "/deletebook",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = BookIdRequest,
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 403, description = "Invalid token or not a librarian", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    JsonBody(request): JsonBody<BookIdRequest>,
) -> AppResult<Json<MessageResponse>> {
    state.services.catalog.delete_book(&request.book_id).await?;
    Ok(Json(MessageResponse::new(StatusCode::OK, "Book deleted")))
}

/// Borrow a book (member)
#[utoipa::path(
    put,
    path = "/borrowBook",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = BookIdRequest,
    responses(
        (status = 200, description = "Book borrowed", body = MessageResponse),
        (status = 403, description = "Invalid token or not a member", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    JsonBody(request): JsonBody<BookIdRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .catalog
        .circulate(&request.book_id, Circulation::Borrow)
        .await?;
    Ok(Json(MessageResponse::new(StatusCode::OK, "Book borrowed")))
}

/// Return a book (member)
#[utoipa::path(
    put,
    path = "/returnBook",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = BookIdRequest,
    responses(
        (status = 200, description = "Book returned", body = MessageResponse),
        (status = 403, description = "Invalid token or not a member", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    JsonBody(request): JsonBody<BookIdRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .catalog
        .circulate(&request.book_id, Circulation::Return)
        .await?;
    Ok(Json(MessageResponse::new(StatusCode::OK, "Book returned")))
}
