//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, dashboard, health, members};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "0.1.0",
        description = "Role-gated library inventory REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::signup,
        auth::login,
        // Books
        books::add_book,
        books::update_book,
        books::delete_book,
        books::borrow_book,
        books::return_book,
        // Members
        members::add_member,
        members::update_member,
        members::delete_member,
        // Dashboards
        dashboard::librarian_dashboard,
        dashboard::member_dashboard,
    ),
    components(
        schemas(
            // Auth
            auth::LoginResponse,
            crate::models::user::SignupRequest,
            crate::models::user::LoginRequest,
            crate::models::user::Role,
            // Books
            crate::models::book::Book,
            crate::models::book::BookStatus,
            crate::models::book::AddBookRequest,
            crate::models::book::UpdateBookRequest,
            crate::models::book::BookIdRequest,
            // Members
            crate::models::user::User,
            crate::models::user::AddMemberRequest,
            crate::models::user::UpdateMemberRequest,
            crate::models::user::DeleteMemberRequest,
            // Dashboards
            dashboard::LibrarianDashboard,
            dashboard::MemberDashboard,
            // Health
            health::HealthResponse,
            // Responses
            crate::api::MessageResponse,
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Signup and login"),
        (name = "books", description = "Book inventory and circulation"),
        (name = "members", description = "Member management"),
        (name = "dashboard", description = "Dashboards")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by protected paths
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_operations() {
        let doc = ApiDoc::openapi();
        for path in ["/signup", "/login", "/addbook", "/borrowBook", "/deletemember"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
