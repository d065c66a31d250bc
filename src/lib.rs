//! Libris Library Inventory Server
//!
//! Authenticates users, issues bearer tokens and gates book-inventory
//! operations by role (librarian or member) over a REST JSON API.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put, MethodRouter},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use models::policy::Operation;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    pub fn new(config: AppConfig, repository: repository::Repository) -> Self {
        let services = services::Services::new(repository, &config.auth);
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}

/// Attach the role check for `operation` to a route
fn guarded(route: MethodRouter<AppState>, operation: Operation) -> MethodRouter<AppState> {
    route.route_layer(middleware::from_fn_with_state(operation, api::enforce_policy))
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Everything below passes the access gate first
    let protected = Router::new()
        // Librarian operations
        .route("/addbook", guarded(post(api::books::add_book), Operation::AddBook))
        .route(
            "/librarian",
            guarded(get(api::dashboard::librarian_dashboard), Operation::LibrarianDashboard),
        )
        .route("/updatebook", guarded(put(api::books::update_book), Operation::UpdateBook))
        .route("/deletebook", guarded(delete(api::books::delete_book), Operation::DeleteBook))
        .route("/addmember", guarded(post(api::members::add_member), Operation::AddMember))
        .route(
            "/updatemembers",
            guarded(put(api::members::update_member), Operation::UpdateMember),
        )
        .route(
            "/deletemember",
            guarded(delete(api::members::delete_member), Operation::DeleteMember),
        )
        // Member operations
        .route(
            "/member",
            guarded(get(api::dashboard::member_dashboard), Operation::MemberDashboard),
        )
        .route("/borrowBook", guarded(put(api::books::borrow_book), Operation::BorrowBook))
        .route("/returnBook", guarded(put(api::books::return_book), Operation::ReturnBook))
        .route_layer(middleware::from_fn_with_state(state.clone(), api::access_gate));

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/signup", post(api::auth::signup))
        .route("/login", post(api::auth::login))
        .merge(protected)
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
