//! Route definitions for the Atlas HTTP API and pages.
//!
//! JSON routes are organized by domain and mounted under `/api`; page
//! routes sit at the root. The router receives `AppState` and passes it to
//! all handlers via Axum's `State` extractor.

use axum::Router;
use axum::routing::{get, post, put};

use crate::handlers;
use crate::state::AppState;

/// Build the route table without the outer middleware stack.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(collection_routes())
        .merge(resource_routes())
        .merge(suggestion_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .merge(page_routes())
        .fallback(handlers::pages::fallback)
        .with_state(state)
}

/// Auth endpoints: register, login, logout, me, change-password
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route(
            "/auth/me",
            get(handlers::auth::me).put(handlers::auth::update_me),
        )
        .route(
            "/auth/change-password",
            put(handlers::auth::change_password),
        )
}

/// Collection CRUD and the resources nested under a collection
fn collection_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/collections",
            get(handlers::collections::list_collections)
                .post(handlers::collections::create_collection),
        )
        .route(
            "/collections/{id}",
            get(handlers::collections::get_collection)
                .put(handlers::collections::update_collection)
                .delete(handlers::collections::delete_collection),
        )
        .route(
            "/collections/{id}/resources",
            get(handlers::resources::list_resources).post(handlers::resources::create_resource),
        )
}

/// Single-resource operations
fn resource_routes() -> Router<AppState> {
    Router::new().route(
        "/resources/{id}",
        get(handlers::resources::get_resource)
            .put(handlers::resources::update_resource)
            .delete(handlers::resources::delete_resource),
    )
}

/// Metadata suggestions (no session required)
fn suggestion_routes() -> Router<AppState> {
    Router::new().route("/suggestions", get(handlers::suggestions::suggest))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Server-rendered pages
fn page_routes() -> Router<AppState> {
    use handlers::pages;

    Router::new()
        .route("/", get(pages::index))
        .route("/login", get(pages::login))
        .route("/register", get(pages::register))
        .route("/faq", get(pages::faq))
        .route("/profile", get(pages::profile))
        .route("/profile/edit", get(pages::profile_edit))
        .route("/profile/change-password", get(pages::change_password))
        .route("/collections", get(pages::collections))
        .route("/collections/new", get(pages::collection_new))
        .route("/collections/{id}", get(pages::collection_detail))
        .route("/collections/{id}/edit", get(pages::collection_edit))
        .route("/collections/{id}/resources/new", get(pages::resource_new))
        .route("/resources/{id}/edit", get(pages::resource_edit))
}
