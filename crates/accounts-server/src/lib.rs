//! Account service library logic.

pub mod api;
pub mod api_accounts;
pub mod config;
pub mod middleware;

use accounts_db::DbPool;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
}

/// Maximum request body size (64 KiB). Account payloads are tiny.
const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::index_handler))
        .route("/health", get(api::health))
        .route(
            "/accounts",
            post(api_accounts::create_account_handler).get(api_accounts::list_accounts_handler),
        )
        .route(
            "/accounts/{id}",
            get(api_accounts::get_account_handler)
                .put(api_accounts::update_account_handler)
                .delete(api_accounts::delete_account_handler),
        )
        .fallback(api::not_found_handler)
        .method_not_allowed_fallback(api::method_not_allowed_handler)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
}
