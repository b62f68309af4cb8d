//! JIT access API — library crate.
//!
//! `main.rs` is a thin binary entry point; the module tree, composition
//! root, and router construction all live here so integration tests can
//! exercise the router directly.

pub mod app_state;
pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod handlers;
pub mod infrastructure;
pub mod keys;
pub mod openapi;

use crate::app_state::AppState;
use crate::config::Config;
use axum::{
    Router,
    routing::{get, post},
};
use std::time::Duration;
use tower_http::{
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa_swagger_ui::SwaggerUi;

/// Build the Axum router with all routes and middleware.
pub fn build_router(app_state: AppState, config: &Config) -> Router {
    Router::new()
        .route("/health/alive", get(handlers::health::alive))
        .route("/health/ready", get(handlers::health::ready))
        .nest("/api", api_routes())
        .route("/metadata", get(handlers::metadata::metadata))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi::create_api_doc()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(handlers::projects::list_projects))
        .route("/projects/{id}/roles", get(handlers::projects::list_roles))
        .route("/projects/{id}/peers", get(handlers::projects::list_peers))
        .route(
            "/projects/{id}/roles/self-activate",
            post(handlers::activation::self_activate),
        )
        .route(
            "/projects/{id}/roles/request",
            post(handlers::activation::request_activation),
        )
        .route(
            "/activation-request",
            get(handlers::activation::decode_activation_request),
        )
        .route(
            "/activation-request/approve",
            post(handlers::activation::approve_activation_request),
        )
}
