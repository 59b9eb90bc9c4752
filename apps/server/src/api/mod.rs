//! API layer - routes, handlers, and middleware

pub mod extractors;
pub mod handlers;
pub mod links;
pub mod middleware;
pub mod routes;
pub mod url;

use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use clinic_models::ResourceKind;
use links::{paths, rels, Links};
use serde_json::json;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let max_body_size = state.config.server.max_request_body_size;
    let cors_origins = state.config.server.cors_origins.clone();

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Root endpoint
        .route("/", get(root))
        // Favicon handler (returns 204 to prevent 404 logs)
        .route("/favicon.ico", get(favicon))
        // Metrics endpoint
        .merge(routes::metrics::metrics_routes())
        // Record collections
        .merge(routes::patients::patient_routes())
        .merge(routes::doctors::doctor_routes())
        .merge(routes::medical_visits::medical_visit_routes())
        // Add state
        .with_state(state)
        // Add middleware (applied in reverse order)
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(axum::middleware::from_fn(middleware::metrics_middleware))
        .layer(middleware::compression())
        .layer(middleware::cors(&cors_origins))
        .layer(middleware::trace())
        // Limit request body size to prevent DoS via large payloads
        .layer(DefaultBodyLimit::max(max_body_size))
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "clinic-server",
        "storage": state.backend().as_str(),
    }))
}

async fn root(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let mut links = Links::new(url::base_url_from_headers(&headers)).add(rels::SELF, "/");
    for kind in ResourceKind::ALL {
        links = links.add(rels::all(kind), paths::collection(kind));
    }

    (
        StatusCode::OK,
        Json(json!({
            "server": "Clinic Records Server",
            "version": env!("CARGO_PKG_VERSION"),
            "storage": state.backend().as_str(),
            "status": "running",
            "_links": links.to_json(),
        })),
    )
}

async fn favicon() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}
