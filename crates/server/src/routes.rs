use std::time::Duration;

use axum::{middleware, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use configs::ServerConfig;

use crate::headers;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod users;

#[utoipa::path(get, path = "/health", tag = "health",
    responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the application router: user routes, health, docs and the shared layers.
pub fn build_router(state: ServerState, cfg: &ServerConfig) -> Router {
    let user_routes = Router::new()
        .route("/user", axum::routing::post(users::create).put(users::update))
        .route("/user/:id", get(users::get_by_id).delete(users::delete))
        .route("/users", get(users::get_all))
        .with_state(state);

    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    let mut app = public.merge(user_routes);
    if cfg.validate_headers {
        app = app.layer(middleware::from_fn(headers::require_correlation_id));
    }

    app.layer(TimeoutLayer::new(Duration::from_secs(cfg.request_timeout_secs)))
        .layer(CorsLayer::very_permissive())
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request with method and path
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                ),
        )
}
