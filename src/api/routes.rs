//! API Route Configuration

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use super::handlers::{self, AppState};
use super::middleware::logging_middleware;
use crate::models::config::CorsOrigin;

/// Create the API router with all routes and middleware
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors_origin);

    let api = Router::new()
        .route("/config", get(handlers::get_config))
        .route("/check/:address", get(handlers::check_address))
        .route(
            "/reports",
            get(handlers::list_reports).post(handlers::submit_report),
        )
        .route("/reports/:id", get(handlers::get_report))
        .route("/reports/:id/vote", post(handlers::vote_report))
        .route("/reports/:id/resolve", post(handlers::resolve_report));

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
        .fallback(handlers::not_found)
        .with_state(state)
        // Middleware (order matters - bottom runs first)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware))
}

fn cors_layer(origin: &CorsOrigin) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origin {
        CorsOrigin::Any => layer.allow_origin(Any),
        CorsOrigin::List(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match origin.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!(origin = %origin, "Ignoring unparseable CORS origin");
                        None
                    }
                })
                .collect();
            layer.allow_origin(origins)
        }
    }
}
