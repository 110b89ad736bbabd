use std::time::Duration;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::Level;

use crate::state::AppState;

use super::handlers;

pub fn router(state: AppState, request_timeout: Duration) -> Router {
    let public_dir = state.public_dir.clone();

    Router::new()
        .route("/healthz", get(handlers::health_check))
        .route(
            "/api/links",
            post(handlers::create_link).get(handlers::list_links),
        )
        .route(
            "/api/links/{code}",
            get(handlers::get_link).delete(handlers::delete_link),
        )
        .route_service("/", ServeFile::new(public_dir.join("index.html")))
        .route_service("/code/{code}", ServeFile::new(public_dir.join("stats.html")))
        .nest_service("/static", ServeDir::new(&public_dir))
        // static routes above win over this parameter route
        .route("/{code}", get(handlers::redirect))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(
                            DefaultOnResponse::new()
                                .latency_unit(LatencyUnit::Millis)
                                .level(Level::DEBUG),
                        )
                        .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
                )
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    request_timeout,
                ))
                .layer(CorsLayer::permissive())
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}
