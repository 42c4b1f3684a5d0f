//! API Router configuration

use super::handlers;
use super::state::AppState;
use crate::config::ServerConfig;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::Local;
use hitcheck_core::render::render_internal_failure;
use hitcheck_core::{format_timestamp, OutputFormat};
use std::any::Any;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Create the main router
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    let router = Router::new()
        // Health
        .route("/health", get(handlers::health_check))
        // Checks; format is negotiated on `/`, structured elsewhere
        .route("/", get(handlers::check_query).post(handlers::check_form))
        .route(
            "/check",
            get(handlers::check_query).post(handlers::check_form),
        )
        .route(
            "/api/check",
            get(handlers::check_query).post(handlers::check_form),
        );

    apply_layers(router, config).with_state(state)
}

fn apply_layers(router: Router<AppState>, config: &ServerConfig) -> Router<AppState> {
    let mut router = router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http());

    if config.request_timeout_secs > 0 {
        router = router.layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )));
    }

    if config.enable_cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(AnyOrigin)
                .allow_methods(AnyOrigin)
                .allow_headers(AnyOrigin),
        );
    }

    router
}

/// A panicking handler still answers with the generic error document.
/// The negotiated format is gone by now, so the document is structured.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "request handler panicked");

    let current_time = format_timestamp(&Local::now());
    let body = render_internal_failure(&current_time, 0, OutputFormat::Structured);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, OutputFormat::Structured.content_type())],
        body,
    )
        .into_response()
}
