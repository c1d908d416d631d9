use crate::middleware::{cors_middleware, request_id_middleware};
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{any, get, post};
use axum::Router;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use super::bot_handlers;
use super::health;
use super::url_handlers;
use super::{AppState, BotState};

const MAX_BODY_BYTES: usize = 64 * 1024;

/// Webhook bodies past this are acknowledged unread rather than rejected
const WEBHOOK_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Create the JSON API router
pub fn create_api_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route(
            "/api/shorten",
            post(url_handlers::shorten_url).fallback(url_handlers::api_not_found),
        )
        .route(
            "/api/urls",
            get(url_handlers::list_urls).fallback(url_handlers::api_not_found),
        )
        .route(
            "/api/qr",
            post(url_handlers::generate_qr).fallback(url_handlers::api_not_found),
        )
        .route(
            "/api/resolve/{code}",
            get(url_handlers::resolve_url).fallback(url_handlers::api_not_found),
        )
        .route("/api", any(url_handlers::api_not_found));

    let public_routes = Router::new()
        .route(
            "/",
            get(url_handlers::landing).fallback(url_handlers::not_found),
        )
        .route(
            "/{code}",
            get(url_handlers::redirect_url).fallback(url_handlers::not_found),
        )
        .route("/_health", get(health::health_check));

    api_routes
        .merge(public_routes)
        .fallback(url_handlers::fallback)
        .layer(middleware::from_fn(cors_middleware))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_id_middleware))
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES)),
        )
        .with_state(state)
}

/// Create the Telegram bot router
pub fn create_bot_router(state: Arc<BotState>) -> Router {
    Router::new()
        .route(
            "/",
            get(bot_handlers::landing)
                .post(bot_handlers::webhook)
                .fallback(bot_handlers::method_not_allowed),
        )
        .route(
            "/{*path}",
            get(bot_handlers::redirect)
                .post(bot_handlers::webhook)
                .fallback(bot_handlers::method_not_allowed),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_id_middleware)),
        )
        .layer(DefaultBodyLimit::max(WEBHOOK_MAX_BODY_BYTES))
        .with_state(state)
}
