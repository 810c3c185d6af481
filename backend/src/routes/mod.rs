//! Route definitions for the Auth API
//!
//! This module organizes all routes and applies middleware. The surface is
//! deliberately small:
//!
//! - `GET  /ping`       liveness
//! - `GET  /protected`  demo gated resource (session required)
//! - `POST /api/users`  signup
//! - `POST /api/auth`   login
//! - `GET  /api/auth`   access-token refresh from the session cookie

use crate::auth;
use crate::state::AppState;
use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

mod auth_handlers;
mod health;
mod protected;
mod users;

#[cfg(test)]
mod auth_tests;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    // Cookie-carrying requests need a concrete origin; "*" is rejected by
    // browsers when credentials are allowed.
    let cors_origin = state
        .config
        .server
        .cors_origin
        .parse::<HeaderValue>()
        .unwrap_or_else(|_| {
            warn!(
                origin = %state.config.server.cors_origin,
                "Invalid CORS origin in config, falling back to http://localhost:3000"
            );
            HeaderValue::from_static("http://localhost:3000")
        });

    Router::new()
        .route("/ping", get(health::ping))
        .route(
            "/protected",
            get(protected::protected).layer(middleware::from_fn_with_state(
                state.clone(),
                auth::require_session,
            )),
        )
        .route("/api/users", axum::routing::post(users::register))
        .route(
            "/api/auth",
            axum::routing::post(auth_handlers::login).get(auth_handlers::refresh),
        )
        // Apply middleware layers
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(cors_origin)
                .allow_credentials(true)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
