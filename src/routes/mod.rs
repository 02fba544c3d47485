// ABOUTME: HTTP route registration and top-level router assembly
// ABOUTME: Mounts health endpoints at the root and resource routes under /api
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PulseFit

//! HTTP routes
//!
//! Route handlers are scaffold placeholders; the validation gates mounted in
//! front of them carry the real contract.

pub mod auth;
pub mod health;
pub mod records;
pub mod users;

pub use auth::AuthRoutes;
pub use health::HealthRoutes;
pub use records::RecordRoutes;
pub use users::UserRoutes;

use crate::config::environment::ServerConfig;
use crate::middleware::setup_cors;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Assemble the full application router
#[must_use]
pub fn build_router(config: &ServerConfig) -> Router {
    let api = UserRoutes::routes(config)
        .merge(AuthRoutes::routes(config))
        .merge(RecordRoutes::routes(config));

    Router::new()
        .merge(HealthRoutes::routes())
        .nest("/api", api)
        .layer(setup_cors(config))
        .layer(TraceLayer::new_for_http())
}
