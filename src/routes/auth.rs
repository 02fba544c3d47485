// ABOUTME: Login route handler for the Telegram login widget payload
// ABOUTME: Validates payload shape only; signature verification and token issuance are stubs
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PulseFit

//! Authentication routes
//!
//! The login schema checks syntactic shape only: the widget `hash` must be a
//! 64-character lowercase hex digest and `auth_date` must fall inside the
//! clock-skew window. Recomputing the digest against the bot token happens in
//! a later stage that does not exist yet.

use crate::config::environment::ServerConfig;
use crate::errors::AppError;
use crate::middleware::validation::{validation_gate, ValidatedBody, ValidationPlan};
use crate::validation::Shape;
use axum::{
    extract::Extension,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;

/// Authentication routes implementation
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    #[must_use]
    pub fn routes(config: &ServerConfig) -> Router {
        Router::new()
            .route("/auth/login", post(Self::handle_login))
            .layer(middleware::from_fn_with_state(
                ValidationPlan::new(config.hardened()).body(Shape::Login),
                validation_gate,
            ))
    }

    /// Handle Telegram widget login
    async fn handle_login(
        Extension(ValidatedBody(payload)): Extension<ValidatedBody>,
    ) -> Result<Response, AppError> {
        // TODO: verify the widget signature against the bot token
        // TODO: issue a session token for the authenticated user
        Ok((StatusCode::OK, Json(json!({"success": true, "data": payload}))).into_response())
    }
}
