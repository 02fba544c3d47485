// ABOUTME: Personal record route handlers guarded by the validation gate
// ABOUTME: Placeholder controllers echoing normalized payloads until the storage layer lands
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PulseFit

//! Personal record routes

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

/// Personal record routes implementation
pub struct RecordRoutes;

impl RecordRoutes {
    /// Create all record routes
    #[must_use]
    pub fn routes(config: &ServerConfig) -> Router {
        Router::new()
            .route("/records", post(Self::handle_create_record))
            .layer(middleware::from_fn_with_state(
                ValidationPlan::new(config.hardened()).body(Shape::CreateRecord),
                validation_gate,
            ))
    }

    /// Handle create personal record
    async fn handle_create_record(
        Extension(ValidatedBody(record)): Extension<ValidatedBody>,
    ) -> Result<Response, AppError> {
        // TODO: persist the record once the storage layer lands
        Ok((StatusCode::CREATED, Json(json!({"success": true, "data": record}))).into_response())
    }
}
