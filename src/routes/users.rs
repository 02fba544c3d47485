// ABOUTME: User resource route handlers guarded by the validation gate
// ABOUTME: Placeholder controllers echoing normalized payloads until the storage layer lands
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PulseFit

//! User routes
//!
//! Each route mounts the validation gate with the matching schema. The
//! handlers are scaffold placeholders: they receive the normalized payload
//! through request extensions and echo it back.

use crate::config::environment::ServerConfig;
use crate::errors::AppError;
use crate::middleware::validation::{
    validation_gate, ValidatedBody, ValidatedQuery, ValidationPlan,
};
use crate::validation::Shape;
use axum::{
    extract::Extension,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;

/// User routes implementation
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user routes with their validation plans
    #[must_use]
    pub fn routes(config: &ServerConfig) -> Router {
        let hardened = config.hardened();

        let create = Router::new()
            .route("/users", post(Self::handle_create_user))
            .layer(middleware::from_fn_with_state(
                ValidationPlan::new(hardened).body(Shape::CreateUser),
                validation_gate,
            ));

        let update = Router::new()
            .route("/users", put(Self::handle_update_user))
            .layer(middleware::from_fn_with_state(
                ValidationPlan::new(hardened).body(Shape::UpdateUser),
                validation_gate,
            ));

        let list = Router::new()
            .route("/users", get(Self::handle_list_users))
            .layer(middleware::from_fn_with_state(
                ValidationPlan::new(hardened).query(Shape::PaginationQuery),
                validation_gate,
            ));

        create.merge(update).merge(list)
    }

    /// Handle create user
    async fn handle_create_user(
        Extension(ValidatedBody(user)): Extension<ValidatedBody>,
    ) -> Result<Response, AppError> {
        // TODO: persist the user once the storage layer lands; an absent
        // `role` defaults to `member` at that point
        Ok((StatusCode::CREATED, Json(json!({"success": true, "data": user}))).into_response())
    }

    /// Handle update user
    async fn handle_update_user(
        Extension(ValidatedBody(user)): Extension<ValidatedBody>,
    ) -> Result<Response, AppError> {
        // TODO: load and update the stored user once the storage layer lands
        Ok((StatusCode::OK, Json(json!({"success": true, "data": user}))).into_response())
    }

    /// Handle list users with normalized pagination
    async fn handle_list_users(
        Extension(ValidatedQuery(pagination)): Extension<ValidatedQuery>,
    ) -> Result<Response, AppError> {
        // TODO: query the user list once the storage layer lands
        Ok((
            StatusCode::OK,
            Json(json!({"success": true, "data": [], "pagination": pagination})),
        )
            .into_response())
    }
}
