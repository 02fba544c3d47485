// ABOUTME: Axum middleware applying request schemas to body, path-parameter, and query slots
// ABOUTME: Commits normalized payloads to the request or terminates with the structured error envelope
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PulseFit

//! Validation gate
//!
//! A [`ValidationPlan`] names which schema applies to which payload slot of
//! an inbound request. The gate evaluates every planned slot before reporting
//! (one slot's rejection never skips the others), then commits all-or-nothing:
//! on success the body is rewritten with its normalized JSON and every
//! validated slot is exposed as a typed request extension; on any failure no
//! normalized value is applied anywhere and the request is terminated with
//! the wire error envelope (400 for violations, 500 for engine faults).
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum::{middleware, routing::post, Router};
//! use pulsefit_server::middleware::validation::{validation_gate, ValidationPlan};
//! use pulsefit_server::validation::Shape;
//!
//! # async fn handler() -> &'static str { "" }
//! let plan = ValidationPlan::new(false).body(Shape::CreateUser);
//! let app: Router = Router::new()
//!     .route("/users", post(handler))
//!     .layer(middleware::from_fn_with_state(plan, validation_gate));
//! ```

use crate::errors::{AppError, FieldViolation};
use crate::validation::schema::ValidationError;
use crate::validation::{Shape, Target};
use axum::extract::{RawPathParams, RawQuery, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use serde_json::{Map, Value};
use tracing::{debug, error};

/// Upper bound on buffered request bodies
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Per-route validation plan: which schema guards which payload slot
///
/// Built at router registration time and carried as middleware state. The
/// `hardened` flag is injected from configuration and suppresses internal
/// fault text in responses.
#[derive(Debug, Clone)]
pub struct ValidationPlan {
    body: Option<Shape>,
    params: Option<Shape>,
    query: Option<Shape>,
    abort_early: bool,
    hardened: bool,
}

impl ValidationPlan {
    /// Empty plan; combine with the slot builders below
    #[must_use]
    pub const fn new(hardened: bool) -> Self {
        Self {
            body: None,
            params: None,
            query: None,
            abort_early: false,
            hardened,
        }
    }

    /// Plan guarding a single target
    #[must_use]
    pub const fn single(shape: Shape, target: Target, hardened: bool) -> Self {
        let plan = Self::new(hardened);
        match target {
            Target::Body => plan.body(shape),
            Target::Params => plan.params(shape),
            Target::Query => plan.query(shape),
        }
    }

    /// Guard the JSON body with a schema
    #[must_use]
    pub const fn body(mut self, shape: Shape) -> Self {
        self.body = Some(shape);
        self
    }

    /// Guard the path parameters with a schema
    #[must_use]
    pub const fn params(mut self, shape: Shape) -> Self {
        self.params = Some(shape);
        self
    }

    /// Guard the query string with a schema
    #[must_use]
    pub const fn query(mut self, shape: Shape) -> Self {
        self.query = Some(shape);
        self
    }

    /// Report only the first violation in field-declaration order
    #[must_use]
    pub const fn abort_early(mut self) -> Self {
        self.abort_early = true;
        self
    }
}

/// Normalized JSON body committed by the gate
#[derive(Debug, Clone)]
pub struct ValidatedBody(pub Map<String, Value>);

/// Normalized path parameters committed by the gate
#[derive(Debug, Clone)]
pub struct ValidatedParams(pub Map<String, Value>);

/// Normalized query parameters committed by the gate
#[derive(Debug, Clone)]
pub struct ValidatedQuery(pub Map<String, Value>);

/// Middleware entry point; mount with `middleware::from_fn_with_state(plan, validation_gate)`
pub async fn validation_gate(
    State(plan): State<ValidationPlan>,
    raw_params: RawPathParams,
    RawQuery(raw_query): RawQuery,
    req: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = req.into_parts();

    // Select raw payloads for every planned slot before evaluating anything.
    // An unplanned body is left untouched and passed through as-is.
    let (body_input, passthrough_body) = if plan.body.is_some() {
        match read_json_body(body).await {
            Ok(Ok(map)) => (Some(map), None),
            Ok(Err(violation)) => {
                debug!(violation = %violation.message, "request body rejected before evaluation");
                return AppError::validation(vec![violation]).into_response();
            }
            Err(fault) => return fault_response(&plan, &fault),
        }
    } else {
        (None, Some(body))
    };
    let params_input = plan.params.is_some().then(|| params_to_map(&raw_params));
    let query_input = plan
        .query
        .is_some()
        .then(|| query_to_map(raw_query.as_deref()));

    // Evaluate all planned slots; the futures are independent, so their
    // mutual ordering is unobservable and none may short-circuit the others.
    let now = Utc::now();
    let abort_early = plan.abort_early;
    let evaluate = |shape: Option<Shape>, input: Option<Map<String, Value>>| async move {
        let (shape, input) = (shape?, input?);
        Some(shape.schema().evaluate_at(&input, now, abort_early))
    };
    let (body_outcome, params_outcome, query_outcome) = tokio::join!(
        evaluate(plan.body, body_input),
        evaluate(plan.params, params_input),
        evaluate(plan.query, query_input),
    );

    // First rejection in body -> params -> query order wins; commit is
    // all-or-nothing, so a failure anywhere discards every normalized value.
    let mut normalized = Vec::with_capacity(3);
    for (target, outcome) in [
        (Target::Body, body_outcome),
        (Target::Params, params_outcome),
        (Target::Query, query_outcome),
    ] {
        match outcome {
            None => {}
            Some(Ok(map)) => normalized.push((target, map)),
            Some(Err(ValidationError::Violations(violations))) => {
                debug!(
                    slot = ?target,
                    count = violations.len(),
                    "request rejected by validation gate"
                );
                return AppError::validation(violations).into_response();
            }
            Some(Err(ValidationError::Fault(fault))) => {
                return fault_response(&plan, &fault);
            }
        }
    }

    // Every slot passed: commit normalized values as typed extensions and,
    // for the body, rewrite the payload bytes downstream extractors consume.
    let mut normalized_body: Option<Vec<u8>> = None;
    for (target, map) in normalized {
        match target {
            Target::Body => {
                let bytes = match serde_json::to_vec(&Value::Object(map.clone())) {
                    Ok(bytes) => bytes,
                    Err(err) => return fault_response(&plan, &err.to_string()),
                };
                parts.extensions.insert(ValidatedBody(map));
                normalized_body = Some(bytes);
            }
            Target::Params => {
                parts.extensions.insert(ValidatedParams(map));
            }
            Target::Query => {
                parts.extensions.insert(ValidatedQuery(map));
            }
        }
    }

    let body = match normalized_body {
        Some(bytes) => {
            parts.headers.insert(CONTENT_LENGTH, bytes.len().into());
            parts.headers.insert(
                CONTENT_TYPE,
                http::HeaderValue::from_static("application/json"),
            );
            axum::body::Body::from(bytes)
        }
        // No body schema planned: the original body flows through untouched
        None => passthrough_body.unwrap_or_else(axum::body::Body::empty),
    };

    next.run(Request::from_parts(parts, body)).await
}

/// Read and parse the JSON body slot.
///
/// Outer error: transport fault (500). Inner error: payload-shaped violation
/// (400) for malformed JSON or a non-object document.
async fn read_json_body(
    body: axum::body::Body,
) -> Result<Result<Map<String, Value>, FieldViolation>, String> {
    let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|err| format!("failed to read request body: {err}"))?;

    if bytes.is_empty() {
        return Ok(Ok(Map::new()));
    }

    Ok(match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(FieldViolation::type_mismatch(
            "body",
            "must be a JSON object",
        )),
        Err(_) => Err(FieldViolation::type_mismatch(
            "body",
            "must be valid JSON",
        )),
    })
}

fn params_to_map(params: &RawPathParams) -> Map<String, Value> {
    params
        .iter()
        .map(|(key, value)| (key.to_owned(), Value::String(value.to_owned())))
        .collect()
}

fn query_to_map(query: Option<&str>) -> Map<String, Value> {
    let Some(query) = query else {
        return Map::new();
    };
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(key, value)| (key.into_owned(), Value::String(value.into_owned())))
        .collect()
}

/// Engine faults map to a 500 and never leak internal text when hardened.
/// A fault indicates a registry defect, not bad input, so it is the one path
/// logged as an operational anomaly.
fn fault_response(plan: &ValidationPlan, fault: &str) -> Response {
    error!(fault = %fault, "validation engine fault");
    let message = if plan.hardened {
        "An internal server error occurred".to_owned()
    } else {
        fault.to_owned()
    };
    AppError::internal(message).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_map_decodes_pairs() {
        let map = query_to_map(Some("page=2&limit=10&order=desc"));
        assert_eq!(map.get("page"), Some(&json!("2")));
        assert_eq!(map.get("order"), Some(&json!("desc")));
    }

    #[test]
    fn query_map_handles_absent_query() {
        assert!(query_to_map(None).is_empty());
    }

    #[test]
    fn single_target_plan() {
        use crate::validation::Target;
        let plan = ValidationPlan::single(Shape::Login, Target::Body, false);
        assert_eq!(plan.body, Some(Shape::Login));
        assert!(plan.params.is_none() && plan.query.is_none());
    }

    #[test]
    fn plan_builders_compose() {
        let plan = ValidationPlan::new(true)
            .body(Shape::UpdateUser)
            .query(Shape::PaginationQuery)
            .abort_early();
        assert_eq!(plan.body, Some(Shape::UpdateUser));
        assert_eq!(plan.query, Some(Shape::PaginationQuery));
        assert!(plan.params.is_none());
        assert!(plan.abort_early);
        assert!(plan.hardened);
    }
}
