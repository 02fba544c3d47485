// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides router construction and one-shot request helpers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PulseFit
#![allow(dead_code)]

//! Shared test utilities for `pulsefit-server` integration tests

use axum::Router;
use http::{Request, StatusCode};
use pulsefit_server::config::environment::{Environment, ServerConfig};
use pulsefit_server::routes::build_router;
use serde_json::Value;
use std::sync::Once;
use tower::ServiceExt;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Development-mode configuration for tests (verbose errors)
pub fn test_config() -> ServerConfig {
    ServerConfig {
        http_port: 0,
        environment: Environment::Testing,
        cors_allowed_origins: String::new(),
        log_level: "warn".to_owned(),
    }
}

/// Full application router with test configuration
pub fn test_app() -> Router {
    init_test_logging();
    build_router(&test_config())
}

/// Drive one request through a router and decode the JSON response
pub async fn send(app: Router, request: Request<axum::body::Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("infallible service");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON response body")
    };
    (status, json)
}

/// POST a JSON body to a path
pub fn post_json(path: &str, body: &Value) -> Request<axum::body::Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .expect("request")
}

/// PUT a JSON body to a path
pub fn put_json(path: &str, body: &Value) -> Request<axum::body::Body> {
    Request::builder()
        .method("PUT")
        .uri(path)
        .header("content-type", "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .expect("request")
}

/// GET a path
pub fn get(path: &str) -> Request<axum::body::Body> {
    Request::builder()
        .method("GET")
        .uri(path)
        .body(axum::body::Body::empty())
        .expect("request")
}
