// ABOUTME: Main library entry point for the PulseFit fitness-tracking backend scaffold
// ABOUTME: Provides the request-validation pipeline and HTTP server bootstrap
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PulseFit

#![deny(unsafe_code)]

//! # PulseFit Server
//!
//! Early-stage backend scaffold for a fitness-tracking service with Telegram
//! login. The load-bearing component is the request-validation pipeline:
//!
//! - **Schema Registry** ([`validation`]): five immutable request shapes
//!   (create-user, update-user, login, create-record, pagination-query), each
//!   an ordered set of declarative field constraints. Pure and stateless.
//! - **Validation Gate** ([`middleware::validation`]): axum middleware that
//!   evaluates request payload slots against schemas and either commits the
//!   normalized payload or terminates with a structured 400/500 JSON error.
//!
//! Controllers, persistence, and authentication mechanics are placeholders.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pulsefit_server::config::environment::ServerConfig;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = ServerConfig::from_env()?;
//! println!("PulseFit server configured: {}", config.summary());
//! # Ok(())
//! # }
//! ```

/// Configuration management (environment-variable driven)
pub mod config;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Production logging and structured output
pub mod logging;

/// HTTP middleware: validation gate and CORS configuration
pub mod middleware;

/// Common data models for users and personal records
pub mod models;

/// `HTTP` routes and top-level router assembly
pub mod routes;

/// Request-validation pipeline: schema registry and constraint engine
pub mod validation;
