// ABOUTME: Request-validation pipeline: declarative schemas and their evaluation engine
// ABOUTME: Pure and stateless; the HTTP-facing gate lives in crate::middleware::validation
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PulseFit

//! Request validation
//!
//! The pipeline has two halves:
//!
//! - this module: the schema registry ([`Shape`]) and the constraint engine,
//!   pure and free of I/O;
//! - [`crate::middleware::validation`]: the axum gate that applies a schema
//!   to a request payload slot and commits or rejects the result.

/// Field-level constraint descriptors and transforms
pub mod constraint;

/// Schema registry with the defined request shapes
pub mod registry;

/// Schema type and evaluation engine
pub mod schema;

pub use constraint::{Field, FieldRule, Kind, Pattern, Presence, Transform};
pub use registry::{Shape, SORT_ORDERS, USER_LANGUAGES, USER_ROLES};
pub use schema::{Schema, SchemaBuilder, ValidationError};

/// Which part of an inbound request a schema applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Parsed JSON request body
    Body,
    /// Path parameters
    Params,
    /// Query string
    Query,
}
