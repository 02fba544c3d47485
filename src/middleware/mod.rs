// ABOUTME: HTTP middleware for request validation and cross-origin configuration
// ABOUTME: The validation gate intercepts payload slots; CORS guards browser access
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PulseFit

pub mod cors;
pub mod validation;

// CORS configuration
pub use cors::setup_cors;

// Validation gate and committed-payload extensions
pub use validation::{
    validation_gate, ValidatedBody, ValidatedParams, ValidatedQuery, ValidationPlan,
};
