// ABOUTME: Configuration management for the PulseFit server
// ABOUTME: Environment-only configuration, no file-based settings
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PulseFit

/// Environment variable driven server configuration
pub mod environment;

pub use environment::{Environment, ServerConfig};
