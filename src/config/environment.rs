// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PulseFit

//! Environment-based configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Environment type controlling hardened behavior
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Server configuration loaded from environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port (`HTTP_PORT`, default 8080)
    pub http_port: u16,
    /// Deployment environment (`ENVIRONMENT`, default development)
    pub environment: Environment,
    /// Comma-separated CORS origins, `"*"` or empty for any (`CORS_ALLOWED_ORIGINS`)
    pub cors_allowed_origins: String,
    /// Default log level when `RUST_LOG` is unset (`LOG_LEVEL`, default info)
    pub log_level: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `HTTP_PORT` is set but not a valid port number.
    pub fn from_env() -> Result<Self> {
        let http_port = match env::var("HTTP_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("invalid HTTP_PORT value: {value}"))?,
            Err(_) => 8080,
        };

        let environment =
            Environment::from_str_or_default(&env::var("ENVIRONMENT").unwrap_or_default());

        Ok(Self {
            http_port,
            environment,
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default(),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_owned()),
        })
    }

    /// Hardened mode: internal fault text is suppressed in error responses
    #[must_use]
    pub const fn hardened(&self) -> bool {
        self.environment.is_production()
    }

    /// One-line startup summary for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "environment={} http_port={} hardened={}",
            self.environment,
            self.http_port,
            self.hardened()
        )
    }
}
