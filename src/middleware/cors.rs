// ABOUTME: CORS middleware configuration for HTTP API endpoints
// ABOUTME: Provides Cross-Origin Resource Sharing setup for web client access
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PulseFit

use crate::config::environment::ServerConfig;
use http::{header::HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Configure CORS settings for the HTTP API
///
/// Origins come from the `CORS_ALLOWED_ORIGINS` environment variable through
/// [`ServerConfig`]. An empty value or `"*"` allows any origin (development);
/// a comma-separated list restricts to those origins (production).
#[must_use]
pub fn setup_cors(config: &ServerConfig) -> CorsLayer {
    let allow_origin = if config.cors_allowed_origins.is_empty()
        || config.cors_allowed_origins == "*"
    {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_allowed_origins
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    HeaderValue::from_str(trimmed).ok()
                }
            })
            .collect();

        if origins.is_empty() {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(origins)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("authorization"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
            HeaderName::from_static("x-requested-with"),
        ])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::environment::Environment;

    fn config_with_origins(origins: &str) -> ServerConfig {
        ServerConfig {
            http_port: 8080,
            environment: Environment::Development,
            cors_allowed_origins: origins.to_owned(),
            log_level: "info".to_owned(),
        }
    }

    #[test]
    fn wildcard_and_empty_fall_back_to_any() {
        // Constructing the layer must not panic for any origin spec
        let _ = setup_cors(&config_with_origins("*"));
        let _ = setup_cors(&config_with_origins(""));
        let _ = setup_cors(&config_with_origins("https://app.pulsefit.app, https://admin.pulsefit.app"));
    }
}
