// ABOUTME: Server binary bootstrapping configuration, logging, and the HTTP listener
// ABOUTME: Serves the validation-gated API scaffold with graceful shutdown on ctrl-c
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PulseFit

//! # PulseFit Server Binary

use anyhow::Result;
use clap::Parser;
use pulsefit_server::{config::environment::ServerConfig, logging, routes::build_router};
use std::net::SocketAddr;
use tracing::info;

#[derive(Parser)]
#[command(name = "pulsefit-server")]
#[command(about = "PulseFit - fitness-tracking backend scaffold")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration from environment
    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    // Initialize production logging
    logging::init_from_env()?;

    info!("Starting PulseFit server");
    info!("{}", config.summary());

    let app = build_router(&config);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to install ctrl-c handler: {e}");
        // A failed handler install must not read as an immediate shutdown
        // signal; keep serving without graceful shutdown instead.
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn shutdown_signal_pends_until_a_signal_arrives() {
        let wait = tokio::time::timeout(std::time::Duration::from_millis(50), shutdown_signal());
        assert!(wait.await.is_err(), "must not resolve on its own");
    }
}
