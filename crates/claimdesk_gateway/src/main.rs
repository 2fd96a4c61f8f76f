//! Gateway entry point.
//!
//! # Responsibility
//! - Resolve configuration from the environment and fail fast on
//!   deployment misconfiguration.
//! - Serve the proxy route table until shutdown.

use claimdesk_core::{default_log_level, init_logging};
use claimdesk_gateway::config::LOG_DIR_VAR;
use claimdesk_gateway::{build_router, AppState, GatewayConfig};
use log::info;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    if let Ok(log_dir) = std::env::var(LOG_DIR_VAR) {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("claimdesk_gateway: logging init failed: {err}");
            return ExitCode::FAILURE;
        }
    }

    let config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("claimdesk_gateway: {err}");
            return ExitCode::FAILURE;
        }
    };

    let listener = match tokio::net::TcpListener::bind(&config.bind_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            eprintln!(
                "claimdesk_gateway: cannot bind `{}`: {err}",
                config.bind_addr
            );
            return ExitCode::FAILURE;
        }
    };

    info!(
        "event=gateway_start module=gateway status=ok bind_addr={} upstream={}",
        config.bind_addr, config.upstream_base_url
    );

    let app = build_router(AppState::new(&config));
    if let Err(err) = axum::serve(listener, app).await {
        eprintln!("claimdesk_gateway: server error: {err}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
