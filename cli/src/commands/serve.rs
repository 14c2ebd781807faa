//! `serve` command handler

use std::time::Duration;

use giftgen_core::api::{AppConfig, GiftGenerator};

use crate::commands::cli::ServeArgs;
use crate::error::CliError;
use crate::http::{server, server::ServerConfig, AppState};

/// Starts the HTTP API and blocks until shutdown.
pub async fn handle_serve(
    args: ServeArgs,
    cfg: &AppConfig,
    generator: GiftGenerator,
) -> Result<(), CliError> {
    let config = server_config(&args, cfg);
    let state = AppState::new(generator);

    tracing::info!("Starting HTTP server on {}:{}", config.host, config.port);

    server::start_server_with_config(config, state)
        .await
        .map_err(|e| CliError::Server(e.to_string()))
}

/// Command line flags win over the config file.
fn server_config(args: &ServeArgs, cfg: &AppConfig) -> ServerConfig {
    let http = &cfg.http_server;
    ServerConfig {
        host: args.host.clone().unwrap_or_else(|| http.host.clone()),
        port: args.port.unwrap_or(http.port),
        request_timeout: Duration::from_millis(http.request_timeout_ms),
    }
}
