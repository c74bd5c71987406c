//! Path-based HTTP redirector.
//!
//! # Architecture Overview
//!
//! ```text
//!   startup                                            per request
//!   ───────                                            ───────────
//!   CLI + optional TOML config                          Client
//!        │                                                │
//!        ▼                                                ▼
//!   for each source (yaml, json, toml…)            ┌─────────────┐
//!     open → decode → lint → RedirectTable         │ axum router │  request id, trace span
//!        │                                         └──────┬──────┘
//!        ▼                                                ▼
//!   HandlerChain::extend (newest on top) ────────▶  newest table ─ hit ─▶ 302 Found
//!                                                         │ miss
//!                                                         ▼
//!                                                        …
//!                                                         ▼
//!                                                  DefaultHandler ─▶ "Hello, <path>!"
//! ```
//!
//! A missing or malformed source is logged and skipped. Failing to bind the
//! listener is the only fatal runtime error.

use std::process::ExitCode;

use clap::Parser;

use redirector::cli::Cli;
use redirector::config::{load_config, ServiceConfig};
use redirector::http::{bind, HttpServer};
use redirector::lifecycle::{build_service_chain, wait_for_signal};
use redirector::observability::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let base = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                init_logging(&cli.apply(ServiceConfig::default()).observability);
                tracing::error!(error = %e, "Unable to load service config");
                return ExitCode::FAILURE;
            }
        },
        None => ServiceConfig::default(),
    };
    let config = cli.apply(base);

    init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        sources = config.sources.len(),
        fall_through = ?config.redirect.fall_through,
        "redirector starting"
    );

    let (chain, _report) = build_service_chain(&config);

    let listener = match bind(&config.listener.bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, "Unable to start server");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = HttpServer::new(chain).run(listener, wait_for_signal()).await {
        tracing::error!(error = %e, "Server terminated");
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
