//! Sustainability chat server
//!
//! Entry point for the chat UI.

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;

use sustain_chat::config::AppConfig;
use sustain_chat::{server, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present) before reading any configuration
    let _ = dotenv();

    telemetry::init();

    let config = AppConfig::load().context("failed to load configuration")?;
    info!(
        name: "config.loaded",
        host = %config.server.host,
        port = config.server.port,
        backend = %config.backend.base_url,
        "Configuration loaded"
    );

    server::start_server(Arc::new(config)).await
}
