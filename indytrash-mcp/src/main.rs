//! MCP server answering Indianapolis trash pickup-day questions over stdio.

mod server;

use std::sync::Arc;

use anyhow::Result;
use rmcp::{ServiceExt, transport::stdio};
use tracing::info;

use indytrash_core::{
    observability::{LogFormat, init_logging},
    service::TrashDayService,
};
use indytrash_provider_indy::{IndyConfig, plugin};

use crate::server::TrashDayServer;

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the MCP protocol; logs go to stderr
    let log_format = std::env::var("INDYTRASH_LOG_FORMAT").ok();
    init_logging(LogFormat::from_setting(log_format.as_deref()));

    let config = IndyConfig::from_env()?;
    let service = Arc::new(TrashDayService::new(Arc::new(plugin(config))));

    info!(
        jurisdiction = %service.jurisdiction().name,
        version = env!("CARGO_PKG_VERSION"),
        "Starting indytrash MCP server"
    );

    let running = TrashDayServer::new(service).serve(stdio()).await?;
    info!("MCP server running, waiting for requests");

    running.waiting().await?;
    info!("MCP server shutting down");

    Ok(())
}
