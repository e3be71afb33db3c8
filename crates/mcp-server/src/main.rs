//! Selling Partner MCP Server
//!
//! Exposes the Amazon Selling Partner API (orders, sales, FBA inventory, pricing, reports) to AI
//! agents as MCP tools over stdio.
//!
//! ## Usage
//!
//! Add to your MCP client configuration:
//! ```json
//! {
//!   "mcpServers": {
//!     "sp-api": {
//!       "command": "sp-api-mcp",
//!       "env": {
//!         "SP_API_CLIENT_ID": "...",
//!         "SP_API_CLIENT_SECRET": "...",
//!         "SP_API_REFRESH_TOKEN": "..."
//!       }
//!     }
//!   }
//! }
//! ```

use anyhow::{Context, Result};
use rmcp::transport::stdio;
use rmcp::ServiceExt;

mod config;
mod resources;
mod tools;

use config::Config;
use tools::{SellingPartnerService, ServerIdentity};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().context("invalid configuration")?;

    // Logging goes to stderr only; stdout carries the MCP protocol.
    let default_filter = if config.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();

    let client = sp_api_client::connect(
        &config.endpoint,
        &config.lwa_endpoint,
        config.credentials.clone(),
    )
    .context("failed to build Selling Partner API client")?;
    let status = client.status();
    if status.ready {
        log::info!("Selling Partner API client ready ({})", config.endpoint);
    } else {
        log::warn!(
            "Selling Partner API client not ready: {}; upstream tools will report it",
            status.message
        );
    }
    let engine = sp_api_client::Engine::new(client).context("failed to build request engine")?;

    let mut identity = ServerIdentity::new(&config.server_name, &config.server_version);
    if let Some(instructions) = config.instructions.clone() {
        identity.instructions = instructions;
    }

    log::info!(
        "Starting {} {} over stdio",
        identity.name,
        identity.version
    );
    let service = SellingPartnerService::new(engine, identity);
    let server = service.serve(stdio()).await?;

    server.waiting().await?;

    log::info!("{} stopped", config.server_name);
    Ok(())
}
