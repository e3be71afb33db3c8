//! MCP tool dispatch for the Selling Partner API.
//!
//! Every tool call runs readiness, validation, the upstream engine and projection, and ends either
//! in a summary plus structured result or in a declared error carrying an [`ErrorEnvelope`].

use rmcp::model::{CallToolResult, Content};
use rmcp::ErrorData as McpError;
use sp_api_client::Engine;
use sp_api_protocol::ErrorEnvelope;

mod router;
mod service;
mod tool_router_hints;

#[cfg(test)]
mod tests;

use tool_router_hints::ToolRouterWithParamHints;

/// Name, version and instructions reported in the initialize handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerIdentity {
    pub name: String,
    pub version: String,
    pub instructions: String,
}

/// Selling Partner MCP service. Cloning is cheap; every clone shares one engine and one router.
#[derive(Clone)]
pub struct SellingPartnerService {
    engine: Engine,
    identity: ServerIdentity,
    tool_router: ToolRouterWithParamHints<Self>,
}
