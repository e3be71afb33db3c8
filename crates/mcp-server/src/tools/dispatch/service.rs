use super::{router, McpError, SellingPartnerService, ServerIdentity};
use crate::resources;
use crate::tools::catalog;
use rmcp::model::{
    Implementation, ListResourcesResult, PaginatedRequestParam, ReadResourceRequestParam,
    ReadResourceResult, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{tool_handler, RoleServer, ServerHandler};
use sp_api_client::Engine;
use std::future::Future;

impl SellingPartnerService {
    pub fn new(engine: Engine, identity: ServerIdentity) -> Self {
        Self {
            engine,
            identity,
            tool_router: router::build_tool_router_with_param_hints(),
        }
    }
}

impl ServerIdentity {
    /// Identity with the built-in instructions.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            instructions: catalog::tool_instructions(),
        }
    }
}

#[tool_handler]
impl ServerHandler for SellingPartnerService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(self.identity.instructions.clone()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: self.identity.name.clone(),
                version: self.identity.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListResourcesResult, McpError>> + Send + '_ {
        std::future::ready(Ok(ListResourcesResult::with_all_items(
            resources::documentation_resources(),
        )))
    }

    fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ReadResourceResult, McpError>> + Send + '_ {
        std::future::ready(resources::read_documentation(&request.uri))
    }
}
