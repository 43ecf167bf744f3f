//! MCP server exposing the pickup-day lookup as a single tool.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    schemars, tool, tool_handler, tool_router,
};
use serde::Deserialize;

use indytrash_core::service::TrashDayService;

/// Parameters for the `get_indy_trash_day` tool
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub(crate) struct TrashDayParams {
    /// Street number and name
    #[schemars(
        description = "Street number and name only (e.g. \"1234 Main Street\"). Do not include city, state, or zip code."
    )]
    pub(crate) address: String,
}

/// Trash pickup-day MCP service
#[derive(Clone)]
pub(crate) struct TrashDayServer {
    service: Arc<TrashDayService>,
    tool_router: ToolRouter<Self>,
}

impl TrashDayServer {
    pub(crate) fn new(service: Arc<TrashDayService>) -> Self {
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl TrashDayServer {
    /// Get the trash pickup schedule for an Indianapolis street address.
    ///
    /// Always answers with a sentence; lookup failures become an apology.
    #[tool(description = "Get the trash pickup day for an Indianapolis address.")]
    async fn get_indy_trash_day(
        &self,
        Parameters(params): Parameters<TrashDayParams>,
    ) -> Result<CallToolResult, McpError> {
        let answer = self.service.trash_day(&params.address).await;
        Ok(CallToolResult::success(vec![Content::text(answer)]))
    }
}

#[tool_handler]
impl ServerHandler for TrashDayServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "indytrash".to_owned(),
                title: Some("Indy Trash Pickup Day".to_owned()),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                icons: None,
                website_url: None,
            },
            instructions: Some(format!(
                "Looks up trash pickup days for street addresses in {}.",
                self.service.jurisdiction().name
            )),
        }
    }
}
