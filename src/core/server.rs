//! The rmcp server handler.
//!
//! [`McpServer`] owns the [`ToolRegistry`] built at startup. rmcp reaches the
//! tools through a `ToolRouter` derived from that registry; the HTTP
//! transport calls `McpServer::call_tool`, which dispatches through the
//! registry directly. New tools are registered in the registry, not here.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tracing::info;

use super::config::Config;
use crate::domains::tools::{ToolRegistry, build_tool_router};

#[cfg(feature = "http")]
use crate::domains::tools::{InvocationRequest, ToolError};

const INSTRUCTIONS: &str = "Tools run on the server host. `add` sums two integers, \
     `convert_document` converts a document to Markdown, and `run_shell_command` \
     (when enabled) runs a shell command and returns its standard output.";

/// MCP server exposing the registered tools.
#[derive(Clone)]
pub struct McpServer {
    config: Arc<Config>,
    registry: Arc<ToolRegistry>,
    /// Read by `#[tool_handler]`.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Fails when the configuration is unusable or two tools share a name.
    pub fn new(config: Config) -> super::error::Result<Self> {
        config.validate()?;
        let registry = ToolRegistry::with_builtin_tools(&config)?;
        info!("{} tool(s) registered", registry.len());
        Ok(Self::with_registry(config, registry))
    }

    /// Create a server serving an already populated registry.
    pub fn with_registry(config: Config, registry: ToolRegistry) -> Self {
        Self {
            tool_router: build_tool_router::<Self>(&registry),
            config: Arc::new(config),
            registry: Arc::new(registry),
        }
    }

    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Instructions sent to clients on initialization.
    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    /// `tools/list` entries, in registration order.
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.registry
            .descriptors()
            .map(|d| {
                serde_json::json!({
                    "name": d.name(),
                    "description": d.summary(),
                    "inputSchema": d.input_schema()
                })
            })
            .collect()
    }

    /// Invoke a tool and render the result as a `tools/call` payload.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let request = InvocationRequest::from_value(name, arguments)?;
        let result = self.registry.call(request).await?;
        Ok(serde_json::json!({
            "content": result.content,
            "isError": result.is_error.unwrap_or(false)
        }))
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
