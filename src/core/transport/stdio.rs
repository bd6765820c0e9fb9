//! STDIO transport implementation.
//!
//! Standard input/output transport for MCP - the default and recommended mode.
//! stdout carries protocol messages only; logs go to stderr and delegated
//! processes get a closed stdin.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Run the STDIO transport until the client closes the stream.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!(
            "Ready - serving {} tool(s) via stdin/stdout: {}",
            server.registry().len(),
            server.registry().tool_names().join(", ")
        );

        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        let reason = service
            .waiting()
            .await
            .map_err(|e| TransportError::serve(e.to_string()))?;

        info!("STDIO transport finished: {:?}", reason);
        Ok(())
    }
}
