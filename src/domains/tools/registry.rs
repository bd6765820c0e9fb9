//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - An explicit registry mapping tool name to its handler
//! - Dispatch of invocation requests (used directly by the HTTP transport)
//! - Tool metadata for listing
//!
//! Registration order is preserved; names are unique and a duplicate
//! registration is rejected, leaving the registry unchanged.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::{CallToolResult, Tool};
use tracing::{info, instrument, warn};

use super::definitions::{AddTool, ConvertDocumentTool, ShellCommandTool};
use super::descriptor::ToolDescriptor;
use super::error::ToolError;
use super::handlers::{InvocationRequest, ToolHandler};
use crate::core::config::Config;

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn ToolHandler>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in tools enabled by `config`.
    pub fn with_builtin_tools(config: &Config) -> Result<Self, ToolError> {
        let mut registry = Self::new();

        registry.register(AddTool::new())?;

        if config.shell.enabled {
            warn!(
                "{} is enabled: clients can run arbitrary commands as this process",
                ShellCommandTool::NAME
            );
            registry.register(ShellCommandTool::new(&config.shell, &config.process))?;
        } else {
            info!(
                "{} disabled (set MCP_SHELL_ENABLED=true to expose it)",
                ShellCommandTool::NAME
            );
        }

        registry.register(ConvertDocumentTool::new(&config.converter, &config.process))?;

        Ok(registry)
    }

    /// Register a tool.
    pub fn register<H>(&mut self, handler: H) -> Result<(), ToolError>
    where
        H: ToolHandler + 'static,
    {
        self.register_arc(Arc::new(handler))
    }

    /// Register an already shared tool handler.
    pub fn register_arc(&mut self, handler: Arc<dyn ToolHandler>) -> Result<(), ToolError> {
        let name = handler.descriptor().name().to_string();
        if self.index.contains_key(&name) {
            warn!("Rejecting duplicate tool registration: {}", name);
            return Err(ToolError::DuplicateName(name));
        }

        info!("Registering tool: {}", name);
        self.index.insert(name, self.tools.len());
        self.tools.push(handler);
        Ok(())
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ToolHandler>> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    /// Registered handlers, in registration order.
    pub fn handlers(&self) -> impl Iterator<Item = &Arc<dyn ToolHandler>> {
        self.tools.iter()
    }

    /// Descriptors of all tools, in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter().map(|t| t.descriptor())
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&str> {
        self.descriptors().map(|d| d.name()).collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn tools(&self) -> Vec<Tool> {
        self.descriptors().map(|d| d.to_tool()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Dispatch an invocation to the named tool.
    #[instrument(skip_all, fields(tool = %request.name))]
    pub async fn call(&self, request: InvocationRequest) -> Result<CallToolResult, ToolError> {
        let Some(handler) = self.get(&request.name) else {
            warn!("Unknown tool requested: {}", request.name);
            return Err(ToolError::not_found(request.name));
        };
        handler.call(request.arguments).await
    }
}
