//! Add tool definition.
//!
//! Pure in-process arithmetic, no delegation.

use rmcp::model::{CallToolResult, Content, JsonObject};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::domains::tools::{
    ToolError,
    descriptor::ToolDescriptor,
    handlers::{ToolHandler, parse_arguments},
};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the add tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddParams {
    /// First operand.
    pub a: i64,

    /// Second operand.
    pub b: i64,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Add tool - returns the sum of two integers.
pub struct AddTool {
    descriptor: ToolDescriptor,
}

impl AddTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "add";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Add two numbers";

    pub fn new() -> Self {
        Self {
            descriptor: ToolDescriptor::for_params::<AddParams>(Self::NAME, Self::DESCRIPTION),
        }
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(a = params.a, b = params.b))]
    pub fn execute(params: &AddParams) -> CallToolResult {
        match params.a.checked_add(params.b) {
            Some(sum) => {
                info!("add = {}", sum);
                CallToolResult::success(vec![Content::text(sum.to_string())])
            }
            None => {
                warn!("Integer overflow");
                CallToolResult::error(vec![Content::text(format!(
                    "Integer overflow: {} + {} does not fit in 64 bits",
                    params.a, params.b
                ))])
            }
        }
    }
}

impl Default for AddTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ToolHandler for AddTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn call(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let params: AddParams = parse_arguments(arguments)?;
        Ok(Self::execute(&params))
    }
}

// ============================================================================
// Tests
// ============================================================================
