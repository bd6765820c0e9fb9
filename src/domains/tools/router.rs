//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! The STDIO transport is served by rmcp, which dispatches tool
//! calls through a `ToolRouter`. Each registered handler becomes one route,
//! so rmcp and the HTTP transport share the same tool implementations.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
};

use super::handlers::ToolHandler;
use super::registry::ToolRegistry;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(registry: &ToolRegistry) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    registry
        .handlers()
        .fold(ToolRouter::new(), |router, handler| {
            router.with_route(create_route(handler.clone()))
        })
}

/// Create a ToolRoute for one handler.
fn create_route<S>(handler: Arc<dyn ToolHandler>) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    let tool = handler.descriptor().to_tool();
    ToolRoute::new_dyn(tool, move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().unwrap_or_default();
        let handler = handler.clone();
        async move { handler.call(args).await.map_err(McpError::from) }.boxed()
    })
}
