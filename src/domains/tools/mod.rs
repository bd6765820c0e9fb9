//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are named operations that MCP clients call; most of them forward
//! the work to an external process and return its captured output.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `descriptor.rs` - Tool name, summary and typed parameter list
//! - `handlers.rs` - The `ToolHandler` trait and invocation requests
//! - `registry.rs` - Explicit name → handler registry and dispatch
//! - `router.rs` - rmcp ToolRouter built from the registry (STDIO)
//! - `process.rs` - Delegation to external processes
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with a params struct deriving
//!    `Deserialize` and `JsonSchema`
//! 2. Implement `ToolHandler` for the tool
//! 3. Export in `definitions/mod.rs`
//! 4. Register it in `ToolRegistry::with_builtin_tools`
//!
//! The router and the HTTP dispatch pick it up from the registry.

pub mod definitions;
pub mod descriptor;
mod error;
mod handlers;
pub mod process;
mod registry;
pub mod router;

pub use descriptor::{ParameterDescriptor, ParameterKind, ToolDescriptor};
pub use error::ToolError;
pub use handlers::*;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
