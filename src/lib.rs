//! Tool Shim MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server exposing a small
//! set of tools that delegate their work to external processes: integer
//! addition, shell command execution and document-to-markdown conversion.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the rmcp server handler and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: Tool registry, descriptors, process delegation and the tools themselves
//!
//! # Example
//!
//! ```rust,no_run
//! use tool_shim_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use self::core::{Config, Error, McpServer, Result};
