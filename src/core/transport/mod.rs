//! Transports the server can be reached over.
//!
//! - `stdio` (default feature): MCP over stdin/stdout, served by rmcp.
//!   stdout is reserved for protocol frames.
//! - `http`: JSON-RPC over `POST`, served by axum. Binds all interfaces
//!   unless `MCP_HTTP_HOST` says otherwise.
//!
//! Both dispatch into the same [`ToolRegistry`](crate::domains::tools::ToolRegistry).

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "http")]
pub use config::HttpConfig;
