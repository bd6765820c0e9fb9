//! Crate-level error type.
//!
//! Startup and serving failures end up here; failures inside a single tool
//! call stay as [`ToolError`] and are reported to the client instead.

use thiserror::Error;

use crate::domains::tools::ToolError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Registering the tools failed (e.g. two tools share a name).
    #[error("Tool registration failed: {0}")]
    Tool(#[from] ToolError),

    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),

    /// The configuration cannot be served.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
