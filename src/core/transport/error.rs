//! Transport error types.

use thiserror::Error;

pub type TransportResult<T> = Result<T, TransportError>;

/// Failure to start or keep serving a transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The listener could not bind its address.
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The MCP handshake or service setup failed.
    #[error("Transport initialization failed: {0}")]
    Init(String),

    /// The transport stopped with an error after it was running.
    #[error("Transport stopped: {0}")]
    Serve(String),
}

impl TransportError {
    pub fn bind(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::Bind {
            address: address.into(),
            source,
        }
    }

    pub fn init(msg: impl Into<String>) -> Self {
        Self::Init(msg.into())
    }

    pub fn serve(msg: impl Into<String>) -> Self {
        Self::Serve(msg.into())
    }
}
