//! Server infrastructure: configuration, errors, the rmcp handler and the
//! transports it runs on. Tool behavior lives in `domains::tools`.

pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
