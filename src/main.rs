//! Tool shim server binary.
//!
//! Reads the `MCP_*` environment (and `.env`), sets up logging on stderr,
//! registers the tools and serves them on the configured transport.

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use tool_shim_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    init_logging(&config.logging.level, config.logging.with_timestamps);

    info!("Starting {} v{}", config.server.name, config.server.version);

    let server = McpServer::new(config.clone())?;

    if config.shell.enabled && config.transport.is_networked() {
        warn!(
            "run_shell_command is reachable over {}; any client can run commands as this process",
            config.transport.description()
        );
    }

    TransportService::new(config.transport).run(server).await?;

    info!("Server shutting down");
    Ok(())
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` directives win over `level`. Output goes to stderr because
/// stdout belongs to the STDIO transport.
fn init_logging(level: &str, with_timestamps: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.to_lowercase()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}
