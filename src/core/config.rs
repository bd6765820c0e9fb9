//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, a `.env` file, or defaults.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by concern for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Shell execution capability.
    pub shell: ShellConfig,

    /// Document converter delegation.
    pub converter: ConverterConfig,

    /// Policy shared by every delegated process.
    pub process: ProcessConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Configuration for the `run_shell_command` tool.
///
/// Running client-supplied commands executes arbitrary code with the
/// privileges of the server process, so the tool is opt-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Register the shell tool at all.
    pub enabled: bool,

    /// Shell program invoked as `<program> -c <command>`.
    pub program: String,
}

/// Configuration for the `convert_document` tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Converter executable.
    pub program: String,

    /// Argument template. `{input}` and `{output}` are replaced by the
    /// resolved paths.
    pub args: Vec<String>,

    /// Default root for input filenames.
    pub input_root: String,

    /// Default root for converted output.
    pub output_root: String,
}

/// Configuration applied to every delegated process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessConfig {
    /// Kill the child after this many seconds. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,

    /// Turn a non-zero exit into an error result carrying stderr and the
    /// exit code. When false only stdout is returned.
    pub report_failures: bool,
}

impl ProcessConfig {
    /// The configured timeout as a `Duration`.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            program: "sh".to_string(),
        }
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            program: "markitdown".to_string(),
            args: vec!["{input}".to_string(), "-o".to_string(), "{output}".to_string()],
            input_root: "docs-pdf".to_string(),
            output_root: "docs-markdown".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "tool-shim".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            shell: ShellConfig::default(),
            converter: ConverterConfig::default(),
            process: ProcessConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Some(enabled) = env_flag("MCP_SHELL_ENABLED") {
            config.shell.enabled = enabled;
        }

        if let Ok(program) = std::env::var("MCP_SHELL_PROGRAM") {
            config.shell.program = program;
        }

        if let Ok(program) = std::env::var("MCP_CONVERTER_PROGRAM") {
            config.converter.program = program;
        }

        if let Ok(root) = std::env::var("MCP_INPUT_ROOT") {
            config.converter.input_root = root;
        }

        if let Ok(root) = std::env::var("MCP_OUTPUT_ROOT") {
            config.converter.output_root = root;
        }

        if let Some(report) = env_flag("MCP_REPORT_FAILURES") {
            config.process.report_failures = report;
        }

        config.process.timeout_secs = std::env::var("MCP_PROCESS_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|secs| *secs > 0);

        config
    }

    /// Check the settings the tools cannot run without.
    pub fn validate(&self) -> Result<()> {
        if self.shell.enabled && self.shell.program.trim().is_empty() {
            return Err(Error::config("shell tool enabled but MCP_SHELL_PROGRAM is empty"));
        }
        if self.converter.program.trim().is_empty() {
            return Err(Error::config("converter program must not be empty"));
        }
        Ok(())
    }
}

/// Read a boolean flag. Unrecognised values are treated as unset.
fn env_flag(name: &str) -> Option<bool> {
    let value = std::env::var(name).ok()?;
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Serializes tests that touch `MCP_*` environment variables.
#[cfg(test)]
pub(crate) static ENV_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
