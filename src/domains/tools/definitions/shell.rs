//! Shell command tool definition.
//!
//! Runs a client-supplied command line through the configured shell and
//! returns its standard output. This executes arbitrary code with the
//! privileges of the server process; the registry only exposes it when
//! `shell.enabled` is set.

use std::time::Duration;

use rmcp::model::{CallToolResult, JsonObject};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::core::config::{ProcessConfig, ShellConfig};
use crate::domains::tools::{
    ToolError,
    descriptor::ToolDescriptor,
    handlers::{ToolHandler, parse_arguments},
    process::run_process,
};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the shell command tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ShellCommandParams {
    /// Command line passed verbatim to the shell.
    pub command: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Shell command tool - `<shell> -c <command>`, stdout only.
pub struct ShellCommandTool {
    descriptor: ToolDescriptor,
    program: String,
    timeout: Option<Duration>,
    report_failures: bool,
}

impl ShellCommandTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "run_shell_command";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Execute a shell command and return its standard output. \
         The command runs with the privileges of the server process.";

    pub fn new(shell: &ShellConfig, process: &ProcessConfig) -> Self {
        Self {
            descriptor: ToolDescriptor::for_params::<ShellCommandParams>(
                Self::NAME,
                Self::DESCRIPTION,
            ),
            program: shell.program.clone(),
            timeout: process.timeout(),
            report_failures: process.report_failures,
        }
    }

    /// Execute the tool logic.
    ///
    /// A non-zero exit is only visible to the caller when failures are
    /// reported; otherwise the (possibly empty) stdout is the answer.
    #[instrument(skip_all, fields(shell = %self.program))]
    pub async fn execute(&self, params: &ShellCommandParams) -> Result<CallToolResult, ToolError> {
        info!("Shell command tool called");

        let args = ["-c".to_string(), params.command.clone()];
        let output = run_process(&self.program, &args, self.timeout).await?;

        info!(
            "Shell command finished with {:?}, {} bytes of output",
            output.exit_code,
            output.stdout.len()
        );

        let stdout = output.stdout.clone();
        Ok(output.into_tool_result(stdout, self.report_failures))
    }
}

#[async_trait::async_trait]
impl ToolHandler for ShellCommandTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn call(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let params: ShellCommandParams = parse_arguments(arguments)?;
        self.execute(&params).await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::result_text;

    fn tool(report_failures: bool) -> ShellCommandTool {
        let process = ProcessConfig {
            timeout_secs: None,
            report_failures,
        };
        ShellCommandTool::new(&ShellConfig::default(), &process)
    }

    fn params(command: &str) -> ShellCommandParams {
        ShellCommandParams {
            command: command.to_string(),
        }
    }

    #[tokio::test]
    async fn test_echo_returns_stdout() {
        let result = tool(false).execute(&params("echo hello")).await.unwrap();
        assert_ne!(result.is_error, Some(true));
        assert_eq!(result_text(&result), "hello\n");
    }

    #[tokio::test]
    async fn test_stderr_not_surfaced() {
        let result = tool(false)
            .execute(&params("echo visible; echo hidden >&2"))
            .await
            .unwrap();
        assert_eq!(result_text(&result), "visible\n");
    }

    #[tokio::test]
    async fn test_failing_command_returns_empty_string() {
        let result = tool(false)
            .execute(&params("no-such-binary-for-shell-test-91c2"))
            .await
            .unwrap();
        assert_ne!(result.is_error, Some(true));
        assert_eq!(result_text(&result), "");
    }

    #[tokio::test]
    async fn test_failing_command_reported_when_enabled() {
        let result = tool(true)
            .execute(&params("echo oops >&2; exit 4"))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
        let text = result_text(&result);
        assert!(text.contains("oops"));
        assert!(text.contains("Exit code: 4"));
    }

    #[tokio::test]
    async fn test_missing_shell_is_spawn_error() {
        let shell = ShellConfig {
            enabled: true,
            program: "no-such-shell-5d1e".to_string(),
        };
        let tool = ShellCommandTool::new(&shell, &ProcessConfig::default());
        let err = tool.execute(&params("echo hi")).await.unwrap_err();
        assert!(matches!(err, ToolError::Spawn { .. }));
    }

    #[test]
    fn test_descriptor() {
        let tool = tool(false);
        let descriptor = tool.descriptor();
        assert_eq!(descriptor.name(), "run_shell_command");
        assert_eq!(descriptor.parameters().len(), 1);
        assert!(descriptor.parameter("command").unwrap().required);
    }
}
