//! Process delegation.
//!
//! All tools that forward work to an external program go through
//! [`run_process`]. Only stdout is the tool's answer; stderr and the exit
//! code are kept so the failure policy can decide whether to surface them.

use std::process::Stdio;
use std::time::Duration;

use rmcp::model::{CallToolResult, Content};
use tokio::process::Command;
use tracing::{debug, warn};

use super::error::ToolError;

/// Captured result of a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the child was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Human-readable summary of a failed run.
    pub fn failure_report(&self) -> String {
        let mut report = String::new();
        if !self.stdout.is_empty() {
            report.push_str(&self.stdout);
            if !report.ends_with('\n') {
                report.push('\n');
            }
        }
        if !self.stderr.is_empty() {
            report.push_str("STDERR:\n");
            report.push_str(&self.stderr);
            if !report.ends_with('\n') {
                report.push('\n');
            }
        }
        match self.exit_code {
            Some(code) => report.push_str(&format!("Exit code: {}", code)),
            None => report.push_str("Terminated by signal"),
        }
        report
    }

    /// Turn the output into a tool result.
    ///
    /// A successful run, or any run when failures are not reported, yields
    /// `answer` as a success. Otherwise the failure report is returned as an
    /// error result.
    pub fn into_tool_result(self, answer: String, report_failures: bool) -> CallToolResult {
        if report_failures && !self.success() {
            CallToolResult::error(vec![Content::text(self.failure_report())])
        } else {
            CallToolResult::success(vec![Content::text(answer)])
        }
    }
}

/// Run `program` with `args` and wait for it to finish.
///
/// The child gets a closed stdin so it cannot consume the STDIO transport.
/// Non-zero exits are not errors here; only a failure to start the process
/// or an elapsed timeout is.
pub async fn run_process(
    program: &str,
    args: &[String],
    timeout: Option<Duration>,
) -> Result<ProcessOutput, ToolError> {
    debug!("Spawning {} with {} argument(s)", program, args.len());

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let output = match timeout {
        Some(limit) => match tokio::time::timeout(limit, command.output()).await {
            Ok(result) => result,
            Err(_) => {
                warn!("{} did not finish within {:?}, killed", program, limit);
                return Err(ToolError::Timeout);
            }
        },
        None => command.output().await,
    }
    .map_err(|e| ToolError::spawn(program, e))?;

    let output = ProcessOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code: output.status.code(),
    };

    if !output.success() {
        warn!(
            "{} exited with {:?}: {}",
            program,
            output.exit_code,
            output.stderr.trim_end()
        );
    }

    Ok(output)
}
