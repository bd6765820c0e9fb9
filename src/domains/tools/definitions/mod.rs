//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod add;
pub mod convert;
pub mod shell;

pub use add::{AddParams, AddTool};
pub use convert::{ConvertDocumentParams, ConvertDocumentTool};
pub use shell::{ShellCommandParams, ShellCommandTool};

/// Text of the first content item of a tool result.
#[cfg(test)]
pub(crate) fn result_text(result: &rmcp::model::CallToolResult) -> &str {
    match &result.content[0].raw {
        rmcp::model::RawContent::Text(text) => &text.text,
        _ => panic!("Expected text content"),
    }
}
