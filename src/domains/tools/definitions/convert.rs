//! Document conversion tool definition.
//!
//! Resolves an input filename against an input root, derives the markdown
//! output path under an output root, makes sure the output directory exists
//! and hands both paths to the external converter (`markitdown` by default).

use std::path::{Path, PathBuf};
use std::time::Duration;

use rmcp::model::{CallToolResult, JsonObject};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::core::config::{ConverterConfig, ProcessConfig};
use crate::domains::tools::{
    ToolError,
    descriptor::ToolDescriptor,
    handlers::{ToolHandler, parse_arguments},
    process::run_process,
};

const INPUT_PLACEHOLDER: &str = "{input}";
const OUTPUT_PLACEHOLDER: &str = "{output}";

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the convert document tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ConvertDocumentParams {
    /// Filename of the document, relative to the input root.
    pub input_filename: String,

    /// Directory containing the input document.
    #[serde(default)]
    pub input_root: Option<String>,

    /// Directory receiving the converted markdown file.
    #[serde(default)]
    pub output_root: Option<String>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Convert document tool - document in, markdown file out.
pub struct ConvertDocumentTool {
    descriptor: ToolDescriptor,
    converter: ConverterConfig,
    timeout: Option<Duration>,
    report_failures: bool,
}

impl ConvertDocumentTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "convert_document";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Convert a document (e.g. a PDF) to Markdown. \
         The output file has the input's name with a .md extension and is written under the output root.";

    pub fn new(converter: &ConverterConfig, process: &ProcessConfig) -> Self {
        let descriptor =
            ToolDescriptor::for_params::<ConvertDocumentParams>(Self::NAME, Self::DESCRIPTION)
                .with_default("input_root", converter.input_root.as_str())
                .with_default("output_root", converter.output_root.as_str());

        Self {
            descriptor,
            converter: converter.clone(),
            timeout: process.timeout(),
            report_failures: process.report_failures,
        }
    }

    /// Execute the tool logic.
    ///
    /// The input file is not checked; a missing input surfaces however the
    /// converter reports it.
    #[instrument(skip_all, fields(input = %params.input_filename))]
    pub async fn execute(
        &self,
        params: &ConvertDocumentParams,
    ) -> Result<CallToolResult, ToolError> {
        if params.input_filename.trim().is_empty() {
            return Err(ToolError::invalid_arguments("input_filename must not be empty"));
        }

        let input_root = params
            .input_root
            .as_deref()
            .unwrap_or(self.converter.input_root.as_str());
        let output_root = params
            .output_root
            .as_deref()
            .unwrap_or(self.converter.output_root.as_str());

        let (input_path, output_path) =
            resolve_paths(&params.input_filename, input_root, output_root);
        info!(
            "Converting {} to {}",
            input_path.display(),
            output_path.display()
        );

        if let Some(dir) = output_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| ToolError::io(dir.display().to_string(), e))?;
        }

        let args = self.converter_args(&input_path, &output_path);
        let output = run_process(&self.converter.program, &args, self.timeout).await?;
        if !output.stdout.is_empty() {
            debug!("Converter output: {}", output.stdout.trim_end());
        }

        let confirmation = format!(
            "Converted {} to {}",
            input_path.display(),
            output_path.display()
        );
        Ok(output.into_tool_result(confirmation, self.report_failures))
    }

    /// Fill the argument template with the resolved paths.
    fn converter_args(&self, input: &Path, output: &Path) -> Vec<String> {
        let input = input.to_string_lossy();
        let output = output.to_string_lossy();
        self.converter
            .args
            .iter()
            .map(|arg| {
                arg.replace(INPUT_PLACEHOLDER, &input)
                    .replace(OUTPUT_PLACEHOLDER, &output)
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl ToolHandler for ConvertDocumentTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn call(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let params: ConvertDocumentParams = parse_arguments(arguments)?;
        self.execute(&params).await
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Markdown filename for `input_filename`: same name, `.md` extension.
pub fn output_filename(input_filename: &str) -> PathBuf {
    Path::new(input_filename).with_extension("md")
}

/// Join the input filename and its markdown counterpart with their roots.
pub fn resolve_paths(
    input_filename: &str,
    input_root: &str,
    output_root: &str,
) -> (PathBuf, PathBuf) {
    let input = Path::new(input_root).join(input_filename);
    let output = Path::new(output_root).join(output_filename(input_filename));
    (input, output)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::result_text;
    use serde_json::{Value, json};
    use std::fs;
    use tempfile::TempDir;

    /// A converter that copies `{input}` to `{output}`.
    fn copying_converter(temp: &TempDir) -> ConverterConfig {
        ConverterConfig {
            program: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                "cp \"$0\" \"$1\"".to_string(),
                "{input}".to_string(),
                "{output}".to_string(),
            ],
            input_root: temp.path().join("docs-pdf").to_string_lossy().to_string(),
            output_root: temp.path().join("docs-markdown").to_string_lossy().to_string(),
        }
    }

    fn params(name: &str) -> ConvertDocumentParams {
        ConvertDocumentParams {
            input_filename: name.to_string(),
            input_root: None,
            output_root: None,
        }
    }

    #[test]
    fn test_resolve_default_paths() {
        let (input, output) = resolve_paths("report.pdf", "docs-pdf", "docs-markdown");
        assert_eq!(input, PathBuf::from("docs-pdf/report.pdf"));
        assert_eq!(output, PathBuf::from("docs-markdown/report.md"));
    }

    #[test]
    fn test_output_filename() {
        assert_eq!(output_filename("report.pdf"), PathBuf::from("report.md"));
        assert_eq!(output_filename("notes"), PathBuf::from("notes.md"));
        assert_eq!(output_filename("a/b/c.pdf"), PathBuf::from("a/b/c.md"));
    }

    #[test]
    fn test_descriptor_advertises_defaults() {
        let tool = ConvertDocumentTool::new(&ConverterConfig::default(), &ProcessConfig::default());
        let descriptor = tool.descriptor();
        assert_eq!(descriptor.name(), "convert_document");

        let names: Vec<_> = descriptor.parameters().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["input_filename", "input_root", "output_root"]);

        assert!(descriptor.parameter("input_filename").unwrap().required);
        assert_eq!(
            descriptor.parameter("input_root").unwrap().default,
            Some(Value::from("docs-pdf"))
        );
        assert_eq!(
            descriptor.parameter("output_root").unwrap().default,
            Some(Value::from("docs-markdown"))
        );
    }

    #[test]
    fn test_converter_args_template() {
        let tool = ConvertDocumentTool::new(&ConverterConfig::default(), &ProcessConfig::default());
        let args = tool.converter_args(
            Path::new("docs-pdf/report.pdf"),
            Path::new("docs-markdown/report.md"),
        );
        assert_eq!(
            args,
            vec!["docs-pdf/report.pdf", "-o", "docs-markdown/report.md"]
        );
    }

    #[tokio::test]
    async fn test_convert_creates_output_dir() {
        let temp = TempDir::new().unwrap();
        let converter = copying_converter(&temp);
        fs::create_dir_all(&converter.input_root).unwrap();
        fs::write(temp.path().join("docs-pdf/report.pdf"), "%PDF-1.4 body").unwrap();

        let tool = ConvertDocumentTool::new(&converter, &ProcessConfig::default());
        let result = tool.execute(&params("report.pdf")).await.unwrap();
        assert_ne!(result.is_error, Some(true));

        let expected_output = temp.path().join("docs-markdown/report.md");
        assert!(expected_output.is_file());
        assert_eq!(fs::read_to_string(&expected_output).unwrap(), "%PDF-1.4 body");

        let text = result_text(&result);
        assert!(text.contains(&temp.path().join("docs-pdf/report.pdf").display().to_string()));
        assert!(text.contains(&expected_output.display().to_string()));
    }

    #[tokio::test]
    async fn test_convert_twice_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let converter = copying_converter(&temp);
        fs::create_dir_all(&converter.input_root).unwrap();
        fs::write(temp.path().join("docs-pdf/report.pdf"), "data").unwrap();

        let tool = ConvertDocumentTool::new(&converter, &ProcessConfig::default());
        tool.execute(&params("report.pdf")).await.unwrap();
        let second = tool.execute(&params("report.pdf")).await.unwrap();
        assert_ne!(second.is_error, Some(true));
    }

    #[tokio::test]
    async fn test_explicit_roots_override_defaults() {
        let temp = TempDir::new().unwrap();
        let converter = copying_converter(&temp);
        let in_root = temp.path().join("in");
        let out_root = temp.path().join("out/nested");
        fs::create_dir_all(&in_root).unwrap();
        fs::write(in_root.join("paper.pdf"), "x").unwrap();

        let tool = ConvertDocumentTool::new(&converter, &ProcessConfig::default());
        let args = json!({
            "input_filename": "paper.pdf",
            "input_root": in_root.to_string_lossy(),
            "output_root": out_root.to_string_lossy(),
        });
        let result = tool
            .call(args.as_object().cloned().unwrap())
            .await
            .unwrap();
        assert_ne!(result.is_error, Some(true));
        assert!(out_root.join("paper.md").is_file());
    }

    #[tokio::test]
    async fn test_missing_input_is_not_prevalidated() {
        let temp = TempDir::new().unwrap();
        let mut converter = copying_converter(&temp);
        converter.program = "true".to_string();

        let tool = ConvertDocumentTool::new(&converter, &ProcessConfig::default());
        let result = tool.execute(&params("absent.pdf")).await.unwrap();
        assert_ne!(result.is_error, Some(true));
        assert!(temp.path().join("docs-markdown").is_dir());
    }

    #[tokio::test]
    async fn test_converter_failure_reported_when_enabled() {
        let temp = TempDir::new().unwrap();
        let converter = copying_converter(&temp);
        let process = ProcessConfig {
            timeout_secs: None,
            report_failures: true,
        };

        let tool = ConvertDocumentTool::new(&converter, &process);
        let result = tool.execute(&params("absent.pdf")).await.unwrap();
        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).contains("Exit code:"));
    }

    #[tokio::test]
    async fn test_missing_converter_is_spawn_error() {
        let temp = TempDir::new().unwrap();
        let mut converter = copying_converter(&temp);
        converter.program = "no-such-converter-2b8f".to_string();

        let tool = ConvertDocumentTool::new(&converter, &ProcessConfig::default());
        let err = tool.execute(&params("report.pdf")).await.unwrap_err();
        assert!(matches!(err, ToolError::Spawn { .. }));
        // The output directory is created before the converter is invoked.
        assert!(temp.path().join("docs-markdown").is_dir());
    }

    #[tokio::test]
    async fn test_empty_filename_rejected() {
        let tool = ConvertDocumentTool::new(&ConverterConfig::default(), &ProcessConfig::default());
        let err = tool.execute(&params("  ")).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
