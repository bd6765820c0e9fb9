//! Tool handler abstraction.
//!
//! Every registered tool implements [`ToolHandler`]. The registry, the rmcp
//! router (STDIO) and the HTTP dispatch all call tools through this
//! trait, so a tool is written once and served on every transport.

use rmcp::model::{CallToolResult, JsonObject};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::descriptor::ToolDescriptor;
use super::error::ToolError;

/// A single tool invocation: the tool name and its arguments.
#[derive(Debug, Clone, Default)]
pub struct InvocationRequest {
    /// The name of the tool to execute.
    pub name: String,

    /// The arguments to pass to the tool, keyed by parameter name.
    pub arguments: JsonObject,
}

impl InvocationRequest {
    pub fn new(name: impl Into<String>, arguments: JsonObject) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Build a request from an untyped JSON value.
    ///
    /// `null` is accepted as "no arguments"; anything other than an object
    /// is rejected.
    pub fn from_value(name: impl Into<String>, arguments: Value) -> Result<Self, ToolError> {
        let arguments = match arguments {
            Value::Null => JsonObject::new(),
            Value::Object(map) => map,
            other => {
                return Err(ToolError::invalid_arguments(format!(
                    "arguments must be an object, got {}",
                    other
                )));
            }
        };
        Ok(Self::new(name, arguments))
    }
}

/// Trait implemented by every tool.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// The registration-time description of this tool.
    fn descriptor(&self) -> &ToolDescriptor;

    /// Execute the tool with the given arguments.
    async fn call(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError>;
}

/// Deserialize tool arguments into the tool's parameters struct.
pub fn parse_arguments<P: DeserializeOwned>(arguments: JsonObject) -> Result<P, ToolError> {
    serde_json::from_value(Value::Object(arguments))
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Params {
        a: i64,
    }

    #[test]
    fn test_from_value_accepts_null() {
        let request = InvocationRequest::from_value("add", Value::Null).unwrap();
        assert_eq!(request.name, "add");
        assert!(request.arguments.is_empty());
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        let err = InvocationRequest::from_value("add", json!([1, 2])).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn test_parse_arguments() {
        let args = json!({ "a": 3 }).as_object().cloned().unwrap();
        let params: Params = parse_arguments(args).unwrap();
        assert_eq!(params.a, 3);

        let args = json!({ "a": "three" }).as_object().cloned().unwrap();
        let err = parse_arguments::<Params>(args).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
