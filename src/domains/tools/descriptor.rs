//! Tool descriptors.
//!
//! A [`ToolDescriptor`] is the registration-time description of a tool: its
//! name, summary and ordered parameter list. The parameter list is read off
//! the JSON schema of the same parameters struct the handler deserializes
//! into, so the advertised parameters cannot drift from the ones consumed.

use std::sync::Arc;

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{JsonObject, Tool},
};
use schemars::JsonSchema;
use serde_json::Value;

/// Semantic type of a parameter, as declared by its JSON schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    Integer,
    Number,
    String,
    Boolean,
    Array,
    Object,
    Unknown,
}

impl ParameterKind {
    fn from_schema(schema: &Value) -> Self {
        // Optional fields are declared as `["string", "null"]`.
        let ty = match schema.get("type") {
            Some(Value::String(ty)) => Some(ty.as_str()),
            Some(Value::Array(types)) => types
                .iter()
                .filter_map(Value::as_str)
                .find(|ty| *ty != "null"),
            _ => None,
        };

        match ty {
            Some("integer") => Self::Integer,
            Some("number") => Self::Number,
            Some("string") => Self::String,
            Some("boolean") => Self::Boolean,
            Some("array") => Self::Array,
            Some("object") => Self::Object,
            _ => Self::Unknown,
        }
    }
}

/// One declared tool parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
    pub name: String,
    pub kind: ParameterKind,
    pub description: Option<String>,
    pub default: Option<Value>,
    pub required: bool,
}

/// Immutable description of a registered tool.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    name: String,
    summary: String,
    parameters: Vec<ParameterDescriptor>,
    input_schema: Arc<JsonObject>,
}

impl ToolDescriptor {
    /// Build a descriptor whose parameters are those of `P`.
    pub fn for_params<P>(name: impl Into<String>, summary: impl Into<String>) -> Self
    where
        P: JsonSchema + 'static,
    {
        let input_schema = cached_schema_for_type::<P>();
        let parameters = parameters_from_schema(&input_schema);

        Self {
            name: name.into(),
            summary: summary.into(),
            parameters,
            input_schema,
        }
    }

    /// Advertise a default for an optional parameter.
    ///
    /// The value is recorded on the parameter and written into the input
    /// schema so clients see it. Unknown parameter names are ignored.
    pub fn with_default(mut self, parameter: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        let Some(param) = self.parameters.iter_mut().find(|p| p.name == parameter) else {
            return self;
        };
        param.default = Some(value.clone());

        let schema = Arc::make_mut(&mut self.input_schema);
        if let Some(Value::Object(property)) = schema
            .get_mut("properties")
            .and_then(|props| props.get_mut(parameter))
        {
            property.insert("default".to_string(), value);
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Parameters in declaration order.
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn input_schema(&self) -> &Arc<JsonObject> {
        &self.input_schema
    }

    /// Create the rmcp Tool model for this descriptor.
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.clone().into(),
            description: Some(self.summary.clone().into()),
            input_schema: self.input_schema.clone(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

fn parameters_from_schema(schema: &JsonObject) -> Vec<ParameterDescriptor> {
    let required: Vec<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return Vec::new();
    };

    properties
        .iter()
        .map(|(name, property)| ParameterDescriptor {
            name: name.clone(),
            kind: ParameterKind::from_schema(property),
            description: property
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
            // Optional fields carry `"default": null`, which is no default at all.
            default: property.get("default").filter(|v| !v.is_null()).cloned(),
            required: required.contains(&name.as_str()),
        })
        .collect()
}
