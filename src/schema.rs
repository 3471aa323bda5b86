// ABOUTME: Schema translation - turns a remote tool's parameter list into the
// ABOUTME: flattened object schema used for LLM function declarations.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::ConfigError;
use crate::remote::{ToolDefinition, ToolParameter};

/// Parameters of a function declaration: an object with named properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionParameters {
    #[serde(rename = "type")]
    pub kind: String,
    pub properties: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl FunctionParameters {
    /// An object schema with no properties.
    pub fn empty() -> Self {
        Self {
            kind: "object".to_string(),
            properties: Map::new(),
            required: Vec::new(),
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| json!({"type": "object"}))
    }
}

/// Translate a remote tool definition into function parameters.
pub fn translate(def: &ToolDefinition) -> Result<FunctionParameters, ConfigError> {
    let schema = object_schema(def)?;
    project(&def.qualified_name, &schema)
}

/// Build the full JSON object schema for a tool's parameter list.
pub fn object_schema(def: &ToolDefinition) -> Result<Value, ConfigError> {
    let malformed = |message: String| ConfigError::Schema {
        tool: def.qualified_name.clone(),
        message,
    };

    let mut properties = Map::new();
    let mut required = Vec::new();
    let mut seen = HashSet::new();

    for param in &def.input.parameters {
        if param.name.is_empty() {
            return Err(malformed("parameter with empty name".into()));
        }
        if !seen.insert(param.name.as_str()) {
            return Err(malformed(format!("duplicate parameter '{}'", param.name)));
        }

        properties.insert(param.name.clone(), property_schema(param).map_err(malformed)?);
        if param.required {
            required.push(Value::String(param.name.clone()));
        }
    }

    Ok(json!({
        "title": def.name,
        "type": "object",
        "properties": properties,
        "required": required,
    }))
}

/// Project an object schema onto its top-level properties.
///
/// Nested property schemas are passed through untouched.
pub fn project(tool: &str, schema: &Value) -> Result<FunctionParameters, ConfigError> {
    let malformed = |message: &str| ConfigError::Schema {
        tool: tool.to_string(),
        message: message.to_string(),
    };

    let object = schema
        .as_object()
        .ok_or_else(|| malformed("schema is not an object"))?;

    if let Some(kind) = object.get("type") {
        if kind != "object" {
            return Err(malformed("schema type is not 'object'"));
        }
    }

    let properties = object
        .get("properties")
        .and_then(Value::as_object)
        .ok_or_else(|| malformed("schema has no 'properties' map"))?
        .clone();

    let required = match object.get("required") {
        None => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| malformed("'required' entries must be strings"))
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err(malformed("'required' is not an array")),
    };

    if let Some(missing) = required.iter().find(|r| !properties.contains_key(*r)) {
        return Err(ConfigError::Schema {
            tool: tool.to_string(),
            message: format!("required parameter '{}' has no property", missing),
        });
    }

    Ok(FunctionParameters {
        kind: "object".to_string(),
        properties,
        required,
    })
}

fn property_schema(param: &ToolParameter) -> Result<Value, String> {
    let schema = &param.value_schema;
    let mut property = Map::new();

    property.insert("type".into(), json!(json_type(&schema.val_type)?));

    if schema.val_type == "array" {
        let inner = schema
            .inner_val_type
            .as_deref()
            .ok_or_else(|| format!("array parameter '{}' has no inner type", param.name))?;
        property.insert("items".into(), json!({ "type": json_type(inner)? }));
    }

    if let Some(values) = &schema.enum_values {
        property.insert("enum".into(), json!(values));
    }

    if let Some(description) = &param.description {
        property.insert("description".into(), json!(description));
    }

    Ok(Value::Object(property))
}

fn json_type(val_type: &str) -> Result<&'static str, String> {
    match val_type {
        "string" => Ok("string"),
        "integer" => Ok("integer"),
        "number" => Ok("number"),
        "boolean" => Ok("boolean"),
        "json" => Ok("object"),
        "array" => Ok("array"),
        other => Err(format!("unsupported value type '{}'", other)),
    }
}
