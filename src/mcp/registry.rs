//! Tool Registry
//!
//! The set of invocable tools is static configuration: exactly two
//! descriptors, declared search-first, fixed at startup. Each descriptor
//! carries the JSON input schema used both for discovery (`tools/list`) and
//! for required-argument validation before dispatch.

use serde::Serialize;
use serde_json::{json, Value};

use super::models::ToolError;

/// Name of the keyword search tool
pub const SEARCH_TOOL_NAME: &str = "search_products";
/// Name of the best-seller recommendation tool
pub const RECOMMEND_TOOL_NAME: &str = "recommend_products";

/// A named, schema-described remote operation invocable by a client.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    /// Unique tool name within the registry
    pub name: &'static str,

    /// Human-readable description shown to clients
    pub description: &'static str,

    /// Descriptor kind advertised to clients
    #[serde(rename = "type")]
    pub kind: &'static str,

    /// JSON schema of the tool's argument object
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolDescriptor {
    /// Checks that every argument named in the schema's `required` list is
    /// present. Both registered schemas only declare string properties, so a
    /// required argument must also be a string.
    pub fn validate_arguments(&self, arguments: &Value) -> Result<(), ToolError> {
        let Some(required) = self.input_schema.get("required").and_then(Value::as_array) else {
            return Ok(());
        };

        for field in required.iter().filter_map(Value::as_str) {
            match arguments.get(field) {
                Some(value) if value.is_string() => {}
                Some(_) => {
                    return Err(ToolError::InvalidArguments(format!(
                        "argument `{}` for tool `{}` must be a string",
                        field, self.name
                    )))
                }
                None => {
                    return Err(ToolError::InvalidArguments(format!(
                        "missing required argument `{}` for tool `{}`",
                        field, self.name
                    )))
                }
            }
        }

        Ok(())
    }
}

/// Returns the full descriptor set in declared order.
pub fn tools() -> Vec<ToolDescriptor> {
    vec![search_descriptor(), recommend_descriptor()]
}

/// Looks up a descriptor by tool name.
pub fn find(name: &str) -> Option<ToolDescriptor> {
    tools().into_iter().find(|tool| tool.name == name)
}

fn search_descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: SEARCH_TOOL_NAME,
        description: "Search Shopify products by keyword",
        kind: "action",
        input_schema: json!({
            "type": "object",
            "properties": { "keyword": { "type": "string" } },
            "required": ["keyword"],
        }),
    }
}

fn recommend_descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: RECOMMEND_TOOL_NAME,
        description: "Recommend top-selling Shopify products",
        kind: "action",
        input_schema: json!({
            "type": "object",
            "properties": {},
        }),
    }
}
