//! Tool records and the catalog that holds them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, ToolboardError};

/// One entry of the gateway's tool catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tool {
    pub name: String,
    pub description: String,
}

impl Tool {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Read a tool out of one payload entry without rejecting odd shapes.
    ///
    /// Non-string fields are kept in their JSON text form and entries that
    /// are not objects become a tool named after the raw value.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self {
                name: map.get("name").map(text_of).unwrap_or_default(),
                description: map.get("description").map(text_of).unwrap_or_default(),
            },
            other => Self {
                name: text_of(other),
                description: String::new(),
            },
        }
    }

    /// Id handed to this tool's enable toggle.
    ///
    /// Derived from the name, so two tools sharing a name share an id.
    pub fn toggle_id(&self) -> String {
        format!("enable-toggle-{}", self.name)
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Read the list-tools payload.
///
/// The payload must be a JSON array; each entry is taken as-is through
/// `Tool::from_value`.
pub fn parse_tools(payload: &Value) -> Result<Vec<Tool>> {
    match payload {
        Value::Array(entries) => Ok(entries.iter().map(Tool::from_value).collect()),
        Value::Null => Err(ToolboardError::Payload("gateway returned an empty body".to_string())),
        other => Err(ToolboardError::Payload(format!(
            "expected a list of tools, got {}",
            kind_of(other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Ordered tool list in server order.
///
/// A catalog is never edited in place: each successful fetch produces a new
/// one, so two catalogs with the same generation hold the same list.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tools: Arc<[Tool]>,
    generation: u64,
}

impl Catalog {
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Number of replacements since the catalog was created.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The next catalog, holding `tools`.
    pub fn replaced(&self, tools: Vec<Tool>) -> Self {
        Self {
            tools: tools.into(),
            generation: self.generation + 1,
        }
    }

    /// Whether both catalogs share the same underlying list.
    pub fn same_as(&self, other: &Catalog) -> bool {
        Arc::ptr_eq(&self.tools, &other.tools)
    }
}
