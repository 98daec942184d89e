//! Node identity, parameter resolution and execution items

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of the node on whose behalf a request is made
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeIdentity {
    /// Display name of the node instance
    pub name: String,
    /// Node type (e.g. "googleAnalytics")
    #[serde(rename = "type", default)]
    pub node_type: String,
}

impl NodeIdentity {
    pub fn new(name: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_type: node_type.into(),
        }
    }
}

impl fmt::Display for NodeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.node_type.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.node_type)
        }
    }
}

/// Resolves named configuration values for the executing node
///
/// Values are looked up at call time, so a resolver may hand out different
/// values between calls.
pub trait ParameterResolver: Send + Sync {
    /// Identity of the node the parameters belong to
    fn node(&self) -> &NodeIdentity;

    /// Raw parameter value, `None` when unset
    fn parameter(&self, name: &str) -> Option<JsonValue>;

    /// Boolean parameter, `default` when unset
    fn bool_parameter(&self, name: &str, default: bool) -> Result<bool> {
        match self.parameter(name) {
            None | Some(JsonValue::Null) => Ok(default),
            Some(JsonValue::Bool(b)) => Ok(b),
            Some(other) => Err(Error::node_operation(
                self.node().clone(),
                format!("Parameter '{name}' must be a boolean, got {other}"),
            )),
        }
    }

    /// String parameter, `default` when unset
    fn str_parameter(&self, name: &str, default: &str) -> Result<String> {
        match self.parameter(name) {
            None | Some(JsonValue::Null) => Ok(default.to_string()),
            Some(JsonValue::String(s)) => Ok(s),
            Some(other) => Err(Error::node_operation(
                self.node().clone(),
                format!("Parameter '{name}' must be a string, got {other}"),
            )),
        }
    }
}

/// Map-backed parameter resolver
#[derive(Debug, Clone)]
pub struct NodeParameters {
    node: NodeIdentity,
    values: JsonObject,
}

impl NodeParameters {
    /// Create an empty parameter set for a node
    pub fn new(node: NodeIdentity) -> Self {
        Self {
            node,
            values: JsonObject::new(),
        }
    }

    /// Create a parameter set from an existing map
    pub fn from_map(node: NodeIdentity, values: JsonObject) -> Self {
        Self { node, values }
    }

    /// Set a parameter
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Set a parameter in place
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<JsonValue>) {
        self.values.insert(name.into(), value.into());
    }
}

impl ParameterResolver for NodeParameters {
    fn node(&self) -> &NodeIdentity {
        &self.node
    }

    fn parameter(&self, name: &str) -> Option<JsonValue> {
        self.values.get(name).cloned()
    }
}

/// One output record of a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionItem {
    pub json: JsonValue,
}

impl ExecutionItem {
    pub fn new(json: JsonValue) -> Self {
        Self { json }
    }
}

impl From<JsonValue> for ExecutionItem {
    fn from(json: JsonValue) -> Self {
        Self::new(json)
    }
}
