//! Vertex in the property graph.

use serde::{Deserialize, Serialize};

use super::{Element, Properties, PropertyValue};

/// Opaque vertex identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(pub u64);

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A labeled vertex in the property graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    pub id: VertexId,
    pub label: String,
    #[serde(default)]
    pub properties: Properties,
}

impl Vertex {
    pub fn new(id: VertexId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            properties: Properties::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.set(key, value);
        self
    }
}

impl Element for Vertex {
    fn label(&self) -> &str { &self.label }
    fn properties(&self) -> &Properties { &self.properties }
    fn properties_mut(&mut self) -> &mut Properties { &mut self.properties }
}
