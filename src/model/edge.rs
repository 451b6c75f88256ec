//! Edge in the property graph.

use serde::{Deserialize, Serialize};

use super::{Element, Properties, PropertyValue, VertexId};

/// Opaque edge identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u64);

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A labeled, directed edge.
///
/// `source` and `target` are lookups into the owning graph, not owned
/// vertices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub label: String,
    pub source: VertexId,
    pub target: VertexId,
    #[serde(default)]
    pub properties: Properties,
}

impl Edge {
    pub fn new(id: EdgeId, source: VertexId, target: VertexId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            source,
            target,
            properties: Properties::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.set(key, value);
        self
    }
}

impl Element for Edge {
    fn label(&self) -> &str { &self.label }
    fn properties(&self) -> &Properties { &self.properties }
    fn properties_mut(&mut self) -> &mut Properties { &mut self.properties }
}
