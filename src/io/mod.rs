//! # Graph Source / Graph Sink
//!
//! The boundary between the in-memory operators and whatever stores the
//! graphs. A source must hand over the whole graph before any operator
//! runs; streaming input is not supported.
//!
//! | Type | Direction | Format |
//! |------|-----------|--------|
//! | `JsonDataSource` | load | `vertices.json` + `edges.json`, one JSON object per line |
//! | `JsonDataSink` | write | same layout as `JsonDataSource` reads |
//! | `DotDataSink` | write | Graphviz `graph.dot` |
//! | `MemoryGraphSink` | write | kept in memory, for tests and embedding |

pub mod json;
pub mod dot;
pub mod memory;

use async_trait::async_trait;

use crate::model::LogicalGraph;
use crate::Result;

pub use dot::DotDataSink;
pub use json::{JsonDataSink, JsonDataSource};
pub use memory::MemoryGraphSink;

/// File holding one vertex per line.
pub const VERTICES_FILE: &str = "vertices.json";

/// File holding one edge per line.
pub const EDGES_FILE: &str = "edges.json";

/// Loads a complete graph from a backing store.
#[async_trait]
pub trait GraphSource: Send + Sync {
    async fn load(&self) -> Result<LogicalGraph>;
}

/// Renders a graph to a target representation.
///
/// Sinks accept labels and properties exactly as produced by the
/// operators; they do not validate them.
#[async_trait]
pub trait GraphSink: Send + Sync {
    async fn write(&self, graph: &LogicalGraph) -> Result<()>;
}
