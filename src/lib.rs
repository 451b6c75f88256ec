//! # magimport — MAG Property Graph Utilities
//!
//! Transformations over graphs imported from the Microsoft Academic Graph
//! (MAG) relational dump.
//!
//! ## Design Principles
//!
//! 1. **Pure operators**: splitting and grouping take a materialized
//!    `LogicalGraph` and return a new one; no I/O inside
//! 2. **One code path per concern**: vertices and edges share the `Element`
//!    trait, so every per-element operator is written once
//! 3. **I/O at the edge**: `GraphSource` / `GraphSink` are the only async
//!    seams
//!
//! ## Quick Start
//!
//! ```rust
//! use magimport::{group_by_label, LogicalGraph, Vertex, VertexId};
//!
//! # fn example() -> magimport::Result<()> {
//! let graph = LogicalGraph::from_parts(
//!     vec![
//!         Vertex::new(VertexId(1), "Paper").with_property("attributes", "title;year"),
//!         Vertex::new(VertexId(2), "Paper").with_property("attributes", "title;venue"),
//!     ],
//!     Vec::new(),
//! );
//!
//! let schema = group_by_label(&graph)?;
//! assert_eq!(schema.vertex_count(), 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Operators
//!
//! | Operator | Module | Description |
//! |----------|--------|-------------|
//! | `SplitAttributes` | `transform` | Expand a packed `{name: long}` map into properties |
//! | `Grouping` | `grouping` | Collapse vertices/edges by label into a schema graph |
//! | `run` | `pipeline` | Split, then group |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod schema;
pub mod transform;
pub mod grouping;
pub mod pipeline;
pub mod io;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{
    Element, LogicalGraph, Properties, PropertyValue,
    Vertex, VertexId, Edge, EdgeId,
};

// ============================================================================
// Re-exports: Schema
// ============================================================================

pub use schema::{FieldType, ObjectType, TableSchema, TableSchemaBuilder, SCOPE_SEPARATOR};

// ============================================================================
// Re-exports: Operators
// ============================================================================

pub use transform::{split, SplitAttributes};
pub use grouping::{
    group_by_label, Grouping,
    AttributeSetAggregator, PropertyValueAggregator,
};
pub use pipeline::PipelineConfig;

// ============================================================================
// Re-exports: I/O
// ============================================================================

pub use io::{GraphSink, GraphSource};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Operator sequencing defect, not bad input.
    #[error("Logic error: {0}")]
    LogicError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialize error: {0}")]
    Serialize(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
