//! # Property Graph Model
//!
//! Plain data shared by every operator: values, property bags, vertices,
//! edges and the graph arena holding them.
//!
//! This module is pure data — no I/O, no async.

pub mod value;
pub mod properties;
pub mod element;
pub mod vertex;
pub mod edge;
pub mod graph;

pub use value::PropertyValue;
pub use properties::Properties;
pub use element::Element;
pub use vertex::{Vertex, VertexId};
pub use edge::{Edge, EdgeId};
pub use graph::LogicalGraph;
