//! LogicalGraph — an in-memory arena of vertices and edges.

use hashbrown::HashMap;

use super::{Edge, Vertex, VertexId};

/// A fully materialized property graph.
///
/// Vertices and edges live in two arenas. Edges refer to their endpoints by
/// [`VertexId`]; `vertex()` resolves such a reference through an id index.
#[derive(Debug, Clone, Default)]
pub struct LogicalGraph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    /// vertex id → position in `vertices`
    index: HashMap<VertexId, usize>,
}

impl LogicalGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(vertices: Vec<Vertex>, edges: Vec<Edge>) -> Self {
        let index = vertices.iter().enumerate().map(|(pos, v)| (v.id, pos)).collect();
        Self { vertices, edges, index }
    }

    pub fn into_parts(self) -> (Vec<Vertex>, Vec<Edge>) {
        (self.vertices, self.edges)
    }

    pub fn add_vertex(&mut self, vertex: Vertex) {
        self.index.insert(vertex.id, self.vertices.len());
        self.vertices.push(vertex);
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.index.get(&id).map(|&pos| &self.vertices[pos])
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Mutable access to the vertex arena. Ids must not be changed through
    /// this slice; the id index is not rebuilt.
    pub fn vertices_mut(&mut self) -> &mut [Vertex] {
        &mut self.vertices
    }

    pub fn edges_mut(&mut self) -> &mut [Edge] {
        &mut self.edges
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Distinct vertex labels, sorted.
    pub fn vertex_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.vertices.iter().map(|v| v.label.clone()).collect();
        labels.sort();
        labels.dedup();
        labels
    }

    /// Distinct edge labels, sorted.
    pub fn edge_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.edges.iter().map(|e| e.label.clone()).collect();
        labels.sort();
        labels.dedup();
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EdgeId;

    #[test]
    fn test_vertex_lookup_by_id() {
        let mut graph = LogicalGraph::new();
        graph.add_vertex(Vertex::new(VertexId(10), "Paper"));
        graph.add_vertex(Vertex::new(VertexId(3), "Author"));
        graph.add_edge(Edge::new(EdgeId(1), VertexId(3), VertexId(10), "writes"));

        assert_eq!(graph.vertex(VertexId(3)).map(|v| v.label.as_str()), Some("Author"));
        assert!(graph.vertex(VertexId(99)).is_none());
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_labels_sorted_and_distinct() {
        let graph = LogicalGraph::from_parts(
            vec![
                Vertex::new(VertexId(1), "Paper"),
                Vertex::new(VertexId(2), "Author"),
                Vertex::new(VertexId(3), "Paper"),
            ],
            Vec::new(),
        );
        assert_eq!(graph.vertex_labels(), vec!["Author", "Paper"]);
        assert!(graph.edge_labels().is_empty());
    }
}
