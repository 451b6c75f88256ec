//! Graphviz DOT rendering of a (summary) graph.

use std::fmt::Write as _;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::model::{Element, LogicalGraph, PropertyValue};
use crate::Result;
use super::GraphSink;

/// Name of the file written into the output directory.
pub const DOT_FILE: &str = "graph.dot";

/// Writes `graph.dot` into a directory, creating it if needed.
#[derive(Debug, Clone)]
pub struct DotDataSink {
    dir: PathBuf,
}

impl DotDataSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(DOT_FILE)
    }
}

#[async_trait]
impl GraphSink for DotDataSink {
    async fn write(&self, graph: &LogicalGraph) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path();
        tokio::fs::write(&path, render_dot(graph)).await?;
        debug!(path = %path.display(), "wrote dot graph");
        Ok(())
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Node/edge label: the element label followed by one `key=value` line per
/// property.
fn element_label(element: &impl Element) -> String {
    let mut label = escape(element.label());
    for (key, value) in element.properties().iter() {
        let rendered = match value {
            PropertyValue::String(s) => escape(s),
            other => escape(&other.to_string()),
        };
        label.push_str("\\n");
        label.push_str(&escape(key));
        label.push('=');
        label.push_str(&rendered);
    }
    label
}

/// Render `graph` as a DOT digraph.
pub fn render_dot(graph: &LogicalGraph) -> String {
    let mut out = String::from("digraph schema {\n");
    for v in graph.vertices() {
        let _ = writeln!(out, "  v{} [label=\"{}\"];", v.id, element_label(v));
    }
    for e in graph.edges() {
        let _ = writeln!(out, "  v{} -> v{} [label=\"{}\"];", e.source, e.target, element_label(e));
    }
    out.push_str("}\n");
    out
}
