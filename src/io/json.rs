//! JSON-lines graph files.
//!
//! A graph directory holds `vertices.json` and, optionally, `edges.json`.
//! Each non-blank line is one serialized [`Vertex`] or [`Edge`]:
//!
//! ```text
//! {"id":1,"label":"Paper","properties":{"attributes":{"type":"String","value":"title;year"}}}
//! {"id":7,"label":"writes","source":2,"target":1,"properties":{}}
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::model::{Edge, LogicalGraph, Vertex};
use crate::{Error, Result};
use super::{GraphSink, GraphSource, EDGES_FILE, VERTICES_FILE};

fn parse_lines<T: DeserializeOwned>(path: &Path, text: &str) -> Result<Vec<T>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            serde_json::from_str(line)
                .map_err(|e| Error::Parse(format!("{}:{}: {e}", path.display(), n + 1)))
        })
        .collect()
}

fn render_lines<T: Serialize>(items: &[T]) -> Result<String> {
    let mut out = String::new();
    for item in items {
        let line = serde_json::to_string(item).map_err(|e| Error::Serialize(e.to_string()))?;
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

/// Reads a graph directory.
#[derive(Debug, Clone)]
pub struct JsonDataSource {
    dir: PathBuf,
}

impl JsonDataSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl GraphSource for JsonDataSource {
    async fn load(&self) -> Result<LogicalGraph> {
        let vertex_path = self.dir.join(VERTICES_FILE);
        let text = tokio::fs::read_to_string(&vertex_path).await?;
        let vertices: Vec<Vertex> = parse_lines(&vertex_path, &text)?;

        let edge_path = self.dir.join(EDGES_FILE);
        let edges: Vec<Edge> = match tokio::fs::read_to_string(&edge_path).await {
            Ok(text) => parse_lines(&edge_path, &text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        debug!(
            dir = %self.dir.display(),
            vertices = vertices.len(),
            edges = edges.len(),
            "loaded graph"
        );
        Ok(LogicalGraph::from_parts(vertices, edges))
    }
}

/// Writes a graph directory readable by [`JsonDataSource`].
#[derive(Debug, Clone)]
pub struct JsonDataSink {
    dir: PathBuf,
}

impl JsonDataSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl GraphSink for JsonDataSink {
    async fn write(&self, graph: &LogicalGraph) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(VERTICES_FILE), render_lines(graph.vertices())?).await?;
        tokio::fs::write(self.dir.join(EDGES_FILE), render_lines(graph.edges())?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PropertyValue, VertexId};

    #[test]
    fn test_parse_skips_blank_lines() {
        let text = r#"
{"id":1,"label":"Paper","properties":{"attributes":{"type":"String","value":"title"}}}

{"id":2,"label":"Author"}
"#;
        let vertices: Vec<Vertex> = parse_lines(Path::new("vertices.json"), text).unwrap();
        assert_eq!(vertices.len(), 2);
        assert_eq!(vertices[0].id, VertexId(1));
        assert_eq!(vertices[0].properties.get("attributes"), Some(&PropertyValue::from("title")));
        assert!(vertices[1].properties.is_empty());
    }

    struct Unwritable;

    impl Serialize for Unwritable {
        fn serialize<S: serde::Serializer>(&self, _ser: S) -> std::result::Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("unwritable"))
        }
    }

    #[test]
    fn test_render_failure_is_serialize_error() {
        let err = render_lines(&[Unwritable]).unwrap_err();
        assert!(
            matches!(err, Error::Serialize(ref msg) if msg.contains("unwritable")),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn test_parse_error_names_line() {
        let text = "{\"id\":1,\"label\":\"Paper\"}\nnot json\n";
        let err = parse_lines::<Vertex>(Path::new("vertices.json"), text).unwrap_err();
        match err {
            Error::Parse(msg) => assert!(msg.starts_with("vertices.json:2:"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
