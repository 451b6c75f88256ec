//! Pipeline tests: split-then-group over in-memory graphs and over
//! JSON/DOT files on disk.

use std::collections::{BTreeMap, BTreeSet};

use magimport::io::{DotDataSink, GraphSink, GraphSource, JsonDataSink, JsonDataSource, MemoryGraphSink};
use magimport::pipeline::{self, PipelineConfig};
use magimport::{Edge, EdgeId, Error, Grouping, LogicalGraph, PropertyValue, SplitAttributes, Vertex, VertexId};
use pretty_assertions::assert_eq;

fn attrs(pairs: &[(&str, i64)]) -> PropertyValue {
    PropertyValue::Map(
        pairs
            .iter()
            .map(|(k, v)| (PropertyValue::from(*k), PropertyValue::from(*v)))
            .collect::<BTreeMap<_, _>>(),
    )
}

fn names(value: Option<&PropertyValue>) -> Option<BTreeSet<String>> {
    value.map(|v| {
        v.as_str()
            .unwrap()
            .split(';')
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect()
    })
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn packed_graph() -> LogicalGraph {
    LogicalGraph::from_parts(
        vec![
            Vertex::new(VertexId(1), "Paper")
                .with_property("attrs", attrs(&[("title", 1), ("year", 2)]))
                .with_property("attributes", "title;year"),
            Vertex::new(VertexId(2), "Paper")
                .with_property("attrs", attrs(&[("title", 1)]))
                .with_property("attributes", "title"),
        ],
        vec![Edge::new(EdgeId(1), VertexId(1), VertexId(2), "cites").with_property("attrs", attrs(&[("weight", 4)]))],
    )
}

#[test]
fn test_split_every_element() {
    let graph = SplitAttributes::new("attrs").execute(packed_graph()).unwrap();

    let first = graph.vertex(VertexId(1)).unwrap();
    assert_eq!(
        first.properties.keys().collect::<Vec<_>>(),
        vec!["title", "year", "attributes"]
    );
    assert_eq!(first.properties.get("year"), Some(&PropertyValue::Long(2)));
    assert_eq!(graph.edges()[0].properties.get("weight"), Some(&PropertyValue::Long(4)));
}

#[test]
fn test_split_parallel_matches_sequential() {
    let split = SplitAttributes::new("attrs");
    let par = split.execute(packed_graph()).unwrap();
    let seq = split.execute_sequential(packed_graph()).unwrap();
    assert_eq!(par.vertices(), seq.vertices());
    assert_eq!(par.edges(), seq.edges());
}

#[test]
fn test_split_then_group() {
    let config = PipelineConfig {
        split_key: Some("attrs".into()),
        ..PipelineConfig::default()
    };
    let summary = pipeline::run(packed_graph(), &config).unwrap();

    assert_eq!(summary.vertex_count(), 1);
    let paper = &summary.vertices()[0];
    assert_eq!(paper.label, "Paper");
    assert_eq!(paper.properties.get("count"), Some(&PropertyValue::Long(2)));
    assert_eq!(names(paper.properties.get("attributes")), Some(set(&["title", "year"])));
    assert_eq!(summary.edge_count(), 1);
}

/// The packed map lives under the aggregated key itself: only splitting
/// first removes it before the string aggregator sees it.
#[test]
fn test_split_runs_before_grouping() {
    let graph = LogicalGraph::from_parts(
        vec![
            Vertex::new(VertexId(1), "Paper").with_property("attributes", attrs(&[("title", 1), ("year", 2)])),
            Vertex::new(VertexId(2), "Paper").with_property("attributes", attrs(&[("title", 1)])),
        ],
        Vec::new(),
    );

    let grouped_first = Grouping::by_label().execute(&graph);
    assert!(matches!(grouped_first, Err(Error::TypeMismatch { .. })));

    let config = PipelineConfig {
        split_key: Some("attributes".into()),
        ..PipelineConfig::default()
    };
    let summary = pipeline::run(graph, &config).unwrap();

    assert_eq!(summary.vertex_count(), 1);
    let paper = &summary.vertices()[0];
    assert_eq!(paper.properties.get("count"), Some(&PropertyValue::Long(2)));
    assert_eq!(names(paper.properties.get("attributes")), None);
}

#[test]
fn test_pipeline_surfaces_split_errors() {
    let graph = LogicalGraph::from_parts(
        vec![Vertex::new(VertexId(1), "Paper").with_property("attrs", "not a map")],
        Vec::new(),
    );
    let config = PipelineConfig {
        split_key: Some("attrs".into()),
        parallel: false,
        ..PipelineConfig::default()
    };
    assert!(matches!(pipeline::run(graph, &config), Err(Error::TypeMismatch { .. })));
}

#[tokio::test]
async fn test_json_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let graph = packed_graph();

    JsonDataSink::new(dir.path()).write(&graph).await.unwrap();
    let loaded = JsonDataSource::new(dir.path()).load().await.unwrap();

    assert_eq!(loaded.vertices(), graph.vertices());
    assert_eq!(loaded.edges(), graph.edges());
}

#[tokio::test]
async fn test_missing_edges_file_means_no_edges() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("vertices.json"),
        "{\"id\":1,\"label\":\"Paper\",\"properties\":{\"attributes\":{\"type\":\"String\",\"value\":\"title\"}}}\n",
    )
    .unwrap();

    let graph = JsonDataSource::new(dir.path()).load().await.unwrap();
    assert_eq!(graph.vertex_count(), 1);
    assert_eq!(graph.edge_count(), 0);
}

#[tokio::test]
async fn test_missing_vertices_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = JsonDataSource::new(dir.path()).load().await.unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[tokio::test]
async fn test_group_and_write_dot() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("schema");

    let summary = pipeline::run(packed_graph(), &PipelineConfig::default()).unwrap();
    let sink = DotDataSink::new(&out);
    sink.write(&summary).await.unwrap();

    let dot = std::fs::read_to_string(sink.path()).unwrap();
    assert!(dot.starts_with("digraph schema {"));
    assert!(dot.contains("v0 [label=\"Paper\\n"));
    assert!(dot.contains("v0 -> v0 [label=\"cites\\ncount=1\"];"));
}

#[tokio::test]
async fn test_memory_sink_receives_summary() {
    let sink = MemoryGraphSink::new();
    let summary = pipeline::run(packed_graph(), &PipelineConfig::default()).unwrap();
    sink.write(&summary).await.unwrap();
    assert_eq!(sink.last().map(|g| g.vertex_count()), Some(1));
}
