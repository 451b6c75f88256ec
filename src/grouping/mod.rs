//! Label grouping — collapse a graph into its schema graph.
//!
//! Every distinct vertex label becomes one summary vertex. Every distinct
//! `(source label, edge label, target label)` triple becomes one summary
//! edge between the corresponding summary vertices. Each summary element
//! carries the member `count` and the union of the members' attribute
//! name lists.
//!
//! ```text
//! (:Paper {attributes: "title;year"})  ─┐
//! (:Paper {attributes: "title;venue"}) ─┼─▶ (:Paper {attributes: "title;year;venue", count: 2})
//! (:Author {attributes: ""})           ───▶ (:Author {attributes: "", count: 1})
//! ```
//!
//! Partitioning runs as a rayon fold: each worker builds partial
//! aggregates per group, and partials are merged pairwise by set union.

pub mod aggregation;

use std::hash::Hash;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use rayon::prelude::*;
use tracing::debug;

use crate::model::{Edge, EdgeId, Element, LogicalGraph, Properties, PropertyValue, Vertex, VertexId};
use crate::{Error, Result};

pub use aggregation::{AttributeSetAggregator, PropertyValueAggregator, ATTRIBUTE_SEPARATOR};

/// Property holding the number of members of a group.
pub const COUNT_KEY: &str = "count";

/// Property folded by default.
pub const ATTRIBUTES_KEY: &str = "attributes";

/// Key of an edge group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct EdgeGroupKey {
    source_label: String,
    label: String,
    target_label: String,
}

/// Partial aggregate of one group.
#[derive(Debug, Clone)]
struct GroupState {
    count: i64,
    attributes: AttributeSetAggregator,
}

impl GroupState {
    fn new(template: &AttributeSetAggregator) -> Self {
        Self {
            count: 0,
            attributes: AttributeSetAggregator::new(
                template.property_key(),
                template.aggregate_property_key(),
            ),
        }
    }

    fn fold<E: Element + ?Sized>(&mut self, element: &E) -> Result<()> {
        self.count += 1;
        if let Some(value) = element.get(self.attributes.property_key()) {
            self.attributes.aggregate(value)?;
        }
        Ok(())
    }

    fn merge(&mut self, other: GroupState) {
        self.count += other.count;
        self.attributes.merge(other.attributes);
    }

    fn into_properties(self) -> Properties {
        let mut props = Properties::with_capacity(2);
        if self.attributes.is_initialized() {
            props.set(self.attributes.aggregate_property_key(), self.attributes.finalize());
        }
        props.set(COUNT_KEY, PropertyValue::Long(self.count));
        props
    }
}

fn merge_partials<K: Eq + Hash>(
    mut into: HashMap<K, GroupState>,
    from: HashMap<K, GroupState>,
) -> HashMap<K, GroupState> {
    for (key, state) in from {
        match into.entry(key) {
            Entry::Occupied(mut slot) => slot.get_mut().merge(state),
            Entry::Vacant(slot) => {
                slot.insert(state);
            }
        }
    }
    into
}

/// Grouping operator keyed on labels.
#[derive(Debug, Clone)]
pub struct Grouping {
    aggregator: AttributeSetAggregator,
    parallel: bool,
}

impl Default for Grouping {
    fn default() -> Self {
        Self::by_label()
    }
}

impl Grouping {
    /// Group by label, folding `attributes` into `attributes`.
    pub fn by_label() -> Self {
        Self {
            aggregator: AttributeSetAggregator::new(ATTRIBUTES_KEY, ATTRIBUTES_KEY),
            parallel: true,
        }
    }

    /// Fold `property_key` of each member into `aggregate_key` of the summary.
    pub fn with_attribute_keys(mut self, property_key: impl Into<String>, aggregate_key: impl Into<String>) -> Self {
        self.aggregator = AttributeSetAggregator::new(property_key, aggregate_key);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    fn partition<T, K, F>(&self, items: &[T], key_of: F) -> Result<HashMap<K, GroupState>>
    where
        T: Element,
        K: Eq + Hash + Send,
        F: Fn(&T) -> Result<K> + Sync,
    {
        let fold = |mut acc: HashMap<K, GroupState>, item: &T| -> Result<HashMap<K, GroupState>> {
            let key = key_of(item)?;
            acc.entry(key)
                .or_insert_with(|| GroupState::new(&self.aggregator))
                .fold(item)?;
            Ok(acc)
        };

        if self.parallel {
            items
                .par_iter()
                .try_fold(HashMap::new, fold)
                .try_reduce(HashMap::new, |a, b| Ok(merge_partials(a, b)))
        } else {
            items.iter().try_fold(HashMap::new(), fold)
        }
    }

    /// Build the summary graph of `graph`.
    ///
    /// Summary ids are assigned in label order, so the result does not
    /// depend on the iteration order of the input. Any failing member
    /// (non-string attributes, dangling edge endpoint) fails the whole call.
    pub fn execute(&self, graph: &LogicalGraph) -> Result<LogicalGraph> {
        let vertex_groups = self.partition(graph.vertices(), |v: &Vertex| Ok(v.label.clone()))?;

        let endpoint_label = |id: VertexId| -> Result<String> {
            graph
                .vertex(id)
                .map(|v| v.label.clone())
                .ok_or_else(|| Error::NotFound(format!("edge endpoint vertex {id}")))
        };
        let edge_groups = self.partition(graph.edges(), |e: &Edge| {
            Ok(EdgeGroupKey {
                source_label: endpoint_label(e.source)?,
                label: e.label.clone(),
                target_label: endpoint_label(e.target)?,
            })
        })?;

        let mut vertex_groups: Vec<_> = vertex_groups.into_iter().collect();
        vertex_groups.sort_by(|a, b| a.0.cmp(&b.0));
        let mut edge_groups: Vec<_> = edge_groups.into_iter().collect();
        edge_groups.sort_by(|a, b| a.0.cmp(&b.0));

        let mut summary = LogicalGraph::new();
        let mut ids: HashMap<String, VertexId> = HashMap::with_capacity(vertex_groups.len());
        for (n, (label, state)) in vertex_groups.into_iter().enumerate() {
            let id = VertexId(n as u64);
            ids.insert(label.clone(), id);
            summary.add_vertex(Vertex {
                id,
                label,
                properties: state.into_properties(),
            });
        }

        for (n, (key, state)) in edge_groups.into_iter().enumerate() {
            let (source, target) = match (ids.get(&key.source_label), ids.get(&key.target_label)) {
                (Some(&s), Some(&t)) => (s, t),
                _ => return Err(Error::NotFound(format!("summary vertex for edge group {}", key.label))),
            };
            summary.add_edge(Edge {
                id: EdgeId(n as u64),
                label: key.label,
                source,
                target,
                properties: state.into_properties(),
            });
        }

        debug!(
            vertices_in = graph.vertex_count(),
            edges_in = graph.edge_count(),
            vertices_out = summary.vertex_count(),
            edges_out = summary.edge_count(),
            "grouped by label"
        );
        Ok(summary)
    }
}

/// Group `graph` by vertex and edge label with the default aggregator.
pub fn group_by_label(graph: &LogicalGraph) -> Result<LogicalGraph> {
    Grouping::by_label().execute(graph)
}
