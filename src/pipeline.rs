//! Split-then-group pipeline.
//!
//! ```text
//! imported graph → SplitAttributes (optional) → Grouping::by_label → schema graph
//! ```
//!
//! Splitting always happens per element before grouping; the grouped
//! summary is never split.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::grouping::{Grouping, ATTRIBUTES_KEY};
use crate::model::LogicalGraph;
use crate::transform::SplitAttributes;
use crate::Result;

/// Knobs of [`run`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Key of the packed attribute map to split first. `None` skips splitting.
    pub split_key: Option<String>,
    /// Key folded by the grouping aggregator, on members and summary alike.
    pub attribute_key: String,
    /// Fan element work out over the rayon pool.
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            split_key: None,
            attribute_key: ATTRIBUTES_KEY.to_string(),
            parallel: true,
        }
    }
}

/// Run the pipeline over a fully materialized graph.
pub fn run(graph: LogicalGraph, config: &PipelineConfig) -> Result<LogicalGraph> {
    let graph = match &config.split_key {
        Some(key) => {
            info!(key = %key, "splitting attribute maps");
            let split = SplitAttributes::new(key.as_str());
            if config.parallel {
                split.execute(graph)?
            } else {
                split.execute_sequential(graph)?
            }
        }
        None => graph,
    };

    info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "grouping by label"
    );
    Grouping::by_label()
        .with_attribute_keys(config.attribute_key.as_str(), config.attribute_key.as_str())
        .with_parallel(config.parallel)
        .execute(&graph)
}
