//! In-memory sink.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::model::LogicalGraph;
use crate::Result;
use super::GraphSink;

/// Keeps every written graph. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryGraphSink {
    graphs: Arc<RwLock<Vec<LogicalGraph>>>,
}

impl MemoryGraphSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.graphs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.read().is_empty()
    }

    /// The most recently written graph.
    pub fn last(&self) -> Option<LogicalGraph> {
        self.graphs.read().last().cloned()
    }

    pub fn take(&self) -> Vec<LogicalGraph> {
        std::mem::take(&mut *self.graphs.write())
    }
}

#[async_trait]
impl GraphSink for MemoryGraphSink {
    async fn write(&self, graph: &LogicalGraph) -> Result<()> {
        self.graphs.write().push(graph.clone());
        Ok(())
    }
}
