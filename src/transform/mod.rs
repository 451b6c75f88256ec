//! Attribute-map splitting.
//!
//! The importer packs dynamic attributes of a row into a single map-valued
//! property. [`SplitAttributes`] turns that map back into one `Long`
//! property per entry.

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::model::{Element, LogicalGraph, Properties, PropertyValue};
use crate::{Error, Result};

/// Expands the map stored under `property_key` into individual properties.
#[derive(Debug, Clone)]
pub struct SplitAttributes {
    property_key: String,
}

impl SplitAttributes {
    pub fn new(property_key: impl Into<String>) -> Self {
        Self { property_key: property_key.into() }
    }

    pub fn property_key(&self) -> &str {
        &self.property_key
    }

    /// Split the map on a single vertex or edge, replacing its properties.
    ///
    /// Map entries whose key is `Null` or the empty string are dropped.
    /// Remaining keys must be strings and values must be longs; anything
    /// else is a [`Error::TypeMismatch`] and leaves the element untouched.
    /// An element without the map property is returned unchanged.
    pub fn apply<'e, E: Element + ?Sized>(&self, element: &'e mut E) -> Result<&'e mut E> {
        if !element.properties().contains_key(&self.property_key) {
            trace!(key = %self.property_key, label = element.label(), "no attribute map, skipping");
            return Ok(element);
        }
        let old = element.properties();
        let joined = match old.get(&self.property_key) {
            Some(packed) => packed.as_map()?,
            None => return Err(Error::NotFound(self.property_key.clone())),
        };

        let mut props = Properties::with_capacity(joined.len() + old.len());
        for (key, value) in joined {
            let name = match key {
                PropertyValue::Null => continue,
                other => other.as_str()?,
            };
            if name.is_empty() {
                trace!(label = element.label(), "dropping empty attribute key");
                continue;
            }
            props.set(name, value.as_long()?);
        }
        for (key, value) in old.iter().filter(|(k, _)| *k != self.property_key) {
            props.set(key, value.clone());
        }

        element.set_properties(props);
        Ok(element)
    }

    /// Split every vertex and edge of `graph` in parallel.
    ///
    /// The first error aborts the whole operation; the partially
    /// transformed graph is dropped.
    pub fn execute(&self, mut graph: LogicalGraph) -> Result<LogicalGraph> {
        graph
            .vertices_mut()
            .par_iter_mut()
            .try_for_each(|v| self.apply(v).map(|_| ()))?;
        graph
            .edges_mut()
            .par_iter_mut()
            .try_for_each(|e| self.apply(e).map(|_| ()))?;

        debug!(
            key = %self.property_key,
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "split attribute maps"
        );
        Ok(graph)
    }

    /// Sequential variant of [`execute`](Self::execute).
    pub fn execute_sequential(&self, mut graph: LogicalGraph) -> Result<LogicalGraph> {
        for v in graph.vertices_mut() {
            self.apply(v)?;
        }
        for e in graph.edges_mut() {
            self.apply(e)?;
        }
        Ok(graph)
    }
}

/// Shorthand for `SplitAttributes::new(key).apply(element)`.
pub fn split<'e, E: Element + ?Sized>(element: &'e mut E, property_key: &str) -> Result<&'e mut E> {
    SplitAttributes::new(property_key).apply(element)
}
