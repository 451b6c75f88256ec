//! Capability shared by vertices and edges.

use super::{Properties, PropertyValue};

/// Any graph element that carries a label and owns a [`Properties`] bag.
///
/// Operators that only touch labels and properties are written once
/// against this trait and apply to vertices and edges alike.
pub trait Element: Send + Sync {
    fn label(&self) -> &str;

    fn properties(&self) -> &Properties;

    fn properties_mut(&mut self) -> &mut Properties;

    /// Install `props` wholesale, returning the bag it replaced.
    fn set_properties(&mut self, props: Properties) -> Properties {
        std::mem::replace(self.properties_mut(), props)
    }

    fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.properties().get(key)
    }
}
