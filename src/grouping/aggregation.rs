//! Aggregators folded over the members of a group.

use hashbrown::HashSet;

use crate::model::PropertyValue;
use crate::{Error, Result};

/// Separator between attribute names in an `attributes` value.
pub const ATTRIBUTE_SEPARATOR: char = ';';

/// Streaming fold of one property across the members of a group.
///
/// Lifecycle: the first value goes to [`initialize`](Self::initialize),
/// every later one to [`accumulate`](Self::accumulate).
/// [`aggregate`](Self::aggregate) picks the right one.
/// [`finalize`](Self::finalize) may be queried at any point;
/// [`reset`](Self::reset) empties the aggregate.
pub trait PropertyValueAggregator: Send {
    /// Key read from each group member.
    fn property_key(&self) -> &str;

    /// Key the result is written to on the summary element.
    fn aggregate_property_key(&self) -> &str;

    fn is_initialized(&self) -> bool;

    fn initialize(&mut self, value: &PropertyValue) -> Result<()>;

    /// Fold `value` into an initialized aggregate. Calling this first is a
    /// [`Error::LogicError`].
    fn accumulate(&mut self, value: &PropertyValue) -> Result<()>;

    fn aggregate(&mut self, value: &PropertyValue) -> Result<()> {
        if self.is_initialized() {
            self.accumulate(value)
        } else {
            self.initialize(value)
        }
    }

    fn finalize(&self) -> PropertyValue;

    /// Clear the aggregate. An initialized aggregator stays initialized
    /// with an empty value; an uninitialized one is left alone.
    fn reset(&mut self);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum AggregateState {
    #[default]
    Uninitialized,
    Accumulating(HashSet<String>),
}

/// Union of `;`-separated attribute name lists.
///
/// Empty segments are discarded, so `""` contributes nothing and
/// `"a;;b"` contributes `{a, b}`. The finalized string joins the set with
/// `;` in hash order; compare it as a set, not as a string.
///
/// `reset` empties the set but keeps the aggregator initialized, so
/// `accumulate` is valid right after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSetAggregator {
    property_key: String,
    aggregate_key: String,
    state: AggregateState,
}

impl Default for AttributeSetAggregator {
    fn default() -> Self {
        Self::new("attributes", "attributes")
    }
}

impl AttributeSetAggregator {
    pub fn new(property_key: impl Into<String>, aggregate_key: impl Into<String>) -> Self {
        Self {
            property_key: property_key.into(),
            aggregate_key: aggregate_key.into(),
            state: AggregateState::Uninitialized,
        }
    }

    /// Members of the current set, or `None` before initialization.
    pub fn attributes(&self) -> Option<&HashSet<String>> {
        match &self.state {
            AggregateState::Uninitialized => None,
            AggregateState::Accumulating(set) => Some(set),
        }
    }

    /// Combine a partial aggregate built over another subset of the group.
    ///
    /// Merging is set union. An uninitialized side contributes nothing.
    pub fn merge(&mut self, other: AttributeSetAggregator) {
        let AggregateState::Accumulating(theirs) = other.state else {
            return;
        };
        match &mut self.state {
            AggregateState::Uninitialized => self.state = AggregateState::Accumulating(theirs),
            AggregateState::Accumulating(ours) => ours.extend(theirs),
        }
    }
}

fn parse_names(value: &PropertyValue) -> Result<impl Iterator<Item = String> + '_> {
    Ok(value
        .as_str()?
        .split(ATTRIBUTE_SEPARATOR)
        .filter(|name| !name.is_empty())
        .map(str::to_owned))
}

impl PropertyValueAggregator for AttributeSetAggregator {
    fn property_key(&self) -> &str {
        &self.property_key
    }

    fn aggregate_property_key(&self) -> &str {
        &self.aggregate_key
    }

    fn is_initialized(&self) -> bool {
        matches!(self.state, AggregateState::Accumulating(_))
    }

    fn initialize(&mut self, value: &PropertyValue) -> Result<()> {
        let set = parse_names(value)?.collect();
        self.state = AggregateState::Accumulating(set);
        Ok(())
    }

    fn accumulate(&mut self, value: &PropertyValue) -> Result<()> {
        let names = parse_names(value)?;
        match &mut self.state {
            AggregateState::Uninitialized => Err(Error::LogicError(format!(
                "accumulate on uninitialized aggregator for `{}`",
                self.property_key
            ))),
            AggregateState::Accumulating(set) => {
                set.extend(names);
                Ok(())
            }
        }
    }

    fn finalize(&self) -> PropertyValue {
        match &self.state {
            AggregateState::Uninitialized => PropertyValue::Null,
            AggregateState::Accumulating(set) => {
                let names: Vec<&str> = set.iter().map(String::as_str).collect();
                PropertyValue::String(names.join(";"))
            }
        }
    }

    fn reset(&mut self) {
        if let AggregateState::Accumulating(set) = &mut self.state {
            set.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::*;

    fn as_set(value: &PropertyValue) -> BTreeSet<String> {
        value
            .as_str()
            .unwrap()
            .split(';')
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect()
    }

    fn set_of(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_initialize_accumulate_finalize() {
        let mut agg = AttributeSetAggregator::default();
        agg.initialize(&"title;year".into()).unwrap();
        agg.accumulate(&"title;venue".into()).unwrap();
        assert_eq!(as_set(&agg.finalize()), set_of(&["title", "year", "venue"]));
    }

    #[test]
    fn test_accumulate_before_initialize_is_logic_error() {
        let mut agg = AttributeSetAggregator::default();
        let err = agg.accumulate(&"title".into()).unwrap_err();
        assert!(matches!(err, Error::LogicError(_)));
        assert!(!agg.is_initialized());
    }

    #[test]
    fn test_non_string_is_type_mismatch() {
        let mut agg = AttributeSetAggregator::default();
        assert!(matches!(agg.initialize(&7.into()), Err(Error::TypeMismatch { .. })));
        agg.initialize(&"a".into()).unwrap();
        assert!(matches!(agg.accumulate(&PropertyValue::Null), Err(Error::TypeMismatch { .. })));
    }

    #[test]
    fn test_empty_string_is_empty_set() {
        let mut agg = AttributeSetAggregator::default();
        agg.initialize(&"".into()).unwrap();
        assert!(agg.is_initialized());
        assert_eq!(agg.finalize(), PropertyValue::from(""));
        agg.accumulate(&"a;;b;".into()).unwrap();
        assert_eq!(as_set(&agg.finalize()), set_of(&["a", "b"]));
    }

    #[test]
    fn test_reset() {
        let mut agg = AttributeSetAggregator::default();
        agg.reset();
        assert_eq!(agg.finalize(), PropertyValue::Null);

        agg.initialize(&"a;b".into()).unwrap();
        agg.reset();
        assert_eq!(agg.attributes().map(|s| s.len()), Some(0));
        assert!(agg.is_initialized());
        assert_eq!(agg.finalize(), PropertyValue::from(""));
    }

    #[test]
    fn test_accumulate_after_reset() {
        let mut agg = AttributeSetAggregator::default();
        agg.initialize(&"a".into()).unwrap();
        agg.reset();
        agg.accumulate(&"b;c".into()).unwrap();
        assert_eq!(as_set(&agg.finalize()), set_of(&["b", "c"]));
    }

    #[test]
    fn test_merge_partials() {
        let mut left = AttributeSetAggregator::default();
        left.aggregate(&"a;b".into()).unwrap();
        let mut right = AttributeSetAggregator::default();
        right.aggregate(&"b;c".into()).unwrap();

        let mut empty = AttributeSetAggregator::default();
        empty.merge(AttributeSetAggregator::default());
        assert!(!empty.is_initialized());
        empty.merge(left);
        empty.merge(right);
        assert_eq!(as_set(&empty.finalize()), set_of(&["a", "b", "c"]));
    }

    fn names() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-z]{1,6}", 0..5).prop_map(|v| v.join(";"))
    }

    proptest! {
        #[test]
        fn prop_union_commutative_and_idempotent(a in names(), b in names(), c in names()) {
            let run = |order: &[&String]| {
                let mut agg = AttributeSetAggregator::default();
                for s in order {
                    agg.aggregate(&PropertyValue::from(s.as_str())).unwrap();
                }
                as_set(&agg.finalize())
            };

            let expected: BTreeSet<String> = [&a, &b, &c]
                .iter()
                .flat_map(|s| s.split(';').filter(|n| !n.is_empty()).map(str::to_owned))
                .collect();

            prop_assert_eq!(run(&[&a, &b, &c]), expected.clone());
            prop_assert_eq!(run(&[&a, &c, &b]), expected.clone());
            prop_assert_eq!(run(&[&a, &b, &b, &c, &a]), expected);
        }
    }
}
