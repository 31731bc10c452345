//! Node mutation records produced by the entity-graph diff.

use std::collections::BTreeSet;

use crate::props::{HasProperties, PropertyContainer};
use crate::value::Value;

/// A node to be written.
///
/// `reference` correlates the `ref` result column with the caller's entity:
/// unsaved nodes use a negative reference, saved nodes usually reuse their
/// internal id. Labels are kept sorted so the generated text is
/// deterministic.
///
/// ```rust
/// # use grapho_core::Node;
/// let node = Node::new_unsaved(-1)
///     .with_label("Planet")
///     .with_property("name", "Earth")
///     .with_property("moons", 1_i64);
/// assert_eq!(node.labels().iter().next().map(String::as_str), Some("Planet"));
/// assert!(node.id().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: Option<i64>,
    reference: i64,
    labels: BTreeSet<String>,
    previous_labels: BTreeSet<String>,
    primary_index: Option<String>,
    synthesized: bool,
    props: PropertyContainer,
}

impl Node {
    /// A node that has never been written. `reference` should be negative
    /// so it cannot collide with internal ids.
    pub fn new_unsaved(reference: i64) -> Self {
        Self {
            id: None,
            reference,
            labels: BTreeSet::new(),
            previous_labels: BTreeSet::new(),
            primary_index: None,
            synthesized: false,
            props: PropertyContainer::new(),
        }
    }

    /// A node already stored under internal id `id`.
    pub fn existing(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::new_unsaved(id)
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.insert(label.into());
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels.extend(labels.into_iter().map(Into::into));
        self
    }

    /// Labels the node carried when it was loaded. Labels present here but
    /// not in [`labels`](Self::labels) are removed on update.
    pub fn with_previous_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.previous_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.set(key, value);
        self
    }

    pub fn with_dynamic_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.set_dynamic(key, value);
        self
    }

    pub fn with_previous_dynamic_properties<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.props.set_previous_dynamic(names);
        self
    }

    pub fn with_version(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.set_version(key, value);
        self
    }

    /// Declare the property used to `MERGE` instead of `CREATE`.
    pub fn with_primary_index(mut self, key: impl Into<String>) -> Self {
        self.primary_index = Some(key.into());
        self
    }

    /// Mark the node as produced purely for a read projection. Synthesized
    /// nodes are never written.
    pub fn synthesized(mut self) -> Self {
        self.synthesized = true;
        self
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn reference(&self) -> i64 {
        self.reference
    }

    pub fn labels(&self) -> &BTreeSet<String> {
        &self.labels
    }

    pub fn previous_labels(&self) -> &BTreeSet<String> {
        &self.previous_labels
    }

    /// Labels to `REMOVE`: previously known but no longer present.
    pub fn removed_labels(&self) -> BTreeSet<String> {
        self.previous_labels.difference(&self.labels).cloned().collect()
    }

    pub fn primary_index(&self) -> Option<&str> {
        self.primary_index.as_deref()
    }

    pub fn is_synthesized(&self) -> bool {
        self.synthesized
    }

    /// The labels joined with `:`, used as a grouping and logging key.
    pub fn label_signature(&self) -> String {
        self.labels.iter().cloned().collect::<Vec<_>>().join(":")
    }
}

impl HasProperties for Node {
    fn container(&self) -> &PropertyContainer {
        &self.props
    }
}
