//! Relationship mutation records produced by the entity-graph diff.

use crate::props::{HasProperties, PropertyContainer};
use crate::value::Value;

/// A relationship to be written or deleted.
///
/// `start_node` and `end_node` hold node identities. A negative identity
/// refers to a node created in the same unit of work; it must be resolved
/// to an internal id before the relationship statement is compiled (see
/// `CompileContext` in the `grapho` crate).
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    id: Option<i64>,
    reference: i64,
    rel_type: String,
    start_node: i64,
    end_node: i64,
    primary_id: Option<String>,
    props: PropertyContainer,
}

impl Edge {
    /// A relationship that has never been written.
    pub fn new_unsaved(reference: i64, rel_type: impl Into<String>, start_node: i64, end_node: i64) -> Self {
        Self {
            id: None,
            reference,
            rel_type: rel_type.into(),
            start_node,
            end_node,
            primary_id: None,
            props: PropertyContainer::new(),
        }
    }

    /// A relationship already stored under internal id `id`.
    pub fn existing(id: i64, rel_type: impl Into<String>, start_node: i64, end_node: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::new_unsaved(id, rel_type, start_node, end_node)
        }
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

    /// Declare the externally assigned id property used to `MERGE` the
    /// relationship.
    pub fn with_primary_id(mut self, key: impl Into<String>) -> Self {
        self.primary_id = Some(key.into());
        self
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn reference(&self) -> i64 {
        self.reference
    }

    pub fn rel_type(&self) -> &str {
        &self.rel_type
    }

    pub fn start_node(&self) -> i64 {
        self.start_node
    }

    pub fn end_node(&self) -> i64 {
        self.end_node
    }

    /// Replace both endpoints, typically after new nodes received their ids.
    pub fn set_endpoints(&mut self, start_node: i64, end_node: i64) {
        self.start_node = start_node;
        self.end_node = end_node;
    }

    pub fn primary_id(&self) -> Option<&str> {
        self.primary_id.as_deref()
    }

    pub fn has_properties(&self) -> bool {
        !self.props.properties().is_empty()
    }
}

impl HasProperties for Edge {
    fn container(&self) -> &PropertyContainer {
        &self.props
    }
}
