//! Properties shared by nodes and relationships.
//!
//! A [`PropertyContainer`] keeps the ordered property list, the optional
//! version property used for optimistic locking, and the names of dynamic
//! composite properties as they are now and as they were when the entity
//! was last loaded. The difference between the two is what a write has to
//! `REMOVE`.

use std::collections::BTreeSet;

use crate::value::Value;

/// A single named property.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: String,
    pub value: Value,
}

impl Property {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Property state shared by [`Node`](crate::Node) and [`Edge`](crate::Edge).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyContainer {
    properties: Vec<Property>,
    version: Option<Property>,
    current_dynamic: BTreeSet<String>,
    previous_dynamic: BTreeSet<String>,
}

impl PropertyContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a property. Setting the same key twice keeps the last value
    /// at the position of the first.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let property = Property::new(key, value);
        match self.properties.iter_mut().find(|p| p.key == property.key) {
            Some(existing) => existing.value = property.value,
            None => self.properties.push(property),
        }
    }

    /// Append a property that belongs to a dynamic composite (e.g. a
    /// flattened map entry like `address.city`).
    pub fn set_dynamic(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        self.current_dynamic.insert(key.clone());
        self.set(key, value);
    }

    /// Declare the version property. The value is the version the caller
    /// last saw; `null` for entities that were never written.
    pub fn set_version(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.version = Some(Property::new(key, value));
    }

    /// Record the dynamic composite property names as loaded from the graph.
    pub fn set_previous_dynamic<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.previous_dynamic = names.into_iter().map(Into::into).collect();
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn version(&self) -> Option<&Property> {
        self.version.as_ref()
    }

    pub fn version_key(&self) -> Option<&str> {
        self.version.as_ref().map(|v| v.key.as_str())
    }

    pub fn has_version(&self) -> bool {
        self.version.is_some()
    }

    pub fn current_dynamic(&self) -> &BTreeSet<String> {
        &self.current_dynamic
    }

    pub fn previous_dynamic(&self) -> &BTreeSet<String> {
        &self.previous_dynamic
    }

    /// Dynamic composite property names that were present before and are
    /// gone now, in sorted order.
    pub fn removed_dynamic(&self) -> BTreeSet<String> {
        self.previous_dynamic
            .difference(&self.current_dynamic)
            .cloned()
            .collect()
    }

    /// Properties to bind as `row.props`, optionally leaving out the
    /// version key. A version property also present in the list is only
    /// skipped when `exclude_version` is set.
    pub fn props_iter(&self, exclude_version: bool) -> impl Iterator<Item = &Property> + '_ {
        let skip = if exclude_version { self.version_key() } else { None };
        self.properties
            .iter()
            .filter(move |p| Some(p.key.as_str()) != skip)
    }
}

/// Access to the [`PropertyContainer`] of a node or relationship.
pub trait HasProperties {
    fn container(&self) -> &PropertyContainer;
}
