//! Homogeneous change sets.
//!
//! A batched `UNWIND` statement is generated from a single template, so
//! every row it carries must agree on the parts of the template that vary
//! between entities: labels or type, primary index, version property,
//! property presence and what gets removed. Those parts form the entity's
//! *shape*. A [`ChangeSet`] can only be built from entities of one shape,
//! which turns the "same structure as the first element" precondition of
//! the statement builders into something the type system carries.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

use crate::edge::Edge;
use crate::error::GraphoError;
use crate::node::Node;
use crate::props::HasProperties;

/// Structural key of an entity. Entities with equal shapes can share one
/// batched statement.
pub trait Shaped {
    type Shape: Debug + Clone + Eq + Hash;

    fn shape(&self) -> Self::Shape;
}

/// Shape of a [`Node`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeShape {
    pub labels: BTreeSet<String>,
    pub primary_index: Option<String>,
    pub version_key: Option<String>,
    pub removed_labels: BTreeSet<String>,
    pub removed_properties: BTreeSet<String>,
}

impl Shaped for Node {
    type Shape = NodeShape;

    fn shape(&self) -> NodeShape {
        NodeShape {
            labels: self.labels().clone(),
            primary_index: self.primary_index().map(str::to_owned),
            version_key: self.container().version_key().map(str::to_owned),
            removed_labels: self.removed_labels(),
            removed_properties: self.container().removed_dynamic(),
        }
    }
}

/// Shape of an [`Edge`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeShape {
    pub rel_type: String,
    pub primary_id: Option<String>,
    pub version_key: Option<String>,
    pub has_properties: bool,
    pub removed_properties: BTreeSet<String>,
}

impl Shaped for Edge {
    type Shape = EdgeShape;

    fn shape(&self) -> EdgeShape {
        EdgeShape {
            rel_type: self.rel_type().to_owned(),
            primary_id: self.primary_id().map(str::to_owned),
            version_key: self.container().version_key().map(str::to_owned),
            has_properties: self.has_properties(),
            removed_properties: self.container().removed_dynamic(),
        }
    }
}

/// An ordered batch of entities sharing one shape.
///
/// An empty change set has no shape; statement builders turn it into an
/// empty statement.
#[derive(Debug, Clone)]
pub struct ChangeSet<T: Shaped> {
    shape: Option<T::Shape>,
    items: Vec<T>,
}

impl<T: Shaped> ChangeSet<T> {
    pub fn empty() -> Self {
        Self {
            shape: None,
            items: Vec::new(),
        }
    }

    /// Build a change set from entities that must all share one shape.
    ///
    /// Returns [`GraphoError::HeterogeneousChangeSet`] for the first entity
    /// whose shape differs from the first entity's.
    pub fn try_from_vec(items: Vec<T>) -> Result<Self, GraphoError> {
        let mut shape: Option<T::Shape> = None;
        for item in &items {
            let s = item.shape();
            match &shape {
                None => shape = Some(s),
                Some(expected) if *expected != s => {
                    return Err(GraphoError::heterogeneous(expected, s));
                }
                Some(_) => {}
            }
        }
        Ok(Self { shape, items })
    }

    /// Split entities into homogeneous change sets.
    ///
    /// Groups come out in the order their first member was seen; members
    /// keep their relative order.
    pub fn partition<I>(items: I) -> Vec<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut groups: Vec<Self> = Vec::new();
        let mut index: HashMap<T::Shape, usize> = HashMap::new();
        for item in items {
            let shape = item.shape();
            match index.get(&shape) {
                Some(&i) => groups[i].items.push(item),
                None => {
                    index.insert(shape.clone(), groups.len());
                    groups.push(Self {
                        shape: Some(shape),
                        items: vec![item],
                    });
                }
            }
        }
        log::debug!("partitioned change set into {} group(s)", groups.len());
        groups
    }

    pub fn shape(&self) -> Option<&T::Shape> {
        self.shape.as_ref()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The template entity every other member agrees with.
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T: Shaped> Default for ChangeSet<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a, T: Shaped> IntoIterator for &'a ChangeSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
