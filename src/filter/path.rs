//! Nested filter paths: the relationship hops a filter traverses before it
//! reaches the property it compares.

use std::fmt;

use grapho_core::GraphoError;

/// Direction of a hop, seen from the entity the filter starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RelationshipDirection {
    #[default]
    Outgoing,
    Incoming,
    Undirected,
}

impl RelationshipDirection {
    /// Arrow heads to put around a relationship pattern `-[...]-`.
    pub(crate) fn arrows(self) -> (&'static str, &'static str) {
        match self {
            RelationshipDirection::Outgoing => ("-", "->"),
            RelationshipDirection::Incoming => ("<-", "-"),
            RelationshipDirection::Undirected => ("-", "-"),
        }
    }
}

/// One relationship hop of a nested filter.
///
/// `property_name` is the name of the association on the owning entity
/// (used in parameter names); `target_label` is the label of the node
/// reached by the hop. When `relationship_entity` is set the hop is backed
/// by a relationship entity, and a filter ending on this hop compares a
/// property of the relationship itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NestedPathSegment {
    pub property_name: String,
    pub target_label: Option<String>,
    pub relationship_type: String,
    pub direction: RelationshipDirection,
    pub relationship_entity: bool,
}

impl NestedPathSegment {
    pub fn new(property_name: impl Into<String>, relationship_type: impl Into<String>) -> Self {
        Self {
            property_name: property_name.into(),
            target_label: None,
            relationship_type: relationship_type.into(),
            direction: RelationshipDirection::Outgoing,
            relationship_entity: false,
        }
    }

    pub fn with_target_label(mut self, label: impl Into<String>) -> Self {
        self.target_label = Some(label.into());
        self
    }

    pub fn with_direction(mut self, direction: RelationshipDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn relationship_entity(mut self) -> Self {
        self.relationship_entity = true;
        self
    }
}

impl fmt::Display for NestedPathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (left, right) = self.direction.arrows();
        write!(f, "{}[:{}]{}({})", left, self.relationship_type, right, self.property_name)
    }
}

/// Check that every hop can be rendered as a traversal pattern.
///
/// Only the last hop may be backed by a relationship entity: the filter
/// binds to that relationship, so nothing can follow it.
pub fn validate(path: &[NestedPathSegment]) -> Result<(), GraphoError> {
    for (i, segment) in path.iter().enumerate() {
        if segment.property_name.is_empty() {
            return Err(GraphoError::malformed_path(i, "empty property name"));
        }
        if segment.relationship_type.is_empty() {
            return Err(GraphoError::malformed_path(i, "empty relationship type"));
        }
        if segment.relationship_entity && i + 1 != path.len() {
            return Err(GraphoError::malformed_path(
                i,
                "a relationship entity hop must be the last hop",
            ));
        }
    }
    Ok(())
}
