//! Compiled Cypher statements.

use std::collections::HashMap;

use crate::error::GraphoError;
use crate::value::Value;

/// What a downstream executor needs to detect a concurrent modification
/// after running a versioned write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimisticLockingConfig {
    /// One per row sent; every row must match exactly one entity.
    pub expected_affected_count: usize,
    pub labels_or_types: Vec<String>,
    pub version_property_key: String,
}

impl OptimisticLockingConfig {
    pub fn new(expected_affected_count: usize, labels_or_types: Vec<String>, version_property_key: impl Into<String>) -> Self {
        Self {
            expected_affected_count,
            labels_or_types,
            version_property_key: version_property_key.into(),
        }
    }

    /// Compare the number of rows the database reported against the
    /// expected count.
    ///
    /// ```rust
    /// # use grapho_core::{GraphoError, OptimisticLockingConfig};
    /// let config = OptimisticLockingConfig::new(2, vec!["Planet".into()], "version");
    /// assert!(config.verify(2).is_ok());
    /// assert!(matches!(config.verify(1), Err(GraphoError::OptimisticLocking { .. })));
    /// ```
    pub fn verify(&self, actual: usize) -> Result<(), GraphoError> {
        if actual == self.expected_affected_count {
            Ok(())
        } else {
            log::warn!(
                "optimistic locking conflict on {:?}: expected {}, got {}",
                self.labels_or_types,
                self.expected_affected_count,
                actual
            );
            Err(GraphoError::OptimisticLocking {
                labels_or_types: self.labels_or_types.clone(),
                expected: self.expected_affected_count,
                actual,
            })
        }
    }
}

/// A parameterized Cypher statement.
///
/// An empty statement (no text, no parameters) means "nothing to do" and
/// must be skipped, not executed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
    text: String,
    parameters: HashMap<String, Value>,
    optimistic_locking: Option<OptimisticLockingConfig>,
}

impl Statement {
    pub fn new(text: impl Into<String>, parameters: HashMap<String, Value>) -> Self {
        Self {
            text: text.into(),
            parameters,
            optimistic_locking: None,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_optimistic_locking(mut self, config: OptimisticLockingConfig) -> Self {
        self.optimistic_locking = Some(config);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parameters(&self) -> &HashMap<String, Value> {
        &self.parameters
    }

    pub fn parameter(&self, key: &str) -> Option<&Value> {
        self.parameters.get(key)
    }

    pub fn optimistic_locking(&self) -> Option<&OptimisticLockingConfig> {
        self.optimistic_locking.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.parameters.is_empty()
    }
}

/// Bind the statement text and every parameter onto a [`neo4rs::Query`].
impl From<Statement> for neo4rs::Query {
    fn from(statement: Statement) -> Self {
        let mut query = neo4rs::query(&statement.text);
        for (k, v) in statement.parameters {
            query = query.param(&k, v);
        }
        query
    }
}
