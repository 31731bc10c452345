//! Error types for grapho statement compilation.

use thiserror::Error;

/// Unified error type for all grapho operations.
///
/// Compilation never produces a partially valid statement: every failure is
/// reported through one of these variants at `build`/`to_cypher` time.
/// Callers can annotate errors with [`with_context`](GraphoError::with_context),
/// producing chained messages like:
///
/// ```text
/// filter 'moons_0': invalid argument: a null value can only be used with unary comparison operators (LessThan)
/// ```
#[derive(Error, Debug)]
pub enum GraphoError {
    /// An operation was called on a value whose state does not allow it,
    /// e.g. `ignore_case()` on a `LessThan` filter.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// An argument is not acceptable for the operation, e.g. a null value
    /// paired with a binary comparison operator.
    #[error("invalid argument: {message} ({context})")]
    InvalidArgument { message: String, context: String },

    /// A filter after the first one does not declare how it joins the
    /// previous filters.
    #[error("boolean operator missing for filter on property '{property}'; only the first filter may omit it")]
    MissingOperator { property: String },

    /// The requested combination is not supported by the query assembler.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A nested filter path cannot be turned into a traversal pattern.
    #[error("malformed nested path at hop {hop}: {reason}")]
    MalformedPath { hop: usize, reason: String },

    /// A change set mixes entities of different shapes.
    #[error("heterogeneous change set: expected {expected}, got {got}")]
    HeterogeneousChangeSet { expected: String, got: String },

    /// An entity that must already exist in the graph has no internal id.
    #[error("missing internal id on {kind} with reference {reference}")]
    MissingIdentity { kind: String, reference: i64 },

    /// A locking fragment was requested for an entity without a version property.
    #[error("missing version property on {0}")]
    MissingVersion(String),

    /// The number of rows affected by a versioned write differs from the
    /// number of rows sent.
    #[error("optimistic locking conflict on {labels_or_types:?}: expected {expected} affected rows, got {actual}")]
    OptimisticLocking {
        labels_or_types: Vec<String>,
        expected: usize,
        actual: usize,
    },

    /// Wraps an inner error with additional context.
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<GraphoError>,
    },

    /// A `neo4rs::Error` from the underlying driver.
    #[error("neo4j error: {0}")]
    Neo4j(#[from] neo4rs::Error),
}

impl GraphoError {
    /// Create an [`InvalidState`](GraphoError::InvalidState) error.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        GraphoError::InvalidState(message.into())
    }

    /// Create an [`InvalidArgument`](GraphoError::InvalidArgument) error.
    pub fn invalid_argument(message: &str, context: &str) -> Self {
        GraphoError::InvalidArgument {
            message: message.to_owned(),
            context: context.to_owned(),
        }
    }

    /// Create a [`MissingOperator`](GraphoError::MissingOperator) error.
    pub fn missing_operator(property: &str) -> Self {
        GraphoError::MissingOperator {
            property: property.to_owned(),
        }
    }

    /// Create a [`MalformedPath`](GraphoError::MalformedPath) error.
    pub fn malformed_path(hop: usize, reason: &str) -> Self {
        GraphoError::MalformedPath {
            hop,
            reason: reason.to_owned(),
        }
    }

    /// Create a [`HeterogeneousChangeSet`](GraphoError::HeterogeneousChangeSet) error.
    pub fn heterogeneous(expected: impl std::fmt::Debug, got: impl std::fmt::Debug) -> Self {
        GraphoError::HeterogeneousChangeSet {
            expected: format!("{expected:?}"),
            got: format!("{got:?}"),
        }
    }

    /// Create a [`MissingIdentity`](GraphoError::MissingIdentity) error.
    pub fn missing_identity(kind: &str, reference: i64) -> Self {
        GraphoError::MissingIdentity {
            kind: kind.to_owned(),
            reference,
        }
    }

    /// Wrap this error with additional context, producing a [`Context`](GraphoError::Context) variant.
    ///
    /// ```rust
    /// # use grapho_core::GraphoError;
    /// let err = GraphoError::invalid_state("ignore_case() on LessThan");
    /// let wrapped = err.with_context("filter 'moons_0'");
    /// assert!(wrapped.to_string().starts_with("filter 'moons_0'"));
    /// ```
    pub fn with_context(self, ctx: impl Into<String>) -> Self {
        GraphoError::Context {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}
