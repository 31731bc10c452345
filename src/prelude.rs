//! Convenience re-exports for common grapho usage.
//!
//! ```rust
//! use grapho::prelude::*;
//! ```
//!
//! This imports the data model (`Node`, `Edge`, `ChangeSet`), the
//! compiler and every statement builder, the filter types and query
//! assemblers, and the error type.

pub use crate::compiler::{
    CompileContext, CypherCompiler, DeletedRelationshipEntityStatementBuilder, DeletedRelationshipStatementBuilder,
    ExistingNodeStatementBuilder, ExistingRelationshipStatementBuilder, NewNodeStatementBuilder,
    NewRelationshipStatementBuilder, StatementBuilder,
};
pub use crate::filter::{
    build_node_query, build_relationship_query, AttributeConverter, BooleanOperator, ComparisonOperator,
    DistanceComparison, Filter, FilterFunction, FilteredQuery, Filters, NestedPathSegment, PropertyValueTransformer,
    RelationshipDirection,
};
pub use grapho_core::{
    ChangeSet, Edge, GraphoError, HasProperties, Node, OptimisticLockingConfig, PropertyContainer, Statement, Value,
};
