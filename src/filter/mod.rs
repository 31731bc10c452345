//! Filters: declarative predicates compiled to parameterized `WHERE`
//! fragments.
//!
//! A [`Filter`] compares one property (optionally reached through
//! relationship hops) using a [`ComparisonOperator`]. Filters are collected
//! in a [`Filters`] sequence joined by [`BooleanOperator`]s, and assembled
//! into read queries with [`build_node_query`] / [`build_relationship_query`].

pub mod converter;
pub mod filter;
pub mod filters;
pub mod function;
pub mod operator;
pub mod path;
pub mod query;
pub mod transformer;

pub use converter::{AttributeConverter, DateStringConverter, FnConverter, NumberStringConverter};
pub use filter::Filter;
pub use filters::Filters;
pub use function::{DistanceComparison, FilterFunction};
pub use operator::{BooleanOperator, ComparisonOperator};
pub use path::{NestedPathSegment, RelationshipDirection};
pub use query::{build_node_query, build_relationship_query, FilteredQuery};
pub use transformer::{
    CaseInsensitiveLikeTransformer, LowerCaseTransformer, NoOpTransformer, PropertyValueTransformer,
};
