//! Core data model, statements, and error types for grapho.
//!
//! This crate is not meant to be used directly; use the `grapho` facade
//! crate instead, which re-exports everything you need.

pub mod error;
pub mod value;

pub mod props;
pub mod node;
pub mod edge;
pub mod change_set;
pub mod statement;

pub use error::GraphoError;
pub use value::Value;
pub use props::{HasProperties, Property, PropertyContainer};
pub use node::Node;
pub use edge::Edge;
pub use change_set::{ChangeSet, EdgeShape, NodeShape, Shaped};
pub use statement::{OptimisticLockingConfig, Statement};
