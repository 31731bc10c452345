//! Batched mutation statement builders.
//!
//! Each builder turns one homogeneous [`ChangeSet`] into a single
//! `UNWIND $rows AS row ...` statement. The first entity of the change set is
//! the template for the statement text; the change set guarantees every other
//! entity has the same shape. Every row carries the caller's reference so
//! results can be correlated through the `ref` column.
//!
//! An empty change set builds [`Statement::empty`], which callers skip.

use std::collections::HashMap;

use grapho_core::value::{self, Value};
use grapho_core::{ChangeSet, GraphoError, OptimisticLockingConfig, PropertyContainer, Shaped, Statement};

use crate::compiler::locking;

mod deleted_relationship;
mod deleted_relationship_entity;
mod existing_node;
mod existing_relationship;
mod new_node;
mod new_relationship;

pub use deleted_relationship::DeletedRelationshipStatementBuilder;
pub use deleted_relationship_entity::DeletedRelationshipEntityStatementBuilder;
pub use existing_node::ExistingNodeStatementBuilder;
pub use existing_relationship::ExistingRelationshipStatementBuilder;
pub use new_node::NewNodeStatementBuilder;
pub use new_relationship::NewRelationshipStatementBuilder;

/// Value of the `$type` parameter for node results.
pub const NODE_TYPE: &str = "node";
/// Value of the `$type` parameter for relationship results.
pub const REL_TYPE: &str = "rel";

/// Compiles a homogeneous change set into one batched statement.
pub trait StatementBuilder<T: Shaped> {
    fn build(&self, change_set: &ChangeSet<T>) -> Result<Statement, GraphoError>;
}

/// `row.props` for an entity. The version property is left out when the
/// locking fragment owns it.
pub(crate) fn props_map(container: &PropertyContainer, exclude_version: bool) -> Value {
    value::map(
        container
            .props_iter(exclude_version)
            .map(|p| (p.key.clone(), p.value.clone())),
    )
}

/// `row.props` for an entity being created: a versioned entity starts its
/// version sequence at 0 unless the caller already supplied one.
pub(crate) fn initial_props_map(container: &PropertyContainer) -> Value {
    let mut props: Vec<(String, Value)> = container
        .props_iter(true)
        .map(|p| (p.key.clone(), p.value.clone()))
        .collect();
    if let Some(version) = container.version() {
        let start = if value::is_null(&version.value) {
            value::integer(0)
        } else {
            version.value.clone()
        };
        props.push((version.key.clone(), start));
    }
    value::map(props)
}

/// The version the caller last saw, `null` if it never had one.
pub(crate) fn version_value(container: &PropertyContainer) -> Value {
    container
        .version()
        .map(|v| v.value.clone())
        .unwrap_or_else(value::null)
}

/// Row entries shared by every versioned row: `row.version` holds the
/// expected version, never the entity's own version key.
pub(crate) fn push_version(row: &mut Vec<(String, Value)>, container: &PropertyContainer) {
    if container.has_version() {
        row.push((locking::EXPECTED_VERSION.to_owned(), version_value(container)));
    }
}

/// Assemble the statement, binding `rows` and, when results are returned,
/// `type`. Versioned batches expect one affected row per input row.
pub(crate) fn finish(
    text: String,
    rows: Vec<Value>,
    result_type: Option<&str>,
    locking: Option<(Vec<String>, &str)>,
) -> Statement {
    let row_count = rows.len();
    let mut parameters = HashMap::new();
    parameters.insert("rows".to_owned(), value::list(rows));
    if let Some(t) = result_type {
        parameters.insert("type".to_owned(), value::string(t));
    }
    log::trace!("{text}");
    let statement = Statement::new(text, parameters);
    match locking {
        Some((labels_or_types, key)) => {
            statement.with_optimistic_locking(OptimisticLockingConfig::new(row_count, labels_or_types, key))
        }
        None => statement,
    }
}
