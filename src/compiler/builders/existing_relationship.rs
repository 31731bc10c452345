use grapho_core::value::{self, Value};
use grapho_core::{ChangeSet, Edge, GraphoError, HasProperties, Statement};

use super::{finish, props_map, push_version, StatementBuilder, REL_TYPE};
use crate::compiler::locking;

/// Updates relationships that already exist, matched by internal id.
///
/// The version property never travels in `row.props`; the locking fragment
/// is the only thing that changes it. `increment` 0 verifies a relationship
/// that is referenced but not modified.
#[derive(Debug, Clone, Copy)]
pub struct ExistingRelationshipStatementBuilder {
    increment: u32,
}

impl ExistingRelationshipStatementBuilder {
    pub fn new() -> Self {
        Self { increment: 1 }
    }

    /// Check versions without incrementing them.
    pub fn verify_only() -> Self {
        Self { increment: 0 }
    }
}

impl Default for ExistingRelationshipStatementBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementBuilder<Edge> for ExistingRelationshipStatementBuilder {
    fn build(&self, change_set: &ChangeSet<Edge>) -> Result<Statement, GraphoError> {
        let Some(first) = change_set.first() else {
            return Ok(Statement::empty());
        };
        let container = first.container();

        let mut text = String::from("UNWIND $rows AS row MATCH ()-[r]->() WHERE ID(r) = row.relId");
        if container.has_version() {
            text.push_str(&locking::existing_entity(container, "r", self.increment)?);
        }
        text.push_str(&locking::remove_properties(&container.removed_dynamic(), "r"));
        text.push_str(" SET r += row.props RETURN ID(r) as ref, ID(r) as id, $type as type");

        let rows = change_set.iter().map(row).collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "existing relationship statement for {}: {} row(s), versioned={}",
            first.rel_type(),
            rows.len(),
            container.has_version()
        );
        let locking = container
            .version_key()
            .map(|k| (vec![first.rel_type().to_owned()], k));
        Ok(finish(text, rows, Some(REL_TYPE), locking))
    }
}

fn row(edge: &Edge) -> Result<Value, GraphoError> {
    let id = edge
        .id()
        .ok_or_else(|| GraphoError::missing_identity("relationship", edge.reference()))?;
    let container = edge.container();
    let mut entries = vec![
        ("relId".to_owned(), value::integer(id)),
        ("props".to_owned(), props_map(container, true)),
    ];
    push_version(&mut entries, container);
    Ok(value::map(entries))
}
