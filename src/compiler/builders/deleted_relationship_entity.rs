use grapho_core::value::{self, Value};
use grapho_core::{ChangeSet, Edge, GraphoError, HasProperties, Statement};

use super::{finish, push_version, StatementBuilder, REL_TYPE};
use crate::compiler::locking;

/// Deletes relationship entities by their own internal id.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeletedRelationshipEntityStatementBuilder;

impl StatementBuilder<Edge> for DeletedRelationshipEntityStatementBuilder {
    fn build(&self, change_set: &ChangeSet<Edge>) -> Result<Statement, GraphoError> {
        let Some(first) = change_set.first() else {
            return Ok(Statement::empty());
        };
        let container = first.container();

        let mut text = String::from("UNWIND $rows AS row MATCH ()-[r]->() WHERE ID(r) = row.relId");
        if container.has_version() {
            text.push_str(&locking::existing_entity(container, "r", 1)?);
        }
        text.push_str(" DELETE r RETURN row.relId as ref, row.relId as id, $type as type");

        let rows = change_set.iter().map(row).collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "deleted relationship entity statement for {}: {} row(s), versioned={}",
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
        .ok_or_else(|| GraphoError::missing_identity("relationship entity", edge.reference()))?;
    let mut entries = vec![("relId".to_owned(), value::integer(id))];
    push_version(&mut entries, edge.container());
    Ok(value::map(entries))
}
