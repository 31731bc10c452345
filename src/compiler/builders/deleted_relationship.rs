use grapho_core::value::{self, Value};
use grapho_core::{ChangeSet, Edge, GraphoError, HasProperties, Statement};

use super::{finish, push_version, StatementBuilder};
use crate::compiler::locking;
use crate::cypher;

/// Deletes plain relationships, identified by type and endpoints.
///
/// A versioned relationship is incremented before the delete, so a
/// concurrent modification drops the row and the delete is reported short.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeletedRelationshipStatementBuilder;

impl StatementBuilder<Edge> for DeletedRelationshipStatementBuilder {
    fn build(&self, change_set: &ChangeSet<Edge>) -> Result<Statement, GraphoError> {
        let Some(first) = change_set.first() else {
            return Ok(Statement::empty());
        };
        let container = first.container();

        let mut text = String::from(
            "UNWIND $rows as row MATCH (startNode) WHERE ID(startNode) = row.startNodeId \
             WITH row, startNode MATCH (startNode)-[rel:",
        );
        text.push_str(&cypher::quote(first.rel_type()));
        text.push_str("]->(endNode) WHERE ID(endNode) = row.endNodeId");
        if container.has_version() {
            text.push_str(&locking::existing_entity(container, "rel", 1)?);
        }
        text.push_str(" DELETE rel");

        let rows = change_set.iter().map(row).collect::<Vec<_>>();
        log::debug!(
            "deleted relationship statement for {}: {} row(s), versioned={}",
            first.rel_type(),
            rows.len(),
            container.has_version()
        );
        let locking = container
            .version_key()
            .map(|k| (vec![first.rel_type().to_owned()], k));
        Ok(finish(text, rows, None, locking))
    }
}

fn row(edge: &Edge) -> Value {
    let mut entries = vec![
        ("startNodeId".to_owned(), value::integer(edge.start_node())),
        ("endNodeId".to_owned(), value::integer(edge.end_node())),
    ];
    push_version(&mut entries, edge.container());
    value::map(entries)
}
