use grapho_core::value::{self, Value};
use grapho_core::{ChangeSet, Edge, GraphoError, HasProperties, Statement};

use super::{finish, initial_props_map, StatementBuilder, REL_TYPE};
use crate::cypher;

/// Creates relationships between nodes that already have internal ids.
///
/// A relationship with properties and no primary id is `CREATE`d: two
/// structurally identical relationships with properties are still distinct
/// relationship entities and must not collapse into one. Everything else is
/// `MERGE`d, on the primary id when there is one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewRelationshipStatementBuilder;

impl StatementBuilder<Edge> for NewRelationshipStatementBuilder {
    fn build(&self, change_set: &ChangeSet<Edge>) -> Result<Statement, GraphoError> {
        let Some(first) = change_set.first() else {
            return Ok(Statement::empty());
        };
        let create = first.has_properties() && first.primary_id().is_none();

        let mut text = String::from(
            "UNWIND $rows as row MATCH (startNode) WHERE ID(startNode) = row.startNodeId \
             WITH row, startNode MATCH (endNode) WHERE ID(endNode) = row.endNodeId ",
        );
        text.push_str(if create { "CREATE " } else { "MERGE " });
        text.push_str("(startNode)-[rel:");
        text.push_str(&cypher::quote(first.rel_type()));
        if let Some(key) = first.primary_id() {
            let key = cypher::quote(key);
            text.push_str(&format!(" {{{key}: row.props.{key}}}"));
        }
        text.push_str("]->(endNode) SET rel += row.props RETURN row.relRef as ref, ID(rel) as id, $type as type");

        let rows = change_set.iter().map(row).collect::<Vec<_>>();
        log::debug!(
            "new relationship statement for {}: {} row(s), create={}",
            first.rel_type(),
            rows.len(),
            create
        );
        Ok(finish(text, rows, Some(REL_TYPE), None))
    }
}

fn row(edge: &Edge) -> Value {
    // `props` is always bound: the text references row.props unconditionally
    value::map([
        ("startNodeId", value::integer(edge.start_node())),
        ("endNodeId", value::integer(edge.end_node())),
        ("relRef", value::integer(edge.reference())),
        ("props", initial_props_map(edge.container())),
    ])
}
