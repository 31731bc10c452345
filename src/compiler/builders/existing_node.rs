use grapho_core::value::{self, Value};
use grapho_core::{ChangeSet, GraphoError, HasProperties, Node, Statement};

use super::{finish, props_map, push_version, StatementBuilder, NODE_TYPE};
use crate::compiler::locking;
use crate::cypher;

/// Updates nodes that already exist, matched by internal id.
///
/// Labels dropped since the node was loaded are removed, as are dynamic
/// composite properties that no longer exist. Versioned nodes are
/// incremented through the locking fragment and never through `row.props`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExistingNodeStatementBuilder;

impl StatementBuilder<Node> for ExistingNodeStatementBuilder {
    fn build(&self, change_set: &ChangeSet<Node>) -> Result<Statement, GraphoError> {
        let Some(first) = change_set.first() else {
            return Ok(Statement::empty());
        };
        let container = first.container();

        let mut text = String::from("UNWIND $rows as row MATCH (n) WHERE ID(n) = row.nodeId");
        if container.has_version() {
            text.push_str(&locking::existing_entity(container, "n", 1)?);
        }
        for label in first.removed_labels() {
            text.push_str(&format!(" REMOVE n:{}", cypher::quote(&label)));
        }
        text.push_str(&locking::remove_properties(&container.removed_dynamic(), "n"));
        if !first.labels().is_empty() {
            text.push_str(" SET n");
            text.push_str(&cypher::labels(first.labels()));
        }
        text.push_str(" SET n += row.props RETURN row.nodeId as ref, ID(n) as id, $type as type");

        let rows = change_set.iter().map(row).collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "existing node statement for {}: {} row(s), versioned={}",
            first.label_signature(),
            rows.len(),
            container.has_version()
        );
        let labels: Vec<String> = first.labels().iter().cloned().collect();
        Ok(finish(text, rows, Some(NODE_TYPE), container.version_key().map(|k| (labels, k))))
    }
}

fn row(node: &Node) -> Result<Value, GraphoError> {
    let id = node
        .id()
        .ok_or_else(|| GraphoError::missing_identity("node", node.reference()))?;
    let container = node.container();
    let mut entries = vec![
        ("nodeId".to_owned(), value::integer(id)),
        ("props".to_owned(), props_map(container, true)),
    ];
    push_version(&mut entries, container);
    Ok(value::map(entries))
}
