use grapho_core::value::{self, Value};
use grapho_core::{ChangeSet, GraphoError, HasProperties, Node, Statement};

use super::{finish, initial_props_map, props_map, push_version, StatementBuilder, NODE_TYPE};
use crate::compiler::locking;
use crate::cypher;

/// Creates nodes that have never been written.
///
/// Nodes with a primary index are `MERGE`d on it so a retried save does not
/// create duplicates. A versioned, merged node goes through the
/// new-or-existing locking check; its version is then owned by the locking
/// fragment, so the remaining properties are added with `+=`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewNodeStatementBuilder;

impl StatementBuilder<Node> for NewNodeStatementBuilder {
    fn build(&self, change_set: &ChangeSet<Node>) -> Result<Statement, GraphoError> {
        let Some(first) = change_set.first() else {
            return Ok(Statement::empty());
        };
        let primary_index = first.primary_index();
        let version_key = first.container().version_key();
        let locked = primary_index.is_some() && version_key.is_some();

        let mut text = String::from("UNWIND $rows as row ");
        text.push_str(if primary_index.is_some() { "MERGE " } else { "CREATE " });
        text.push_str("(n");
        text.push_str(&cypher::labels(first.labels()));
        if let Some(key) = primary_index {
            let key = cypher::quote(key);
            text.push_str(&format!(" {{{key}: row.props.{key}}}"));
        }
        text.push(')');
        if locked {
            text.push_str(&locking::new_or_existing(first.container(), "n")?);
            text.push_str(" SET n += row.props");
        } else {
            text.push_str(" SET n=row.props");
        }
        text.push_str(" RETURN row.nodeRef as ref, ID(n) as id, $type as type");

        let rows = change_set.iter().map(|node| row(node, locked)).collect::<Vec<_>>();
        log::debug!(
            "new node statement for {}: {} row(s), merge={}, versioned={}",
            first.label_signature(),
            rows.len(),
            primary_index.is_some(),
            version_key.is_some()
        );
        let labels: Vec<String> = first.labels().iter().cloned().collect();
        Ok(finish(text, rows, Some(NODE_TYPE), version_key.map(|k| (labels, k))))
    }
}

fn row(node: &Node, locked: bool) -> Value {
    let container = node.container();
    let mut entries = vec![("nodeRef".to_owned(), value::integer(node.reference()))];
    if locked {
        entries.push(("props".to_owned(), props_map(container, true)));
        push_version(&mut entries, container);
    } else {
        entries.push(("props".to_owned(), initial_props_map(container)));
    }
    value::map(entries)
}
