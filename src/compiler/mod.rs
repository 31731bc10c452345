//! Mutation compilation: turns the nodes and relationships of one unit of
//! work into batched, parameterized write statements.
//!
//! [`CypherCompiler`] collects the changes, partitions each category into
//! homogeneous [`ChangeSet`]s and hands every change set to its
//! [`StatementBuilder`]. Statements come out in dependency order: created
//! nodes first (their ids are needed by new relationships), then created
//! relationships, node and relationship updates, and finally deletes.

use std::collections::HashMap;

use grapho_core::{ChangeSet, Edge, GraphoError, Node, Shaped, Statement};

pub mod builders;
pub mod locking;

pub use builders::{
    DeletedRelationshipEntityStatementBuilder, DeletedRelationshipStatementBuilder, ExistingNodeStatementBuilder,
    ExistingRelationshipStatementBuilder, NewNodeStatementBuilder, NewRelationshipStatementBuilder, StatementBuilder,
};

/// Maps references of nodes created in this unit of work to the internal
/// ids the database assigned them.
#[derive(Debug, Clone, Default)]
pub struct CompileContext {
    new_ids: HashMap<i64, i64>,
}

impl CompileContext {
    pub fn register_new_id(&mut self, reference: i64, id: i64) {
        self.new_ids.insert(reference, id);
    }

    /// The internal id for a node identity: registered references resolve
    /// to their new id, everything else is returned as is.
    pub fn resolve(&self, identity: i64) -> i64 {
        self.new_ids.get(&identity).copied().unwrap_or(identity)
    }

    pub fn is_resolved(&self, identity: i64) -> bool {
        identity >= 0 || self.new_ids.contains_key(&identity)
    }
}

/// Collects the changes of one unit of work and compiles them.
///
/// ```rust
/// # use grapho::compiler::CypherCompiler;
/// # use grapho_core::Node;
/// let mut compiler = CypherCompiler::new();
/// compiler.new_node(Node::new_unsaved(-1).with_label("Planet").with_property("name", "Earth"));
/// let statements = compiler.create_nodes_statements()?;
/// assert_eq!(statements.len(), 1);
/// assert!(statements[0].text().starts_with("UNWIND $rows as row CREATE (n:`Planet`)"));
/// # Ok::<(), grapho_core::GraphoError>(())
/// ```
#[derive(Debug, Default)]
pub struct CypherCompiler {
    context: CompileContext,
    new_nodes: Vec<Node>,
    existing_nodes: Vec<Node>,
    new_relationships: Vec<Edge>,
    existing_relationships: Vec<Edge>,
    deleted_relationships: Vec<Edge>,
    deleted_relationship_entities: Vec<Edge>,
}

impl CypherCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn context(&self) -> &CompileContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut CompileContext {
        &mut self.context
    }

    /// Register a node to create. Synthesized nodes are ignored.
    pub fn new_node(&mut self, node: Node) {
        if node.is_synthesized() {
            log::warn!("ignoring synthesized node {} ({})", node.reference(), node.label_signature());
            return;
        }
        self.new_nodes.push(node);
    }

    /// Register a node to update. Synthesized nodes are ignored.
    pub fn existing_node(&mut self, node: Node) {
        if node.is_synthesized() {
            log::warn!("ignoring synthesized node {} ({})", node.reference(), node.label_signature());
            return;
        }
        self.existing_nodes.push(node);
    }

    /// Drop a pending update for the node with internal id `id`.
    pub fn unmap_node(&mut self, id: i64) {
        self.existing_nodes.retain(|n| n.id() != Some(id));
    }

    pub fn new_relationship(&mut self, edge: Edge) {
        self.new_relationships.push(edge);
    }

    pub fn existing_relationship(&mut self, edge: Edge) {
        self.existing_relationships.push(edge);
    }

    /// Register a relationship to delete.
    ///
    /// If the same relationship is still pending creation in this unit of
    /// work, the two cancel out and nothing is written. Otherwise
    /// relationships with an internal id are deleted as relationship
    /// entities, the rest by type and endpoints.
    pub fn unrelate(&mut self, edge: Edge) {
        let pending = self.new_relationships.iter().position(|new| match edge.id() {
            Some(_) => new.reference() == edge.reference(),
            None => {
                new.rel_type() == edge.rel_type()
                    && new.start_node() == edge.start_node()
                    && new.end_node() == edge.end_node()
            }
        });
        if let Some(i) = pending {
            log::debug!("unrelate cancels pending new relationship {}", edge.rel_type());
            self.new_relationships.remove(i);
        } else if edge.id().is_some() {
            self.deleted_relationship_entities.push(edge);
        } else {
            self.deleted_relationships.push(edge);
        }
    }

    /// Whether any pending relationship points at a node that has not been
    /// created yet, i.e. the node statements must run first.
    pub fn has_statements_dependent_on_new_nodes(&self) -> bool {
        self.new_relationships
            .iter()
            .any(|e| e.start_node() < 0 || e.end_node() < 0)
    }

    pub fn create_nodes_statements(&self) -> Result<Vec<Statement>, GraphoError> {
        compile("new nodes", &NewNodeStatementBuilder, self.new_nodes.iter().cloned())
    }

    /// Relationships whose endpoints are still unresolved references are
    /// skipped.
    pub fn create_relationships_statements(&self) -> Result<Vec<Statement>, GraphoError> {
        let edges = self.new_relationships.iter().filter_map(|edge| {
            if !(self.context.is_resolved(edge.start_node()) && self.context.is_resolved(edge.end_node())) {
                log::warn!(
                    "skipping new relationship {} with unresolved endpoint ({} -> {})",
                    edge.rel_type(),
                    edge.start_node(),
                    edge.end_node()
                );
                return None;
            }
            Some(self.resolved(edge))
        });
        compile("new relationships", &NewRelationshipStatementBuilder, edges)
    }

    pub fn update_nodes_statements(&self) -> Result<Vec<Statement>, GraphoError> {
        compile("existing nodes", &ExistingNodeStatementBuilder, self.existing_nodes.iter().cloned())
    }

    pub fn update_relationships_statements(&self) -> Result<Vec<Statement>, GraphoError> {
        compile(
            "existing relationships",
            &ExistingRelationshipStatementBuilder::new(),
            self.existing_relationships.iter().cloned(),
        )
    }

    pub fn delete_relationships_statements(&self) -> Result<Vec<Statement>, GraphoError> {
        let edges = self.deleted_relationships.iter().map(|e| self.resolved(e));
        compile("deleted relationships", &DeletedRelationshipStatementBuilder, edges)
    }

    pub fn delete_relationship_entities_statements(&self) -> Result<Vec<Statement>, GraphoError> {
        compile(
            "deleted relationship entities",
            &DeletedRelationshipEntityStatementBuilder,
            self.deleted_relationship_entities.iter().cloned(),
        )
    }

    /// Every statement of the unit of work, in execution order.
    pub fn all_statements(&self) -> Result<Vec<Statement>, GraphoError> {
        let mut statements = self.create_nodes_statements()?;
        statements.extend(self.create_relationships_statements()?);
        statements.extend(self.update_nodes_statements()?);
        statements.extend(self.update_relationships_statements()?);
        statements.extend(self.delete_relationships_statements()?);
        statements.extend(self.delete_relationship_entities_statements()?);
        Ok(statements)
    }

    fn resolved(&self, edge: &Edge) -> Edge {
        let mut edge = edge.clone();
        edge.set_endpoints(self.context.resolve(edge.start_node()), self.context.resolve(edge.end_node()));
        edge
    }
}

/// Partition `items` and build one statement per homogeneous group,
/// dropping empty statements.
fn compile<T, B, I>(category: &str, builder: &B, items: I) -> Result<Vec<Statement>, GraphoError>
where
    T: Shaped,
    B: StatementBuilder<T>,
    I: IntoIterator<Item = T>,
{
    let groups = ChangeSet::partition(items);
    log::debug!("{category}: {} change set(s)", groups.len());
    let mut statements = Vec::with_capacity(groups.len());
    for group in &groups {
        let statement = builder
            .build(group)
            .map_err(|e| e.with_context(format!("compiling {category}")))?;
        if !statement.is_empty() {
            statements.push(statement);
        }
    }
    Ok(statements)
}
