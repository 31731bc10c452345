use grapho::prelude::*;
use grapho_core::value;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn first_row(statement: &Statement) -> Value {
    match statement.parameter("rows") {
        Some(Value::List(l)) => l.value[0].clone(),
        other => panic!("rows not bound as a list: {other:?}"),
    }
}

fn planet(reference: i64) -> Node {
    Node::new_unsaved(reference).with_label("Planet").with_property("name", "Earth")
}

#[test]
fn test_empty_compiler_has_no_statements() {
    let compiler = CypherCompiler::new();
    assert!(compiler.all_statements().unwrap().is_empty());
    assert!(!compiler.has_statements_dependent_on_new_nodes());
}

#[test]
fn test_statements_come_out_in_execution_order() {
    init_logging();
    let mut compiler = CypherCompiler::new();
    compiler.unrelate(Edge::existing(50, "ORBITS", 3, 4));
    compiler.unrelate(Edge::new_unsaved(-20, "ORBITS", 3, 5));
    compiler.existing_relationship(Edge::existing(40, "ORBITS", 3, 6).with_property("since", 1_i64));
    compiler.existing_node(Node::existing(3).with_label("Star"));
    compiler.new_relationship(Edge::new_unsaved(-30, "ORBITS", 3, 7));
    compiler.new_node(planet(-1));

    let texts: Vec<String> = compiler
        .all_statements()
        .unwrap()
        .iter()
        .map(|s| s.text().to_owned())
        .collect();
    assert_eq!(texts.len(), 6);
    assert!(texts[0].contains("CREATE (n:`Planet`)"));
    assert!(texts[1].contains("MERGE (startNode)-[rel:`ORBITS`]->(endNode)"));
    assert!(texts[2].starts_with("UNWIND $rows as row MATCH (n) WHERE ID(n) = row.nodeId"));
    assert!(texts[3].starts_with("UNWIND $rows AS row MATCH ()-[r]->()"));
    assert!(texts[4].ends_with("DELETE rel"));
    assert!(texts[5].contains("DELETE r RETURN"));
}

#[test]
fn test_heterogeneous_nodes_are_batched_per_shape() {
    let mut compiler = CypherCompiler::new();
    compiler.new_node(planet(-1));
    compiler.new_node(Node::new_unsaved(-2).with_label("Star"));
    compiler.new_node(planet(-3));

    let statements = compiler.create_nodes_statements().unwrap();
    assert_eq!(statements.len(), 2);
    assert!(statements[0].text().contains("(n:`Planet`)"));
    assert!(statements[1].text().contains("(n:`Star`)"));
    match statements[0].parameter("rows") {
        Some(Value::List(l)) => assert_eq!(l.value.len(), 2),
        other => panic!("unexpected rows: {other:?}"),
    }
}

#[test]
fn test_synthesized_nodes_are_never_written() {
    init_logging();
    let mut compiler = CypherCompiler::new();
    compiler.new_node(planet(-1).synthesized());
    compiler.existing_node(Node::existing(2).with_label("Planet").synthesized());
    assert!(compiler.all_statements().unwrap().is_empty());
}

#[test]
fn test_new_relationships_wait_for_new_node_ids() {
    init_logging();
    let mut compiler = CypherCompiler::new();
    compiler.new_node(planet(-1));
    compiler.new_relationship(Edge::new_unsaved(-10, "ORBITS", -1, 2));

    assert!(compiler.has_statements_dependent_on_new_nodes());
    assert!(compiler.create_relationships_statements().unwrap().is_empty());

    compiler.context_mut().register_new_id(-1, 100);
    let statements = compiler.create_relationships_statements().unwrap();
    assert_eq!(statements.len(), 1);
    let row = first_row(&statements[0]);
    assert_eq!(value::map_get(&row, "startNodeId"), Some(&value::integer(100)));
    assert_eq!(value::map_get(&row, "endNodeId"), Some(&value::integer(2)));
    assert_eq!(value::map_get(&row, "relRef"), Some(&value::integer(-10)));
}

#[test]
fn test_context_resolution() {
    let mut context = CompileContext::default();
    context.register_new_id(-1, 100);
    assert_eq!(context.resolve(-1), 100);
    assert_eq!(context.resolve(5), 5);
    assert_eq!(context.resolve(-2), -2);
    assert!(context.is_resolved(-1));
    assert!(context.is_resolved(0));
    assert!(!context.is_resolved(-2));
}

#[test]
fn test_unrelate_cancels_pending_new_relationship() {
    let mut compiler = CypherCompiler::new();
    compiler.new_relationship(Edge::new_unsaved(-10, "ORBITS", 1, 2));
    compiler.unrelate(Edge::new_unsaved(-11, "ORBITS", 1, 2));
    assert!(compiler.all_statements().unwrap().is_empty());
}

#[test]
fn test_unrelate_matches_type_and_endpoints() {
    let mut compiler = CypherCompiler::new();
    compiler.new_relationship(Edge::new_unsaved(-10, "ORBITS", 1, 2));
    compiler.unrelate(Edge::new_unsaved(-11, "ORBITS", 2, 1));

    assert_eq!(compiler.create_relationships_statements().unwrap().len(), 1);
    assert_eq!(compiler.delete_relationships_statements().unwrap().len(), 1);
}

#[test]
fn test_unrelate_existing_relationship_entity() {
    let mut compiler = CypherCompiler::new();
    compiler.unrelate(Edge::existing(42, "ORBITS", 1, 2).with_version("version", 5_i64));

    assert!(compiler.delete_relationships_statements().unwrap().is_empty());
    let statements = compiler.delete_relationship_entities_statements().unwrap();
    assert_eq!(statements.len(), 1);
    assert!(statements[0].text().contains("AND r.`version` = row.`version`"));
    assert_eq!(statements[0].optimistic_locking().map(|l| l.expected_affected_count), Some(1));
}

#[test]
fn test_deleted_relationship_endpoints_are_resolved() {
    let mut compiler = CypherCompiler::new();
    compiler.unrelate(Edge::new_unsaved(-1, "ORBITS", -5, 2));
    compiler.context_mut().register_new_id(-5, 55);

    let statements = compiler.delete_relationships_statements().unwrap();
    let row = first_row(&statements[0]);
    assert_eq!(value::map_get(&row, "startNodeId"), Some(&value::integer(55)));
}

#[test]
fn test_unmap_node_drops_pending_update() {
    let mut compiler = CypherCompiler::new();
    compiler.existing_node(Node::existing(3).with_label("Star"));
    compiler.existing_node(Node::existing(4).with_label("Star"));
    compiler.unmap_node(3);

    let statements = compiler.update_nodes_statements().unwrap();
    assert_eq!(value::map_get(&first_row(&statements[0]), "nodeId"), Some(&value::integer(4)));
}

#[test]
fn test_errors_name_the_category() {
    let mut compiler = CypherCompiler::new();
    compiler.existing_node(Node::new_unsaved(-3).with_label("Planet"));

    let err = compiler.update_nodes_statements().unwrap_err();
    assert_eq!(
        err.to_string(),
        "compiling existing nodes: missing internal id on node with reference -3"
    );
    assert!(compiler.all_statements().is_err());
}

#[test]
fn test_versioned_updates_carry_locking_config() {
    let mut compiler = CypherCompiler::new();
    for id in [1, 2, 3] {
        compiler.existing_node(Node::existing(id).with_label("Planet").with_version("version", 1_i64));
    }
    let statements = compiler.update_nodes_statements().unwrap();
    assert_eq!(statements.len(), 1);

    let locking = statements[0].optimistic_locking().unwrap();
    assert_eq!(locking.expected_affected_count, 3);
    assert!(locking.verify(3).is_ok());
    assert!(matches!(locking.verify(2), Err(GraphoError::OptimisticLocking { .. })));
}
