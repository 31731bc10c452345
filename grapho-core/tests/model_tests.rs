use grapho_core::value;
use grapho_core::*;

fn planet(reference: i64) -> Node {
    Node::new_unsaved(reference).with_label("Planet").with_property("name", "Earth")
}

#[test]
fn test_partition_groups_by_shape_in_first_seen_order() {
    let nodes = vec![
        planet(-1),
        Node::new_unsaved(-2).with_label("Star"),
        planet(-3),
        planet(-4).with_primary_index("name"),
        Node::new_unsaved(-5).with_label("Star"),
    ];
    let groups = ChangeSet::partition(nodes);

    let refs: Vec<Vec<i64>> = groups
        .iter()
        .map(|g| g.iter().map(Node::reference).collect())
        .collect();
    assert_eq!(refs, vec![vec![-1, -3], vec![-2, -5], vec![-4]]);
}

#[test]
fn test_partition_separates_removed_labels() {
    let a = Node::existing(1).with_label("Planet");
    let b = Node::existing(2)
        .with_label("Planet")
        .with_previous_labels(["Planet", "DwarfPlanet"]);
    assert_eq!(ChangeSet::partition(vec![a, b]).len(), 2);
}

#[test]
fn test_partition_of_nothing_is_empty() {
    assert!(ChangeSet::<Edge>::partition(Vec::new()).is_empty());
}

#[test]
fn test_edges_with_and_without_properties_differ_in_shape() {
    let bare = Edge::new_unsaved(-1, "ORBITS", 1, 2);
    let with_props = Edge::new_unsaved(-2, "ORBITS", 1, 2).with_property("since", 1_i64);
    assert_ne!(bare.shape(), with_props.shape());
    assert_eq!(ChangeSet::partition(vec![bare, with_props]).len(), 2);
}

#[test]
fn test_try_from_vec_accepts_homogeneous_items() {
    let set = ChangeSet::try_from_vec(vec![planet(-1), planet(-2)]).unwrap();
    assert_eq!(set.len(), 2);
    assert_eq!(set.first().map(Node::reference), Some(-1));
    assert_eq!(set.shape().map(|s| s.labels.len()), Some(1));
}

#[test]
fn test_try_from_vec_rejects_mixed_shapes() {
    let err = ChangeSet::try_from_vec(vec![planet(-1), planet(-2).with_version("version", 0_i64)]).unwrap_err();
    assert!(matches!(err, GraphoError::HeterogeneousChangeSet { .. }));
}

#[test]
fn test_empty_change_set_has_no_shape() {
    let set = ChangeSet::<Node>::try_from_vec(Vec::new()).unwrap();
    assert!(set.is_empty());
    assert!(set.shape().is_none());
    assert!(set.first().is_none());
}

#[test]
fn test_set_replaces_value_in_place() {
    let node = Node::new_unsaved(-1)
        .with_property("a", 1_i64)
        .with_property("b", 2_i64)
        .with_property("a", 3_i64);
    let props = node.container().properties();
    assert_eq!(props.len(), 2);
    assert_eq!(props[0], Property::new("a", 3_i64));
    assert_eq!(props[1].key, "b");
}

#[test]
fn test_props_iter_can_skip_version() {
    let node = Node::existing(1)
        .with_property("name", "Earth")
        .with_property("version", 4_i64)
        .with_version("version", 4_i64);
    let keys = |exclude| -> Vec<String> {
        node.container()
            .props_iter(exclude)
            .map(|p| p.key.clone())
            .collect()
    };
    assert_eq!(keys(true), vec!["name"]);
    assert_eq!(keys(false), vec!["name", "version"]);
}

#[test]
fn test_removed_dynamic_properties() {
    let node = Node::existing(1)
        .with_dynamic_property("address.city", "Paris")
        .with_previous_dynamic_properties(["address.city", "address.zip"]);
    let removed: Vec<String> = node.container().removed_dynamic().into_iter().collect();
    assert_eq!(removed, vec!["address.zip"]);
}

#[test]
fn test_removed_labels() {
    let node = Node::existing(1)
        .with_labels(["Planet", "Habitable"])
        .with_previous_labels(["Planet", "Gaseous", "Cold"]);
    let removed: Vec<String> = node.removed_labels().into_iter().collect();
    assert_eq!(removed, vec!["Cold", "Gaseous"]);
    assert_eq!(node.label_signature(), "Habitable:Planet");
}

#[test]
fn test_edge_version_does_not_count_as_property() {
    let edge = Edge::existing(9, "ORBITS", 1, 2).with_version("version", 1_i64);
    assert!(!edge.has_properties());
    assert_eq!(edge.reference(), 9);
}

#[test]
fn test_empty_statement() {
    let statement = Statement::empty();
    assert!(statement.is_empty());
    assert_eq!(statement.text(), "");
    assert!(statement.optimistic_locking().is_none());
}

#[test]
fn test_statement_parameter_lookup() {
    let mut params = std::collections::HashMap::new();
    params.insert("type".to_owned(), value::string("node"));
    let statement = Statement::new("RETURN $type", params);
    assert!(!statement.is_empty());
    assert_eq!(statement.parameter("type"), Some(&value::string("node")));
    assert!(statement.parameter("rows").is_none());
}

#[test]
fn test_optimistic_locking_verify() {
    let config = OptimisticLockingConfig::new(3, vec!["ORBITS".into()], "version");
    assert!(config.verify(3).is_ok());

    let err = config.verify(2).unwrap_err();
    match err {
        GraphoError::OptimisticLocking {
            labels_or_types,
            expected,
            actual,
        } => {
            assert_eq!(labels_or_types, vec!["ORBITS"]);
            assert_eq!(expected, 3);
            assert_eq!(actual, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_value_helpers() {
    let map = value::map([("a", value::integer(1)), ("b", value::null())]);
    assert_eq!(value::len(&map), Some(2));
    assert_eq!(value::map_get(&map, "a"), Some(&value::integer(1)));
    assert!(value::map_get(&map, "b").is_some_and(value::is_null));
    assert!(value::map_get(&value::integer(1), "a").is_none());
    assert_eq!(value::type_name(&map), "Map");
    assert_eq!(value::len(&value::string("x")), None);
}

#[test]
fn test_error_context_chain() {
    let err = GraphoError::missing_identity("node", -3).with_context("compiling existing nodes");
    assert_eq!(
        err.to_string(),
        "compiling existing nodes: missing internal id on node with reference -3"
    );
}
