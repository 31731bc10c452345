use grapho::prelude::*;
use grapho_core::value;

fn orbits_star() -> NestedPathSegment {
    NestedPathSegment::new("star", "ORBITS").with_target_label("Star")
}

#[test]
fn test_node_query_without_filters() {
    let query = build_node_query("Planet", &Filters::new()).unwrap();
    assert_eq!(query.text(), "MATCH (n:`Planet`) ");
    assert!(query.parameters().is_empty());
}

#[test]
fn test_node_query_plain_filters() {
    let filters = Filters::new()
        .add(Filter::new("moons", ComparisonOperator::LessThan, 23_i64))
        .and(Filter::new("name", ComparisonOperator::Like, "J*"));
    let query = build_node_query("Planet", &filters).unwrap();
    assert_eq!(
        query.text(),
        "MATCH (n:`Planet`) WHERE n.`moons` < $moons_0 AND n.`name` =~ $name_1 "
    );
    assert_eq!(query.parameters().len(), 2);
    assert_eq!(query.parameters().get("name_1"), Some(&value::string("(?i)J.*")));
}

#[test]
fn test_nested_filters_on_one_path_share_a_clause() {
    let filters = Filters::new()
        .add(Filter::new("mass", ComparisonOperator::GreaterThan, 1_i64).through(orbits_star()))
        .and(Filter::new("name", ComparisonOperator::Equals, "Sol").through(orbits_star()));
    let query = build_node_query("Planet", &filters).unwrap();
    assert_eq!(
        query.text(),
        "MATCH (n:`Planet`) \
         MATCH (n)-[:`ORBITS`]->(m0:`Star`) WHERE m0.`mass` > $star_mass_0 AND m0.`name` = $star_name_1 "
    );
}

#[test]
fn test_distinct_paths_get_distinct_identifiers() {
    let moons = NestedPathSegment::new("moons", "ORBITS")
        .with_target_label("Moon")
        .with_direction(RelationshipDirection::Incoming);
    let filters = Filters::new()
        .add(Filter::new("name", ComparisonOperator::Equals, "Sol").through(orbits_star()))
        .and(Filter::new("name", ComparisonOperator::Equals, "Luna").through(moons));
    let query = build_node_query("Planet", &filters).unwrap();
    assert_eq!(
        query.text(),
        "MATCH (n:`Planet`) \
         MATCH (n)-[:`ORBITS`]->(m0:`Star`) WHERE m0.`name` = $star_name_0 \
         MATCH (n)<-[:`ORBITS`]-(m1:`Moon`) WHERE m1.`name` = $moons_name_1 "
    );
}

#[test]
fn test_deep_nested_filter() {
    let filter = Filter::new("name", ComparisonOperator::Equals, "Milky Way")
        .through(orbits_star())
        .through(NestedPathSegment::new("galaxy", "PART_OF").with_target_label("Galaxy"));
    let query = build_node_query("Planet", &Filters::from(filter)).unwrap();
    assert_eq!(
        query.text(),
        "MATCH (n:`Planet`) \
         MATCH (n)-[:`ORBITS`]->(:`Star`)-[:`PART_OF`]->(m0:`Galaxy`) WHERE m0.`name` = $star_galaxy_name_0 "
    );
    assert_eq!(
        query.parameters().get("star_galaxy_name_0"),
        Some(&value::string("Milky Way"))
    );
}

#[test]
fn test_relationship_entity_hop_binds_the_relationship() {
    let segment = NestedPathSegment::new("orbits", "ORBITS")
        .with_target_label("Star")
        .relationship_entity();
    let filter = Filter::new("since", ComparisonOperator::GreaterThan, 2000_i64).through(segment);
    let query = build_node_query("Planet", &Filters::from(filter)).unwrap();
    assert_eq!(
        query.text(),
        "MATCH (n:`Planet`) MATCH (n)-[r0:`ORBITS`]->(:`Star`) WHERE r0.`since` > $orbits_since_0 "
    );
}

#[test]
fn test_relationship_entity_hop_must_be_last() {
    let filter = Filter::new("name", ComparisonOperator::Equals, "x")
        .through(NestedPathSegment::new("orbits", "ORBITS").relationship_entity())
        .through(NestedPathSegment::new("galaxy", "PART_OF"));
    let err = build_node_query("Planet", &Filters::from(filter)).unwrap_err();
    assert!(matches!(err, GraphoError::MalformedPath { hop: 0, .. }));
}

#[test]
fn test_nested_or_is_unsupported() {
    let filters = Filters::new()
        .add(Filter::new("moons", ComparisonOperator::LessThan, 23_i64))
        .or(Filter::new("name", ComparisonOperator::Equals, "Sol").through(orbits_star()));
    let err = build_node_query("Planet", &filters).unwrap_err();
    assert!(matches!(err, GraphoError::UnsupportedOperation(_)));
}

#[test]
fn test_missing_operator_is_rejected() {
    let filters = Filters::new()
        .add(Filter::new("moons", ComparisonOperator::LessThan, 23_i64))
        .add(Filter::new("name", ComparisonOperator::Equals, "Earth"));
    let err = build_node_query("Planet", &filters).unwrap_err();
    assert!(matches!(err, GraphoError::MissingOperator { .. }));
}

#[test]
fn test_into_statement_appends_suffix() {
    let filters = Filters::from(Filter::new("moons", ComparisonOperator::LessThan, 23_i64));
    let statement = build_node_query("Planet", &filters).unwrap().into_statement("RETURN n");
    assert_eq!(statement.text(), "MATCH (n:`Planet`) WHERE n.`moons` < $moons_0 RETURN n");
    assert_eq!(statement.parameter("moons_0"), Some(&value::integer(23)));
    assert!(statement.optimistic_locking().is_none());
}

#[test]
fn test_relationship_query_with_endpoint_filters() {
    let planet = NestedPathSegment::new("planet", "ORBITS").with_target_label("Planet");
    let star = orbits_star().with_direction(RelationshipDirection::Incoming);
    let filters = Filters::new()
        .add(Filter::new("since", ComparisonOperator::GreaterThan, 2000_i64))
        .and(Filter::new("name", ComparisonOperator::Equals, "Earth").through(planet))
        .and(Filter::new("name", ComparisonOperator::Equals, "Sol").through(star));
    let query = build_relationship_query("ORBITS", &filters).unwrap();
    assert_eq!(
        query.text(),
        "MATCH (n:`Planet`) WHERE n.`name` = $planet_name_1 \
         MATCH (m:`Star`) WHERE m.`name` = $star_name_2 \
         MATCH (n)-[r:`ORBITS`]->(m) WHERE r.`since` > $since_0 "
    );
    assert_eq!(query.parameters().len(), 3);
}

#[test]
fn test_relationship_query_without_filters() {
    let query = build_relationship_query("ORBITS", &Filters::new()).unwrap();
    assert_eq!(query.text(), "MATCH (n)-[r:`ORBITS`]->(m) ");
}

#[test]
fn test_relationship_query_rejects_deep_paths() {
    let filter = Filter::new("name", ComparisonOperator::Equals, "x")
        .through(orbits_star())
        .through(NestedPathSegment::new("galaxy", "PART_OF"));
    let err = build_relationship_query("ORBITS", &Filters::from(filter)).unwrap_err();
    assert!(matches!(err, GraphoError::UnsupportedOperation(_)));
}

#[test]
fn test_relationship_query_rejects_undirected_hops() {
    let filter = Filter::new("name", ComparisonOperator::Equals, "x")
        .through(orbits_star().with_direction(RelationshipDirection::Undirected));
    let err = build_relationship_query("ORBITS", &Filters::from(filter)).unwrap_err();
    assert!(matches!(err, GraphoError::UnsupportedOperation(_)));
}
