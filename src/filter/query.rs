//! Assembles filters into the `MATCH ... WHERE ...` part of a read query.
//!
//! Plain filters apply to the entity being loaded. Nested filters get their
//! own `MATCH` over the relationship hops they traverse; filters sharing the
//! same path share one clause and one set of identifiers.

use std::collections::HashMap;

use grapho_core::value::Value;
use grapho_core::{GraphoError, Statement};

use crate::cypher;
use crate::filter::filter::Filter;
use crate::filter::filters::Filters;
use crate::filter::operator::BooleanOperator;
use crate::filter::path::{NestedPathSegment, RelationshipDirection};

/// The filtering part of a read query and its parameters. Append a
/// `RETURN` (or further clauses) with [`into_statement`](Self::into_statement).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredQuery {
    text: String,
    parameters: HashMap<String, Value>,
}

impl FilteredQuery {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parameters(&self) -> &HashMap<String, Value> {
        &self.parameters
    }

    /// Finish the query with `suffix`, e.g. `"RETURN n"`.
    pub fn into_statement(self, suffix: &str) -> Statement {
        Statement::new(format!("{}{}", self.text, suffix), self.parameters)
    }
}

/// A `MATCH` clause being assembled, with the filters rendered into it so far.
struct Clause {
    pattern: String,
    identifier: String,
    conditions: String,
}

impl Clause {
    fn new(pattern: String, identifier: impl Into<String>) -> Self {
        Self {
            pattern,
            identifier: identifier.into(),
            conditions: String::new(),
        }
    }

    fn append(&mut self, filter: &Filter, parameters: &mut HashMap<String, Value>) -> Result<(), GraphoError> {
        let first = self.conditions.is_empty();
        self.conditions.push_str(&filter.to_cypher(&self.identifier, first)?);
        parameters.extend(filter.parameters()?);
        Ok(())
    }

    fn render(&self, out: &mut String) {
        out.push_str("MATCH ");
        out.push_str(&self.pattern);
        out.push(' ');
        out.push_str(&self.conditions);
    }
}

fn node_pattern(identifier: &str, label: Option<&str>) -> String {
    match label {
        Some(l) => format!("({}:{})", identifier, cypher::quote(l)),
        None => format!("({identifier})"),
    }
}

fn rel_pattern(segment: &NestedPathSegment, identifier: &str) -> String {
    let (left, right) = segment.direction.arrows();
    format!(
        "{}[{}:{}]{}",
        left,
        identifier,
        cypher::quote(&segment.relationship_type),
        right
    )
}

/// Only the first filter may omit its boolean operator, and nested filters
/// cannot be `OR`-ed with the rest.
fn check_operators(filters: &Filters) -> Result<(), GraphoError> {
    for (i, filter) in filters.iter().enumerate() {
        if i > 0 && filter.boolean_operator() == BooleanOperator::None {
            return Err(GraphoError::missing_operator(filter.property_name()));
        }
        if filter.is_nested() && filter.boolean_operator() == BooleanOperator::Or {
            return Err(GraphoError::UnsupportedOperation(format!(
                "OR is not supported for nested property '{}'",
                filter.property_name()
            )));
        }
    }
    Ok(())
}

/// Build the filtering part of a query loading nodes labelled `label`,
/// bound to `n`.
///
/// ```rust
/// # use grapho::filter::{Filter, Filters, ComparisonOperator, NestedPathSegment, build_node_query};
/// let filters = Filters::new()
///     .add(Filter::new("name", ComparisonOperator::Equals, "Earth"))
///     .and(
///         Filter::new("mass", ComparisonOperator::GreaterThan, 1_i64)
///             .through(NestedPathSegment::new("star", "ORBITS").with_target_label("Star")),
///     );
/// let query = build_node_query("Planet", &filters)?;
/// assert_eq!(
///     query.text(),
///     "MATCH (n:`Planet`) WHERE n.`name` = $name_0 MATCH (n)-[:`ORBITS`]->(m0:`Star`) WHERE m0.`mass` > $star_mass_1 "
/// );
/// # Ok::<(), grapho_core::GraphoError>(())
/// ```
pub fn build_node_query(label: &str, filters: &Filters) -> Result<FilteredQuery, GraphoError> {
    check_operators(filters)?;
    let mut parameters = HashMap::new();
    let mut root = Clause::new(node_pattern("n", Some(label)), "n");
    let mut nested: Vec<(Vec<NestedPathSegment>, Clause)> = Vec::new();

    for filter in filters {
        if !filter.is_nested() {
            root.append(filter, &mut parameters)?;
            continue;
        }
        let path = filter.nested_path();
        let position = match nested.iter().position(|(p, _)| p.as_slice() == path) {
            Some(i) => i,
            None => {
                let clause = traversal_clause(path, nested.len())?;
                nested.push((path.to_vec(), clause));
                nested.len() - 1
            }
        };
        nested[position].1.append(filter, &mut parameters)?;
    }

    let mut text = String::new();
    root.render(&mut text);
    for (_, clause) in &nested {
        clause.render(&mut text);
    }
    log::trace!("filtered node query: {text}");
    Ok(FilteredQuery { text, parameters })
}

/// `(n)-[:R1]->(:L1)-[:R2]->(mK:L2)`, or `...-[rK:R2]->(:L2)` when the last
/// hop is a relationship entity.
fn traversal_clause(path: &[NestedPathSegment], k: usize) -> Result<Clause, GraphoError> {
    crate::filter::path::validate(path)?;
    let mut pattern = String::from("(n)");
    let mut identifier = format!("m{k}");
    for (i, segment) in path.iter().enumerate() {
        let last = i + 1 == path.len();
        if last && segment.relationship_entity {
            identifier = format!("r{k}");
            pattern.push_str(&rel_pattern(segment, &identifier));
            pattern.push_str(&node_pattern("", segment.target_label.as_deref()));
        } else {
            pattern.push_str(&rel_pattern(segment, ""));
            let node = if last { identifier.as_str() } else { "" };
            pattern.push_str(&node_pattern(node, segment.target_label.as_deref()));
        }
    }
    Ok(Clause::new(pattern, identifier))
}

/// Build the filtering part of a query loading relationships of type
/// `rel_type`, bound to `r` between start node `n` and end node `m`.
///
/// Plain filters apply to the relationship. A nested filter with a single
/// outgoing hop applies to the start node, an incoming hop to the end node;
/// the first such filter's target label labels the node.
pub fn build_relationship_query(rel_type: &str, filters: &Filters) -> Result<FilteredQuery, GraphoError> {
    check_operators(filters)?;
    let mut parameters = HashMap::new();
    let mut start: Option<Clause> = None;
    let mut end: Option<Clause> = None;
    let mut rel = Clause::new(format!("(n)-[r:{}]->(m)", cypher::quote(rel_type)), "r");

    for filter in filters {
        let segment = match filter.nested_path() {
            [] => {
                rel.append(filter, &mut parameters)?;
                continue;
            }
            [segment] => segment,
            _ => {
                return Err(GraphoError::UnsupportedOperation(format!(
                    "deep nested filter on '{}' is not supported for relationship queries",
                    filter.property_name()
                )))
            }
        };
        crate::filter::path::validate(filter.nested_path())?;
        let (slot, identifier) = match segment.direction {
            RelationshipDirection::Outgoing => (&mut start, "n"),
            RelationshipDirection::Incoming => (&mut end, "m"),
            RelationshipDirection::Undirected => {
                return Err(GraphoError::UnsupportedOperation(format!(
                    "undirected nested filter on '{}' cannot pick a relationship end",
                    filter.property_name()
                )))
            }
        };
        slot.get_or_insert_with(|| Clause::new(node_pattern(identifier, segment.target_label.as_deref()), identifier))
            .append(filter, &mut parameters)?;
    }

    let mut text = String::new();
    for clause in [&start, &end].into_iter().flatten() {
        clause.render(&mut text);
    }
    rel.render(&mut text);
    log::trace!("filtered relationship query: {text}");
    Ok(FilteredQuery { text, parameters })
}
