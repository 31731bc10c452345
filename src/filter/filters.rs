//! Ordered collections of filters.

use std::collections::HashMap;

use grapho_core::value::Value;
use grapho_core::GraphoError;

use crate::filter::filter::Filter;
use crate::filter::operator::BooleanOperator;

/// An ordered, append-only sequence of filters.
///
/// Each filter receives its insertion position as its index, so parameter
/// names stay distinct even when the same property is filtered twice
/// (e.g. a range expressed as two comparisons). Iteration order is
/// insertion order and is the order the clauses are emitted in.
///
/// ```rust
/// # use grapho::filter::{Filter, Filters, ComparisonOperator};
/// let filters = Filters::new()
///     .add(Filter::new("moons", ComparisonOperator::GreaterThan, 1_i64))
///     .and(Filter::new("moons", ComparisonOperator::LessThan, 23_i64));
/// assert_eq!(
///     filters.to_cypher("n")?,
///     "WHERE n.`moons` > $moons_0 AND n.`moons` < $moons_1 "
/// );
/// # Ok::<(), grapho_core::GraphoError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Filters {
    filters: Vec<Filter>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter, keeping its boolean operator.
    pub fn add(mut self, filter: Filter) -> Self {
        self.push(filter);
        self
    }

    /// Append a filter joined with `AND`.
    pub fn and(mut self, mut filter: Filter) -> Self {
        filter.set_boolean_operator(BooleanOperator::And);
        self.push(filter);
        self
    }

    /// Append a filter joined with `OR`.
    pub fn or(mut self, mut filter: Filter) -> Self {
        filter.set_boolean_operator(BooleanOperator::Or);
        self.push(filter);
        self
    }

    /// Append a filter in place, assigning its index.
    pub fn push(&mut self, mut filter: Filter) {
        filter.set_index(self.filters.len());
        self.filters.push(filter);
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Filter> {
        self.filters.iter()
    }

    /// Render all filters against one node identifier as a single `WHERE`
    /// clause. Empty collections render as an empty string.
    ///
    /// Every filter after the first must carry a boolean operator. Nested
    /// filters need a traversal and are rejected; render those with
    /// [`build_node_query`](crate::filter::build_node_query).
    pub fn to_cypher(&self, node_identifier: &str) -> Result<String, GraphoError> {
        let mut cypher = String::new();
        for (i, filter) in self.filters.iter().enumerate() {
            if filter.is_nested() {
                return Err(GraphoError::UnsupportedOperation(format!(
                    "filter on '{}' is nested and cannot be rendered against '{}' alone; use build_node_query",
                    filter.property_name(),
                    node_identifier
                )));
            }
            if i > 0 && filter.boolean_operator() == BooleanOperator::None {
                return Err(GraphoError::missing_operator(filter.property_name()));
            }
            cypher.push_str(&filter.to_cypher(node_identifier, i == 0)?);
        }
        Ok(cypher)
    }

    /// The parameters of every filter, merged.
    pub fn parameters(&self) -> Result<HashMap<String, Value>, GraphoError> {
        let mut out = HashMap::new();
        for filter in &self.filters {
            out.extend(filter.parameters()?);
        }
        Ok(out)
    }
}

impl From<Filter> for Filters {
    fn from(filter: Filter) -> Self {
        Filters::new().add(filter)
    }
}

impl FromIterator<Filter> for Filters {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        let mut filters = Filters::new();
        for filter in iter {
            filters.push(filter);
        }
        filters
    }
}

impl<'a> IntoIterator for &'a Filters {
    type Item = &'a Filter;
    type IntoIter = std::slice::Iter<'a, Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}
