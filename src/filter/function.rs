//! Filter functions: the predicate body a [`Filter`](crate::filter::Filter)
//! renders, and the parameters it binds.

use std::collections::HashMap;

use grapho_core::value::Value;

use crate::cypher;
use crate::filter::operator::ComparisonOperator;
use crate::filter::transformer::{LowerCaseTransformer, NoOpTransformer, PropertyValueTransformer};

/// Distance between a node's coordinates and a fixed point, compared with
/// the filter value (in meters).
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceComparison {
    pub operator: ComparisonOperator,
    pub latitude_property: String,
    pub longitude_property: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl DistanceComparison {
    pub fn new(operator: ComparisonOperator, latitude: f64, longitude: f64) -> Self {
        Self {
            operator,
            latitude_property: "latitude".to_owned(),
            longitude_property: "longitude".to_owned(),
            latitude,
            longitude,
        }
    }

    pub fn with_properties(mut self, latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        self.latitude_property = latitude.into();
        self.longitude_property = longitude.into();
        self
    }
}

/// What a filter compares.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterFunction {
    /// `n.prop <op> $param`
    PropertyComparison(ComparisonOperator),
    /// `toLower(n.prop) <op> $param` with the value lower-cased. Only
    /// reachable through [`Filter::ignore_case`](crate::filter::Filter::ignore_case).
    CaseInsensitiveComparison(ComparisonOperator),
    /// True when the collection property shares at least one element with
    /// the bound list.
    ContainsAny,
    Distance(DistanceComparison),
}

impl FilterFunction {
    pub fn comparison_operator(&self) -> ComparisonOperator {
        match self {
            FilterFunction::PropertyComparison(op) | FilterFunction::CaseInsensitiveComparison(op) => *op,
            FilterFunction::ContainsAny => ComparisonOperator::In,
            FilterFunction::Distance(d) => d.operator,
        }
    }

    /// Whether the function binds no value.
    pub fn is_unary(&self) -> bool {
        match self {
            FilterFunction::PropertyComparison(op) => op.is_unary(),
            FilterFunction::CaseInsensitiveComparison(_)
            | FilterFunction::ContainsAny
            | FilterFunction::Distance(_) => false,
        }
    }

    /// The transformer applied to each scalar value before binding.
    pub fn value_transformer(&self) -> Box<dyn PropertyValueTransformer> {
        match self {
            FilterFunction::PropertyComparison(op) => Box::new(op.value_transformer()),
            FilterFunction::CaseInsensitiveComparison(op) => Box::new(PropertyValueTransformer::and_then(
                op.value_transformer(),
                LowerCaseTransformer,
            )),
            FilterFunction::ContainsAny | FilterFunction::Distance(_) => Box::new(NoOpTransformer),
        }
    }

    /// Render the predicate body against `node.property`, binding the value
    /// to `param`.
    pub(crate) fn expression(&self, node: &str, property: &str, param: &str) -> String {
        let target = format!("{}.{}", node, cypher::quote(property));
        match self {
            FilterFunction::PropertyComparison(op) => match op {
                ComparisonOperator::IsNull => format!("{target} IS NULL"),
                ComparisonOperator::Exists => format!("EXISTS({target})"),
                ComparisonOperator::IsTrue => format!("{target} = true"),
                other => format!("{} {} {}", target, other.symbol(), cypher::parameter(param)),
            },
            FilterFunction::CaseInsensitiveComparison(op) => {
                format!("toLower({}) {} {}", target, op.symbol(), cypher::parameter(param))
            }
            FilterFunction::ContainsAny => format!(
                "ANY(collectionFields IN {} WHERE collectionFields IN {})",
                cypher::parameter(param),
                target
            ),
            FilterFunction::Distance(d) => format!(
                "distance(point({{latitude: {node}.{}, longitude: {node}.{}}}), point({{latitude: {}, longitude: {}}})) {} {}",
                cypher::quote(&d.latitude_property),
                cypher::quote(&d.longitude_property),
                cypher::parameter(&format!("{param}_latitude")),
                cypher::parameter(&format!("{param}_longitude")),
                d.operator.symbol(),
                cypher::parameter(param),
            ),
        }
    }

    /// Parameters bound by the expression, given the already transformed value.
    pub(crate) fn bind(&self, param: &str, value: Value) -> HashMap<String, Value> {
        let mut out = HashMap::new();
        if self.is_unary() {
            return out;
        }
        if let FilterFunction::Distance(d) = self {
            out.insert(format!("{param}_latitude"), Value::from(d.latitude));
            out.insert(format!("{param}_longitude"), Value::from(d.longitude));
        }
        out.insert(param.to_owned(), value);
        out
    }
}
