//! A single filter predicate.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use grapho_core::value::{self, Value};
use grapho_core::GraphoError;

use crate::filter::converter::AttributeConverter;
use crate::filter::function::FilterFunction;
use crate::filter::operator::{BooleanOperator, ComparisonOperator};
use crate::filter::path::{self, NestedPathSegment};
use crate::filter::transformer::{ConvertingTransformer, PropertyValueTransformer};

/// One predicate over a property, optionally reached through relationship
/// hops.
///
/// A filter renders to a Cypher fragment with [`to_cypher`](Self::to_cypher)
/// and binds its value through [`parameters`](Self::parameters). The
/// parameter name is `<property>_<index>` (nested:
/// `<hop properties>_<property>_<index>`), where the index is the filter's
/// position in the [`Filters`](crate::filter::Filters) it was added to.
///
/// ```rust
/// # use grapho::filter::{Filter, ComparisonOperator};
/// # use grapho_core::value;
/// let filter = Filter::new("moons", ComparisonOperator::LessThan, 23_i64);
/// assert_eq!(filter.to_cypher("n", true)?, "WHERE n.`moons` < $moons_0 ");
/// assert_eq!(filter.parameters()?.get("moons_0"), Some(&value::integer(23)));
/// # Ok::<(), grapho_core::GraphoError>(())
/// ```
#[derive(Clone)]
pub struct Filter {
    property_name: String,
    function: FilterFunction,
    value: Value,
    boolean_operator: BooleanOperator,
    negated: bool,
    nested_path: Vec<NestedPathSegment>,
    index: usize,
    converter: Option<Arc<dyn AttributeConverter>>,
}

impl Filter {
    /// Compare `property_name` with `value` using `operator`.
    pub fn new(property_name: impl Into<String>, operator: ComparisonOperator, value: impl Into<Value>) -> Self {
        Self::from_function(property_name, FilterFunction::PropertyComparison(operator), value)
    }

    /// A filter with a unary operator (`IsNull`, `Exists`, `IsTrue`) that
    /// binds no value.
    pub fn unary(property_name: impl Into<String>, operator: ComparisonOperator) -> Self {
        Self::from_function(property_name, FilterFunction::PropertyComparison(operator), value::null())
    }

    /// A filter driven by an arbitrary [`FilterFunction`].
    pub fn from_function(property_name: impl Into<String>, function: FilterFunction, value: impl Into<Value>) -> Self {
        Self {
            property_name: property_name.into(),
            function,
            value: value.into(),
            boolean_operator: BooleanOperator::None,
            negated: false,
            nested_path: Vec::new(),
            index: 0,
            converter: None,
        }
    }

    pub fn with_boolean_operator(mut self, operator: BooleanOperator) -> Self {
        self.boolean_operator = operator;
        self
    }

    /// Wrap the predicate in `NOT(...)`.
    pub fn negate(mut self) -> Self {
        self.negated = true;
        self
    }

    /// Reach the property through relationship hops, outermost first.
    pub fn with_nested_path(mut self, path: Vec<NestedPathSegment>) -> Self {
        self.nested_path = path;
        self
    }

    /// Add one hop at the end of the nested path.
    pub fn through(mut self, segment: NestedPathSegment) -> Self {
        self.nested_path.push(segment);
        self
    }

    pub fn with_converter(mut self, converter: Arc<dyn AttributeConverter>) -> Self {
        self.converter = Some(converter);
        self
    }

    /// Compare case-insensitively.
    ///
    /// Only `Equals`, `Containing`, `StartingWith` and `EndingWith` can be
    /// made case-insensitive; anything else is an
    /// [`InvalidState`](GraphoError::InvalidState) error.
    pub fn ignore_case(mut self) -> Result<Self, GraphoError> {
        match self.function {
            FilterFunction::PropertyComparison(op) if op.supports_ignore_case() => {
                self.function = FilterFunction::CaseInsensitiveComparison(op);
                Ok(self)
            }
            FilterFunction::CaseInsensitiveComparison(_) => Ok(self),
            ref other => Err(GraphoError::invalid_state(format!(
                "ignore_case() is only supported for EQUALS, CONTAINING, STARTING_WITH and ENDING_WITH, not {:?}",
                other.comparison_operator()
            ))),
        }
    }

    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    pub fn function(&self) -> &FilterFunction {
        &self.function
    }

    pub fn comparison_operator(&self) -> ComparisonOperator {
        self.function.comparison_operator()
    }

    pub fn boolean_operator(&self) -> BooleanOperator {
        self.boolean_operator
    }

    pub(crate) fn set_boolean_operator(&mut self, operator: BooleanOperator) {
        self.boolean_operator = operator;
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn is_case_insensitive(&self) -> bool {
        matches!(self.function, FilterFunction::CaseInsensitiveComparison(_))
    }

    pub fn nested_path(&self) -> &[NestedPathSegment] {
        &self.nested_path
    }

    pub fn is_nested(&self) -> bool {
        !self.nested_path.is_empty()
    }

    pub fn is_deep_nested(&self) -> bool {
        self.nested_path.len() > 1
    }

    /// The hop property names joined with `_`, `None` for plain filters.
    pub fn nested_property_name(&self) -> Option<String> {
        if self.is_nested() {
            Some(
                self.nested_path
                    .iter()
                    .map(|s| s.property_name.as_str())
                    .collect::<Vec<_>>()
                    .join("_"),
            )
        } else {
            None
        }
    }

    /// Position in the owning [`Filters`](crate::filter::Filters).
    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    /// The parameter name this filter binds its value to.
    pub fn unique_parameter_name(&self) -> String {
        match self.nested_property_name() {
            Some(nested) => format!("{}_{}_{}", nested, self.property_name, self.index),
            None => format!("{}_{}", self.property_name, self.index),
        }
    }

    /// Render the filter as a Cypher fragment against `node_identifier`.
    ///
    /// With `add_where_clause` the fragment starts with `WHERE `; otherwise
    /// it starts with the boolean operator keyword (nothing for
    /// [`BooleanOperator::None`]).
    pub fn to_cypher(&self, node_identifier: &str, add_where_clause: bool) -> Result<String, GraphoError> {
        self.check()?;
        let body = self
            .function
            .expression(node_identifier, &self.property_name, &self.unique_parameter_name());
        let body = if self.negated { format!("NOT({body})") } else { body };
        let prefix = if add_where_clause {
            "WHERE ".to_owned()
        } else {
            match self.boolean_operator {
                BooleanOperator::None => String::new(),
                op => format!("{} ", op.keyword()),
            }
        };
        Ok(format!("{prefix}{body} "))
    }

    /// Bound parameters, after conversion and transformation.
    pub fn parameters(&self) -> Result<HashMap<String, Value>, GraphoError> {
        self.check()?;
        if self.function.is_unary() {
            return Ok(HashMap::new());
        }
        Ok(self
            .function
            .bind(&self.unique_parameter_name(), self.transformed_value()))
    }

    /// The filter value passed through the attribute converter (if any)
    /// and the function's transformer. List values are handled element by
    /// element.
    pub fn transformed_value(&self) -> Value {
        let base = self.function.value_transformer();
        let transformer: Box<dyn PropertyValueTransformer> = match &self.converter {
            Some(c) => Box::new(ConvertingTransformer::new(Arc::clone(c)).and_then(base)),
            None => base,
        };
        match &self.value {
            Value::List(l) => value::list(l.value.iter().cloned().map(|v| transformer.transform(v)).collect()),
            other => transformer.transform(other.clone()),
        }
    }

    fn check(&self) -> Result<(), GraphoError> {
        path::validate(&self.nested_path)?;
        if self.property_name.is_empty() {
            return Err(GraphoError::invalid_argument(
                "a filter needs a property name",
                &format!("{:?}", self.function),
            ));
        }
        let needs_list = matches!(
            self.function,
            FilterFunction::ContainsAny | FilterFunction::PropertyComparison(ComparisonOperator::In)
        );
        if needs_list && !matches!(self.value, Value::List(_)) {
            return Err(GraphoError::invalid_argument(
                "IN and contains-any filters compare against a list",
                value::type_name(&self.value),
            ));
        }
        if value::is_null(&self.value) && !self.function.is_unary() {
            return Err(GraphoError::invalid_argument(
                "a null value can only be used with unary comparison operators",
                &format!("{:?}", self.comparison_operator()),
            )
            .with_context(format!("filter '{}'", self.unique_parameter_name())));
        }
        Ok(())
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("property_name", &self.property_name)
            .field("function", &self.function)
            .field("value", &self.value)
            .field("boolean_operator", &self.boolean_operator)
            .field("negated", &self.negated)
            .field("nested_path", &self.nested_path)
            .field("index", &self.index)
            .field("converter", &self.converter.is_some())
            .finish()
    }
}
