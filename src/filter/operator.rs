//! Comparison and boolean operators used by filters.

use std::fmt;

use crate::filter::transformer::{CaseInsensitiveLikeTransformer, NoOpTransformer, PropertyValueTransformer};

static NO_OP: NoOpTransformer = NoOpTransformer;
static CASE_INSENSITIVE_LIKE: CaseInsensitiveLikeTransformer = CaseInsensitiveLikeTransformer;

/// The closed set of predicate kinds a filter can express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    Equals,
    Matches,
    Like,
    GreaterThan,
    GreaterThanEqual,
    LessThan,
    LessThanEqual,
    IsNull,
    StartingWith,
    EndingWith,
    Containing,
    In,
    Exists,
    IsTrue,
}

impl ComparisonOperator {
    /// The Cypher operator text.
    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOperator::Equals => "=",
            ComparisonOperator::Matches => "=~",
            ComparisonOperator::Like => "=~",
            ComparisonOperator::GreaterThan => ">",
            ComparisonOperator::GreaterThanEqual => ">=",
            ComparisonOperator::LessThan => "<",
            ComparisonOperator::LessThanEqual => "<=",
            ComparisonOperator::IsNull => "IS NULL",
            ComparisonOperator::StartingWith => "STARTS WITH",
            ComparisonOperator::EndingWith => "ENDS WITH",
            ComparisonOperator::Containing => "CONTAINS",
            ComparisonOperator::In => "IN",
            ComparisonOperator::Exists => "EXISTS",
            ComparisonOperator::IsTrue => "= true",
        }
    }

    /// The transformer applied to the bound value by default.
    pub fn value_transformer(self) -> &'static dyn PropertyValueTransformer {
        match self {
            ComparisonOperator::Like => &CASE_INSENSITIVE_LIKE,
            ComparisonOperator::Equals
            | ComparisonOperator::Matches
            | ComparisonOperator::GreaterThan
            | ComparisonOperator::GreaterThanEqual
            | ComparisonOperator::LessThan
            | ComparisonOperator::LessThanEqual
            | ComparisonOperator::IsNull
            | ComparisonOperator::StartingWith
            | ComparisonOperator::EndingWith
            | ComparisonOperator::Containing
            | ComparisonOperator::In
            | ComparisonOperator::Exists
            | ComparisonOperator::IsTrue => &NO_OP,
        }
    }

    /// Unary operators take no value and bind no parameter.
    pub fn is_unary(self) -> bool {
        matches!(
            self,
            ComparisonOperator::IsNull | ComparisonOperator::Exists | ComparisonOperator::IsTrue
        )
    }

    /// Whether `ignore_case()` can be applied to a filter using this operator.
    pub fn supports_ignore_case(self) -> bool {
        matches!(
            self,
            ComparisonOperator::Equals
                | ComparisonOperator::Containing
                | ComparisonOperator::StartingWith
                | ComparisonOperator::EndingWith
        )
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// How a filter joins the filters before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BooleanOperator {
    #[default]
    None,
    And,
    Or,
}

impl BooleanOperator {
    /// The Cypher keyword, empty for [`BooleanOperator::None`].
    pub fn keyword(self) -> &'static str {
        match self {
            BooleanOperator::None => "",
            BooleanOperator::And => "AND",
            BooleanOperator::Or => "OR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grapho_core::value;

    #[test]
    fn only_like_rewrites_values() {
        let v = value::string("a*b");
        assert_eq!(ComparisonOperator::Equals.value_transformer().transform(v.clone()), v);
        assert_eq!(
            ComparisonOperator::Like.value_transformer().transform(v),
            value::string("(?i)a.*b")
        );
    }

    #[test]
    fn unary_operators() {
        assert!(ComparisonOperator::IsNull.is_unary());
        assert!(ComparisonOperator::Exists.is_unary());
        assert!(ComparisonOperator::IsTrue.is_unary());
        assert!(!ComparisonOperator::In.is_unary());
    }
}
