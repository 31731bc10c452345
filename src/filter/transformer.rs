//! Value transformers applied to a filter value before it is bound as a
//! parameter.

use std::sync::Arc;

use grapho_core::value::{self, Value};

use crate::filter::converter::AttributeConverter;

/// Adapts a single value before it becomes a bound parameter.
///
/// Implementations must be total and map `null` to `null`.
pub trait PropertyValueTransformer: Send + Sync {
    fn transform(&self, value: Value) -> Value;

    /// Run `self`, then `next`.
    fn and_then<T>(self, next: T) -> Chain<Self, T>
    where
        Self: Sized,
        T: PropertyValueTransformer,
    {
        Chain { first: self, second: next }
    }
}

impl<T: PropertyValueTransformer + ?Sized> PropertyValueTransformer for &T {
    fn transform(&self, value: Value) -> Value {
        (**self).transform(value)
    }
}

impl<T: PropertyValueTransformer + ?Sized> PropertyValueTransformer for Box<T> {
    fn transform(&self, value: Value) -> Value {
        (**self).transform(value)
    }
}

/// Two transformers run one after the other. Created by
/// [`PropertyValueTransformer::and_then`].
#[derive(Debug, Clone, Copy)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A: PropertyValueTransformer, B: PropertyValueTransformer> PropertyValueTransformer for Chain<A, B> {
    fn transform(&self, value: Value) -> Value {
        self.second.transform(self.first.transform(value))
    }
}

/// Passes values through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpTransformer;

impl PropertyValueTransformer for NoOpTransformer {
    fn transform(&self, value: Value) -> Value {
        value
    }
}

const REGEX_META: &[char] = &['{', '}', '(', ')', '[', ']', '^', '$', '?', '.', '+', '\\', '|', '!'];

/// Turns a `*`-wildcard pattern into a case-insensitive regular expression.
///
/// Regex metacharacters are escaped, `*` becomes `.*`, and the result is
/// prefixed with `(?i)`. Non-string values pass through.
///
/// ```rust
/// # use grapho::filter::transformer::{CaseInsensitiveLikeTransformer, PropertyValueTransformer};
/// # use grapho_core::value;
/// let out = CaseInsensitiveLikeTransformer.transform(value::string("abc*def"));
/// assert_eq!(out, value::string("(?i)abc.*def"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseInsensitiveLikeTransformer;

impl CaseInsensitiveLikeTransformer {
    fn to_pattern(input: &str) -> String {
        let mut out = String::with_capacity(input.len() + 8);
        out.push_str("(?i)");
        for c in input.chars() {
            if REGEX_META.contains(&c) {
                out.push('\\');
                out.push(c);
            } else if c == '*' {
                out.push_str(".*");
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl PropertyValueTransformer for CaseInsensitiveLikeTransformer {
    fn transform(&self, value: Value) -> Value {
        match value {
            Value::String(s) => value::string(Self::to_pattern(&s.value)),
            other => other,
        }
    }
}

/// Lower-cases strings, including strings inside lists. Used by the
/// case-insensitive comparisons.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerCaseTransformer;

impl PropertyValueTransformer for LowerCaseTransformer {
    fn transform(&self, value: Value) -> Value {
        match value {
            Value::String(s) => value::string(s.value.to_lowercase()),
            Value::List(l) => value::list(l.value.into_iter().map(|v| self.transform(v)).collect()),
            other => other,
        }
    }
}

/// Applies an [`AttributeConverter`] as a transformer step. `null` is never
/// handed to the converter.
#[derive(Clone)]
pub struct ConvertingTransformer {
    converter: Arc<dyn AttributeConverter>,
}

impl ConvertingTransformer {
    pub fn new(converter: Arc<dyn AttributeConverter>) -> Self {
        Self { converter }
    }
}

impl PropertyValueTransformer for ConvertingTransformer {
    fn transform(&self, value: Value) -> Value {
        if value::is_null(&value) {
            value
        } else {
            self.converter.to_graph_property(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_keeps_unicode_verbatim() {
        let out = CaseInsensitiveLikeTransformer.transform(value::string("Zoë*ß"));
        assert_eq!(out, value::string("(?i)Zoë.*ß"));
    }

    #[test]
    fn like_escapes_every_metacharacter() {
        let out = CaseInsensitiveLikeTransformer.transform(value::string("{}()[]^$?.+\\|!"));
        assert_eq!(
            out,
            value::string("(?i)\\{\\}\\(\\)\\[\\]\\^\\$\\?\\.\\+\\\\\\|\\!")
        );
    }

    #[test]
    fn null_passes_through_every_transformer() {
        assert!(value::is_null(&NoOpTransformer.transform(value::null())));
        assert!(value::is_null(&CaseInsensitiveLikeTransformer.transform(value::null())));
        assert!(value::is_null(&LowerCaseTransformer.transform(value::null())));
    }

    #[test]
    fn and_then_runs_in_order() {
        let chained = LowerCaseTransformer.and_then(CaseInsensitiveLikeTransformer);
        assert_eq!(chained.transform(value::string("A.B")), value::string("(?i)a\\.b"));
    }
}
