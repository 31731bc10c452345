//! Attribute converters: explicit, per-filter value conversion applied
//! before the operator's transformer.
//!
//! A converter turns a value as the caller sees it into the value stored in
//! the graph, e.g. a date into its ISO-8601 string. Converters are attached
//! to a [`Filter`](crate::filter::Filter) when it is built; nothing is
//! looked up at runtime.

use std::fmt;

use grapho_core::value::{self, Value};

/// Converts a filter value into the representation stored in the graph.
///
/// Called once per scalar value; list values are converted element by
/// element. Never called with `null`.
pub trait AttributeConverter: Send + Sync {
    fn to_graph_property(&self, value: Value) -> Value;
}

/// Wraps a closure as an [`AttributeConverter`].
///
/// ```rust
/// # use grapho::filter::converter::{AttributeConverter, FnConverter};
/// # use grapho_core::value;
/// let kelvin = FnConverter::new(|v| match v {
///     grapho_core::Value::Integer(i) => value::integer(i.value + 273),
///     other => other,
/// });
/// assert_eq!(kelvin.to_graph_property(value::integer(0)), value::integer(273));
/// ```
pub struct FnConverter<F> {
    f: F,
}

impl<F> FnConverter<F>
where
    F: Fn(Value) -> Value + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> AttributeConverter for FnConverter<F>
where
    F: Fn(Value) -> Value + Send + Sync,
{
    fn to_graph_property(&self, value: Value) -> Value {
        (self.f)(value)
    }
}

impl<F> fmt::Debug for FnConverter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnConverter")
    }
}

/// Stores dates and local date-times as strings.
///
/// `Date` values become `%Y-%m-%d` (or the configured format);
/// `LocalDateTime` values become ISO-8601 (`%Y-%m-%dT%H:%M:%S%.f`). Values
/// that cannot be read as dates are passed through unchanged and logged.
#[derive(Debug, Clone)]
pub struct DateStringConverter {
    date_format: String,
}

impl DateStringConverter {
    pub const ISO_DATE: &'static str = "%Y-%m-%d";
    pub const ISO_DATE_TIME: &'static str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn new(date_format: impl Into<String>) -> Self {
        Self {
            date_format: date_format.into(),
        }
    }
}

impl Default for DateStringConverter {
    fn default() -> Self {
        Self::new(Self::ISO_DATE)
    }
}

impl AttributeConverter for DateStringConverter {
    fn to_graph_property(&self, value: Value) -> Value {
        match value {
            Value::Date(d) => {
                let converted: Result<chrono::NaiveDate, neo4rs::Error> = d.clone().try_into();
                match converted {
                    Ok(date) => value::string(date.format(&self.date_format).to_string()),
                    Err(e) => {
                        log::warn!("BoltDate -> NaiveDate: {e}");
                        Value::Date(d)
                    }
                }
            }
            Value::LocalDateTime(dt) => {
                let converted: Result<chrono::NaiveDateTime, neo4rs::Error> = dt.clone().try_into();
                match converted {
                    Ok(ndt) => value::string(ndt.format(Self::ISO_DATE_TIME).to_string()),
                    Err(e) => {
                        log::warn!("BoltLocalDateTime -> NaiveDateTime: {e}");
                        Value::LocalDateTime(dt)
                    }
                }
            }
            other => other,
        }
    }
}

/// Stores integers and floats as their decimal string form.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberStringConverter;

impl AttributeConverter for NumberStringConverter {
    fn to_graph_property(&self, value: Value) -> Value {
        match value {
            Value::Integer(i) => value::string(i.value.to_string()),
            Value::Float(f) => value::string(f.value.to_string()),
            other => other,
        }
    }
}
