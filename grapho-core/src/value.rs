//! Helpers over `neo4rs::BoltType`, the value type used for every property
//! and bound parameter.
//!
//! Keeping construction of bolt maps and lists in one place means the
//! statement builders never touch the `neo4rs` struct layout directly.

use std::collections::HashMap;

pub use neo4rs::BoltType as Value;

/// Returns a human-readable name for a [`neo4rs::BoltType`] variant.
///
/// Used in error messages to describe the actual type received.
pub fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null(_) => "Null",
        Value::Boolean(_) => "Boolean",
        Value::Integer(_) => "Integer",
        Value::Float(_) => "Float",
        Value::String(_) => "String",
        Value::Bytes(_) => "Bytes",
        Value::List(_) => "List",
        Value::Map(_) => "Map",
        Value::Node(_) => "Node",
        Value::Relation(_) => "Relationship",
        Value::UnboundedRelation(_) => "UnboundedRelationship",
        Value::Path(_) => "Path",
        Value::Point2D(_) => "Point2D",
        Value::Point3D(_) => "Point3D",
        Value::Duration(_) => "Duration",
        Value::Date(_) => "Date",
        Value::Time(_) => "Time",
        Value::LocalTime(_) => "LocalTime",
        Value::LocalDateTime(_) => "LocalDateTime",
        Value::DateTime(_) => "DateTime",
        Value::DateTimeZoneId(_) => "DateTimeZoneId",
    }
}

/// The bolt `null` value.
pub fn null() -> Value {
    Value::Null(neo4rs::BoltNull)
}

/// Whether `v` is the bolt `null` value.
pub fn is_null(v: &Value) -> bool {
    matches!(v, Value::Null(_))
}

/// Build a bolt string.
pub fn string(s: impl Into<String>) -> Value {
    Value::String(neo4rs::BoltString { value: s.into() })
}

/// Build a bolt integer.
pub fn integer(i: i64) -> Value {
    Value::Integer(neo4rs::BoltInteger::new(i))
}

/// Build a bolt list from already converted values.
pub fn list(values: Vec<Value>) -> Value {
    Value::List(neo4rs::BoltList { value: values })
}

/// Build a bolt map from `(key, value)` pairs. Later keys overwrite earlier ones.
pub fn map<K, I>(entries: I) -> Value
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Value)>,
{
    let value: HashMap<neo4rs::BoltString, Value> = entries
        .into_iter()
        .map(|(k, v)| (neo4rs::BoltString { value: k.into() }, v))
        .collect();
    Value::Map(neo4rs::BoltMap { value })
}

/// Look up `key` in a bolt map. Returns `None` for missing keys and for
/// non-map values.
pub fn map_get<'a>(v: &'a Value, key: &str) -> Option<&'a Value> {
    match v {
        Value::Map(m) => m.value.iter().find(|(k, _)| k.value == key).map(|(_, v)| v),
        _ => None,
    }
}

/// The element count of a bolt list or map, `None` for scalars.
pub fn len(v: &Value) -> Option<usize> {
    match v {
        Value::List(l) => Some(l.value.len()),
        Value::Map(m) => Some(m.value.len()),
        _ => None,
    }
}
