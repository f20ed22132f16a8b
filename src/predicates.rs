/// Shared value predicates
///
/// Small helpers used by the config normalizer, the variable store and
/// the trigger index.

use serde_json::Value;

/// Check if a value is truthy
///
/// `null`, `false`, `0` and the empty string are falsy. Arrays and
/// objects are always truthy, even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Check if `items` contains `needle`
pub fn contains<T, Q>(items: &[T], needle: &Q) -> bool
where
    T: PartialEq<Q>,
    Q: ?Sized,
{
    items.iter().any(|item| item == needle)
}

/// Get the type name of a value for diagnostics
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
