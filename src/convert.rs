//! Building data contexts from JSON.

use crate::Value;

/// Convert a `serde_json::Value` into a data context value.
///
/// Every JSON number becomes an `f64`; integers beyond 2^53 lose precision
/// exactly as they would in any double-based evaluator.
pub fn from_json(v: serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => Value::Array(arr.into_iter().map(from_json).collect()),
        serde_json::Value::Object(obj) => {
            Value::Object(obj.into_iter().map(|(k, v)| (k, from_json(v))).collect())
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        from_json(v)
    }
}

/// Parse JSON text into a data context value.
pub fn parse_json(input: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str::<serde_json::Value>(input).map(from_json)
}
