use std::{collections::HashMap, fmt};

use crate::output::to_json;

/// A value in the data context, or the result of evaluating an expression.
///
/// Every number is an IEEE-754 double, matching the arithmetic the
/// expression language performs.
///
/// # Examples
///
/// ```
/// use stencil_lang::Value;
/// use std::collections::HashMap;
///
/// let age = Value::Number(30.0);
/// let name = Value::String("Alice".to_string());
///
/// let mut obj = HashMap::new();
/// obj.insert("age".to_string(), age);
/// obj.insert("name".to_string(), name);
/// let context = Value::Object(obj);
///
/// assert_eq!(context.get("age"), Some(&Value::Number(30.0)));
/// assert_eq!(context.get("email"), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON null
    Null,

    /// JSON boolean (true/false)
    Boolean(bool),

    /// Double-precision number
    Number(f64),

    /// UTF-8 string
    String(String),

    /// Ordered sequence of values
    Array(Vec<Value>),

    /// String-keyed mapping
    Object(HashMap<String, Value>),
}

impl Value {
    /// Own-key lookup. Only objects have keys; every other variant
    /// answers `None`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Get as number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns a human-readable type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

/// Formats a number the way it is substituted into text.
///
/// Whole numbers drop the fractional part, very large and very small
/// magnitudes switch to exponent form, and non-finite values are spelled out.
///
/// ```
/// use stencil_lang::value::format_number;
///
/// assert_eq!(format_number(35.0), "35");
/// assert_eq!(format_number(3.7), "3.7");
/// assert_eq!(format_number(-0.0), "0");
/// assert_eq!(format_number(f64::INFINITY), "Infinity");
/// assert_eq!(format_number(1e21), "1e+21");
/// ```
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let magnitude = n.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{:e}", n);
        return match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => formatted,
        };
    }
    n.to_string()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::String(s) => write!(f, "{}", s),
            Value::Array(_) | Value::Object(_) => write!(f, "{}", to_json(self)),
        }
    }
}
