//! JSON output for values.
//!
//! Collections substituted into template text are written as compact JSON,
//! and the CLI prints evaluation results with either printer. All output is
//! deterministic (object keys are sorted).
//!
//! # Features
//!
//! - **Compact output** via [`to_json()`] - no whitespace, used for substitution
//! - **Pretty output** via [`to_json_pretty()`] - 2-space indentation
//! - **String escaping** - handles special characters and control codes
//! - **Number formatting** - whole numbers print without a fraction; NaN and
//!   infinities, which JSON cannot carry, print as `null`
//!
//! # Examples
//!
//! ```
//! use stencil_lang::Value;
//! use stencil_lang::output::{to_json, to_json_pretty};
//!
//! let value = Value::Number(42.0);
//!
//! // Compact output
//! assert_eq!(to_json(&value), "42");
//!
//! // Pretty output (identical for simple values)
//! assert_eq!(to_json_pretty(&value), "42");
//! ```

use std::fmt::Write;

use crate::value::{Value, format_number};

/// Writes values as JSON, compact or indented.
pub struct JsonPrinter {
    pretty: bool,
}

impl JsonPrinter {
    pub fn new(pretty: bool) -> Self {
        JsonPrinter { pretty }
    }

    pub fn print(&self, value: &Value) -> String {
        let mut out = String::new();
        self.write_value(&mut out, value, 0);
        out
    }

    fn write_value(&self, out: &mut String, value: &Value, depth: usize) {
        match value {
            Value::Null => out.push_str("null"),
            Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) if n.is_finite() => out.push_str(&format_number(*n)),
            Value::Number(_) => out.push_str("null"),
            Value::String(s) => self.write_string(out, s),
            Value::Array(items) => {
                self.write_seq(out, '[', ']', items.iter(), depth, |out, item| {
                    self.write_value(out, item, depth + 1)
                })
            }
            Value::Object(map) => {
                // Sorted for deterministic output
                let mut entries: Vec<_> = map.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));

                self.write_seq(out, '{', '}', entries.into_iter(), depth, |out, (key, item)| {
                    self.write_string(out, key);
                    out.push(':');
                    if self.pretty {
                        out.push(' ');
                    }
                    self.write_value(out, item, depth + 1);
                })
            }
        }
    }

    /// Writes delimited, comma-separated elements, one per line when pretty.
    fn write_seq<T>(
        &self,
        out: &mut String,
        open: char,
        close: char,
        elements: impl ExactSizeIterator<Item = T>,
        depth: usize,
        mut write_element: impl FnMut(&mut String, T),
    ) {
        out.push(open);
        if elements.len() == 0 {
            out.push(close);
            return;
        }

        for (i, element) in elements.enumerate() {
            if i > 0 {
                out.push(',');
            }
            if self.pretty {
                out.push('\n');
                out.push_str(&"  ".repeat(depth + 1));
            }
            write_element(out, element);
        }

        if self.pretty {
            out.push('\n');
            out.push_str(&"  ".repeat(depth));
        }
        out.push(close);
    }

    fn write_string(&self, out: &mut String, s: &str) {
        out.push('"');
        for c in s.chars() {
            match c {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if c.is_control() => {
                    let _ = write!(out, "\\u{:04x}", c as u32);
                }
                c => out.push(c),
            }
        }
        out.push('"');
    }
}

// Convenience functions

/// Converts a Value to compact JSON.
///
/// # Examples
///
/// ```
/// use stencil_lang::Value;
/// use stencil_lang::output::to_json;
/// use std::collections::HashMap;
///
/// let mut obj = HashMap::new();
/// obj.insert("name".to_string(), Value::String("Alice".to_string()));
/// obj.insert("age".to_string(), Value::Number(30.0));
///
/// assert_eq!(to_json(&Value::Object(obj)), r#"{"age":30,"name":"Alice"}"#);
/// ```
pub fn to_json(value: &Value) -> String {
    JsonPrinter::new(false).print(value)
}

/// Converts a Value to pretty-printed JSON with 2-space indentation.
///
/// # Examples
///
/// ```
/// use stencil_lang::Value;
/// use stencil_lang::output::to_json_pretty;
///
/// let value = Value::Array(vec![Value::Number(1.0), Value::Number(2.5)]);
/// assert_eq!(to_json_pretty(&value), "[\n  1,\n  2.5\n]");
/// ```
pub fn to_json_pretty(value: &Value) -> String {
    JsonPrinter::new(true).print(value)
}
