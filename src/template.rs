//! Substitution of `{{ expression }}` markers in free text.
//!
//! Markers are found with a lazy match up to the first closing `}}`, so they
//! cannot nest. Each marker is evaluated independently against the same data
//! context; a failing marker never affects the others.
//!
//! ```
//! use stencil_lang::{Value, template::render};
//! use serde_json::json;
//!
//! let context = Value::from(json!({ "age": 30 }));
//! assert_eq!(render("age + 5 = {{age + 5}}", &context), "age + 5 = 35");
//! assert_eq!(render("x{{1+}}y", &context), "x{{1+}}y");
//! ```

use std::{fmt, ops::Range};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::{error::ExprError, evaluate, value::Value};

static MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{(.+?)\}\}").expect("marker pattern is valid")
});

/// One `{{ ... }}` region found in template text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker<'t> {
    /// Byte range of the whole marker, delimiters included
    pub span: Range<usize>,
    /// The marker text exactly as written
    pub raw: &'t str,
    /// The enclosed expression with surrounding whitespace trimmed
    pub expression: &'t str,
}

/// Failure of a single marker during strict rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateError {
    /// The trimmed expression that failed
    pub expression: String,
    pub source: ExprError,
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in expression '{}'", self.source, self.expression)
    }
}

impl std::error::Error for TemplateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

fn marker_from<'t>(caps: &Captures<'t>) -> Marker<'t> {
    let whole = caps.get_match();
    // Group 1 is mandatory, so it participates in every match.
    let inner = caps.get(1).map_or("", |m| m.as_str());
    Marker {
        span: whole.range(),
        raw: whole.as_str(),
        expression: inner.trim(),
    }
}

/// Lists every marker in `template`, in order of appearance.
pub fn markers(template: &str) -> Vec<Marker<'_>> {
    MARKER_REGEX
        .captures_iter(template)
        .map(|caps| marker_from(&caps))
        .collect()
}

/// Replaces every marker with the display form of its value.
///
/// A marker whose expression fails to lex, parse or evaluate is left in place
/// verbatim, delimiters included, and the failure is logged.
pub fn render(template: &str, context: &Value) -> String {
    MARKER_REGEX
        .replace_all(template, |caps: &Captures| {
            let marker = marker_from(caps);
            match evaluate(marker.expression, context) {
                Ok(value) => {
                    tracing::debug!(expression = marker.expression, %value, "substituted marker");
                    value.to_string()
                }
                Err(error) => {
                    tracing::warn!(
                        expression = marker.expression,
                        %error,
                        "failed to evaluate marker, keeping original text"
                    );
                    marker.raw.to_string()
                }
            }
        })
        .into_owned()
}

/// Like [`render`], but stops at the first failing marker.
pub fn try_render(template: &str, context: &Value) -> Result<String, TemplateError> {
    let mut output = String::with_capacity(template.len());
    let mut last = 0;

    for marker in markers(template) {
        let value = evaluate(marker.expression, context).map_err(|source| TemplateError {
            expression: marker.expression.to_string(),
            source,
        })?;

        output.push_str(&template[last..marker.span.start]);
        output.push_str(&value.to_string());
        last = marker.span.end;
    }

    output.push_str(&template[last..]);
    Ok(output)
}
