//! CLI support for stencil-lang
//!
//! Provides programmatic access to the `stencil` commands so they can be
//! embedded in other tools and tested without spawning a process.

mod check;
mod render;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use render::{RenderOptions, execute_render};

use std::io;

use crate::{TemplateError, Value, convert};

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Expression failed to lex, parse or evaluate
    Expr(crate::ExprError),
    /// A marker failed during strict rendering
    Template(TemplateError),
    /// JSON parsing error
    Json(serde_json::Error),
    /// IO error
    Io(io::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Expr(e) => write!(f, "{}", e),
            CliError::Template(e) => write!(f, "{}", e),
            CliError::Json(e) => write!(f, "Invalid JSON: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Expr(e) => Some(e),
            CliError::Template(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::Io(e) => Some(e),
        }
    }
}

impl From<crate::ExprError> for CliError {
    fn from(e: crate::ExprError) -> Self {
        CliError::Expr(e)
    }
}

impl From<crate::ParseError> for CliError {
    fn from(e: crate::ParseError) -> Self {
        CliError::Expr(e.into())
    }
}

impl From<TemplateError> for CliError {
    fn from(e: TemplateError) -> Self {
        CliError::Template(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

/// Parses the JSON data context; no input means an empty object.
fn load_context(input: Option<&str>) -> Result<Value, CliError> {
    match input {
        Some(json) => Ok(convert::parse_json(json)?),
        None => Ok(Value::Object(Default::default())),
    }
}
