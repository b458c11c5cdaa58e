//! Evaluate a single expression against JSON input

use super::{CliError, load_context};
use crate::{Evaluator, Value, parser::parse_expression};

/// Options for the eval command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The expression to evaluate
    pub expression: String,
    /// JSON data context
    pub input: Option<String>,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Expression evaluated successfully
    Success(Value),
}

/// Execute an eval operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let expr = parse_expression(options.expression.trim())?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    let context = load_context(options.input.as_deref())?;
    let value = Evaluator::new()
        .evaluate(&expr, &context)
        .map_err(crate::ExprError::from)?;

    Ok(CheckResult::Success(value))
}
