use std::fmt;

use crate::{evaluator::EvalError, parser::ParseError};

/// Any failure of the lex → parse → evaluate pipeline for one expression.
///
/// Lex errors arrive wrapped in [`ParseError::Lex`].
#[derive(Debug, Clone, PartialEq)]
pub enum ExprError {
    /// Tokenizing or parsing failed
    Parse(ParseError),
    /// Evaluation against the data context failed
    Eval(EvalError),
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprError::Parse(ParseError::Lex(e)) => write!(f, "Lex error: {}", e),
            ExprError::Parse(e) => write!(f, "Parse error: {}", e),
            ExprError::Eval(e) => write!(f, "Evaluation error: {}", e),
        }
    }
}

impl std::error::Error for ExprError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExprError::Parse(e) => Some(e),
            ExprError::Eval(e) => Some(e),
        }
    }
}

impl From<ParseError> for ExprError {
    fn from(e: ParseError) -> Self {
        ExprError::Parse(e)
    }
}

impl From<EvalError> for ExprError {
    fn from(e: EvalError) -> Self {
        ExprError::Eval(e)
    }
}
