//! # Stencil
//!
//! Small arithmetic and data-access expressions embedded in text, resolved
//! against a read-only data context:
//!
//! ```
//! use stencil_lang::{Value, render};
//! use serde_json::json;
//!
//! let context = Value::from(json!({
//!     "age": 30,
//!     "address": { "city": "Seoul" },
//!     "friends": [{ "age": 28 }, { "age": 35 }]
//! }));
//!
//! let text = render(
//!     "{{address.city}}, {{age + 5}}, oldest friend {{max(friends[0].age, friends[1].age)}}",
//!     &context,
//! );
//! assert_eq!(text, "Seoul, 35, oldest friend 35");
//! ```
//!
//! Each expression runs through a fresh [`Lexer`] → [`Parser`] →
//! [`Evaluator`] pipeline with no state shared between calls.
pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod convert;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod template;
pub mod value;

pub use ast::{BinOp, Expr, Token, UnaryOp};
pub use error::ExprError;
pub use evaluator::{EvalError, Evaluator};
pub use lexer::{LexError, Lexer, Position};
pub use output::{to_json, to_json_pretty};
pub use parser::{ParseError, Parser};
pub use template::{TemplateError, render, try_render};
pub use value::Value;

/// Tokenizes, parses and evaluates one expression against `context`.
///
/// ```
/// use stencil_lang::{Value, evaluate};
///
/// let result = evaluate("(2 + 3) * 4", &Value::Null).unwrap();
/// assert_eq!(result, Value::Number(20.0));
/// ```
pub fn evaluate(expression: &str, context: &Value) -> Result<Value, ExprError> {
    let expr = parser::parse_expression(expression)?;
    Ok(Evaluator::new().evaluate(&expr, context)?)
}
