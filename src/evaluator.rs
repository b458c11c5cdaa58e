use std::{borrow::Cow, fmt};

use crate::{
    ast::{BinOp, Expr, UnaryOp},
    value::Value,
};

/// Errors that can occur during expression evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Top-level name not present in the data context
    UndefinedVariable(String),

    /// Call to a name outside the built-in table
    UnknownFunction(String),

    /// Indexing something that is not an array
    NotIndexable { type_name: &'static str },

    /// Index that is not an integer-valued number
    InvalidIndex(String),

    /// Integer index outside `[0, len)`
    IndexOutOfBounds { index: f64, len: usize },

    /// Property not present on the object
    MissingProperty { property: String, object: String },

    /// Built-in called with too few arguments
    Arity {
        function: String,
        expected: usize,
    },

    /// Operand of the wrong type for an operator or built-in
    TypeError(String),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UndefinedVariable(name) => write!(f, "Undefined variable: {}", name),
            EvalError::UnknownFunction(name) => write!(f, "Unknown function: {}", name),
            EvalError::NotIndexable { type_name } => {
                write!(f, "Cannot index into {}; only arrays support indexing", type_name)
            }
            EvalError::InvalidIndex(index) => {
                write!(f, "Array index must be an integer, got {}", index)
            }
            EvalError::IndexOutOfBounds { index, len } => {
                write!(f, "Array index {} out of bounds (length: {})", index, len)
            }
            EvalError::MissingProperty { property, object } => {
                write!(f, "Property '{}' not found on {}", property, object)
            }
            EvalError::Arity { function, expected } => write!(
                f,
                "{}() expects at least {} argument{}",
                function,
                expected,
                if *expected == 1 { "" } else { "s" }
            ),
            EvalError::TypeError(msg) => write!(f, "Type error: {}", msg),
        }
    }
}

impl std::error::Error for EvalError {}

/// Built-in functions, looked up case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Builtin {
    Min,
    Max,
    Abs,
    Round,
    Floor,
    Ceil,
}

impl Builtin {
    fn lookup(name: &str) -> Option<Builtin> {
        match name.to_ascii_lowercase().as_str() {
            "min" => Some(Builtin::Min),
            "max" => Some(Builtin::Max),
            "abs" => Some(Builtin::Abs),
            "round" => Some(Builtin::Round),
            "floor" => Some(Builtin::Floor),
            "ceil" => Some(Builtin::Ceil),
            _ => None,
        }
    }
}

/// Tree-walking interpreter.
///
/// Holds no state of its own: every call reads the tree and the data context
/// and produces a fresh value, so one evaluator can be shared freely.
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluates an expression against a data context.
    ///
    /// # Examples
    ///
    /// ```
    /// use stencil_lang::{Evaluator, Value};
    /// use stencil_lang::parser::parse_expression;
    /// use serde_json::json;
    ///
    /// let context = Value::from(json!({ "age": 30 }));
    /// let expr = parse_expression("age + 5").unwrap();
    ///
    /// let result = Evaluator::new().evaluate(&expr, &context).unwrap();
    /// assert_eq!(result, Value::Number(35.0));
    /// ```
    pub fn evaluate(&self, expr: &Expr, context: &Value) -> Result<Value, EvalError> {
        self.resolve(expr, context).map(Cow::into_owned)
    }

    /// Evaluates `expr`, borrowing from `context` wherever the result is a
    /// value already stored there.
    fn resolve<'c>(&self, expr: &Expr, context: &'c Value) -> Result<Cow<'c, Value>, EvalError> {
        match expr {
            Expr::Number(n) => Ok(Cow::Owned(Value::Number(*n))),
            Expr::Variable(name) => context
                .get(name)
                .map(Cow::Borrowed)
                .ok_or_else(|| EvalError::UndefinedVariable(name.clone())),
            Expr::BinaryOp { op, left, right } => {
                let left_val = self.resolve(left, context)?;
                let right_val = self.resolve(right, context)?;
                apply_binop(*op, &left_val, &right_val).map(Cow::Owned)
            }
            Expr::UnaryOp { op, operand } => {
                let value = self.resolve(operand, context)?;
                apply_unary(*op, &value).map(Cow::Owned)
            }
            Expr::FunctionCall { name, args } => {
                let values = args
                    .iter()
                    .map(|arg| self.resolve(arg, context))
                    .collect::<Result<Vec<_>, _>>()?;
                call_function(name, &values).map(Cow::Owned)
            }
            Expr::Index { collection, index } => {
                let collection = self.resolve(collection, context)?;
                let index = self.resolve(index, context)?;
                match collection {
                    Cow::Borrowed(items) => apply_index(items, &index).map(Cow::Borrowed),
                    Cow::Owned(items) => apply_index(&items, &index).cloned().map(Cow::Owned),
                }
            }
            Expr::Property { object, property } => match self.resolve(object, context)? {
                Cow::Borrowed(object) => apply_property(object, property),
                Cow::Owned(object) => {
                    apply_property(&object, property).map(|value| Cow::Owned(value.into_owned()))
                }
            },
        }
    }
}

fn require_number(value: &Value, what: impl FnOnce() -> String) -> Result<f64, EvalError> {
    value.as_number().ok_or_else(|| {
        EvalError::TypeError(format!("{} requires a number, got {}", what(), value.type_name()))
    })
}

fn apply_binop(op: BinOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    if op == BinOp::Add
        && (matches!(left, Value::String(_)) || matches!(right, Value::String(_)))
    {
        return Ok(Value::String(format!("{}{}", left, right)));
    }

    let a = require_number(left, || format!("Left operand of '{}'", op))?;
    let b = require_number(right, || format!("Right operand of '{}'", op))?;

    // IEEE-754 throughout: division by zero gives infinity or NaN, `%` keeps
    // the dividend's sign, and `powf` yields NaN outside its domain.
    let result = match op {
        BinOp::Add => a + b,
        BinOp::Subtract => a - b,
        BinOp::Multiply => a * b,
        BinOp::Divide => a / b,
        BinOp::Modulo => a % b,
        BinOp::Power => a.powf(b),
    };
    Ok(Value::Number(result))
}

fn apply_unary(op: UnaryOp, value: &Value) -> Result<Value, EvalError> {
    match (op, value) {
        (UnaryOp::Plus, Value::Number(n)) => Ok(Value::Number(*n)),
        (UnaryOp::Plus, Value::String(s)) => string_to_number(s).map(Value::Number),
        (UnaryOp::Negate, Value::Number(n)) => Ok(Value::Number(-n)),
        (op, v) => Err(EvalError::TypeError(format!(
            "Unary '{}' requires a number, got {}",
            op,
            v.type_name()
        ))),
    }
}

/// Numeric reading of a string for unary `+`; blank text reads as zero.
fn string_to_number(s: &str) -> Result<f64, EvalError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| EvalError::TypeError(format!("Cannot convert \"{}\" to a number", s)))
}

fn apply_index<'a>(collection: &'a Value, index: &Value) -> Result<&'a Value, EvalError> {
    let items = match collection {
        Value::Array(items) => items,
        other => {
            return Err(EvalError::NotIndexable {
                type_name: other.type_name(),
            });
        }
    };

    let n = match index {
        Value::Number(n) if n.fract() == 0.0 => *n,
        other => return Err(EvalError::InvalidIndex(describe(other))),
    };

    if n < 0.0 || n >= items.len() as f64 {
        return Err(EvalError::IndexOutOfBounds {
            index: n,
            len: items.len(),
        });
    }
    Ok(&items[n as usize])
}

fn apply_property<'a>(object: &'a Value, property: &str) -> Result<Cow<'a, Value>, EvalError> {
    match object {
        Value::Object(map) => {
            if let Some(value) = map.get(property) {
                return Ok(Cow::Borrowed(value));
            }
        }
        Value::Array(items) if property == "length" => {
            return Ok(Cow::Owned(Value::Number(items.len() as f64)));
        }
        Value::String(s) if property == "length" => {
            return Ok(Cow::Owned(Value::Number(s.chars().count() as f64)));
        }
        _ => {}
    }
    Err(EvalError::MissingProperty {
        property: property.to_string(),
        object: describe(object),
    })
}

const MAX_LISTED_KEYS: usize = 8;
const MAX_QUOTED_CHARS: usize = 32;

/// Short description of a value for error messages; collections and long
/// strings are summarized instead of printed.
fn describe(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
            keys.sort_unstable();
            let listed = keys[..keys.len().min(MAX_LISTED_KEYS)].join(", ");
            if keys.len() > MAX_LISTED_KEYS {
                format!("object {{{}, ...}}", listed)
            } else {
                format!("object {{{}}}", listed)
            }
        }
        Value::Array(items) => format!("array of {}", items.len()),
        Value::String(s) if s.chars().count() > MAX_QUOTED_CHARS => {
            format!("string of {} chars", s.chars().count())
        }
        other => other.to_string(),
    }
}

fn call_function(name: &str, args: &[Cow<'_, Value>]) -> Result<Value, EvalError> {
    let builtin = Builtin::lookup(name).ok_or_else(|| EvalError::UnknownFunction(name.to_string()))?;

    let numbers = args
        .iter()
        .enumerate()
        .map(|(i, arg)| require_number(arg, || format!("Argument {} of {}()", i + 1, name)))
        .collect::<Result<Vec<_>, _>>()?;

    let first = numbers.first().copied().ok_or_else(|| EvalError::Arity {
        function: name.to_string(),
        expected: 1,
    })?;

    let result = match builtin {
        Builtin::Min => fold_nan_aware(&numbers, f64::min),
        Builtin::Max => fold_nan_aware(&numbers, f64::max),
        Builtin::Abs => first.abs(),
        Builtin::Round => round_half_up(first),
        Builtin::Floor => first.floor(),
        Builtin::Ceil => first.ceil(),
    };
    Ok(Value::Number(result))
}

/// Folds with `f`, except that any NaN argument makes the result NaN.
fn fold_nan_aware(numbers: &[f64], f: fn(f64, f64) -> f64) -> f64 {
    if numbers.iter().any(|n| n.is_nan()) {
        return f64::NAN;
    }
    numbers.iter().copied().reduce(f).unwrap_or(f64::NAN)
}

/// Rounds to the nearest integer, with halves going toward positive infinity.
fn round_half_up(n: f64) -> f64 {
    let floor = n.floor();
    if n - floor >= 0.5 { floor + 1.0 } else { floor }
}
