use crate::ast::{BinOp, UnaryOp};

/// Abstract Syntax Tree node representing a parsed expression.
///
/// A tree is produced by [`Parser::parse`](crate::parser::Parser::parse),
/// owned by the caller, and only ever read by the evaluator.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal number
    ///
    /// # Example
    /// ```text
    /// 42
    /// ```
    Number(f64),

    /// Top-level lookup in the data context
    ///
    /// # Example
    /// ```text
    /// age
    /// ```
    Variable(String),

    /// Binary arithmetic operation
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Prefix `+` or `-`
    ///
    /// # Example
    /// ```text
    /// -age
    /// --3
    /// ```
    UnaryOp { op: UnaryOp, operand: Box<Expr> },

    /// Built-in function call
    ///
    /// # Examples
    /// ```text
    /// max(1, age, 3)
    /// round(price * 1.1)
    /// ```
    FunctionCall { name: String, args: Vec<Expr> },

    /// Index access on an array
    ///
    /// # Examples
    /// ```text
    /// friends[0]
    /// matrix[i][j]
    /// ```
    Index {
        collection: Box<Expr>,
        index: Box<Expr>,
    },

    /// Property access on an object
    ///
    /// # Examples
    /// ```text
    /// address.city
    /// friends[0].age
    /// ```
    Property { object: Box<Expr>, property: String },
}
