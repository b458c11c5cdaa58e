//! # Stencil Expressions - Abstract Syntax Tree
//!
//! This module defines the Abstract Syntax Tree (AST) for the expressions that
//! live inside `{{ ... }}` markers in template text.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Expression nodes (literals, lookups, operations, calls)
//! - **[operators]** - Binary and prefix operators
//!
//! ## Quick Start
//!
//! ```text
//! Hello {{name}}, in five years you will be {{age + 5}}.
//! ```
//!
//! ## Grammar
//!
//! From loosest to tightest binding:
//!
//! ```text
//! additive       := multiplicative (("+" | "-") multiplicative)*
//! multiplicative := exponential (("*" | "/" | "%") exponential)*
//! exponential    := unary ("^" unary)*
//! unary          := ("+" | "-") unary | primary
//! primary        := NUMBER
//!                 | "(" additive ")"
//!                 | IDENT "(" (additive ("," additive)*)? ")"
//!                 | IDENT ("." IDENT | "[" additive "]")*
//! ```
//!
//! ### Known quirks
//!
//! - `^` loops left to right like the other binary levels, so `2^3^2` is
//!   `(2^3)^2 = 64`.
//! - Prefix signs bind tighter than `^`, so `-2^2` is `(-2)^2 = 4`.
//! - A function call ends its chain: `max(a, b).x` does not parse.
//!
//! ## Examples
//!
//! ```text
//! (2 + 3) * 4
//! address.city
//! friends[0].age
//! round(abs(-3.7))
//! ```
pub mod expressions;
pub mod operators;
pub mod tokens;

pub use expressions::Expr;
pub use operators::{BinOp, UnaryOp};
pub use tokens::Token;
