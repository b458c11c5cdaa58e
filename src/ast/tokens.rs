use std::fmt;

/// Lexical token produced by [`Lexer`](crate::lexer::Lexer).
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Non-negative decimal number
    ///
    /// The sign is never part of the literal; `-3` lexes as
    /// `Operator('-')` followed by `Number(3.0)`.
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 3.14
    /// ```
    Number(f64),

    /// Variable, property or function name
    ///
    /// Must start with an ASCII letter or underscore, followed by ASCII
    /// letters, digits, or underscores.
    ///
    /// # Examples
    /// ```text
    /// age
    /// friend_count
    /// _internal
    /// ```
    Identifier(String),

    /// One of `+ - * / % ^`
    Operator(char),

    // Delimiters
    /// Left parenthesis for grouping or function calls
    LParen,

    /// Right parenthesis
    RParen,

    /// Left bracket for index access
    LBracket,

    /// Right bracket
    RBracket,

    /// Comma separating function arguments
    Comma,

    /// Dot for property access
    Dot,

    /// End of input, returned indefinitely once reached
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "number {}", n),
            Token::Identifier(name) => write!(f, "identifier '{}'", name),
            Token::Operator(op) => write!(f, "operator '{}'", op),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::LBracket => write!(f, "'['"),
            Token::RBracket => write!(f, "']'"),
            Token::Comma => write!(f, "','"),
            Token::Dot => write!(f, "'.'"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}
