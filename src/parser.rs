use crate::{
    ast::{BinOp, Expr, Token, UnaryOp},
    lexer::{LexError, Lexer},
};
use std::{fmt, mem};

/// Errors raised while building an expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The lexer rejected the input
    Lex(LexError),

    /// A token of the wrong kind where a specific kind was required
    UnexpectedToken { expected: String, found: Token },

    /// A complete expression was followed by more tokens
    TrailingInput { found: Token },

    /// Nesting beyond [`MAX_DEPTH`] levels
    TooDeep { limit: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lex(e) => write!(f, "{}", e),
            ParseError::UnexpectedToken { expected, found } => {
                write!(f, "Expected {}, got {}", expected, found)
            }
            ParseError::TrailingInput { found } => {
                write!(f, "Unexpected {} after complete expression", found)
            }
            ParseError::TooDeep { limit } => {
                write!(f, "Expression nested deeper than {} levels", limit)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        ParseError::Lex(e)
    }
}

/// Maximum nesting of the tree a parse may produce.
///
/// Every sign, group, call, access suffix and binary operator adds a level,
/// so this also bounds evaluator recursion and the drop of the tree.
pub const MAX_DEPTH: usize = 256;

pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    depth: usize,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current_token,
            depth: 0,
        })
    }

    fn descend(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ParseError::TooDeep { limit: MAX_DEPTH });
        }
        Ok(())
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current_token = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        if !self.check(&expected) {
            return Err(ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: self.current_token.clone(),
            });
        }
        self.advance()
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    /// Returns the operator character under the cursor, if any.
    fn current_operator(&self) -> Option<char> {
        match self.current_token {
            Token::Operator(op) => Some(op),
            _ => None,
        }
    }

    /// Parse primary expressions: numbers, parenthesized groups, identifier chains
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Number(n) => {
                self.advance()?;
                Ok(Expr::Number(n))
            }
            Token::LParen => {
                self.advance()?;
                self.descend()?;
                let expr = self.parse_expression()?;
                self.expect(Token::RParen)?;
                self.depth -= 1;
                Ok(expr)
            }
            Token::Identifier(name) => {
                self.advance()?;
                if self.check(&Token::LParen) {
                    self.parse_call(name)
                } else {
                    self.parse_access(Expr::Variable(name))
                }
            }
            token => Err(ParseError::UnexpectedToken {
                expected: "number, identifier or '('".to_string(),
                found: token,
            }),
        }
    }

    /// Parse the argument list of a call; the call ends the chain.
    fn parse_call(&mut self, name: String) -> Result<Expr, ParseError> {
        self.expect(Token::LParen)?;
        self.descend()?;

        let mut args = vec![];
        if !self.check(&Token::RParen) {
            args.push(self.parse_expression()?);
            while self.check(&Token::Comma) {
                self.advance()?;
                args.push(self.parse_expression()?);
            }
        }

        self.expect(Token::RParen)?;
        self.depth -= 1;
        Ok(Expr::FunctionCall { name, args })
    }

    /// Parse `.name` and `[expr]` suffixes, left to right
    fn parse_access(&mut self, mut expr: Expr) -> Result<Expr, ParseError> {
        let base = self.depth;
        loop {
            if self.check(&Token::LBracket) {
                self.advance()?; // consume '['
                self.descend()?;
                let index = self.parse_expression()?;
                self.expect(Token::RBracket)?;

                expr = Expr::Index {
                    collection: Box::new(expr),
                    index: Box::new(index),
                };
            } else if self.check(&Token::Dot) {
                self.advance()?; // consume '.'
                self.descend()?;

                let property = match mem::replace(&mut self.current_token, Token::Eof) {
                    Token::Identifier(name) => name,
                    found => {
                        return Err(ParseError::UnexpectedToken {
                            expected: "property name after '.'".to_string(),
                            found,
                        });
                    }
                };
                self.advance()?;

                expr = Expr::Property {
                    object: Box::new(expr),
                    property,
                };
            } else {
                break;
            }
        }
        self.depth = base;
        Ok(expr)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if let Some(op) = self.current_operator().and_then(UnaryOp::from_char) {
            self.advance()?;
            self.descend()?;
            let operand = self.parse_unary()?; // Right-recursive
            self.depth -= 1;
            return Ok(Expr::UnaryOp {
                op,
                operand: Box::new(operand),
            });
        }
        self.parse_primary()
    }

    /// Loops one binary precedence level over `ops`, taking operands from `next`.
    fn parse_binary_level(
        &mut self,
        ops: &[BinOp],
        next: fn(&mut Self) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        let base = self.depth;
        let mut left = next(self)?;

        loop {
            let op = match self.current_operator().and_then(BinOp::from_char) {
                Some(op) if ops.contains(&op) => op,
                _ => break,
            };

            self.advance()?;
            self.descend()?;
            let right = next(self)?;

            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        self.depth = base;
        Ok(left)
    }

    // Left-associative like the other levels.
    fn parse_exponential(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(&[BinOp::Power], Self::parse_unary)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(
            &[BinOp::Multiply, BinOp::Divide, BinOp::Modulo],
            Self::parse_exponential,
        )
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(&[BinOp::Add, BinOp::Subtract], Self::parse_multiplicative)
    }

    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_additive()
    }

    /// Parses a complete expression; every token must be consumed.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expression()?;
        if !self.check(&Token::Eof) {
            return Err(ParseError::TrailingInput {
                found: self.current_token.clone(),
            });
        }
        Ok(expr)
    }
}

/// Parses expression text into a tree.
///
/// # Examples
///
/// ```
/// use stencil_lang::parser::parse_expression;
/// use stencil_lang::ast::{BinOp, Expr};
///
/// let expr = parse_expression("age + 5").unwrap();
/// assert!(matches!(expr, Expr::BinaryOp { op: BinOp::Add, .. }));
/// ```
pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
    Parser::new(Lexer::new(input))?.parse()
}
