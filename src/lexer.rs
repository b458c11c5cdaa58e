use std::fmt;

use crate::ast::Token;

/// Zero-based character offset into the expression text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "position {}", self.offset)
    }
}

/// Errors raised while turning expression text into tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    /// A character outside the expression alphabet
    UnexpectedChar { ch: char, position: Position },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnexpectedChar { ch, position } => {
                write!(f, "Unexpected character {:?} at {}", ch, position)
            }
        }
    }
}

impl std::error::Error for LexError {}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    // Only the plain space is skipped; tabs and newlines are lex errors.
    fn skip_whitespace(&mut self) {
        while self.current_char() == Some(' ') {
            self.advance();
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    /// Consumes the whole run of digits and dots, but only the prefix before
    /// a second `.` is the value: `1.2.3` reads as `1.2`, `1..5` as `1`.
    fn read_number(&mut self) -> Token {
        let mut number = String::new();
        let mut seen_dot = false;
        let mut in_value = true;

        while let Some(ch) = self.current_char() {
            if !(ch.is_ascii_digit() || ch == '.') {
                break;
            }
            if ch == '.' {
                in_value &= !seen_dot;
                seen_dot = true;
            }
            if in_value {
                number.push(ch);
            }
            self.advance();
        }

        // Always digit-led with at most one dot, so the parse cannot fail.
        Token::Number(number.parse::<f64>().unwrap_or(f64::NAN))
    }

    fn single(&mut self, token: Token) -> Result<Token, LexError> {
        self.advance();
        Ok(token)
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        match self.current_char() {
            None => Ok(Token::Eof),
            Some(ch @ ('+' | '-' | '*' | '/' | '%' | '^')) => self.single(Token::Operator(ch)),
            Some('(') => self.single(Token::LParen),
            Some(')') => self.single(Token::RParen),
            Some('[') => self.single(Token::LBracket),
            Some(']') => self.single(Token::RBracket),
            Some(',') => self.single(Token::Comma),
            Some('.') => self.single(Token::Dot),
            Some(ch) if ch.is_ascii_digit() => Ok(self.read_number()),
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {
                Ok(Token::Identifier(self.read_identifier()))
            }
            Some(ch) => Err(LexError::UnexpectedChar {
                ch,
                position: Position {
                    offset: self.position,
                },
            }),
        }
    }

    /// Collects every token up to and including [`Token::Eof`].
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token == Token::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }
}

#[test]
fn test_eof_repeats() {
    let mut lexer = Lexer::new("x");
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("x".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_chain() {
    let mut lexer = Lexer::new("friends[0].age + 5");
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("friends".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::LBracket);
    assert_eq!(lexer.next_token().unwrap(), Token::Number(0.0));
    assert_eq!(lexer.next_token().unwrap(), Token::RBracket);
    assert_eq!(lexer.next_token().unwrap(), Token::Dot);
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("age".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Operator('+'));
    assert_eq!(lexer.next_token().unwrap(), Token::Number(5.0));
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}
