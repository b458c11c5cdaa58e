// tests/lexer_tests.rs

use stencil_lang::ast::Token;
use stencil_lang::lexer::{LexError, Lexer, Position};

fn tokens(input: &str) -> Vec<Token> {
    Lexer::new(input).tokenize().unwrap()
}

// ============================================================================
// Single Character Tokens
// ============================================================================

#[test]
fn test_single_char_tokens() {
    let test_cases = vec![
        ("+", Token::Operator('+')),
        ("-", Token::Operator('-')),
        ("*", Token::Operator('*')),
        ("/", Token::Operator('/')),
        ("%", Token::Operator('%')),
        ("^", Token::Operator('^')),
        ("(", Token::LParen),
        (")", Token::RParen),
        ("[", Token::LBracket),
        ("]", Token::RBracket),
        (",", Token::Comma),
        (".", Token::Dot),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(token, expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn test_numbers() {
    assert_eq!(tokens("42"), vec![Token::Number(42.0), Token::Eof]);
    assert_eq!(tokens("3.14"), vec![Token::Number(3.14), Token::Eof]);
    assert_eq!(tokens("0.5"), vec![Token::Number(0.5), Token::Eof]);
}

#[test]
fn test_sign_is_never_part_of_number() {
    assert_eq!(
        tokens("-3"),
        vec![Token::Operator('-'), Token::Number(3.0), Token::Eof]
    );
}

#[test]
fn test_leading_dot_is_a_dot_token() {
    assert_eq!(
        tokens(".5"),
        vec![Token::Dot, Token::Number(5.0), Token::Eof]
    );
}

#[test]
fn test_no_exponent_notation() {
    // `1e5` is the number 1 followed by the identifier `e5`
    assert_eq!(
        tokens("1e5"),
        vec![
            Token::Number(1.0),
            Token::Identifier("e5".to_string()),
            Token::Eof
        ]
    );
}

#[test]
fn test_extra_dots_end_the_value() {
    // The whole run is consumed; the value stops before the second dot
    assert_eq!(
        tokens("1 + 1.2.3"),
        vec![
            Token::Number(1.0),
            Token::Operator('+'),
            Token::Number(1.2),
            Token::Eof
        ]
    );
    assert_eq!(
        tokens("1..5 + 1"),
        vec![
            Token::Number(1.0),
            Token::Operator('+'),
            Token::Number(1.0),
            Token::Eof
        ]
    );
}

#[test]
fn test_trailing_dot_number() {
    assert_eq!(tokens("7."), vec![Token::Number(7.0), Token::Eof]);
}

// ============================================================================
// Identifiers
// ============================================================================

#[test]
fn test_identifiers() {
    let test_cases = vec!["age", "friend_count", "_internal", "item2", "Age"];

    for input in test_cases {
        assert_eq!(
            tokens(input),
            vec![Token::Identifier(input.to_string()), Token::Eof],
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_identifier_stops_at_dot() {
    assert_eq!(
        tokens("address.city"),
        vec![
            Token::Identifier("address".to_string()),
            Token::Dot,
            Token::Identifier("city".to_string()),
            Token::Eof,
        ]
    );
}

#[test]
fn test_non_ascii_letters_rejected() {
    let err = Lexer::new("나이").tokenize().unwrap_err();
    assert!(matches!(
        err,
        LexError::UnexpectedChar {
            ch: '나',
            position: Position { offset: 0 }
        }
    ));
}

// ============================================================================
// Whitespace
// ============================================================================

#[test]
fn test_spaces_are_skipped() {
    assert_eq!(
        tokens("   1   +   2   "),
        vec![
            Token::Number(1.0),
            Token::Operator('+'),
            Token::Number(2.0),
            Token::Eof
        ]
    );
}

#[test]
fn test_tabs_and_newlines_are_errors() {
    for (input, ch) in [("1\t+ 2", '\t'), ("1 +\n2", '\n')] {
        let err = Lexer::new(input).tokenize().unwrap_err();
        assert!(
            matches!(err, LexError::UnexpectedChar { ch: c, .. } if c == ch),
            "Failed for input: {:?}",
            input
        );
    }
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unexpected_char_position() {
    let mut lexer = Lexer::new("a + $b");
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("a".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Operator('+'));
    let err = lexer.next_token().unwrap_err();
    assert_eq!(
        err,
        LexError::UnexpectedChar {
            ch: '$',
            position: Position { offset: 4 }
        }
    );
    assert_eq!(err.to_string(), "Unexpected character '$' at position 4");
}

#[test]
fn test_unsupported_operators() {
    for input in ["a == b", "a < b", "!a", "\"str\"", "a & b"] {
        assert!(
            Lexer::new(input).tokenize().is_err(),
            "Expected error for input: {}",
            input
        );
    }
}

// ============================================================================
// Complex Expressions
// ============================================================================

#[test]
fn test_function_call_tokens() {
    assert_eq!(
        tokens("max(1, age)"),
        vec![
            Token::Identifier("max".to_string()),
            Token::LParen,
            Token::Number(1.0),
            Token::Comma,
            Token::Identifier("age".to_string()),
            Token::RParen,
            Token::Eof,
        ]
    );
}

#[test]
fn test_empty_input() {
    assert_eq!(tokens(""), vec![Token::Eof]);
    assert_eq!(tokens("    "), vec![Token::Eof]);
}
