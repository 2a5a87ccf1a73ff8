//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric literals (integers and floats)
//! - String literals with escape sequences
//! - Operators and punctuation
//! - Comments and line/column tracking
//! - Error cases

use super::{lexer::tokenize, tokens::TokenKind};

#[test]
fn test_tokenize_keywords() {
    let source = "let const fn if else elseif when while for return break continue import true false".to_string();
    let tokens = tokenize(source, Some("test.lang".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Let);
    assert_eq!(tokens[1].kind, TokenKind::Const);
    assert_eq!(tokens[2].kind, TokenKind::Fn);
    assert_eq!(tokens[3].kind, TokenKind::If);
    assert_eq!(tokens[4].kind, TokenKind::Else);
    assert_eq!(tokens[5].kind, TokenKind::ElseIf);
    assert_eq!(tokens[6].kind, TokenKind::When);
    assert_eq!(tokens[7].kind, TokenKind::While);
    assert_eq!(tokens[8].kind, TokenKind::For);
    assert_eq!(tokens[9].kind, TokenKind::Return);
    assert_eq!(tokens[10].kind, TokenKind::Break);
    assert_eq!(tokens[11].kind, TokenKind::Continue);
    assert_eq!(tokens[12].kind, TokenKind::Import);
    assert_eq!(tokens[13].kind, TokenKind::True);
    assert_eq!(tokens[14].kind, TokenKind::False);
    assert_eq!(tokens[15].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar baz_123 _underscore CamelCase iffy".to_string();
    let tokens = tokenize(source, Some("test.lang".to_string())).unwrap();

    let values: Vec<&str> = tokens[..6].iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["foo", "bar", "baz_123", "_underscore", "CamelCase", "iffy"]);
    assert!(tokens[..6].iter().all(|t| t.kind == TokenKind::Identifier));
    assert_eq!(tokens[6].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 3.14 0 100.5".to_string();
    let tokens = tokenize(source, Some("test.lang".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].value, "0");
    assert_eq!(tokens[3].value, "100.5");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_strings() {
    let source = r#""hello" "multiple words" """#.to_string();
    let tokens = tokenize(source, Some("test.lang".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].value, "multiple words");
    assert_eq!(tokens[2].kind, TokenKind::String);
    assert_eq!(tokens[2].value, "");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_string_escapes() {
    let source = r#""hello\nworld" "tab\there" "backslash\\" "hex\x41" "quote\"test""#.to_string();
    let tokens = tokenize(source, Some("test.lang".to_string())).unwrap();

    assert_eq!(tokens[0].value, "hello\nworld");
    assert_eq!(tokens[1].value, "tab\there");
    assert_eq!(tokens[2].value, "backslash\\");
    assert_eq!(tokens[3].value, "hexA");
    assert_eq!(tokens[4].value, "quote\"test");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_operators() {
    let source = "+ - * / % == != < > <= >= = && || !".to_string();
    let tokens = tokenize(source, Some("test.lang".to_string())).unwrap();

    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Assignment,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Not,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_compound_assignment() {
    let source = "+= -= *= /= %=".to_string();
    let tokens = tokenize(source, Some("test.lang".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::PlusEquals);
    assert_eq!(tokens[1].kind, TokenKind::MinusEquals);
    assert_eq!(tokens[2].kind, TokenKind::StarEquals);
    assert_eq!(tokens[3].kind, TokenKind::SlashEquals);
    assert_eq!(tokens[4].kind, TokenKind::PercentEquals);
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_punctuation() {
    let source = "( ) { } [ ] . , ; : ->".to_string();
    let tokens = tokenize(source, Some("test.lang".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::OpenParen);
    assert_eq!(tokens[1].kind, TokenKind::CloseParen);
    assert_eq!(tokens[2].kind, TokenKind::OpenCurly);
    assert_eq!(tokens[3].kind, TokenKind::CloseCurly);
    assert_eq!(tokens[4].kind, TokenKind::OpenBracket);
    assert_eq!(tokens[5].kind, TokenKind::CloseBracket);
    assert_eq!(tokens[6].kind, TokenKind::Dot);
    assert_eq!(tokens[7].kind, TokenKind::Comma);
    assert_eq!(tokens[8].kind, TokenKind::Semicolon);
    assert_eq!(tokens[9].kind, TokenKind::Colon);
    assert_eq!(tokens[10].kind, TokenKind::Arrow);
    assert_eq!(tokens[11].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_comments() {
    let source = "let x = 5 // this is a comment\nlet y = 10".to_string();
    let tokens = tokenize(source, Some("test.lang".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Let);
    assert_eq!(tokens[3].kind, TokenKind::Number);
    assert_eq!(tokens[3].value, "5");
    assert_eq!(tokens[4].kind, TokenKind::Let);
    assert_eq!(tokens[5].value, "y");
    assert_eq!(tokens[7].value, "10");
    assert_eq!(tokens[8].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_division_is_not_a_comment() {
    let source = "a / b /= c".to_string();
    let tokens = tokenize(source, Some("test.lang".to_string())).unwrap();

    assert_eq!(tokens[1].kind, TokenKind::Slash);
    assert_eq!(tokens[3].kind, TokenKind::SlashEquals);
}

#[test]
fn test_tokenize_line_and_column() {
    let source = "let x = 1;\n  x = 2;".to_string();
    let tokens = tokenize(source, Some("test.lang".to_string())).unwrap();

    assert_eq!(tokens[0].span.start.line, 1);
    assert_eq!(tokens[0].span.start.column, 1);
    assert_eq!(tokens[0].span.end.column, 4);

    // `x` on the second line
    assert_eq!(tokens[5].value, "x");
    assert_eq!(tokens[5].span.start.line, 2);
    assert_eq!(tokens[5].span.start.column, 3);
    assert_eq!(tokens[5].span.start.offset, 13);
}

#[test]
fn test_tokenize_string_span_covers_quotes() {
    let source = r#"x = "ab";"#.to_string();
    let tokens = tokenize(source, Some("test.lang".to_string())).unwrap();

    assert_eq!(tokens[2].kind, TokenKind::String);
    assert_eq!(tokens[2].span.start.column, 5);
    assert_eq!(tokens[2].span.end.column, 9);
}

#[test]
fn test_tokenize_unrecognized_token() {
    let source = "let x = @".to_string();
    let result = tokenize(source, Some("test.lang".to_string()));

    let error = result.unwrap_err();
    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_span().start.column, 9);
}

#[test]
fn test_tokenize_unterminated_string() {
    let source = "\"never closed".to_string();
    let result = tokenize(source, Some("test.lang".to_string()));

    assert!(result.is_err());
}

#[test]
fn test_tokenize_empty_source() {
    let tokens = tokenize(String::new(), None).unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_mixed_expression() {
    let source = "x + 5 * (y - 3)".to_string();
    let tokens = tokenize(source, Some("test.lang".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].kind, TokenKind::Plus);
    assert_eq!(tokens[2].kind, TokenKind::Number);
    assert_eq!(tokens[3].kind, TokenKind::Star);
    assert_eq!(tokens[4].kind, TokenKind::OpenParen);
    assert_eq!(tokens[5].kind, TokenKind::Identifier);
    assert_eq!(tokens[6].kind, TokenKind::Dash);
    assert_eq!(tokens[7].kind, TokenKind::Number);
    assert_eq!(tokens[8].kind, TokenKind::CloseParen);
}
