#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::{
    ast::ast::AST,
    errors::{diagnostics::Diagnostics, errors::Error},
    lexer::lexer::tokenize,
    parser::{options::ParserOptions, parser::parse_with_options},
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A location in the source text.
///
/// `offset` is a byte offset, `line` and `column` are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub offset: u32,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(offset: u32, line: u32, column: u32) -> Self {
        Position { offset, line, column }
    }

    pub fn null() -> Self {
        Position::new(0, 1, 1)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    pub fn null() -> Self {
        Span::new(Position::null(), Position::null())
    }

    /// Span covering both `self` and `other`.
    pub fn to(&self, other: &Span) -> Span {
        Span::new(self.start, other.end)
    }
}

/// Tokenizes and parses `source` in one go.
///
/// A lexing failure still produces an `AST`: the program is empty and the
/// lexer error is the only diagnostic.
pub fn parse_source(source: &str, file: &str) -> AST {
    parse_source_with_options(source, file, ParserOptions::default())
}

pub fn parse_source_with_options(source: &str, file: &str, options: ParserOptions) -> AST {
    match tokenize(source.to_string(), Some(file.to_string())) {
        Ok(tokens) => parse_with_options(tokens, file, options),
        Err(error) => lex_failure(error, file),
    }
}

fn lex_failure(error: Error, file: &str) -> AST {
    let mut diagnostics = Diagnostics::new();
    let span = *error.get_span();
    diagnostics.error(error);

    AST::new(file, ast::statements::Program { items: vec![], span }, diagnostics)
}
