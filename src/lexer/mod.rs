//! Lexical analysis module.
//!
//! This module contains the reference tokenizer that feeds the parser.
//! It handles:
//!
//! - Tokenization of source code using an ordered regex pattern table
//! - Recognition of keywords, identifiers, literals, and operators
//! - Line and column tracking for diagnostics
//! - Comments and whitespace handling

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
