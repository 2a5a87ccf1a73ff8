//! Error types and diagnostic reporting for the front-end.
//!
//! This module defines the errors produced while tokenizing and parsing:
//!
//! - Error structures with source span information
//! - Specific error variants for syntax, structural and literal problems
//! - The ordered diagnostic list attached to every parse result
//! - Helpful error names and suggestions

pub mod diagnostics;
pub mod errors;

#[cfg(test)]
mod tests;
