//! Type annotations in the AST.
//!
//! Types are kept exactly as written: a name and the number of `[]` pairs
//! following it. Resolving the name to a real type is left to later passes.

use crate::Span;

use super::ast::{NodeKind, Spanned};

/// A written type such as `int` or `string[][]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    pub name: String,
    /// Number of array dimensions, 0 for a scalar.
    pub dimensions: usize,
}

impl Type {
    pub fn new(name: impl Into<String>) -> Self {
        Type {
            name: name.into(),
            dimensions: 0,
        }
    }

    pub fn array_of(element: Type) -> Self {
        Type {
            name: element.name,
            dimensions: element.dimensions + 1,
        }
    }

    pub fn is_array(&self) -> bool {
        self.dimensions > 0
    }
}

impl Spanned<Type> {
    pub fn type_annotation(name: impl Into<String>, dimensions: usize, span: Span) -> Self {
        Spanned::new(
            Type {
                name: name.into(),
                dimensions,
            },
            span,
        )
    }

    pub fn kind(&self) -> NodeKind {
        NodeKind::Type
    }
}

/// Tag for the value carried by a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralType {
    Integer,
    Float,
    String,
    Boolean,
}
