use std::ops::Deref;

use crate::{errors::diagnostics::Diagnostics, Span};

use super::statements::Program;

/// Node Kinds
///
/// The flat tag set of every syntactic construct in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    Function,
    WhenBlock,
    IfBlock,
    ElseBlock,
    ElseIfBlock,
    WhileBlock,
    ForBlock,

    Return,
    Break,
    Continue,

    VariableDeclaration,
    VariableAssignment,
    FunctionCall,

    BinaryOperator,
    UnaryOperator,
    Literal,
    Identifier,
    ArrayAccess,
    ArrayLiteral,
    Type,
    Import,
}

/// A node together with the source span it was parsed from.
///
/// Equality only looks at the node, so two trees parsed from differently
/// formatted sources compare equal when their structure matches.
#[derive(Debug, Clone)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Spanned { node, span }
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }

    pub fn into_inner(self) -> T {
        self.node
    }
}

impl<T: PartialEq> PartialEq for Spanned<T> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<T> Deref for Spanned<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.node
    }
}

/// Abstract Syntax Tree
///
/// The result of parsing one compilation unit: the program, the name of the
/// file it came from and everything that was reported along the way. The
/// program may be incomplete when `has_errors()` is true.
#[derive(Debug, Clone)]
pub struct AST {
    file: String,
    program: Program,
    diagnostics: Diagnostics,
}

impl AST {
    pub fn new(file: &str, program: Program, diagnostics: Diagnostics) -> Self {
        AST {
            file: file.to_string(),
            program,
            diagnostics,
        }
    }

    pub fn get_file(&self) -> &str {
        &self.file
    }

    pub fn get_program(&self) -> &Program {
        &self.program
    }

    pub fn get_diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// Consumes the tree, handing the program and diagnostics to a later pass.
    pub fn into_parts(self) -> (Program, Diagnostics) {
        (self.program, self.diagnostics)
    }
}
