use std::slice::Iter;

use crate::{lexer::tokens::TokenKind, Span};

use super::{
    ast::{NodeKind, Spanned},
    expressions::{BinaryOp, Expr},
    types::Type,
};

/// Root of a parsed compilation unit.
#[derive(Debug, Clone)]
pub struct Program {
    pub items: Vec<Item>,
    pub span: Span,
}

impl Program {
    pub fn new(items: Vec<Item>, span: Span) -> Self {
        Program { items, span }
    }

    pub fn iter(&self) -> Iter<'_, Item> {
        self.items.iter()
    }

    /// Finds a top-level function by name.
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.items.iter().find_map(|item| match &item.node {
            ItemKind::Function(function) if function.name == name => Some(function),
            _ => None,
        })
    }
}

impl PartialEq for Program {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

// TOP LEVEL

pub type Item = Spanned<ItemKind>;

#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Import(Import),
    Function(Function),
    VariableDeclaration(VariableDeclaration),
}

impl Item {
    pub fn kind(&self) -> NodeKind {
        match &self.node {
            ItemKind::Import(_) => NodeKind::Import,
            ItemKind::Function(_) => NodeKind::Function,
            ItemKind::VariableDeclaration(_) => NodeKind::VariableDeclaration,
        }
    }
}

/// `import "std/io";`, `import std.io;` or `import std.*;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub path: ImportPath,
}

impl Import {
    /// Whether the import brings in every item of a module.
    pub fn is_wildcard(&self) -> bool {
        match &self.path {
            ImportPath::File(_) => false,
            ImportPath::Module(segments) => segments.last() == Some(&ImportSegment::Wildcard),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportPath {
    /// A quoted path, kept verbatim
    File(String),
    /// A dotted path. A wildcard can only be the last segment.
    Module(Vec<ImportSegment>),
}

impl ImportPath {
    pub fn file(path: impl Into<String>) -> Self {
        ImportPath::File(path.into())
    }

    /// Builds a dotted path from its segment names, `*` becoming a wildcard.
    pub fn module<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ImportPath::Module(
            segments
                .into_iter()
                .map(|segment| {
                    let segment = segment.into();
                    if segment == "*" {
                        ImportSegment::Wildcard
                    } else {
                        ImportSegment::Name(segment)
                    }
                })
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportSegment {
    Name(String),
    Wildcard,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub declared_type: Spanned<Type>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<Spanned<Type>>,
    pub body: Block,
}

// BLOCKS

#[derive(Debug, Clone)]
pub struct Block {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl Block {
    pub fn new(body: Vec<Stmt>, span: Span) -> Self {
        Block { body, span }
    }

    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.body == other.body
    }
}

// STATEMENTS

pub type Stmt = Spanned<StmtKind>;

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    When(WhenBlock),
    If(IfBlock),
    While(WhileBlock),
    For(ForBlock),
    Return(Return),
    Break,
    Continue,
    VariableDeclaration(VariableDeclaration),
    VariableAssignment(VariableAssignment),
    /// A bare expression followed by `;`, usually a call.
    Expression(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhenArm {
    pub condition: Expr,
    pub block: Block,
}

/// `when { cond { ... } cond { ... } else { ... } }`
#[derive(Debug, Clone, PartialEq)]
pub struct WhenBlock {
    pub arms: Vec<WhenArm>,
    pub default: Option<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfBlock {
    pub condition: Expr,
    pub then_block: Block,
    pub else_ifs: Vec<Spanned<ElseIfBlock>>,
    pub else_block: Option<Spanned<ElseBlock>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElseIfBlock {
    pub condition: Expr,
    pub block: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElseBlock {
    pub block: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileBlock {
    pub condition: Expr,
    pub block: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    Declaration(Spanned<VariableDeclaration>),
    Assignment(Spanned<VariableAssignment>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForStep {
    Assignment(Spanned<VariableAssignment>),
    Expression(Expr),
}

/// `for (init; condition; step) { ... }`, every header part optional.
#[derive(Debug, Clone, PartialEq)]
pub struct ForBlock {
    pub initializer: Option<ForInit>,
    pub condition: Option<Expr>,
    pub step: Option<ForStep>,
    pub block: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    pub value: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub name: String,
    pub is_constant: bool,
    pub declared_type: Option<Spanned<Type>>,
    pub initializer: Option<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOp {
    Assign,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl AssignOp {
    pub fn from_token(kind: TokenKind) -> Option<AssignOp> {
        match kind {
            TokenKind::Assignment => Some(AssignOp::Assign),
            TokenKind::PlusEquals => Some(AssignOp::Add),
            TokenKind::MinusEquals => Some(AssignOp::Subtract),
            TokenKind::StarEquals => Some(AssignOp::Multiply),
            TokenKind::SlashEquals => Some(AssignOp::Divide),
            TokenKind::PercentEquals => Some(AssignOp::Modulo),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::Add => "+=",
            AssignOp::Subtract => "-=",
            AssignOp::Multiply => "*=",
            AssignOp::Divide => "/=",
            AssignOp::Modulo => "%=",
        }
    }

    /// The arithmetic a compound assignment performs, `None` for plain `=`.
    pub fn binary_op(&self) -> Option<BinaryOp> {
        match self {
            AssignOp::Assign => None,
            AssignOp::Add => Some(BinaryOp::Add),
            AssignOp::Subtract => Some(BinaryOp::Subtract),
            AssignOp::Multiply => Some(BinaryOp::Multiply),
            AssignOp::Divide => Some(BinaryOp::Divide),
            AssignOp::Modulo => Some(BinaryOp::Modulo),
        }
    }
}

/// `target op value`, where the target is an identifier or an array element.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableAssignment {
    pub target: Expr,
    pub operator: AssignOp,
    pub value: Expr,
}

impl Stmt {
    pub fn when_block(arms: Vec<WhenArm>, default: Option<Block>, span: Span) -> Stmt {
        Spanned::new(StmtKind::When(WhenBlock { arms, default }), span)
    }

    pub fn if_block(
        condition: Expr,
        then_block: Block,
        else_ifs: Vec<Spanned<ElseIfBlock>>,
        else_block: Option<Spanned<ElseBlock>>,
        span: Span,
    ) -> Stmt {
        Spanned::new(
            StmtKind::If(IfBlock {
                condition,
                then_block,
                else_ifs,
                else_block,
            }),
            span,
        )
    }

    pub fn while_block(condition: Expr, block: Block, span: Span) -> Stmt {
        Spanned::new(StmtKind::While(WhileBlock { condition, block }), span)
    }

    pub fn for_block(
        initializer: Option<ForInit>,
        condition: Option<Expr>,
        step: Option<ForStep>,
        block: Block,
        span: Span,
    ) -> Stmt {
        Spanned::new(
            StmtKind::For(ForBlock {
                initializer,
                condition,
                step,
                block,
            }),
            span,
        )
    }

    pub fn return_stmt(value: Option<Expr>, span: Span) -> Stmt {
        Spanned::new(StmtKind::Return(Return { value }), span)
    }

    pub fn break_stmt(span: Span) -> Stmt {
        Spanned::new(StmtKind::Break, span)
    }

    pub fn continue_stmt(span: Span) -> Stmt {
        Spanned::new(StmtKind::Continue, span)
    }

    pub fn declaration(declaration: Spanned<VariableDeclaration>) -> Stmt {
        Spanned::new(StmtKind::VariableDeclaration(declaration.node), declaration.span)
    }

    pub fn assignment(assignment: Spanned<VariableAssignment>) -> Stmt {
        Spanned::new(StmtKind::VariableAssignment(assignment.node), assignment.span)
    }

    pub fn expression(expression: Expr, span: Span) -> Stmt {
        Spanned::new(StmtKind::Expression(expression), span)
    }

    /// Kind of the statement. Expression statements report the kind of
    /// their expression.
    pub fn kind(&self) -> NodeKind {
        match &self.node {
            StmtKind::When(_) => NodeKind::WhenBlock,
            StmtKind::If(_) => NodeKind::IfBlock,
            StmtKind::While(_) => NodeKind::WhileBlock,
            StmtKind::For(_) => NodeKind::ForBlock,
            StmtKind::Return(_) => NodeKind::Return,
            StmtKind::Break => NodeKind::Break,
            StmtKind::Continue => NodeKind::Continue,
            StmtKind::VariableDeclaration(_) => NodeKind::VariableDeclaration,
            StmtKind::VariableAssignment(_) => NodeKind::VariableAssignment,
            StmtKind::Expression(expression) => expression.kind(),
        }
    }
}

impl Item {
    pub fn import(path: ImportPath, span: Span) -> Item {
        Spanned::new(ItemKind::Import(Import { path }), span)
    }

    pub fn function(
        name: impl Into<String>,
        parameters: Vec<Parameter>,
        return_type: Option<Spanned<Type>>,
        body: Block,
        span: Span,
    ) -> Item {
        Spanned::new(
            ItemKind::Function(Function {
                name: name.into(),
                parameters,
                return_type,
                body,
            }),
            span,
        )
    }

    pub fn declaration(declaration: Spanned<VariableDeclaration>) -> Item {
        Spanned::new(ItemKind::VariableDeclaration(declaration.node), declaration.span)
    }
}
