use crate::{lexer::tokens::TokenKind, Span};

use super::{
    ast::{NodeKind, Spanned},
    types::LiteralType,
};

pub type Expr = Spanned<ExprKind>;

/// Expression Kinds
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    BinaryOperator(BinaryOperator),
    UnaryOperator(UnaryOperator),
    Literal(Literal),
    Identifier(Identifier),
    ArrayAccess(ArrayAccess),
    ArrayLiteral(ArrayLiteral),
    FunctionCall(FunctionCall),
}

// OPERATORS

/// Binary operators, ordered by the table in `BinaryOp::precedence`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Or,
    And,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl BinaryOp {
    pub fn from_token(kind: TokenKind) -> Option<BinaryOp> {
        match kind {
            TokenKind::Or => Some(BinaryOp::Or),
            TokenKind::And => Some(BinaryOp::And),
            TokenKind::Equals => Some(BinaryOp::Equal),
            TokenKind::NotEquals => Some(BinaryOp::NotEqual),
            TokenKind::Less => Some(BinaryOp::Less),
            TokenKind::LessEquals => Some(BinaryOp::LessEqual),
            TokenKind::Greater => Some(BinaryOp::Greater),
            TokenKind::GreaterEquals => Some(BinaryOp::GreaterEqual),
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Dash => Some(BinaryOp::Subtract),
            TokenKind::Star => Some(BinaryOp::Multiply),
            TokenKind::Slash => Some(BinaryOp::Divide),
            TokenKind::Percent => Some(BinaryOp::Modulo),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::LessEqual => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
        }
    }

    /// 1 binds loosest, 6 tightest. Unary operators sit above all of these.
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOp::Or => 1,
            BinaryOp::And => 2,
            BinaryOp::Equal | BinaryOp::NotEqual => 3,
            BinaryOp::Less | BinaryOp::LessEqual | BinaryOp::Greater | BinaryOp::GreaterEqual => 4,
            BinaryOp::Add | BinaryOp::Subtract => 5,
            BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Modulo => 6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Negate,
    Not,
}

impl UnaryOp {
    pub fn from_token(kind: TokenKind) -> Option<UnaryOp> {
        match kind {
            TokenKind::Dash => Some(UnaryOp::Negate),
            TokenKind::Not => Some(UnaryOp::Not),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Negate => "-",
            UnaryOp::Not => "!",
        }
    }
}

// LITERALS

/// Literal Value
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
}

impl Literal {
    pub fn get_literal_type(&self) -> LiteralType {
        match self {
            Literal::Integer(_) => LiteralType::Integer,
            Literal::Float(_) => LiteralType::Float,
            Literal::String(_) => LiteralType::String,
            Literal::Boolean(_) => LiteralType::Boolean,
        }
    }

    /// Zero value of the given type, used in place of literals that failed to parse.
    pub fn placeholder(literal_type: LiteralType) -> Literal {
        match literal_type {
            LiteralType::Integer => Literal::Integer(0),
            LiteralType::Float => Literal::Float(0.0),
            LiteralType::String => Literal::String(String::new()),
            LiteralType::Boolean => Literal::Boolean(false),
        }
    }
}

/// Identifier Expression
/// Represents a name in the AST. This includes functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOperator {
    pub operator: BinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOperator {
    pub operator: UnaryOp,
    pub operand: Box<Expr>,
}

/// `array[index]`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayAccess {
    pub array: Box<Expr>,
    pub index: Box<Expr>,
}

/// `[a, b, c]`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLiteral {
    pub elements: Vec<Expr>,
}

/// `callee(arguments...)`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
}

impl Expr {
    pub fn binary(operator: BinaryOp, left: Expr, right: Expr, span: Span) -> Expr {
        Spanned::new(
            ExprKind::BinaryOperator(BinaryOperator {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            }),
            span,
        )
    }

    pub fn unary(operator: UnaryOp, operand: Expr, span: Span) -> Expr {
        Spanned::new(
            ExprKind::UnaryOperator(UnaryOperator {
                operator,
                operand: Box::new(operand),
            }),
            span,
        )
    }

    pub fn literal(value: Literal, span: Span) -> Expr {
        Spanned::new(ExprKind::Literal(value), span)
    }

    pub fn identifier(name: impl Into<String>, span: Span) -> Expr {
        Spanned::new(ExprKind::Identifier(Identifier { name: name.into() }), span)
    }

    pub fn array_access(array: Expr, index: Expr, span: Span) -> Expr {
        Spanned::new(
            ExprKind::ArrayAccess(ArrayAccess {
                array: Box::new(array),
                index: Box::new(index),
            }),
            span,
        )
    }

    pub fn array_literal(elements: Vec<Expr>, span: Span) -> Expr {
        Spanned::new(ExprKind::ArrayLiteral(ArrayLiteral { elements }), span)
    }

    pub fn call(callee: Expr, arguments: Vec<Expr>, span: Span) -> Expr {
        Spanned::new(
            ExprKind::FunctionCall(FunctionCall {
                callee: Box::new(callee),
                arguments,
            }),
            span,
        )
    }

    pub fn kind(&self) -> NodeKind {
        match &self.node {
            ExprKind::BinaryOperator(_) => NodeKind::BinaryOperator,
            ExprKind::UnaryOperator(_) => NodeKind::UnaryOperator,
            ExprKind::Literal(_) => NodeKind::Literal,
            ExprKind::Identifier(_) => NodeKind::Identifier,
            ExprKind::ArrayAccess(_) => NodeKind::ArrayAccess,
            ExprKind::ArrayLiteral(_) => NodeKind::ArrayLiteral,
            ExprKind::FunctionCall(_) => NodeKind::FunctionCall,
        }
    }

    /// Whether the expression can appear on the left of an assignment.
    pub fn is_assignable(&self) -> bool {
        matches!(self.node, ExprKind::Identifier(_) | ExprKind::ArrayAccess(_))
    }
}
