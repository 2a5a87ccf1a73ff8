//! Read-only traversal of the tree.
//!
//! Every hook has a default that recurses through the matching `walk_*`
//! function, so a visitor only overrides the nodes it is interested in.
//! Children are visited in source order.
//!
//! ```
//! use frontend::ast::{ast::NodeKind, visitor::Visitor};
//! use frontend::Span;
//!
//! #[derive(Default)]
//! struct Loops(usize);
//!
//! impl Visitor for Loops {
//!     fn visit_node(&mut self, kind: NodeKind, _span: &Span) {
//!         if matches!(kind, NodeKind::WhileBlock | NodeKind::ForBlock) {
//!             self.0 += 1;
//!         }
//!     }
//! }
//!
//! let ast = frontend::parse_source("fn main() { while x { for (;;) {} } }", "loops.lang");
//! let mut loops = Loops::default();
//! loops.visit_program(ast.get_program());
//! assert_eq!(loops.0, 2);
//! ```

use std::collections::HashMap;

use crate::Span;

use super::{
    ast::{NodeKind, Spanned},
    expressions::{Expr, ExprKind},
    statements::{
        Block, ForInit, ForStep, Item, ItemKind, Program, Stmt, StmtKind, VariableAssignment,
        VariableDeclaration,
    },
    types::Type,
};

pub trait Visitor: Sized {
    /// Called once for every node, before its children.
    fn visit_node(&mut self, _kind: NodeKind, _span: &Span) {}

    fn visit_program(&mut self, program: &Program) {
        walk_program(self, program);
    }

    fn visit_item(&mut self, item: &Item) {
        walk_item(self, item);
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }

    fn visit_type(&mut self, ty: &Spanned<Type>) {
        walk_type(self, ty);
    }
}

pub fn walk_program<V: Visitor>(visitor: &mut V, program: &Program) {
    visitor.visit_node(NodeKind::Program, &program.span);
    for item in &program.items {
        visitor.visit_item(item);
    }
}

pub fn walk_item<V: Visitor>(visitor: &mut V, item: &Item) {
    visitor.visit_node(item.kind(), &item.span);

    match &item.node {
        ItemKind::Import(_) => {}
        ItemKind::Function(function) => {
            for parameter in &function.parameters {
                visitor.visit_type(&parameter.declared_type);
            }
            if let Some(return_type) = &function.return_type {
                visitor.visit_type(return_type);
            }
            walk_block(visitor, &function.body);
        }
        ItemKind::VariableDeclaration(declaration) => walk_declaration(visitor, declaration),
    }
}

pub fn walk_block<V: Visitor>(visitor: &mut V, block: &Block) {
    for stmt in &block.body {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_stmt<V: Visitor>(visitor: &mut V, stmt: &Stmt) {
    // An expression statement is represented by its expression alone.
    if let StmtKind::Expression(expression) = &stmt.node {
        visitor.visit_expr(expression);
        return;
    }

    visitor.visit_node(stmt.kind(), &stmt.span);

    match &stmt.node {
        StmtKind::When(when) => {
            for arm in &when.arms {
                visitor.visit_expr(&arm.condition);
                walk_block(visitor, &arm.block);
            }
            if let Some(default) = &when.default {
                walk_block(visitor, default);
            }
        }
        StmtKind::If(if_block) => {
            visitor.visit_expr(&if_block.condition);
            walk_block(visitor, &if_block.then_block);

            for else_if in &if_block.else_ifs {
                visitor.visit_node(NodeKind::ElseIfBlock, &else_if.span);
                visitor.visit_expr(&else_if.condition);
                walk_block(visitor, &else_if.block);
            }

            if let Some(else_block) = &if_block.else_block {
                visitor.visit_node(NodeKind::ElseBlock, &else_block.span);
                walk_block(visitor, &else_block.block);
            }
        }
        StmtKind::While(while_block) => {
            visitor.visit_expr(&while_block.condition);
            walk_block(visitor, &while_block.block);
        }
        StmtKind::For(for_block) => {
            match &for_block.initializer {
                Some(ForInit::Declaration(declaration)) => {
                    visitor.visit_node(NodeKind::VariableDeclaration, &declaration.span);
                    walk_declaration(visitor, declaration);
                }
                Some(ForInit::Assignment(assignment)) => {
                    visitor.visit_node(NodeKind::VariableAssignment, &assignment.span);
                    walk_assignment(visitor, assignment);
                }
                None => {}
            }

            if let Some(condition) = &for_block.condition {
                visitor.visit_expr(condition);
            }

            match &for_block.step {
                Some(ForStep::Assignment(assignment)) => {
                    visitor.visit_node(NodeKind::VariableAssignment, &assignment.span);
                    walk_assignment(visitor, assignment);
                }
                Some(ForStep::Expression(expression)) => visitor.visit_expr(expression),
                None => {}
            }

            walk_block(visitor, &for_block.block);
        }
        StmtKind::Return(ret) => {
            if let Some(value) = &ret.value {
                visitor.visit_expr(value);
            }
        }
        StmtKind::Break | StmtKind::Continue => {}
        StmtKind::VariableDeclaration(declaration) => walk_declaration(visitor, declaration),
        StmtKind::VariableAssignment(assignment) => walk_assignment(visitor, assignment),
        StmtKind::Expression(_) => {}
    }
}

fn walk_declaration<V: Visitor>(visitor: &mut V, declaration: &VariableDeclaration) {
    if let Some(declared_type) = &declaration.declared_type {
        visitor.visit_type(declared_type);
    }
    if let Some(initializer) = &declaration.initializer {
        visitor.visit_expr(initializer);
    }
}

fn walk_assignment<V: Visitor>(visitor: &mut V, assignment: &VariableAssignment) {
    visitor.visit_expr(&assignment.target);
    visitor.visit_expr(&assignment.value);
}

pub fn walk_expr<V: Visitor>(visitor: &mut V, expr: &Expr) {
    visitor.visit_node(expr.kind(), &expr.span);

    match &expr.node {
        ExprKind::BinaryOperator(binary) => {
            visitor.visit_expr(&binary.left);
            visitor.visit_expr(&binary.right);
        }
        ExprKind::UnaryOperator(unary) => visitor.visit_expr(&unary.operand),
        ExprKind::Literal(_) | ExprKind::Identifier(_) => {}
        ExprKind::ArrayAccess(access) => {
            visitor.visit_expr(&access.array);
            visitor.visit_expr(&access.index);
        }
        ExprKind::ArrayLiteral(array) => {
            for element in &array.elements {
                visitor.visit_expr(element);
            }
        }
        ExprKind::FunctionCall(call) => {
            visitor.visit_expr(&call.callee);
            for argument in &call.arguments {
                visitor.visit_expr(argument);
            }
        }
    }
}

pub fn walk_type<V: Visitor>(visitor: &mut V, ty: &Spanned<Type>) {
    visitor.visit_node(ty.kind(), &ty.span);
}

/// Counts nodes per kind.
#[derive(Debug, Default)]
pub struct KindCounter {
    counts: HashMap<NodeKind, usize>,
}

impl KindCounter {
    pub fn get(&self, kind: NodeKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }
}

impl Visitor for KindCounter {
    fn visit_node(&mut self, kind: NodeKind, _span: &Span) {
        *self.counts.entry(kind).or_insert(0) += 1;
    }
}

impl Program {
    /// Number of nodes of `kind` anywhere in the program.
    pub fn count_kind(&self, kind: NodeKind) -> usize {
        let mut counter = KindCounter::default();
        counter.visit_program(self);
        counter.get(kind)
    }
}
