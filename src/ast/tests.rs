//! Unit tests for the AST module.
//!
//! Covers node kinds, structural equality, the canonical printer and the
//! visitor.

use crate::{parse_source, Span};

use super::{
    ast::{NodeKind, Spanned},
    expressions::{BinaryOp, Expr, Literal, UnaryOp},
    printer::{print_program, quote},
    statements::{AssignOp, Block, ImportPath, Item, ItemKind, Program, Stmt, StmtKind},
    types::Type,
    visitor::{KindCounter, Visitor},
};

fn program(source: &str) -> Program {
    let ast = parse_source(source, "test.lang");
    assert!(!ast.has_errors(), "unexpected errors:\n{}", ast.get_diagnostics());
    ast.get_program().clone()
}

fn int(value: i64) -> Expr {
    Expr::literal(Literal::Integer(value), Span::null())
}

fn ident(name: &str) -> Expr {
    Expr::identifier(name, Span::null())
}

#[test]
fn test_node_kinds() {
    let call = Expr::call(ident("f"), vec![int(1)], Span::null());
    assert_eq!(call.kind(), NodeKind::FunctionCall);
    assert_eq!(int(1).kind(), NodeKind::Literal);

    let stmt = Stmt::expression(call, Span::null());
    assert_eq!(stmt.kind(), NodeKind::FunctionCall);
    assert_eq!(Stmt::break_stmt(Span::null()).kind(), NodeKind::Break);

    let import = Item::import(ImportPath::module(["std", "io"]), Span::null());
    assert_eq!(import.kind(), NodeKind::Import);

    let ty = Spanned::type_annotation("int", 1, Span::null());
    assert_eq!(ty.kind(), NodeKind::Type);
    assert!(ty.is_array());
}

#[test]
fn test_assignable_expressions() {
    assert!(ident("x").is_assignable());
    assert!(Expr::array_access(ident("a"), int(0), Span::null()).is_assignable());
    assert!(!int(1).is_assignable());
    assert!(!Expr::call(ident("f"), vec![], Span::null()).is_assignable());
}

#[test]
fn test_compound_assignment_operator() {
    assert_eq!(AssignOp::Assign.binary_op(), None);
    assert_eq!(AssignOp::Modulo.binary_op(), Some(BinaryOp::Modulo));
    assert_eq!(AssignOp::Subtract.symbol(), "-=");
}

#[test]
fn test_block_equality_ignores_span() {
    let position = crate::Position::new(4, 1, 5);
    let left = Block::new(vec![Stmt::continue_stmt(Span::null())], Span::null());
    let right = Block::new(
        vec![Stmt::continue_stmt(Span::new(position, position))],
        Span::new(position, position),
    );

    assert_eq!(left, right);
}

#[test]
fn test_print_expressions() {
    let sum = Expr::binary(BinaryOp::Add, int(1), int(2), Span::null());

    let product = Expr::binary(BinaryOp::Multiply, sum.clone(), int(3), Span::null());
    assert_eq!(product.to_string(), "(1 + 2) * 3");

    let nested = Expr::binary(BinaryOp::Subtract, int(10), sum.clone(), Span::null());
    assert_eq!(nested.to_string(), "10 - (1 + 2)");

    let chained = Expr::binary(BinaryOp::Add, sum.clone(), int(3), Span::null());
    assert_eq!(chained.to_string(), "1 + 2 + 3");

    let negated = Expr::unary(UnaryOp::Negate, sum, Span::null());
    assert_eq!(negated.to_string(), "-(1 + 2)");

    let indexed = Expr::array_access(
        Expr::unary(UnaryOp::Not, ident("a"), Span::null()),
        int(0),
        Span::null(),
    );
    assert_eq!(indexed.to_string(), "(!a)[0]");
}

#[test]
fn test_print_literals() {
    assert_eq!(
        Expr::literal(Literal::Float(2.0), Span::null()).to_string(),
        "2.0"
    );
    assert_eq!(
        Expr::literal(Literal::Float(0.25), Span::null()).to_string(),
        "0.25"
    );
    assert_eq!(quote("say \"hi\"\n"), "\"say \\\"hi\\\"\\n\"");
    assert_eq!(quote("\u{7}"), "\"\\x07\"");
}

#[test]
fn test_print_import_paths() {
    assert_eq!(ImportPath::file("std/io").to_string(), "\"std/io\"");
    assert_eq!(ImportPath::module(["std", "math"]).to_string(), "std.math");
    assert_eq!(ImportPath::module(["std", "*"]).to_string(), "std.*");

    let printed = print_program(&program("import std.*; import \"a b\";"));
    assert_eq!(printed, "import std.*;\nimport \"a b\";\n");

    match &program(&printed).items[0].node {
        ItemKind::Import(import) => assert!(import.is_wildcard()),
        other => panic!("expected an import, got {:?}", other),
    }
}

#[test]
fn test_print_type() {
    assert_eq!(Type::array_of(Type::array_of(Type::new("int"))).to_string(), "int[][]");
}

#[test]
fn test_print_program() {
    let source = "import std.io;\nfn main(args: string[]) -> int {\n    let total = 0;\n    for (let i = 0; i < 10; i += 1) {\n        if i % 2 == 0 {\n            continue;\n        } elseif i > 7 {\n            break;\n        } else {\n            total += i;\n        }\n    }\n    when {\n        total > 10 {\n            print(total);\n        }\n        else {}\n    }\n    return total;\n}\n";

    let printed = print_program(&program(source));

    assert_eq!(
        printed,
        "import std.io;\n\nfn main(args: string[]) -> int {\n    let total = 0;\n    for (let i = 0; i < 10; i += 1) {\n        if i % 2 == 0 {\n            continue;\n        } elseif i > 7 {\n            break;\n        } else {\n            total += i;\n        }\n    }\n    when {\n        total > 10 {\n            print(total);\n        }\n        else {}\n    }\n    return total;\n}\n"
    );
}

#[test]
fn test_print_empty_blocks() {
    let printed = print_program(&program("fn main() { while x { } for (;;) { } if a { } else { } }"));

    assert_eq!(
        printed,
        "fn main() {\n    while x {}\n    for (;;) {}\n    if a {} else {}\n}\n"
    );
}

#[test]
fn test_print_statement_display() {
    let body = program("fn main() { a[i] -= 2; }")
        .function("main")
        .unwrap()
        .body
        .clone();

    assert_eq!(body.body[0].to_string(), "a[i] -= 2;");
    assert!(matches!(body.body[0].node, StmtKind::VariableAssignment(_)));
}

#[test]
fn test_round_trip() {
    let source = r#"
        import "std/io";
        import std.collections.*;
        const LIMIT: int = 100;
        let names: string[] = ["a\tb", "c"];

        fn fib(n: int) -> int {
            if n <= 1 { return n; } else if n == 2 { return 1; }
            return fib(n - 1) + fib(n - 2);
        }

        fn main() {
            let xs = [1, 2 * (3 + 4), -5];
            let flag = !(a && b) || c != d;
            xs[0] = xs[1] / 2 % 3;
            while flag { flag = false; }
            for (i = 0; ; tick(i)) { break; }
            print(fib(10), 1.5, true);
        }
    "#;

    let parsed = program(source);
    let printed = print_program(&parsed);
    let reparsed = program(&printed);

    assert_eq!(parsed, reparsed);
    // Printing is a fixpoint
    assert_eq!(print_program(&reparsed), printed);
}

#[test]
fn test_visitor_counts() {
    let parsed = program(
        "fn main() { if a { } elseif b { } else if c { } else { } while x { x = x - 1; } }",
    );

    assert_eq!(parsed.count_kind(NodeKind::Program), 1);
    assert_eq!(parsed.count_kind(NodeKind::Function), 1);
    assert_eq!(parsed.count_kind(NodeKind::IfBlock), 1);
    assert_eq!(parsed.count_kind(NodeKind::ElseIfBlock), 2);
    assert_eq!(parsed.count_kind(NodeKind::ElseBlock), 1);
    assert_eq!(parsed.count_kind(NodeKind::WhileBlock), 1);
    assert_eq!(parsed.count_kind(NodeKind::VariableAssignment), 1);
    assert_eq!(parsed.count_kind(NodeKind::BinaryOperator), 1);
    // a, b, c, x, x, x
    assert_eq!(parsed.count_kind(NodeKind::Identifier), 6);
}

#[test]
fn test_visitor_source_order() {
    #[derive(Default)]
    struct Names(Vec<String>);

    impl Visitor for Names {
        fn visit_expr(&mut self, expr: &Expr) {
            if let super::expressions::ExprKind::Identifier(identifier) = &expr.node {
                self.0.push(identifier.name.clone());
            }
            super::visitor::walk_expr(self, expr);
        }
    }

    let parsed = program("fn main() { let a = b + c; d(e[f]); }");
    let mut names = Names::default();
    names.visit_program(&parsed);

    assert_eq!(names.0, vec!["b", "c", "d", "e", "f"]);

    let mut counter = KindCounter::default();
    counter.visit_program(&parsed);
    assert_eq!(counter.get(NodeKind::ArrayAccess), 1);
    assert_eq!(counter.get(NodeKind::Type), 0);
}
