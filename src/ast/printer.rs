//! Canonical source printer.
//!
//! Produces one statement per line with 4-space indentation and only the
//! parentheses the precedence table requires. Parsing the output yields a
//! tree equal to the one that was printed.

use std::fmt::Display;

use super::{
    ast::Spanned,
    expressions::{Expr, ExprKind, Literal},
    statements::{
        Block, ForInit, ForStep, ImportPath, ImportSegment, Item, ItemKind, Program, Stmt,
        StmtKind, VariableAssignment, VariableDeclaration,
    },
    types::Type,
};

const INDENT: &str = "    ";

/// Binding strength of unary prefix operators, above every binary operator.
const UNARY_PRECEDENCE: u8 = 7;
/// Postfix expressions and atoms.
const PRIMARY_PRECEDENCE: u8 = 8;

pub fn print_program(program: &Program) -> String {
    let mut printer = Printer::new();
    printer.write_program(program);
    printer.finish()
}

struct Printer {
    output: String,
    indent: usize,
}

impl Printer {
    fn new() -> Self {
        Printer {
            output: String::new(),
            indent: 0,
        }
    }

    fn finish(self) -> String {
        self.output
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.output.push_str(INDENT);
        }
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn write_program(&mut self, program: &Program) {
        for (index, item) in program.items.iter().enumerate() {
            if index > 0 && matches!(item.node, ItemKind::Function(_)) {
                self.output.push('\n');
            }
            self.write_item(item);
        }
    }

    fn write_item(&mut self, item: &Item) {
        match &item.node {
            ItemKind::Import(import) => {
                self.line(&format!("import {};", import.path));
            }
            ItemKind::Function(function) => {
                let parameters = function
                    .parameters
                    .iter()
                    .map(|parameter| format!("{}: {}", parameter.name, parameter.declared_type))
                    .collect::<Vec<_>>()
                    .join(", ");

                let mut header = format!("fn {}({})", function.name, parameters);
                if let Some(return_type) = &function.return_type {
                    header.push_str(&format!(" -> {}", return_type));
                }

                self.write_block(&header, &function.body);
            }
            ItemKind::VariableDeclaration(declaration) => {
                self.line(&format!("{};", declaration_text(declaration)));
            }
        }
    }

    /// Writes `header {`, the block body and the closing brace. Empty blocks
    /// print as `header {}`.
    fn write_block(&mut self, header: &str, block: &Block) {
        let opening = format!("{} {{", header);

        if block.is_empty() {
            self.line(&format!("{}}}", opening));
            return;
        }

        self.line(&opening);
        self.indent += 1;
        for stmt in &block.body {
            self.write_stmt(stmt);
        }
        self.indent -= 1;
        self.line("}");
    }

    fn write_stmt(&mut self, stmt: &Stmt) {
        match &stmt.node {
            StmtKind::When(when) => {
                self.line("when {");
                self.indent += 1;
                for arm in &when.arms {
                    self.write_block(&arm.condition.to_string(), &arm.block);
                }
                if let Some(default) = &when.default {
                    self.write_block("else", default);
                }
                self.indent -= 1;
                self.line("}");
            }
            StmtKind::If(if_block) => {
                self.write_chain_start(&format!("if {}", if_block.condition));
                self.write_chain_body(&if_block.then_block);

                for else_if in &if_block.else_ifs {
                    self.write_chain_link(&format!("elseif {}", else_if.condition));
                    self.write_chain_body(&else_if.block);
                }

                if let Some(else_block) = &if_block.else_block {
                    self.write_chain_link("else");
                    self.write_chain_body(&else_block.block);
                }

                self.output.push('\n');
            }
            StmtKind::While(while_block) => {
                self.write_block(
                    &format!("while {}", while_block.condition),
                    &while_block.block,
                );
            }
            StmtKind::For(for_block) => {
                let mut header = String::from("for (");
                match &for_block.initializer {
                    Some(ForInit::Declaration(declaration)) => {
                        header.push_str(&declaration_text(declaration))
                    }
                    Some(ForInit::Assignment(assignment)) => {
                        header.push_str(&assignment_text(assignment))
                    }
                    None => {}
                }
                header.push(';');
                if let Some(condition) = &for_block.condition {
                    header.push_str(&format!(" {}", condition));
                }
                header.push(';');
                match &for_block.step {
                    Some(ForStep::Assignment(assignment)) => {
                        header.push_str(&format!(" {}", assignment_text(assignment)))
                    }
                    Some(ForStep::Expression(expression)) => {
                        header.push_str(&format!(" {}", expression))
                    }
                    None => {}
                }
                header.push(')');

                self.write_block(&header, &for_block.block);
            }
            StmtKind::Return(ret) => match &ret.value {
                Some(value) => self.line(&format!("return {};", value)),
                None => self.line("return;"),
            },
            StmtKind::Break => self.line("break;"),
            StmtKind::Continue => self.line("continue;"),
            StmtKind::VariableDeclaration(declaration) => {
                self.line(&format!("{};", declaration_text(declaration)))
            }
            StmtKind::VariableAssignment(assignment) => {
                self.line(&format!("{};", assignment_text(assignment)))
            }
            StmtKind::Expression(expression) => self.line(&format!("{};", expression)),
        }
    }

    // If chains keep `} elseif ... {` on one line, so the closing brace of
    // each clause is written by the next link instead of by `write_block`.

    fn write_chain_start(&mut self, header: &str) {
        for _ in 0..self.indent {
            self.output.push_str(INDENT);
        }
        self.output.push_str(header);
        self.output.push_str(" {");
    }

    fn write_chain_link(&mut self, header: &str) {
        self.output.push_str(" ");
        self.output.push_str(header);
        self.output.push_str(" {");
    }

    fn write_chain_body(&mut self, block: &Block) {
        if block.is_empty() {
            self.output.push('}');
            return;
        }

        self.output.push('\n');
        self.indent += 1;
        for stmt in &block.body {
            self.write_stmt(stmt);
        }
        self.indent -= 1;
        for _ in 0..self.indent {
            self.output.push_str(INDENT);
        }
        self.output.push('}');
    }
}

fn declaration_text(declaration: &VariableDeclaration) -> String {
    let keyword = if declaration.is_constant { "const" } else { "let" };
    let mut text = format!("{} {}", keyword, declaration.name);

    if let Some(declared_type) = &declaration.declared_type {
        text.push_str(&format!(": {}", declared_type));
    }
    if let Some(initializer) = &declaration.initializer {
        text.push_str(&format!(" = {}", initializer));
    }

    text
}

fn assignment_text(assignment: &VariableAssignment) -> String {
    format!(
        "{} {} {}",
        assignment.target,
        assignment.operator.symbol(),
        assignment.value
    )
}

fn precedence(expr: &Expr) -> u8 {
    match &expr.node {
        ExprKind::BinaryOperator(binary) => binary.operator.precedence(),
        ExprKind::UnaryOperator(_) => UNARY_PRECEDENCE,
        _ => PRIMARY_PRECEDENCE,
    }
}

fn parenthesized(expr: &Expr, needs_parens: bool) -> String {
    if needs_parens {
        format!("({})", expr)
    } else {
        expr.to_string()
    }
}

fn literal_text(literal: &Literal) -> String {
    match literal {
        Literal::Integer(value) => value.to_string(),
        Literal::Float(value) => {
            let text = value.to_string();
            if text.contains('.') {
                text
            } else {
                format!("{}.0", text)
            }
        }
        Literal::String(value) => quote(value),
        Literal::Boolean(value) => value.to_string(),
    }
}

/// Quotes and escapes a string so the lexer reads back the same value.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');

    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            '\0' => quoted.push_str("\\0"),
            c if c.is_ascii_control() => quoted.push_str(&format!("\\x{:02x}", c as u32)),
            c => quoted.push(c),
        }
    }

    quoted.push('"');
    quoted
}

impl Display for Spanned<ExprKind> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.node {
            ExprKind::BinaryOperator(binary) => {
                let own = binary.operator.precedence();
                write!(
                    f,
                    "{} {} {}",
                    parenthesized(&binary.left, precedence(&binary.left) < own),
                    binary.operator.symbol(),
                    parenthesized(&binary.right, precedence(&binary.right) <= own)
                )
            }
            ExprKind::UnaryOperator(unary) => write!(
                f,
                "{}{}",
                unary.operator.symbol(),
                parenthesized(&unary.operand, precedence(&unary.operand) < UNARY_PRECEDENCE)
            ),
            ExprKind::Literal(literal) => write!(f, "{}", literal_text(literal)),
            ExprKind::Identifier(identifier) => write!(f, "{}", identifier.name),
            ExprKind::ArrayAccess(access) => write!(
                f,
                "{}[{}]",
                parenthesized(&access.array, precedence(&access.array) < PRIMARY_PRECEDENCE),
                access.index
            ),
            ExprKind::ArrayLiteral(array) => {
                let elements = array
                    .elements
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>();
                write!(f, "[{}]", elements.join(", "))
            }
            ExprKind::FunctionCall(call) => {
                let arguments = call
                    .arguments
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>();
                write!(
                    f,
                    "{}({})",
                    parenthesized(&call.callee, precedence(&call.callee) < PRIMARY_PRECEDENCE),
                    arguments.join(", ")
                )
            }
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.name, "[]".repeat(self.dimensions))
    }
}

impl Display for Spanned<Type> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.node, f)
    }
}

impl Display for ImportPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportPath::File(path) => f.write_str(&quote(path)),
            ImportPath::Module(segments) => {
                for (index, segment) in segments.iter().enumerate() {
                    if index > 0 {
                        f.write_str(".")?;
                    }
                    match segment {
                        ImportSegment::Name(name) => f.write_str(name)?,
                        ImportSegment::Wildcard => f.write_str("*")?,
                    }
                }
                Ok(())
            }
        }
    }
}

impl Display for Spanned<StmtKind> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut printer = Printer::new();
        printer.write_stmt(self);
        f.write_str(printer.finish().trim_end())
    }
}

impl Display for Spanned<ItemKind> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut printer = Printer::new();
        printer.write_item(self);
        f.write_str(printer.finish().trim_end())
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&print_program(self))
    }
}
