use tracing::trace;

use crate::{
    ast::{
        ast::Spanned,
        expressions::Expr,
        statements::{
            AssignOp, Block, ElseBlock, ElseIfBlock, ForInit, ForStep, ImportPath, ImportSegment,
            Item, Parameter, Stmt, VariableAssignment, VariableDeclaration, WhenArm,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Position,
};

use super::{parser::Parser, types::parse_type};

// ITEMS

pub fn parse_item(parser: &mut Parser) -> Result<Item, Error> {
    let kind = parser.current_token_kind();
    trace!(token = %kind, "item");

    match parser.get_item_lookup().get(&kind) {
        Some(handler) => {
            let handler = *handler;
            handler(parser)
        }
        None => Err(parser.unexpected("top-level item (fn, import, let or const)")),
    }
}

pub fn parse_fn_item(parser: &mut Parser) -> Result<Item, Error> {
    let start = parser.advance().span.start;

    let name = parser.expect_error(TokenKind::Identifier, "function name")?.value;

    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = Vec::new();
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            let name = parser.expect_error(TokenKind::Identifier, "parameter name")?.value;
            parser.expect(TokenKind::Colon)?;
            let declared_type = parse_type(parser, BindingPower::Default)?;
            parameters.push(Parameter {
                name,
                declared_type,
            });

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }

            let comma = parser.advance().span;
            if parser.current_token_kind() == TokenKind::CloseParen {
                parser.report(Error::new(
                    ErrorImpl::TrailingComma {
                        list: String::from("parameter list"),
                    },
                    comma,
                ));
                break;
            }
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let return_type = if parser.current_token_kind() == TokenKind::Arrow {
        parser.advance();
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    // Loops around a function do not reach into its body
    let enclosing_depth = parser.enter_function();
    let body = parse_block(parser);
    parser.exit_function(enclosing_depth);
    let body = body?;

    Ok(Item::function(
        name,
        parameters,
        return_type,
        body,
        parser.span_from(start),
    ))
}

/// `import "path/to/module";`, `import path.to.module;` or `import path.*;`
pub fn parse_import_item(parser: &mut Parser) -> Result<Item, Error> {
    let start = parser.advance().span.start;

    let path = match parser.current_token_kind() {
        TokenKind::String if !parser.current_token().value.is_empty() => {
            ImportPath::file(parser.advance().value.clone())
        }
        TokenKind::Identifier => {
            let mut segments = vec![ImportSegment::Name(parser.advance().value.clone())];
            while parser.current_token_kind() == TokenKind::Dot {
                parser.advance();
                if parser.current_token_kind() == TokenKind::Star {
                    parser.advance();
                    segments.push(ImportSegment::Wildcard);
                    break;
                }
                let name = parser.expect_error(TokenKind::Identifier, "module name or `*`")?;
                segments.push(ImportSegment::Name(name.value));
            }
            ImportPath::Module(segments)
        }
        _ => return Err(parser.unexpected("module path")),
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Item::import(path, parser.span_from(start)))
}

pub fn parse_var_decl_item(parser: &mut Parser) -> Result<Item, Error> {
    let start = parser.current_token().span.start;
    let declaration = parse_var_decl(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Item::declaration(Spanned::new(
        declaration.node,
        parser.span_from(start),
    )))
}

// STATEMENTS

/// Parses one statement.
///
/// Returns `Ok(None)` for input that yields no node: an empty statement,
/// or an `else` chain without an `if` (reported, parsed, then dropped).
pub fn parse_stmt(parser: &mut Parser) -> Result<Option<Stmt>, Error> {
    let kind = parser.current_token_kind();
    trace!(token = %kind, "statement");

    match kind {
        TokenKind::Else | TokenKind::ElseIf => {
            parse_dangling_else(parser)?;
            return Ok(None);
        }
        TokenKind::Semicolon => {
            let span = parser.advance().span;
            parser.warn(Error::new(ErrorImpl::EmptyStatement, span));
            return Ok(None);
        }
        _ => {}
    }

    if let Some(handler) = parser.get_stmt_lookup().get(&kind) {
        let handler = *handler;
        return handler(parser).map(Some);
    }

    parse_expression_stmt(parser).map(Some)
}

/// `{ statements }`. Statements that fail are reported and skipped, the
/// block itself only fails when its braces are missing.
pub fn parse_block(parser: &mut Parser) -> Result<Block, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;

    let mut body = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly
        && parser.has_tokens()
        && !parser.limit_reached()
    {
        let stmt_start = parser.pos();
        match parse_stmt(parser) {
            Ok(Some(stmt)) => body.push(stmt),
            Ok(None) => {}
            Err(error) => {
                parser.report(error);
                parser.synchronize_stmt(stmt_start);
            }
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Block::new(body, parser.span_from(start)))
}

/// Block of a loop body, where `break` and `continue` are allowed.
fn parse_loop_body(parser: &mut Parser) -> Result<Block, Error> {
    parser.enter_loop();
    let block = parse_block(parser);
    parser.exit_loop();
    block
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.current_token().span.start;
    let expression = parse_expr(parser, BindingPower::Default)?;

    if AssignOp::from_token(parser.current_token_kind()).is_some() {
        let assignment = parse_assignment(parser, expression)?;
        parser.expect(TokenKind::Semicolon)?;
        return Ok(Stmt::assignment(Spanned::new(
            assignment.node,
            parser.span_from(start),
        )));
    }

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::expression(expression, parser.span_from(start)))
}

/// Parses `op value` after an already parsed assignment target.
fn parse_assignment(
    parser: &mut Parser,
    target: Expr,
) -> Result<Spanned<VariableAssignment>, Error> {
    let operator = match AssignOp::from_token(parser.current_token_kind()) {
        Some(operator) => operator,
        None => return Err(parser.unexpected("assignment operator")),
    };

    if !target.is_assignable() {
        return Err(Error::new(ErrorImpl::InvalidAssignmentTarget, target.span));
    }

    parser.advance();
    let value = parse_expr(parser, BindingPower::Default)?;
    let span = target.span.to(&value.span);

    Ok(Spanned::new(
        VariableAssignment {
            target,
            operator,
            value,
        },
        span,
    ))
}

/// `let name: type = value` or `const ...`, without the semicolon.
fn parse_var_decl(parser: &mut Parser) -> Result<Spanned<VariableDeclaration>, Error> {
    let start_token = parser.advance().clone();
    let is_constant = start_token.kind == TokenKind::Const;

    let name = parser
        .expect_error(TokenKind::Identifier, "variable name")?
        .value;

    let declared_type = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    let initializer = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    let span = parser.span_from(start_token.span.start);

    if is_constant && initializer.is_none() {
        parser.report(Error::new(
            ErrorImpl::ConstWithoutValue { name: name.clone() },
            span,
        ));
    }

    Ok(Spanned::new(
        VariableDeclaration {
            name,
            is_constant,
            declared_type,
            initializer,
        },
        span,
    ))
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.current_token().span.start;
    let declaration = parse_var_decl(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::declaration(Spanned::new(
        declaration.node,
        parser.span_from(start),
    )))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let condition = parse_expr(parser, BindingPower::Default)?;
    let then_block = parse_block(parser)?;

    let mut else_ifs = Vec::new();
    let mut else_block = None;

    loop {
        match (parser.current_token_kind(), parser.peek_kind(1)) {
            (TokenKind::ElseIf, _) => {
                let clause_start = parser.advance().span.start;
                else_ifs.push(parse_else_if_clause(parser, clause_start)?);
            }
            (TokenKind::Else, TokenKind::If) => {
                let clause_start = parser.advance().span.start;
                parser.advance();
                else_ifs.push(parse_else_if_clause(parser, clause_start)?);
            }
            (TokenKind::Else, _) => {
                let clause_start = parser.advance().span.start;
                let block = parse_block(parser)?;
                else_block = Some(Spanned::new(
                    ElseBlock { block },
                    parser.span_from(clause_start),
                ));
                break;
            }
            _ => break,
        }
    }

    Ok(Stmt::if_block(
        condition,
        then_block,
        else_ifs,
        else_block,
        parser.span_from(start),
    ))
}

/// Condition and block of an `elseif`, the keyword is already consumed.
fn parse_else_if_clause(
    parser: &mut Parser,
    start: Position,
) -> Result<Spanned<ElseIfBlock>, Error> {
    let condition = parse_expr(parser, BindingPower::Default)?;
    let block = parse_block(parser)?;

    Ok(Spanned::new(
        ElseIfBlock { condition, block },
        parser.span_from(start),
    ))
}

/// Reports an `else`/`elseif` that does not follow an `if`, then consumes
/// the whole clause chain so it does not produce follow-up errors.
fn parse_dangling_else(parser: &mut Parser) -> Result<(), Error> {
    let token = parser.current_token().clone();
    parser.report(Error::new(
        ErrorImpl::DanglingElse {
            clause: token.value,
        },
        token.span,
    ));

    loop {
        match (parser.current_token_kind(), parser.peek_kind(1)) {
            (TokenKind::ElseIf, _) => {
                let clause_start = parser.advance().span.start;
                parse_else_if_clause(parser, clause_start)?;
            }
            (TokenKind::Else, TokenKind::If) => {
                let clause_start = parser.advance().span.start;
                parser.advance();
                parse_else_if_clause(parser, clause_start)?;
            }
            (TokenKind::Else, _) => {
                parser.advance();
                parse_block(parser)?;
                break;
            }
            _ => break,
        }
    }

    Ok(())
}

/// `when { condition { ... } ... else { ... } }`
pub fn parse_when_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;
    parser.expect(TokenKind::OpenCurly)?;

    let mut arms = Vec::new();
    let mut default = None;

    while parser.current_token_kind() != TokenKind::CloseCurly && parser.has_tokens() {
        if parser.current_token_kind() == TokenKind::Else {
            let else_span = parser.advance().span;
            let block = parse_block(parser)?;

            if default.is_some() || parser.current_token_kind() != TokenKind::CloseCurly {
                parser.report(Error::new(ErrorImpl::MisplacedWhenDefault, else_span));
            }
            if default.is_none() {
                default = Some(block);
            }
            continue;
        }

        let condition = parse_expr(parser, BindingPower::Default)?;
        let block = parse_block(parser)?;
        arms.push(WhenArm { condition, block });
    }

    parser.expect(TokenKind::CloseCurly)?;
    let span = parser.span_from(start);

    if arms.is_empty() {
        parser.report(Error::new(ErrorImpl::EmptyWhen, span));
    }

    Ok(Stmt::when_block(arms, default, span))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let condition = parse_expr(parser, BindingPower::Default)?;
    let block = parse_loop_body(parser)?;

    Ok(Stmt::while_block(condition, block, parser.span_from(start)))
}

/// `for (init; condition; step) { ... }` where each header part may be empty.
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;
    parser.expect(TokenKind::OpenParen)?;

    let initializer = match parser.current_token_kind() {
        TokenKind::Semicolon => None,
        TokenKind::Let | TokenKind::Const => Some(ForInit::Declaration(parse_var_decl(parser)?)),
        _ => {
            let target = parse_expr(parser, BindingPower::Default)?;
            Some(ForInit::Assignment(parse_assignment(parser, target)?))
        }
    };
    parser.expect(TokenKind::Semicolon)?;

    let condition = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };
    parser.expect(TokenKind::Semicolon)?;

    let step = if parser.current_token_kind() != TokenKind::CloseParen {
        let expression = parse_expr(parser, BindingPower::Default)?;
        if AssignOp::from_token(parser.current_token_kind()).is_some() {
            Some(ForStep::Assignment(parse_assignment(parser, expression)?))
        } else {
            Some(ForStep::Expression(expression))
        }
    } else {
        None
    };
    parser.expect(TokenKind::CloseParen)?;

    let block = parse_loop_body(parser)?;

    Ok(Stmt::for_block(
        initializer,
        condition,
        step,
        block,
        parser.span_from(start),
    ))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let value = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::return_stmt(value, parser.span_from(start)))
}

/// `break;` and `continue;`
pub fn parse_jump_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.advance().clone();
    parser.expect(TokenKind::Semicolon)?;
    let span = parser.span_from(token.span.start);

    if parser.get_options().check_loop_jumps && !parser.in_loop() {
        parser.report(Error::new(
            ErrorImpl::JumpOutsideLoop {
                keyword: token.value,
            },
            token.span,
        ));
    }

    match token.kind {
        TokenKind::Continue => Ok(Stmt::continue_stmt(span)),
        _ => Ok(Stmt::break_stmt(span)),
    }
}
