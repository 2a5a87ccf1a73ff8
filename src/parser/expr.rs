use crate::{
    ast::{
        ast::Spanned,
        expressions::{BinaryOp, Expr, Literal, UnaryOp},
        types::LiteralType,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

/// Pratt loop: parses a prefix expression, then keeps extending it with
/// infix and postfix handlers that bind tighter than `bp`.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected("expression")),
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let next_bp = parser
            .get_bp_lookup()
            .get(&token_kind)
            .copied()
            .unwrap_or(BindingPower::Default);
        if next_bp <= bp {
            break;
        }

        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => break,
        };

        left = led(parser, left, next_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance().clone();

    match token.kind {
        TokenKind::Number => Ok(parse_number(parser, &token)),
        TokenKind::String => Ok(Expr::literal(Literal::String(token.value), token.span)),
        TokenKind::True => Ok(Expr::literal(Literal::Boolean(true), token.span)),
        TokenKind::False => Ok(Expr::literal(Literal::Boolean(false), token.span)),
        TokenKind::Identifier => Ok(Expr::identifier(token.value, token.span)),
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken {
                expected: String::from("expression"),
                found: token.value,
            },
            token.span,
        )),
    }
}

/// Numbers with a fractional part are floats, everything else an `i64`.
/// A literal that does not fit is reported and replaced by zero.
fn parse_number(parser: &mut Parser, token: &Token) -> Expr {
    let parsed = if token.value.contains('.') {
        token
            .value
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(Literal::Float)
    } else {
        token.value.parse::<i64>().ok().map(Literal::Integer)
    };

    let literal = match parsed {
        Some(literal) => literal,
        None => {
            parser.report(Error::new(
                ErrorImpl::NumberParseError {
                    token: token.value.clone(),
                },
                token.span,
            ));

            if token.value.contains('.') {
                Literal::placeholder(LiteralType::Float)
            } else {
                Literal::placeholder(LiteralType::Integer)
            }
        }
    };

    Expr::literal(literal, token.span)
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let operator = BinaryOp::from_token(operator_token.kind).ok_or_else(|| {
        Error::new(
            ErrorImpl::UnexpectedToken {
                expected: String::from("binary operator"),
                found: operator_token.value.clone(),
            },
            operator_token.span,
        )
    })?;

    // Same binding power on the right keeps operators left-associative
    let right = parse_expr(parser, bp)?;
    let span = left.span.to(&right.span);

    Ok(Expr::binary(operator, left, right, span))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let operator = UnaryOp::from_token(operator_token.kind).ok_or_else(|| {
        Error::new(
            ErrorImpl::UnexpectedToken {
                expected: String::from("unary operator"),
                found: operator_token.value.clone(),
            },
            operator_token.span,
        )
    })?;

    let operand = parse_expr(parser, BindingPower::Unary)?;
    let span = operator_token.span.to(&operand.span);

    Ok(Expr::unary(operator, operand, span))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(Spanned::new(expr.node, parser.span_from(start)))
}

pub fn parse_array_literal_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start;
    let elements = parse_expr_list(parser, TokenKind::CloseBracket, "array literal")?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(Expr::array_literal(elements, parser.span_from(start)))
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();

    let arguments = parse_expr_list(parser, TokenKind::CloseParen, "argument list")?;
    parser.expect(TokenKind::CloseParen)?;

    let span = parser.span_from(left.span.start);
    Ok(Expr::call(left, arguments, span))
}

pub fn parse_array_access_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    parser.advance();

    let index = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    let span = parser.span_from(left.span.start);
    Ok(Expr::array_access(left, index, span))
}

/// Comma separated expressions up to, but not including, `close`.
///
/// The list may be empty. A comma directly before `close` is reported as a
/// trailing comma and otherwise ignored.
pub fn parse_expr_list(
    parser: &mut Parser,
    close: TokenKind,
    list: &str,
) -> Result<Vec<Expr>, Error> {
    let mut items = vec![];
    if parser.current_token_kind() == close {
        return Ok(items);
    }

    loop {
        items.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }

        let comma: Span = parser.advance().span;
        if parser.current_token_kind() == close {
            parser.report(Error::new(
                ErrorImpl::TrailingComma {
                    list: list.to_string(),
                },
                comma,
            ));
            break;
        }
    }

    Ok(items)
}
