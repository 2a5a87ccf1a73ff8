//! Type parsing implementation.
//!
//! This module handles parsing of type annotations. A type is a name
//! followed by any number of `[]` pairs, one per array dimension.
//!
//! Similar to expression parsing, it uses NUD/LED handlers with binding
//! powers, so new type forms only need another table entry.

use std::collections::HashMap;

use crate::{
    ast::{ast::Spanned, types::Type},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<Spanned<Type>, Error>;

/// Type alias for type left denotation handler functions.
pub type TypeLEDHandler =
    fn(&mut Parser, Spanned<Type>, BindingPower) -> Result<Spanned<Type>, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Type alias for type LED lookup table.
pub type TypeLEDLookup = HashMap<TokenKind, TypeLEDHandler>;

/// Type alias for type binding power lookup table.
pub type TypeBPLookup = HashMap<TokenKind, BindingPower>;

/// Initializes the type parsing lookup tables.
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Identifier, parse_symbol_type);
    parser.type_led(TokenKind::OpenBracket, BindingPower::Postfix, parse_array_type);
}

pub fn parse_symbol_type(parser: &mut Parser) -> Result<Spanned<Type>, Error> {
    let token = parser.expect_error(TokenKind::Identifier, "type name")?;
    Ok(Spanned::type_annotation(token.value, 0, token.span))
}

pub fn parse_array_type(
    parser: &mut Parser,
    left: Spanned<Type>,
    _bp: BindingPower,
) -> Result<Spanned<Type>, Error> {
    parser.expect(TokenKind::OpenBracket)?;
    parser.expect(TokenKind::CloseBracket)?;

    let span = parser.span_from(left.span.start);
    Ok(Spanned::new(Type::array_of(left.node), span))
}

pub fn parse_type(parser: &mut Parser, bp: BindingPower) -> Result<Spanned<Type>, Error> {
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_type_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected("type")),
    };

    let mut left = nud(parser)?;

    loop {
        let token_kind = parser.current_token_kind();
        let next_bp = parser
            .get_type_bp_lookup()
            .get(&token_kind)
            .copied()
            .unwrap_or(BindingPower::Default);
        if next_bp <= bp {
            break;
        }

        let led = match parser.get_type_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => break,
        };

        left = led(parser, left, next_bp)?;
    }

    Ok(left)
}
