//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the parse entry points.
//! The parser uses a Pratt parser approach with NUD/LED handlers for
//! expression parsing and table driven dispatch for statements and items.
//!
//! It maintains lookup tables for:
//! - Top-level item handlers
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix and postfix expressions
//! - Binding powers for operator precedence
//! - Type parsing handlers
//!
//! Errors never abort the parse. Handlers return `Err` for the construct
//! they cannot finish, the enclosing item or statement loop records it and
//! skips ahead to the next boundary.

use std::collections::HashMap;

use tracing::{debug, instrument, trace};

use crate::{
    ast::{ast::AST, statements::Program},
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorImpl},
    },
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, ItemHandler, ItemLookup, LEDHandler,
        LEDLookup, NUDHandler, NUDLookup, StmtHandler, StmtLookup,
    },
    options::ParserOptions,
    stmt::parse_item,
    types::{
        create_token_type_lookups, TypeBPLookup, TypeLEDHandler, TypeLEDLookup, TypeNUDHandler,
        TypeNUDLookup,
    },
};

/// Keywords that begin a statement. Statement recovery stops in front of them.
const STATEMENT_KEYWORDS: [TokenKind; 9] = [
    TokenKind::Let,
    TokenKind::Const,
    TokenKind::If,
    TokenKind::When,
    TokenKind::While,
    TokenKind::For,
    TokenKind::Return,
    TokenKind::Break,
    TokenKind::Continue,
];

/// Keywords that begin a top-level item.
const ITEM_KEYWORDS: [TokenKind; 4] = [
    TokenKind::Fn,
    TokenKind::Import,
    TokenKind::Let,
    TokenKind::Const,
];

/// The main parser structure that maintains parsing state.
///
/// This struct holds the token stream and maintains lookup tables for
/// parsing items, statements, expressions, and types. It also owns the
/// diagnostics of the parse and the loop nesting used to validate `break`
/// and `continue`.
pub struct Parser {
    /// The list of tokens to parse, always ending in `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// The name of the source file being parsed
    file: String,
    options: ParserOptions,
    diagnostics: Diagnostics,
    /// Set once `error_limit` errors were recorded
    limit_reached: bool,
    /// Start of the most recently recorded error
    last_error_start: Option<Position>,
    /// Number of loops enclosing the current statement
    loop_depth: usize,
    /// End of the last consumed token
    prev_end: Position,
    /// Lookup table for top-level item handlers
    item_lookup: ItemLookup,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Lookup table for type null denotation handlers
    type_nud_lookup: TypeNUDLookup,
    /// Lookup table for type left denotation handlers
    type_led_lookup: TypeLEDLookup,
    /// Lookup table for type binding powers
    type_binding_power_lookup: TypeBPLookup,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// An `EOF` token is appended when the stream does not already end in one.
    /// The lookup tables start out empty, see [`create_token_lookups`] and
    /// [`create_token_type_lookups`].
    pub fn new(mut tokens: Vec<Token>, file: &str, options: ParserOptions) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|token| token.span.end)
                .unwrap_or_else(Position::null);
            tokens.push(Token::new(TokenKind::EOF, "EOF", Span::new(end, end)));
        }

        let prev_end = tokens[0].span.start;

        Parser {
            tokens,
            pos: 0,
            file: file.to_string(),
            options,
            diagnostics: Diagnostics::new(),
            limit_reached: false,
            last_error_start: None,
            loop_depth: 0,
            prev_end,
            item_lookup: HashMap::new(),
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            type_nud_lookup: HashMap::new(),
            type_led_lookup: HashMap::new(),
            type_binding_power_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Kind of the token `n` positions ahead, `EOF` past the end.
    pub fn peek_kind(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|token| token.kind)
            .unwrap_or(TokenKind::EOF)
    }

    /// Advances to the next token and returns the previous token.
    ///
    /// The parser never moves past `EOF`.
    pub fn advance(&mut self) -> &Token {
        let index = self.pos;
        if self.tokens[index].kind != TokenKind::EOF {
            self.pos += 1;
        }
        self.prev_end = self.tokens[index].span.end;
        &self.tokens[index]
    }

    /// Expects a token of the specified kind, describing the expectation as
    /// `expected` in the error.
    pub fn expect_error(&mut self, expected_kind: TokenKind, expected: &str) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            return Err(self.unexpected(expected));
        }

        Ok(self.advance().clone())
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, &expected_kind.describe())
    }

    /// Error for the current token when `expected` was required instead.
    pub fn unexpected(&self, expected: &str) -> Error {
        let token = self.current_token();
        let internal_error = match token.kind {
            TokenKind::EOF => ErrorImpl::UnexpectedEof {
                expected: expected.to_string(),
            },
            _ => ErrorImpl::UnexpectedToken {
                expected: expected.to_string(),
                found: token.value.clone(),
            },
        };

        Error::new(internal_error, token.span)
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Index of the current token, used as a recovery anchor.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Span from `start` to the end of the last consumed token.
    pub fn span_from(&self, start: Position) -> Span {
        Span::new(start, self.prev_end)
    }

    pub fn get_file(&self) -> &str {
        &self.file
    }

    pub fn get_options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn get_diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn limit_reached(&self) -> bool {
        self.limit_reached
    }

    /// Records an error.
    ///
    /// An error starting where the previous error started is dropped, one
    /// missing brace at the end of input would otherwise be reported by
    /// every enclosing block. Once the error limit is hit a single
    /// `TooManyErrors` note is added and later errors are ignored.
    pub fn report(&mut self, error: Error) {
        if self.limit_reached {
            return;
        }

        let start = error.get_span().start;
        if self.last_error_start == Some(start) {
            debug!(name = error.get_error_name(), "dropping repeated error");
            return;
        }

        let span = *error.get_span();
        self.last_error_start = Some(start);
        self.diagnostics.error(error);

        if let Some(limit) = self.options.error_limit {
            let limit = limit.get();
            if self.diagnostics.error_count() >= limit {
                self.diagnostics
                    .note(Error::new(ErrorImpl::TooManyErrors { limit }, span));
                self.limit_reached = true;
            }
        }
    }

    pub fn warn(&mut self, warning: Error) {
        if !self.limit_reached {
            self.diagnostics.warning(warning);
        }
    }

    // LOOP NESTING

    pub fn enter_loop(&mut self) {
        self.loop_depth += 1;
    }

    pub fn exit_loop(&mut self) {
        self.loop_depth = self.loop_depth.saturating_sub(1);
    }

    pub fn in_loop(&self) -> bool {
        self.loop_depth > 0
    }

    /// Starts a function body, where no enclosing loop is visible. Returns the
    /// depth to hand back to [`Parser::exit_function`].
    pub fn enter_function(&mut self) -> usize {
        std::mem::replace(&mut self.loop_depth, 0)
    }

    pub fn exit_function(&mut self, enclosing_depth: usize) {
        self.loop_depth = enclosing_depth;
    }

    // RECOVERY

    /// Skips to the next statement boundary after an error in a statement
    /// that started at token index `start`.
    ///
    /// Stops after a `;` or after a skipped `{ ... }` group, and in front of
    /// the enclosing `}` or a statement keyword. A `;` or keyword inside an
    /// unclosed `(` or `[` does not end the statement, so a broken `for`
    /// header or argument list is skipped as a whole. At least one token is
    /// consumed unless the parser already sits on `}` or `EOF`.
    pub fn synchronize_stmt(&mut self, start: usize) {
        let mut depth = 0usize;
        let mut nesting = self.open_groups(start);

        loop {
            let kind = self.current_token_kind();
            match kind {
                TokenKind::EOF => break,
                TokenKind::Semicolon if depth == 0 && nesting == 0 => {
                    self.advance();
                    break;
                }
                // Braces never appear inside parentheses, so this `}` closes
                // the enclosing block whatever `nesting` says.
                TokenKind::CloseCurly if depth == 0 => break,
                TokenKind::CloseCurly => {
                    depth -= 1;
                    self.advance();
                    if depth == 0 {
                        break;
                    }
                }
                TokenKind::OpenCurly => {
                    if depth == 0 {
                        nesting = 0;
                    }
                    depth += 1;
                    self.advance();
                }
                TokenKind::OpenParen | TokenKind::OpenBracket if depth == 0 => {
                    nesting += 1;
                    self.advance();
                }
                TokenKind::CloseParen | TokenKind::CloseBracket if depth == 0 => {
                    nesting = nesting.saturating_sub(1);
                    self.advance();
                }
                _ if depth == 0
                    && nesting == 0
                    && self.pos > start
                    && STATEMENT_KEYWORDS.contains(&kind) =>
                {
                    break
                }
                _ => {
                    self.advance();
                }
            }
        }

        debug!(
            skipped = self.pos - start,
            at = %self.current_token().span.start,
            "recovered at statement boundary"
        );
    }

    /// Number of `(` and `[` opened since token index `start` and still
    /// unclosed at the current position, ignoring anything inside braces.
    fn open_groups(&self, start: usize) -> usize {
        let mut depth = 0usize;
        let mut nesting = 0usize;

        for token in &self.tokens[start.min(self.pos)..self.pos] {
            match token.kind {
                TokenKind::OpenCurly => {
                    if depth == 0 {
                        nesting = 0;
                    }
                    depth += 1;
                }
                TokenKind::CloseCurly => depth = depth.saturating_sub(1),
                TokenKind::OpenParen | TokenKind::OpenBracket if depth == 0 => nesting += 1,
                TokenKind::CloseParen | TokenKind::CloseBracket if depth == 0 => {
                    nesting = nesting.saturating_sub(1)
                }
                _ => {}
            }
        }

        nesting
    }

    /// Skips to the next `fn`, `import`, `let` or `const` outside of any
    /// braces, or to the end of input.
    pub fn synchronize_item(&mut self, start: usize) {
        let mut depth = 0usize;

        loop {
            let kind = self.current_token_kind();
            match kind {
                TokenKind::EOF => break,
                TokenKind::OpenCurly => depth += 1,
                TokenKind::CloseCurly => depth = depth.saturating_sub(1),
                _ if depth == 0 && self.pos > start && ITEM_KEYWORDS.contains(&kind) => break,
                _ => {}
            }
            self.advance();
        }

        debug!(
            skipped = self.pos - start,
            at = %self.current_token().span.start,
            "recovered at item boundary"
        );
    }

    // LOOKUPS

    pub fn get_item_lookup(&self) -> &ItemLookup {
        &self.item_lookup
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    pub fn get_type_bp_lookup(&self) -> &TypeBPLookup {
        &self.type_binding_power_lookup
    }

    pub fn get_type_nud_lookup(&self) -> &TypeNUDLookup {
        &self.type_nud_lookup
    }

    pub fn get_type_led_lookup(&self) -> &TypeLEDLookup {
        &self.type_led_lookup
    }

    /// Registers a left denotation (infix or postfix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// Binding powers belong to the infix role of a token, so `-` keeps the
    /// additive power registered by `led`.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Registers a top-level item handler for a token.
    pub fn item(&mut self, kind: TokenKind, item_fn: ItemHandler) {
        self.item_lookup.insert(kind, item_fn);
    }

    pub fn type_led(
        &mut self,
        kind: TokenKind,
        binding_power: BindingPower,
        led_fn: TypeLEDHandler,
    ) {
        self.type_binding_power_lookup.insert(kind, binding_power);
        self.type_led_lookup.insert(kind, led_fn);
    }

    pub fn type_nud(&mut self, kind: TokenKind, nud_fn: TypeNUDHandler) {
        self.type_nud_lookup.insert(kind, nud_fn);
    }

    fn finish(self) -> (String, Diagnostics) {
        (self.file, self.diagnostics)
    }
}

/// Parses a stream of tokens into an Abstract Syntax Tree with the default
/// options.
pub fn parse(tokens: Vec<Token>, file: &str) -> AST {
    parse_with_options(tokens, file, ParserOptions::default())
}

/// Parses a stream of tokens into an Abstract Syntax Tree.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes all lookup tables, and parses top-level items until EOF.
/// The returned tree only holds the items that parsed, check
/// [`AST::has_errors`] before relying on it being complete.
#[instrument(skip(tokens, options), fields(tokens = tokens.len()))]
pub fn parse_with_options(tokens: Vec<Token>, file: &str, options: ParserOptions) -> AST {
    let mut parser = Parser::new(tokens, file, options);
    create_token_lookups(&mut parser);
    create_token_type_lookups(&mut parser);

    let start = parser.current_token().span.start;
    let mut items = vec![];

    while parser.has_tokens() && !parser.limit_reached() {
        if parser.current_token_kind() == TokenKind::Semicolon {
            let span = parser.advance().span;
            parser.warn(Error::new(ErrorImpl::EmptyStatement, span));
            continue;
        }

        let item_start = parser.pos();
        match parse_item(&mut parser) {
            Ok(item) => {
                trace!(kind = ?item.kind(), "parsed item");
                items.push(item);
            }
            Err(error) => {
                parser.report(error);
                parser.synchronize_item(item_start);
            }
        }
    }

    let span = Span::new(start, parser.current_token().span.end);
    debug!(
        items = items.len(),
        errors = parser.get_diagnostics().error_count(),
        "parse finished"
    );

    let (file, diagnostics) = parser.finish();
    AST::new(&file, Program::new(items, span), diagnostics)
}
