//! Unit tests for error handling.
//!
//! This module contains tests for error types and diagnostic reporting.

use crate::errors::diagnostics::{Diagnostics, Severity};
use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::{Position, Span};

fn span_at(line: u32, column: u32) -> Span {
    let position = Position::new(0, line, column);
    Span::new(position, position)
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        span_at(1, 10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_error_span() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: "expression".to_string(),
            found: ";".to_string(),
        },
        span_at(4, 2),
    );

    assert_eq!(error.get_span().start.line, 4);
    assert_eq!(error.get_span().start.column, 2);
}

#[test]
fn test_unexpected_token_message_names_both_sides() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: "identifier".to_string(),
            found: "=".to_string(),
        },
        span_at(1, 5),
    );

    assert_eq!(
        error.get_internal_error().to_string(),
        "expected identifier, found \"=\""
    );
}

#[test]
fn test_semicolon_tip() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: "';'".to_string(),
            found: "}".to_string(),
        },
        span_at(1, 1),
    );

    assert_eq!(
        error.get_tip().to_string(),
        "Unexpected token: `}`, did you miss a semicolon?"
    );
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        span_at(1, 1),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_structural_errors() {
    assert!(ErrorImpl::DanglingElse {
        clause: "else".to_string()
    }
    .is_structural());
    assert!(ErrorImpl::JumpOutsideLoop {
        keyword: "break".to_string()
    }
    .is_structural());
    assert!(!ErrorImpl::InvalidAssignmentTarget.is_structural());
}

#[test]
fn test_diagnostics_track_severity() {
    let mut diagnostics = Diagnostics::new();
    assert!(!diagnostics.has_errors());

    diagnostics.warning(Error::new(ErrorImpl::EmptyStatement, span_at(1, 1)));
    assert!(!diagnostics.has_errors());
    assert_eq!(diagnostics.len(), 1);

    diagnostics.error(Error::new(ErrorImpl::EmptyWhen, span_at(2, 1)));
    assert!(diagnostics.has_errors());
    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(diagnostics.len(), 2);
}

#[test]
fn test_error_count_skips_notes_and_warnings() {
    let mut diagnostics = Diagnostics::new();
    for line in 1..=3 {
        diagnostics.error(Error::new(ErrorImpl::EmptyWhen, span_at(line, 1)));
        diagnostics.warning(Error::new(ErrorImpl::EmptyStatement, span_at(line, 2)));
    }
    diagnostics.note(Error::new(ErrorImpl::TooManyErrors { limit: 3 }, span_at(3, 1)));

    assert_eq!(diagnostics.error_count(), 3);
    assert_eq!(diagnostics.errors().count(), diagnostics.error_count());
    assert_eq!(diagnostics.len(), 7);
}

#[test]
fn test_diagnostics_keep_order() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.error(Error::new(ErrorImpl::EmptyWhen, span_at(3, 1)));
    diagnostics.note(Error::new(ErrorImpl::TooManyErrors { limit: 1 }, span_at(5, 1)));

    let severities: Vec<Severity> = diagnostics.iter().map(|d| d.severity).collect();
    assert_eq!(severities, vec![Severity::Error, Severity::Note]);
    assert_eq!(diagnostics.errors().count(), 1);
}

#[test]
fn test_diagnostic_display() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.error(Error::new(
        ErrorImpl::JumpOutsideLoop {
            keyword: "break".to_string(),
        },
        span_at(3, 7),
    ));

    let rendered = diagnostics.iter().next().unwrap().to_string();
    assert_eq!(
        rendered,
        "error[JumpOutsideLoop] 3:7: `break` outside of a loop (`break` can only be used inside a `while` or `for` loop)"
    );
}
