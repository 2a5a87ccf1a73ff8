//! Diagnostic collection for a single parse.
//!
//! The parser never aborts on a bad construct. Every problem it finds is
//! recorded here, in source order of discovery, and parsing resumes at the
//! next statement boundary.

use std::{fmt::Display, slice::Iter};

use tracing::debug;

use crate::Span;

use super::errors::{Error, ErrorTip};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Note,
    Warning,
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Note => write!(f, "note"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single reported problem.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub error: Error,
}

impl Diagnostic {
    pub fn span(&self) -> &Span {
        self.error.get_span()
    }

    pub fn message(&self) -> String {
        self.error.get_internal_error().to_string()
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl Display for Diagnostic {
    /// `error[UnexpectedToken] 3:7: expected ';', found "}" (tip)`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}[{}] {}: {}",
            self.severity,
            self.error.get_error_name(),
            self.span().start,
            self.message()
        )?;

        if let ErrorTip::Suggestion(tip) = self.error.get_tip() {
            write!(f, " ({})", tip)?;
        }

        Ok(())
    }
}

/// Ordered list of diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
    /// Number of `Severity::Error` records
    error_count: usize,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics {
            records: vec![],
            error_count: 0,
        }
    }

    pub fn report(&mut self, severity: Severity, error: Error) {
        debug!(
            %severity,
            name = error.get_error_name(),
            line = error.get_span().start.line,
            column = error.get_span().start.column,
            "diagnostic recorded"
        );
        if severity == Severity::Error {
            self.error_count += 1;
        }
        self.records.push(Diagnostic { severity, error });
    }

    pub fn error(&mut self, error: Error) {
        self.report(Severity::Error, error);
    }

    pub fn warning(&mut self, error: Error) {
        self.report(Severity::Warning, error);
    }

    pub fn note(&mut self, error: Error) {
        self.report(Severity::Note, error);
    }

    /// Whether the parse is considered failed.
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter().filter(|d| d.is_error())
    }

    pub fn iter(&self) -> Iter<'_, Diagnostic> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for diagnostic in &self.records {
            writeln!(f, "{}", diagnostic)?;
        }
        Ok(())
    }
}
