use std::fmt::Display;

use thiserror::Error;

use crate::Span;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    span: Span,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, span: Span) -> Self {
        Error {
            internal_error: error_impl,
            span,
        }
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedEof { .. } => "UnexpectedEof",
            ErrorImpl::InvalidAssignmentTarget => "InvalidAssignmentTarget",
            ErrorImpl::TrailingComma { .. } => "TrailingComma",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::DanglingElse { .. } => "DanglingElse",
            ErrorImpl::JumpOutsideLoop { .. } => "JumpOutsideLoop",
            ErrorImpl::EmptyWhen => "EmptyWhen",
            ErrorImpl::MisplacedWhenDefault => "MisplacedWhenDefault",
            ErrorImpl::ConstWithoutValue { .. } => "ConstWithoutValue",
            ErrorImpl::EmptyStatement => "EmptyStatement",
            ErrorImpl::TooManyErrors { .. } => "TooManyErrors",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { expected, found } if expected == "';'" => {
                ErrorTip::Suggestion(format!(
                    "Unexpected token: `{}`, did you miss a semicolon?",
                    found
                ))
            }
            ErrorImpl::UnexpectedToken { expected, found } => ErrorTip::Suggestion(format!(
                "Expected {}, found `{}`",
                expected, found
            )),
            ErrorImpl::UnexpectedEof { expected } => ErrorTip::Suggestion(format!(
                "Input ended while expecting {}, is a closing brace missing?",
                expected
            )),
            ErrorImpl::InvalidAssignmentTarget => ErrorTip::Suggestion(String::from(
                "Only variables and array elements can be assigned to",
            )),
            ErrorImpl::TrailingComma { list } => {
                ErrorTip::Suggestion(format!("Remove the trailing comma in the {}", list))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::DanglingElse { clause } => ErrorTip::Suggestion(format!(
                "`{}` must directly follow an `if` or `elseif` block",
                clause
            )),
            ErrorImpl::JumpOutsideLoop { keyword } => ErrorTip::Suggestion(format!(
                "`{}` can only be used inside a `while` or `for` loop",
                keyword
            )),
            ErrorImpl::EmptyWhen => ErrorTip::Suggestion(String::from(
                "A `when` block needs at least one condition arm",
            )),
            ErrorImpl::MisplacedWhenDefault => ErrorTip::Suggestion(String::from(
                "The `else` arm must be the last arm of a `when` block",
            )),
            ErrorImpl::ConstWithoutValue { name } => {
                ErrorTip::Suggestion(format!("Constant `{}` needs an initial value", name))
            }
            ErrorImpl::EmptyStatement => ErrorTip::Suggestion(String::from(
                "This semicolon does nothing and can be removed",
            )),
            ErrorImpl::TooManyErrors { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.internal_error, self.span.start)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("expected {expected}, found {found:?}")]
    UnexpectedToken { expected: String, found: String },
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },
    #[error("invalid assignment target")]
    InvalidAssignmentTarget,
    #[error("trailing comma in {list}")]
    TrailingComma { list: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("`{clause}` without a preceding `if`")]
    DanglingElse { clause: String },
    #[error("`{keyword}` outside of a loop")]
    JumpOutsideLoop { keyword: String },
    #[error("`when` block without any arms")]
    EmptyWhen,
    #[error("`else` arm is not the last arm of a `when` block")]
    MisplacedWhenDefault,
    #[error("constant {name:?} declared without a value")]
    ConstWithoutValue { name: String },
    #[error("empty statement")]
    EmptyStatement,
    #[error("too many errors, stopped after {limit}")]
    TooManyErrors { limit: usize },
}

impl ErrorImpl {
    /// Whether the error is about the shape of the program rather than about
    /// an individual token.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ErrorImpl::DanglingElse { .. }
                | ErrorImpl::JumpOutsideLoop { .. }
                | ErrorImpl::EmptyWhen
                | ErrorImpl::MisplacedWhenDefault
                | ErrorImpl::ConstWithoutValue { .. }
        )
    }
}
