use std::fmt::Display;

use thiserror::Error;

use crate::Span;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    spans: Vec<Span>,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, spans: Vec<Span>) -> Self {
        Error {
            internal_error: error_impl,
            spans,
        }
    }

    /// Errors raised while building a grammar have no position in any input.
    pub fn grammar(message: impl Into<String>) -> Self {
        Error::new(
            ErrorImpl::GrammarDefinitionError {
                message: message.into(),
            },
            vec![],
        )
    }

    pub fn structural(message: impl Into<String>, spans: Vec<Span>) -> Self {
        Error::new(
            ErrorImpl::StructuralUnderflowError {
                message: message.into(),
            },
            spans,
        )
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Character spans of the offending tokens, in the order they were reported.
    pub fn get_spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::GrammarDefinitionError { .. } => "GrammarDefinitionError",
            ErrorImpl::GrammarReadError { .. } => "GrammarReadError",
            ErrorImpl::SyntaxError { .. } => "SyntaxError",
            ErrorImpl::UnmatchedOpenGroup { .. } => "UnmatchedOpenGroup",
            ErrorImpl::UnmatchedCloseGroup { .. } => "UnmatchedCloseGroup",
            ErrorImpl::MismatchedGroupers { .. } => "MismatchedGroupers",
            ErrorImpl::StructuralUnderflowError { .. } => "StructuralUnderflowError",
            ErrorImpl::TokenNotInSource { .. } => "TokenNotInSource",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::GrammarDefinitionError { message } => ErrorTip::Suggestion(message.clone()),
            ErrorImpl::GrammarReadError { path, reason } => {
                ErrorTip::Suggestion(format!("Could not read `{}`: {}", path, reason))
            }
            ErrorImpl::SyntaxError { previous, next } => ErrorTip::Suggestion(format!(
                "`{}` cannot be followed by `{}`",
                previous, next
            )),
            ErrorImpl::UnmatchedOpenGroup { open } => {
                ErrorTip::Suggestion(format!("`{}` is never closed", open))
            }
            ErrorImpl::UnmatchedCloseGroup { close } => {
                ErrorTip::Suggestion(format!("`{}` has no matching open group", close))
            }
            ErrorImpl::MismatchedGroupers { open, close } => ErrorTip::Suggestion(format!(
                "Group opened with `{}` cannot be closed with `{}`",
                open, close
            )),
            ErrorImpl::StructuralUnderflowError { message } => {
                ErrorTip::Suggestion(message.clone())
            }
            ErrorImpl::TokenNotInSource { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
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

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("invalid grammar: {message}")]
    GrammarDefinitionError { message: String },
    #[error("could not read grammar {path:?}: {reason}")]
    GrammarReadError { path: String, reason: String },
    #[error("syntax error: {previous:?} followed by {next:?}")]
    SyntaxError { previous: String, next: String },
    #[error("unmatched open group {open:?}")]
    UnmatchedOpenGroup { open: String },
    #[error("unmatched close group {close:?}")]
    UnmatchedCloseGroup { close: String },
    #[error("mismatched groupers: {open:?} closed by {close:?}")]
    MismatchedGroupers { open: String, close: String },
    #[error("structural underflow: {message}")]
    StructuralUnderflowError { message: String },
    #[error("token {token:?} not found in source")]
    TokenNotInSource { token: String },
}
