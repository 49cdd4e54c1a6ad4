#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::errors::errors::ErrorTip;

pub mod ast;
pub mod errors;
pub mod grammar;
pub mod lexer;
pub mod macros;
pub mod parser;

pub use ast::ast::Ast;
pub use errors::errors::{Error, ErrorImpl};
pub use grammar::grammar::{Associativity, Grammar, Operation};
pub use lexer::tokens::{Token, TokenKind};
pub use parser::parser::{parse, Parser};

/// Half-open range of character offsets into the parsed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Zero-width span at `offset`, used by the sentinels.
    pub fn point(offset: usize) -> Self {
        Span { start: offset, end: offset }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Builds the caret line marking every span of `error` beneath `input`.
///
/// A zero-width span marks the single column it points at, so an error at the
/// end of input is drawn just past the last character.
pub fn caret_line(error: &Error, input: &str) -> String {
    let width = input.chars().count();
    let mut marks = vec![false; width];

    for span in error.get_spans() {
        let end = if span.is_empty() { span.start + 1 } else { span.end };
        if end > marks.len() {
            marks.resize(end, false);
        }
        for mark in &mut marks[span.start..end] {
            *mark = true;
        }
    }

    let line: String = marks.iter().map(|m| if *m { '^' } else { ' ' }).collect();
    line.trim_end().to_string()
}

pub fn format_error(error: &Error, input: &str) -> String {
    /*
        Error: SyntaxError (`1` cannot be followed by `2`)
        | 1 2
        |   ^
    */

    let header = if let ErrorTip::None = error.get_tip() {
        format!("Error: {}", error.get_error_name())
    } else {
        format!("Error: {} ({})", error.get_error_name(), error.get_tip())
    };

    format!("{}\n| {}\n| {}", header, input, caret_line(error, input))
}
