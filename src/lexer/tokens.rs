use std::fmt::Display;

use crate::Span;

/// The closed set of token kinds a grammar can produce.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Identifier,
    UnaryOperation,
    BinaryOperation,
    OpenGroup,
    CloseGroup,
    Start,
    End,
}

impl TokenKind {
    /// Number of children the kind takes in the AST.
    ///
    /// An open group wraps exactly one bracketed sub-expression.
    pub fn arity(&self) -> usize {
        match self {
            TokenKind::UnaryOperation | TokenKind::OpenGroup => 1,
            TokenKind::BinaryOperation => 2,
            TokenKind::Identifier
            | TokenKind::CloseGroup
            | TokenKind::Start
            | TokenKind::End => 0,
        }
    }

    pub fn is_operation(&self) -> bool {
        matches!(self, TokenKind::UnaryOperation | TokenKind::BinaryOperation)
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, TokenKind::Start | TokenKind::End)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    /// Position in the token stream; sentinels have none.
    pub index: Option<usize>,
    pub span: Span,
}

impl Token {
    pub fn start() -> Self {
        Token {
            kind: TokenKind::Start,
            value: String::from("START"),
            index: None,
            span: Span::point(0),
        }
    }

    /// The end sentinel sits just past the last character of the input.
    pub fn end(input_len: usize) -> Self {
        Token {
            kind: TokenKind::End,
            value: String::from("END"),
            index: None,
            span: Span::point(input_len),
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Same kind and symbol, regardless of where the token came from.
    pub fn same_symbol(&self, other: &Token) -> bool {
        self.kind == other.kind && self.value == other.value
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
