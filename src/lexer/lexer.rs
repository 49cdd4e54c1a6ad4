use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::{
    errors::errors::{Error, ErrorImpl},
    grammar::grammar::Grammar,
    Span, MK_TOKEN,
};

use super::tokens::{Token, TokenKind};

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

pub struct Lexer<'a> {
    grammar: &'a Grammar,
    source: &'a str,
    tokens: Vec<Token>,
    /// Byte offset just past the previous token in `source`.
    pos: usize,
    /// Character offset matching `pos`.
    char_pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, grammar: &'a Grammar) -> Lexer<'a> {
        Lexer {
            grammar,
            source,
            tokens: vec![],
            pos: 0,
            char_pos: 0,
        }
    }

    /// Surrounds every occurrence of every special symbol with whitespace.
    fn padded_source(&self) -> String {
        let mut padded = self.source.to_string();
        for symbol in self.grammar.special_symbols() {
            padded = padded.replace(symbol.as_str(), &format!(" {} ", symbol));
        }
        padded
    }

    fn classify(&self, piece: &str) -> TokenKind {
        self.grammar.lookup(piece).unwrap_or(TokenKind::Identifier)
    }

    /// Finds `piece` in the original source after the previous token.
    fn locate(&mut self, piece: &str) -> Result<Span, Error> {
        let remainder = &self.source[self.pos..];
        let Some(offset) = remainder.find(piece) else {
            return Err(Error::new(
                ErrorImpl::TokenNotInSource {
                    token: piece.to_string(),
                },
                vec![Span::point(self.char_pos)],
            ));
        };

        let start = self.char_pos + remainder[..offset].chars().count();
        let end = start + piece.chars().count();

        self.pos += offset + piece.len();
        self.char_pos = end;

        Ok(Span::new(start, end))
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }
}

/// Splits `source` into tokens of `grammar`.
///
/// Special symbols are recognised anywhere, even without surrounding
/// whitespace; everything else separated by whitespace is an identifier.
pub fn tokenize(source: &str, grammar: &Grammar) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, grammar);
    let padded = lex.padded_source();

    for piece in WHITESPACE.split(&padded).filter(|piece| !piece.is_empty()) {
        let kind = lex.classify(piece);
        let span = lex.locate(piece)?;
        let index = lex.tokens.len();

        lex.push(MK_TOKEN!(kind, piece.to_string(), index, span));
    }

    trace!(count = lex.tokens.len(), "tokenized input");
    Ok(lex.tokens)
}
