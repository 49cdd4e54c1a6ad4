//! Token-by-token validation of adjacency and bracket discipline.

use crate::{
    errors::errors::{Error, ErrorImpl},
    grammar::grammar::Grammar,
    lexer::tokens::{Token, TokenKind},
};

use super::lookups::is_allowed_transition;

/// A pushdown automaton over token kinds.
///
/// The control state is the most recently accepted token; the stack holds the
/// open groups that have not been closed yet.
pub struct SyntaxChecker<'g> {
    grammar: &'g Grammar,
    last_token: Token,
    open_groups: Vec<Token>,
}

impl<'g> SyntaxChecker<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        SyntaxChecker {
            grammar,
            last_token: Token::start(),
            open_groups: vec![],
        }
    }

    pub fn refresh(&mut self) {
        self.last_token = Token::start();
        self.open_groups.clear();
    }

    pub fn last_kind(&self) -> TokenKind {
        self.last_token.kind
    }

    pub fn open_groups(&self) -> &[Token] {
        &self.open_groups
    }

    /// Accepts `token` or reports why it cannot come next.
    pub fn check_next_token(&mut self, token: &Token) -> Result<(), Error> {
        self.check_groups(token)?;

        if !is_allowed_transition(self.last_token.kind, token.kind) {
            let spans = [&self.last_token, token]
                .iter()
                .filter(|t| !t.is(TokenKind::Start))
                .map(|t| t.span)
                .collect();

            return Err(Error::new(
                ErrorImpl::SyntaxError {
                    previous: self.last_token.value.clone(),
                    next: token.value.clone(),
                },
                spans,
            ));
        }

        if token.kind == TokenKind::End {
            if let Some(open) = self.open_groups.last() {
                return Err(Error::new(
                    ErrorImpl::UnmatchedOpenGroup {
                        open: open.value.clone(),
                    },
                    vec![open.span],
                ));
            }
        }

        self.last_token = token.clone();
        Ok(())
    }

    fn check_groups(&mut self, token: &Token) -> Result<(), Error> {
        match token.kind {
            TokenKind::OpenGroup => self.open_groups.push(token.clone()),
            TokenKind::CloseGroup => {
                let Some(open) = self.open_groups.pop() else {
                    return Err(Error::new(
                        ErrorImpl::UnmatchedCloseGroup {
                            close: token.value.clone(),
                        },
                        vec![token.span],
                    ));
                };

                if self.grammar.closing_partner(&open.value) != Some(token.value.as_str()) {
                    return Err(Error::new(
                        ErrorImpl::MismatchedGroupers {
                            open: open.value.clone(),
                            close: token.value.clone(),
                        },
                        vec![open.span, token.span],
                    ));
                }
            }
            _ => {}
        }

        Ok(())
    }
}
