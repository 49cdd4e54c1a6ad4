//! Shunting-yard parser for declarative operator grammars.
//!
//! Two stacks drive the parse. The operator stack holds operations and open
//! groups that are still waiting for operands; it starts with a `Start`
//! sentinel. The output stack receives tokens in reverse-Polish order. An
//! incoming operation first moves every pending operation that binds tighter
//! onto the output stack and is then pushed itself. The `End` sentinel flushes
//! whatever is left.
//!
//! Once the stream is consumed, the output stack is rebuilt into an `Ast` by
//! popping from its top: an operation takes as many sub-trees as its arity.

use tracing::debug;

use crate::{
    ast::ast::Ast,
    errors::errors::{Error, ErrorImpl},
    grammar::grammar::Grammar,
    lexer::{
        lexer::tokenize,
        tokens::{Token, TokenKind},
    },
};

use super::syntax_checker::SyntaxChecker;

/// Parses input lines under one grammar.
///
/// The parser holds no per-parse state, so a single instance can be used for
/// any number of parses, from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'g> {
    grammar: &'g Grammar,
}

impl<'g> Parser<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Parser { grammar }
    }

    /// Parses one expression.
    ///
    /// # Returns
    ///
    /// The root of the tree, or the first error found. No partial tree is
    /// ever returned.
    pub fn parse(&self, input: &str) -> Result<Ast, Error> {
        let mut tokens = tokenize(input, self.grammar)?;
        tokens.push(Token::end(input.chars().count()));

        let mut engine = ShuntingYard::new(self.grammar, tokens);
        engine.run()?;

        let mut output = engine.into_output();
        let root = build_tree(&mut output)?;

        if !output.is_empty() {
            return Err(Error::structural(
                "Input does not form a single expression",
                output.iter().map(|t| t.span).collect(),
            ));
        }

        Ok(root)
    }
}

/// Parses `input` under `grammar`.
pub fn parse(input: &str, grammar: &Grammar) -> Result<Ast, Error> {
    Parser::new(grammar).parse(input)
}

/// Scratch state of a single parse.
struct ShuntingYard<'g> {
    grammar: &'g Grammar,
    tokens: Vec<Token>,
    pos: usize,
    operator_stack: Vec<Token>,
    output_stack: Vec<Token>,
    checker: SyntaxChecker<'g>,
}

impl<'g> ShuntingYard<'g> {
    fn new(grammar: &'g Grammar, tokens: Vec<Token>) -> Self {
        let mut checker = SyntaxChecker::new(grammar);
        checker.refresh();

        ShuntingYard {
            grammar,
            tokens,
            pos: 0,
            operator_stack: vec![Token::start()],
            output_stack: vec![],
            checker,
        }
    }

    fn has_tokens(&self) -> bool {
        self.pos < self.tokens.len()
    }

    /// Validates the next token of the stream and takes it off.
    fn advance(&mut self) -> Result<Token, Error> {
        let token = self.tokens[self.pos].clone();
        self.checker.check_next_token(&token)?;
        self.pos += 1;
        Ok(token)
    }

    fn run(&mut self) -> Result<(), Error> {
        while self.has_tokens() {
            self.dump_state();
            let token = self.advance()?;

            match token.kind {
                TokenKind::Identifier => self.output_stack.push(token),
                // Prefix operations arrive where an operand is expected, so no
                // pending operation can be complete yet.
                TokenKind::OpenGroup | TokenKind::UnaryOperation => {
                    self.operator_stack.push(token)
                }
                TokenKind::CloseGroup => self.close_group(token)?,
                TokenKind::BinaryOperation => {
                    self.flush_tighter(&token)?;
                    self.operator_stack.push(token);
                }
                TokenKind::End => {
                    self.flush_tighter(&token)?;
                    self.finish(&token)?;
                }
                TokenKind::Start => {
                    return Err(Error::structural(
                        "Start sentinel inside the token stream",
                        vec![token.span],
                    ))
                }
            }
        }

        self.dump_state();
        Ok(())
    }

    /// Moves every pending operation that binds tighter than `incoming` to
    /// the output. Open groups are only ever removed by their close group.
    fn flush_tighter(&mut self, incoming: &Token) -> Result<(), Error> {
        loop {
            let Some(top) = self.operator_stack.last() else {
                return Err(Error::structural(
                    "Operator stack is empty",
                    vec![incoming.span],
                ));
            };

            if top.is(TokenKind::OpenGroup) || !self.is_left_tighter(top, incoming)? {
                return Ok(());
            }

            if let Some(popped) = self.operator_stack.pop() {
                self.output_stack.push(popped);
            }
        }
    }

    fn is_left_tighter(&self, left: &Token, right: &Token) -> Result<bool, Error> {
        if left.kind == TokenKind::Start && right.kind == TokenKind::End {
            return Ok(false);
        }
        self.grammar.left_is_tighter(left, right)
    }

    fn close_group(&mut self, close: Token) -> Result<(), Error> {
        loop {
            match self.operator_stack.last().map(|t| t.kind) {
                Some(TokenKind::OpenGroup) => break,
                Some(kind) if kind != TokenKind::Start => {
                    if let Some(popped) = self.operator_stack.pop() {
                        self.output_stack.push(popped);
                    }
                }
                _ => {
                    return Err(Error::structural(
                        format!("No open group left on the stack for `{}`", close),
                        vec![close.span],
                    ))
                }
            }
        }

        let Some(open) = self.operator_stack.pop() else {
            return Err(Error::structural("Operator stack is empty", vec![close.span]));
        };

        if self.grammar.closing_partner(&open.value) != Some(close.value.as_str()) {
            return Err(Error::new(
                ErrorImpl::MismatchedGroupers {
                    open: open.value.clone(),
                    close: close.value.clone(),
                },
                vec![open.span, close.span],
            ));
        }

        self.output_stack.push(open);
        Ok(())
    }

    /// After the final flush only the `Start` sentinel may remain.
    fn finish(&mut self, end: &Token) -> Result<(), Error> {
        let only_start = matches!(
            self.operator_stack.as_slice(),
            [start] if start.kind == TokenKind::Start
        );
        if only_start {
            self.operator_stack.clear();
            return Ok(());
        }

        if self.operator_stack.is_empty() {
            return Err(Error::structural("Operator stack is empty", vec![end.span]));
        }

        Err(Error::structural(
            "Operations left on the stack at end of input",
            self.operator_stack
                .iter()
                .filter(|t| !t.kind.is_sentinel())
                .map(|t| t.span)
                .collect(),
        ))
    }

    fn into_output(self) -> Vec<Token> {
        self.output_stack
    }

    fn dump_state(&self) {
        debug!(
            output = %render(&self.output_stack),
            operators = %render(&self.operator_stack),
            stream = %render(&self.tokens[self.pos..]),
            "shunting-yard state"
        );
    }
}

fn render(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.value.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Rebuilds the tree whose root is on top of a reverse-Polish stack.
///
/// Tokens are popped root first. Each operation waits on `pending` until its
/// operands are complete; they arrive right to left and are reversed into
/// source order. Nesting depth is bounded by the heap, not the call stack.
pub fn build_tree(output: &mut Vec<Token>) -> Result<Ast, Error> {
    let mut pending: Vec<(Token, Vec<Ast>)> = vec![];

    loop {
        let Some(token) = output.pop() else {
            return Err(match pending.last() {
                Some((operation, _)) => Error::structural(
                    format!("`{}` is missing an operand", operation),
                    vec![operation.span],
                ),
                None => Error::structural("Output stack is empty", vec![]),
            });
        };

        let mut node = match token.kind {
            TokenKind::Identifier => Ast::leaf(token),
            TokenKind::UnaryOperation | TokenKind::BinaryOperation | TokenKind::OpenGroup => {
                let arity = token.kind.arity();
                pending.push((token, Vec::with_capacity(arity)));
                continue;
            }
            TokenKind::CloseGroup | TokenKind::Start | TokenKind::End => {
                return Err(Error::structural(
                    format!("`{}` cannot appear in the output", token),
                    vec![token.span],
                ))
            }
        };

        loop {
            match pending.last_mut() {
                None => return Ok(node),
                Some((operation, operands)) => {
                    operands.push(node);
                    if operands.len() < operation.kind.arity() {
                        break;
                    }
                }
            }

            let Some((operation, mut operands)) = pending.pop() else {
                return Err(Error::structural("Operator stack is empty", vec![]));
            };
            operands.reverse();
            node = Ast::new(operation, operands);
        }
    }
}
