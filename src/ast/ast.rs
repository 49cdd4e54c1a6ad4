use std::fmt::Display;

use crate::{
    grammar::grammar::Grammar,
    lexer::tokens::{Token, TokenKind},
};

/// A node of the parsed expression tree.
///
/// Identifiers are leaves, operations have one child per operand in source
/// order, and an open group has the bracketed sub-expression as its only child.
#[derive(Debug)]
pub struct Ast {
    pub token: Token,
    pub children: Vec<Ast>,
}

impl Ast {
    pub fn new(token: Token, children: Vec<Ast>) -> Self {
        Ast { token, children }
    }

    pub fn leaf(token: Token) -> Self {
        Ast {
            token,
            children: vec![],
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.token.kind
    }

    pub fn symbol(&self) -> &str {
        &self.token.value
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        self.fold(|_, children: Vec<usize>| 1 + children.iter().sum::<usize>())
    }

    pub fn depth(&self) -> usize {
        self.fold(|_, children: Vec<usize>| 1 + children.into_iter().max().unwrap_or(0))
    }

    /// The same tree with every group wrapper replaced by its contents.
    pub fn without_groups(&self) -> Ast {
        self.fold(|node, mut children: Vec<Ast>| {
            if node.kind() == TokenKind::OpenGroup && !children.is_empty() {
                return children.swap_remove(0);
            }
            Ast::new(node.token.clone(), children)
        })
    }

    /// Renders the tree as infix text with every operation wrapped in
    /// `open`/`close`, so that re-parsing it cannot regroup anything.
    ///
    /// Group nodes keep their own brackets, closed with the partner registered
    /// in `grammar`.
    pub fn to_parenthesized(&self, grammar: &Grammar, open: &str, close: &str) -> String {
        let mut pieces = vec![];
        let mut steps = vec![Step::Node(self)];

        while let Some(step) = steps.pop() {
            let node = match step {
                Step::Text(text) => {
                    pieces.push(text);
                    continue;
                }
                Step::Node(node) => node,
            };

            let scheduled = match (node.kind(), node.children.as_slice()) {
                (TokenKind::UnaryOperation, [operand]) => vec![
                    Step::Text(open),
                    Step::Text(node.symbol()),
                    Step::Node(operand),
                    Step::Text(close),
                ],
                (TokenKind::BinaryOperation, [left, right]) => vec![
                    Step::Text(open),
                    Step::Node(left),
                    Step::Text(node.symbol()),
                    Step::Node(right),
                    Step::Text(close),
                ],
                (TokenKind::OpenGroup, [inner]) => vec![
                    Step::Text(node.symbol()),
                    Step::Node(inner),
                    Step::Text(grammar.closing_partner(node.symbol()).unwrap_or(close)),
                ],
                _ => vec![Step::Text(node.symbol())],
            };
            steps.extend(scheduled.into_iter().rev());
        }

        pieces.join(" ")
    }

    /// Combines the tree bottom-up on an explicit stack. `combine` receives
    /// each node together with the results for its children, in order.
    fn fold<T>(&self, mut combine: impl FnMut(&Ast, Vec<T>) -> T) -> T {
        let mut pending: Vec<(&Ast, usize)> = vec![];
        let mut results: Vec<T> = vec![];
        let mut current = (self, 0);

        loop {
            let (node, next) = current;
            if let Some(child) = node.children.get(next) {
                pending.push((node, next + 1));
                current = (child, 0);
                continue;
            }

            let children = results.split_off(results.len() - node.children.len());
            let value = combine(node, children);

            match pending.pop() {
                Some(parent) => {
                    results.push(value);
                    current = parent;
                }
                None => return value,
            }
        }
    }
}

/// Work item of the iterative renderers.
enum Step<'a> {
    Node(&'a Ast),
    Text(&'a str),
}

impl Clone for Ast {
    fn clone(&self) -> Self {
        self.fold(|node, children| Ast::new(node.token.clone(), children))
    }
}

/// Nested trees are torn down level by level instead of recursively.
impl Drop for Ast {
    fn drop(&mut self) {
        let mut orphans = std::mem::take(&mut self.children);
        while let Some(mut node) = orphans.pop() {
            orphans.append(&mut node.children);
        }
    }
}

/// Structural equality: token kinds, symbols and shape, ignoring positions.
impl PartialEq for Ast {
    fn eq(&self, other: &Self) -> bool {
        let mut pairs = vec![(self, other)];

        while let Some((left, right)) = pairs.pop() {
            if !left.token.same_symbol(&right.token) || left.children.len() != right.children.len()
            {
                return false;
            }
            pairs.extend(left.children.iter().zip(&right.children));
        }

        true
    }
}

impl Eq for Ast {}

impl Display for Ast {
    /// `{token, child, child, ...}`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut steps = vec![Step::Node(self)];

        while let Some(step) = steps.pop() {
            match step {
                Step::Text(text) => f.write_str(text)?,
                Step::Node(node) if node.children.is_empty() => write!(f, "{}", node.token)?,
                Step::Node(node) => {
                    write!(f, "{{{}", node.token)?;
                    steps.push(Step::Text("}"));
                    for child in node.children.iter().rev() {
                        steps.push(Step::Node(child));
                        steps.push(Step::Text(", "));
                    }
                }
            }
        }

        Ok(())
    }
}
