//! The compiled form of an operator grammar.
//!
//! A grammar is an ordered list of precedence classes (index 0 binds tightest),
//! one associativity per class, and a list of bracket pairs. Construction
//! builds every lookup table once; afterwards the grammar is read-only and can
//! be shared between any number of parses.

use std::{collections::HashMap, fmt::Display};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::{
    errors::errors::Error,
    lexer::tokens::{Token, TokenKind},
};

/// Rank of bracket symbols: looser than every operator, tighter than the sentinels.
pub const GROUP_RANK: usize = usize::MAX - 1;
/// Rank of the `Start` and `End` sentinels.
pub const SENTINEL_RANK: usize = usize::MAX;

lazy_static! {
    static ref OPERATION_ENCODING: Regex = Regex::new(r"^([0-9])(\S+)$").unwrap();
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Associativity {
    Left,
    Right,
}

impl Associativity {
    /// Parses `left` or `right`, ignoring case.
    pub fn from_encoding(encoding: &str) -> Result<Self, Error> {
        match encoding.to_lowercase().as_str() {
            "left" => Ok(Associativity::Left),
            "right" => Ok(Associativity::Right),
            _ => Err(Error::grammar(format!(
                "Encoding of associativity `{}` not recognized",
                encoding
            ))),
        }
    }
}

impl Display for Associativity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Associativity::Left => write!(f, "left"),
            Associativity::Right => write!(f, "right"),
        }
    }
}

/// A unary-prefix or binary-infix operator.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Operation {
    pub symbol: String,
    pub kind: TokenKind,
}

impl Operation {
    pub fn unary(symbol: impl Into<String>) -> Self {
        Operation {
            symbol: symbol.into(),
            kind: TokenKind::UnaryOperation,
        }
    }

    pub fn binary(symbol: impl Into<String>) -> Self {
        Operation {
            symbol: symbol.into(),
            kind: TokenKind::BinaryOperation,
        }
    }

    /// Parses an arity digit followed by the symbol, e.g. `2+` or `1-`.
    pub fn from_encoding(encoding: &str) -> Result<Self, Error> {
        let captures = OPERATION_ENCODING.captures(encoding).ok_or_else(|| {
            Error::grammar(format!(
                "The encoding `{}` must be an arity digit followed by a symbol",
                encoding
            ))
        })?;

        match &captures[1] {
            "1" => Ok(Operation::unary(&captures[2])),
            "2" => Ok(Operation::binary(&captures[2])),
            arity => Err(Error::grammar(format!(
                "The encoding `{}` has arity {}. Only unary and binary operations are supported",
                encoding, arity
            ))),
        }
    }

    pub fn arity(&self) -> usize {
        self.kind.arity()
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.arity(), self.symbol)
    }
}

#[derive(Debug, Clone)]
pub struct Grammar {
    precedences: Vec<Vec<Operation>>,
    associativities: Vec<Associativity>,
    groupers: Vec<(String, String)>,

    precedence_table: HashMap<String, usize>,
    associativity_table: HashMap<String, Associativity>,
    symbol_table: HashMap<String, TokenKind>,
    special_symbols: Vec<String>,

    open_to_close: HashMap<String, String>,
    close_to_open: HashMap<String, String>,
}

impl Grammar {
    /// Compiles a grammar.
    ///
    /// # Arguments
    ///
    /// * `precedences` - Precedence classes, tightest first
    /// * `associativities` - One per precedence class, in the same order
    /// * `groupers` - (open, close) bracket symbol pairs
    ///
    /// # Returns
    ///
    /// A `GrammarDefinitionError` if the two lists differ in length, a class is
    /// empty, or any two special symbols overlap.
    pub fn new(
        precedences: Vec<Vec<Operation>>,
        associativities: Vec<Associativity>,
        groupers: Vec<(String, String)>,
    ) -> Result<Self, Error> {
        if precedences.len() != associativities.len() {
            return Err(Error::grammar(format!(
                "Must be an equal number of precedences and associativities, got {} and {}",
                precedences.len(),
                associativities.len()
            )));
        }

        let mut grammar = Grammar {
            precedences: vec![],
            associativities: vec![],
            groupers: vec![],
            precedence_table: HashMap::new(),
            associativity_table: HashMap::new(),
            symbol_table: HashMap::new(),
            special_symbols: vec![],
            open_to_close: HashMap::new(),
            close_to_open: HashMap::new(),
        };

        for (rank, (class, associativity)) in precedences.iter().zip(&associativities).enumerate() {
            if class.is_empty() {
                return Err(Error::grammar(format!(
                    "Precedence class {} has no operations",
                    rank
                )));
            }

            for operation in class {
                grammar.register_symbol(&operation.symbol, operation.kind)?;
                grammar.precedence_table.insert(operation.symbol.clone(), rank);
                grammar
                    .associativity_table
                    .insert(operation.symbol.clone(), *associativity);
            }
        }

        for (open, close) in &groupers {
            grammar.register_symbol(open, TokenKind::OpenGroup)?;
            grammar.register_symbol(close, TokenKind::CloseGroup)?;
            grammar.open_to_close.insert(open.clone(), close.clone());
            grammar.close_to_open.insert(close.clone(), open.clone());
        }

        grammar.precedences = precedences;
        grammar.associativities = associativities;
        grammar.groupers = groupers;

        debug!(
            classes = grammar.precedences.len(),
            groups = grammar.groupers.len(),
            "compiled grammar"
        );

        Ok(grammar)
    }

    /// Adds a symbol to the catalog, rejecting any overlap with a symbol
    /// registered before it.
    fn register_symbol(&mut self, symbol: &str, kind: TokenKind) -> Result<(), Error> {
        if symbol.is_empty() {
            return Err(Error::grammar(format!("Empty symbol for a {} token", kind)));
        }
        if symbol.chars().any(char::is_whitespace) {
            return Err(Error::grammar(format!(
                "Symbol `{}` contains whitespace",
                symbol
            )));
        }

        for other in &self.special_symbols {
            if symbol.contains(other.as_str()) || other.contains(symbol) {
                return Err(Error::grammar(format!(
                    "Symbols `{}` and `{}` overlap",
                    other, symbol
                )));
            }
        }

        self.special_symbols.push(symbol.to_string());
        self.symbol_table.insert(symbol.to_string(), kind);
        Ok(())
    }

    pub fn precedences(&self) -> &[Vec<Operation>] {
        &self.precedences
    }

    pub fn groupers(&self) -> &[(String, String)] {
        &self.groupers
    }

    /// Every operation and group symbol, in registration order.
    pub fn special_symbols(&self) -> &[String] {
        &self.special_symbols
    }

    pub fn is_special_symbol(&self, symbol: &str) -> bool {
        self.symbol_table.contains_key(symbol)
    }

    /// The kind of token a registered symbol stands for.
    pub fn lookup(&self, symbol: &str) -> Option<TokenKind> {
        self.symbol_table.get(symbol).copied()
    }

    pub fn associativity_of(&self, symbol: &str) -> Option<Associativity> {
        self.associativity_table.get(symbol).copied()
    }

    pub fn matching_open_group(&self, close: &str) -> Option<&str> {
        self.close_to_open.get(close).map(String::as_str)
    }

    pub fn closing_partner(&self, open: &str) -> Option<&str> {
        self.open_to_close.get(open).map(String::as_str)
    }

    /// Lower ranks bind tighter. Identifiers have no rank.
    pub fn precedence_rank(&self, token: &Token) -> Option<usize> {
        match token.kind {
            TokenKind::Start | TokenKind::End => Some(SENTINEL_RANK),
            TokenKind::OpenGroup | TokenKind::CloseGroup => {
                (self.lookup(&token.value) == Some(token.kind)).then_some(GROUP_RANK)
            }
            TokenKind::UnaryOperation | TokenKind::BinaryOperation => {
                if self.lookup(&token.value) == Some(token.kind) {
                    self.precedence_table.get(&token.value).copied()
                } else {
                    None
                }
            }
            TokenKind::Identifier => None,
        }
    }

    /// Whether `left` binds more tightly than `right`.
    ///
    /// Ties go to the associativity of `left`: a left-associative operator
    /// binds tighter than its equal on the right, a right-associative one
    /// does not.
    pub fn left_is_tighter(&self, left: &Token, right: &Token) -> Result<bool, Error> {
        let no_rule = || {
            Error::grammar(format!(
                "The following tokens do not have precedence rules: <{}> <{}>",
                left, right
            ))
        };

        let left_rank = self.precedence_rank(left).ok_or_else(no_rule)?;
        let right_rank = self.precedence_rank(right).ok_or_else(no_rule)?;

        if left_rank != right_rank {
            return Ok(left_rank < right_rank);
        }

        match self.associativity_of(&left.value).filter(|_| left.kind.is_operation()) {
            Some(Associativity::Left) => Ok(true),
            Some(Associativity::Right) => Ok(false),
            None => Err(no_rule()),
        }
    }
}

impl Display for Grammar {
    /// Renders the grammar in the definition file format.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (class, associativity) in self.precedences.iter().zip(&self.associativities) {
            write!(f, "{}", associativity)?;
            for operation in class {
                write!(f, " {}", operation)?;
            }
            writeln!(f)?;
        }
        for (open, close) in &self.groupers {
            writeln!(f, "group {} {}", open, close)?;
        }
        Ok(())
    }
}
