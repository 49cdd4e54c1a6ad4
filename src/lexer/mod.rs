//! Lexical analysis module.
//!
//! This module contains the tokenizer that converts an input line into a
//! stream of tokens for the shunting-yard engine. It handles:
//!
//! - Recognition of the grammar's operation and group symbols
//! - Whitespace splitting using a regex pattern
//! - Identifiers for every other piece of text
//! - Character spans for error reporting

pub mod lexer;
pub mod tokens;
