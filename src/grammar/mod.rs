//! Grammar module for declarative operator grammars.
//!
//! This module contains:
//!
//! - The compiled `Grammar` with its symbol, precedence and associativity tables
//! - Precedence comparison between two tokens
//! - The loader for the text grammar definition format

pub mod definition;
pub mod grammar;

#[cfg(test)]
mod tests;
