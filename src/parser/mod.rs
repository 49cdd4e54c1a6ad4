//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module turns a token stream into an AST under a declarative
//! operator grammar:
//!
//! - Token adjacency and bracket matching (the syntax checker)
//! - Precedence and associativity resolution with a shunting-yard engine
//! - Rebuilding the reverse-Polish output into a tree

pub mod lookups;
pub mod parser;
pub mod syntax_checker;
