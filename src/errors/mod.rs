//! Error types and error handling for the parser.
//!
//! This module defines the error types used by every stage:
//!
//! - Grammar construction errors (overlapping symbols, bad definition lines)
//! - Token adjacency and bracket discipline errors raised during a parse
//! - Structural errors from the shunting-yard and tree-build passes
//! - Error names and suggestions used when rendering diagnostics

pub mod errors;
