//! Loader for the line-oriented grammar definition format.
//!
//! ```text
//! # comment
//! right 1-
//! left 2* 2/
//! left 2+
//! group ( )
//! ```
//!
//! Every non-group line is one precedence class; earlier lines bind tighter.

use std::{fs, path::Path, str::FromStr};

use tracing::debug;

use crate::errors::errors::{Error, ErrorImpl};

use super::grammar::{Associativity, Grammar, Operation};

/// Parses the text of a grammar definition.
pub fn parse_definition(source: &str) -> Result<Grammar, Error> {
    let mut precedences = vec![];
    let mut associativities = vec![];
    let mut groupers = vec![];

    for (number, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let at_line =
            |error: Error| Error::grammar(format!("line {}: {}", number + 1, error.get_tip()));

        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            continue;
        };

        if first.eq_ignore_ascii_case("group") {
            let (Some(open), Some(close)) = (words.next(), words.next()) else {
                return Err(at_line(Error::grammar(
                    "A group needs an open and a close symbol",
                )));
            };
            if let Some(extra) = words.next() {
                return Err(at_line(Error::grammar(format!(
                    "Unexpected extra tokens on line, such as `{}`",
                    extra
                ))));
            }
            groupers.push((open.to_string(), close.to_string()));
        } else {
            let associativity = Associativity::from_encoding(first).map_err(at_line)?;
            let class = words
                .map(Operation::from_encoding)
                .collect::<Result<Vec<_>, _>>()
                .map_err(at_line)?;

            if class.is_empty() {
                return Err(at_line(Error::grammar(
                    "A precedence class needs at least one operation",
                )));
            }

            associativities.push(associativity);
            precedences.push(class);
        }
    }

    Grammar::new(precedences, associativities, groupers)
}

impl Grammar {
    /// Reads and compiles a grammar definition file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Grammar, Error> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            Error::new(
                ErrorImpl::GrammarReadError {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                },
                vec![],
            )
        })?;

        debug!(path = %path.display(), "loading grammar definition");
        parse_definition(&source)
    }
}

impl FromStr for Grammar {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        parse_definition(source)
    }
}
