//! Command-line interface for opparse.
//!
//! Usage:
//!   opparse [-d] `<grammar>`
//!
//! Loads a grammar definition, then parses one expression per input line until
//! a blank line or end of input, printing each tree as `{token, child, ...}`.
use std::process;

use clap::{Arg, ArgAction, Command};
use opparse::{format_error, Grammar, Parser};
use rustyline::{error::ReadlineError, DefaultEditor};
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = Command::new("opparse")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parses expressions under a declarative operator grammar")
        .arg(
            Arg::new("grammar")
                .help("Path to the grammar definition file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .short('d')
                .help("Trace the parser's stacks and report discarded errors")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let level = if matches.get_flag("debug") {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    let Some(path) = matches.get_one::<String>("grammar") else {
        eprintln!("Usage: opparse [-d] <grammar>");
        process::exit(2);
    };

    let grammar = match Grammar::from_file(path) {
        Ok(grammar) => grammar,
        Err(e) => {
            eprintln!("Error: {} ({})", e.get_error_name(), e.get_tip());
            process::exit(2);
        }
    };
    debug!("\n{}", grammar);

    if let Err(e) = run_session(&grammar) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Only an empty line ends the session; whitespace is parsed like any input.
fn ends_session(line: &str) -> bool {
    line.is_empty()
}

fn run_session(grammar: &Grammar) -> Result<(), ReadlineError> {
    let parser = Parser::new(grammar);
    let mut rl = DefaultEditor::new()?;

    println!("Enter an expression to parse:");

    loop {
        let line = match rl.readline("") {
            Ok(line) => line,
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => break,
            Err(e) => return Err(e),
        };

        if ends_session(&line) {
            break;
        }
        rl.add_history_entry(line.as_str()).ok();

        // Lines that fail to parse are skipped.
        match parser.parse(&line) {
            Ok(ast) => println!("{}", ast),
            Err(e) => debug!("\n{}", format_error(&e, &line)),
        }
    }

    println!("Goodbye!");
    Ok(())
}
