//! Unit tests for grammar construction, lookups and precedence comparison.

use crate::{
    errors::errors::ErrorImpl,
    lexer::tokens::{Token, TokenKind},
    Span, MK_TOKEN,
};

use super::{
    definition::parse_definition,
    grammar::{Associativity, Grammar, Operation, GROUP_RANK, SENTINEL_RANK},
};

fn token(kind: TokenKind, value: &str) -> Token {
    MK_TOKEN!(kind, value.to_string(), 0, Span::new(0, value.len()))
}

fn arithmetic() -> Grammar {
    Grammar::new(
        vec![
            vec![Operation::unary("-")],
            vec![Operation::binary("^")],
            vec![Operation::binary("*"), Operation::binary("/")],
            vec![Operation::binary("+")],
        ],
        vec![
            Associativity::Right,
            Associativity::Right,
            Associativity::Left,
            Associativity::Left,
        ],
        vec![("(".to_string(), ")".to_string())],
    )
    .unwrap()
}

fn is_grammar_error(result: Result<Grammar, crate::errors::errors::Error>) -> bool {
    matches!(
        result.map_err(|e| e.kind().clone()),
        Err(ErrorImpl::GrammarDefinitionError { .. })
    )
}

#[test]
fn test_grammar_lookup() {
    let grammar = arithmetic();

    assert_eq!(grammar.lookup("-"), Some(TokenKind::UnaryOperation));
    assert_eq!(grammar.lookup("*"), Some(TokenKind::BinaryOperation));
    assert_eq!(grammar.lookup("("), Some(TokenKind::OpenGroup));
    assert_eq!(grammar.lookup(")"), Some(TokenKind::CloseGroup));
    assert_eq!(grammar.lookup("x"), None);
    assert!(grammar.is_special_symbol("^"));
    assert!(!grammar.is_special_symbol("%"));
}

#[test]
fn test_grammar_special_symbols_in_registration_order() {
    assert_eq!(
        arithmetic().special_symbols(),
        &["-", "^", "*", "/", "+", "(", ")"]
    );
}

#[test]
fn test_grammar_group_partners() {
    let grammar = arithmetic();

    assert_eq!(grammar.matching_open_group(")"), Some("("));
    assert_eq!(grammar.closing_partner("("), Some(")"));
    assert_eq!(grammar.closing_partner(")"), None);
}

#[test]
fn test_grammar_associativity() {
    let grammar = arithmetic();

    assert_eq!(grammar.associativity_of("^"), Some(Associativity::Right));
    assert_eq!(grammar.associativity_of("/"), Some(Associativity::Left));
    assert_eq!(grammar.associativity_of("("), None);
}

#[test]
fn test_precedence_ranks() {
    let grammar = arithmetic();

    assert_eq!(grammar.precedence_rank(&token(TokenKind::UnaryOperation, "-")), Some(0));
    assert_eq!(grammar.precedence_rank(&token(TokenKind::BinaryOperation, "/")), Some(2));
    assert_eq!(grammar.precedence_rank(&token(TokenKind::OpenGroup, "(")), Some(GROUP_RANK));
    assert_eq!(grammar.precedence_rank(&Token::start()), Some(SENTINEL_RANK));
    assert_eq!(grammar.precedence_rank(&Token::end(0)), Some(SENTINEL_RANK));
    assert_eq!(grammar.precedence_rank(&token(TokenKind::Identifier, "x")), None);
    // Registered symbol, wrong kind.
    assert_eq!(grammar.precedence_rank(&token(TokenKind::BinaryOperation, "-")), None);
}

#[test]
fn test_left_is_tighter_by_rank() {
    let grammar = arithmetic();
    let times = token(TokenKind::BinaryOperation, "*");
    let plus = token(TokenKind::BinaryOperation, "+");

    assert!(grammar.left_is_tighter(&times, &plus).unwrap());
    assert!(!grammar.left_is_tighter(&plus, &times).unwrap());
    assert!(grammar.left_is_tighter(&plus, &Token::end(0)).unwrap());
    assert!(!grammar.left_is_tighter(&Token::start(), &plus).unwrap());
    assert!(!grammar.left_is_tighter(&token(TokenKind::OpenGroup, "("), &plus).unwrap());
}

#[test]
fn test_left_is_tighter_by_associativity() {
    let grammar = arithmetic();
    let times = token(TokenKind::BinaryOperation, "*");
    let divide = token(TokenKind::BinaryOperation, "/");
    let power = token(TokenKind::BinaryOperation, "^");

    assert!(grammar.left_is_tighter(&times, &divide).unwrap());
    assert!(grammar.left_is_tighter(&divide, &times).unwrap());
    assert!(!grammar.left_is_tighter(&power, &power).unwrap());
}

#[test]
fn test_left_is_tighter_without_rule() {
    let grammar = arithmetic();
    let x = token(TokenKind::Identifier, "x");
    let plus = token(TokenKind::BinaryOperation, "+");

    assert!(grammar.left_is_tighter(&x, &plus).is_err());
    assert!(grammar.left_is_tighter(&plus, &x).is_err());
    assert!(grammar
        .left_is_tighter(&Token::start(), &Token::end(0))
        .is_err());
}

#[test]
fn test_grammar_count_mismatch() {
    let result = Grammar::new(
        vec![vec![Operation::binary("+")]],
        vec![Associativity::Left, Associativity::Right],
        vec![],
    );

    assert!(is_grammar_error(result));
}

#[test]
fn test_grammar_overlapping_operations() {
    let result = Grammar::new(
        vec![vec![Operation::binary("+")], vec![Operation::unary("++")]],
        vec![Associativity::Left, Associativity::Left],
        vec![],
    );

    assert!(is_grammar_error(result));
}

#[test]
fn test_grammar_symbol_with_whitespace() {
    let result = Grammar::new(
        vec![vec![Operation::binary("a b")]],
        vec![Associativity::Left],
        vec![],
    );

    assert!(is_grammar_error(result));
}

#[test]
fn test_grammar_group_with_whitespace() {
    let result = Grammar::new(
        vec![vec![Operation::binary("+")]],
        vec![Associativity::Left],
        vec![("<\n".to_string(), ">".to_string())],
    );

    assert!(is_grammar_error(result));
}

#[test]
fn test_grammar_overlap_within_class() {
    let result = Grammar::new(
        vec![vec![Operation::binary("<"), Operation::binary("<=")]],
        vec![Associativity::Left],
        vec![],
    );

    assert!(is_grammar_error(result));
}

#[test]
fn test_grammar_duplicate_operation() {
    let result = Grammar::new(
        vec![vec![Operation::binary("+")], vec![Operation::unary("+")]],
        vec![Associativity::Left, Associativity::Right],
        vec![],
    );

    assert!(is_grammar_error(result));
}

#[test]
fn test_grammar_operation_used_as_bracket() {
    let result = Grammar::new(
        vec![vec![Operation::binary("|")]],
        vec![Associativity::Left],
        vec![("|".to_string(), "!".to_string())],
    );

    assert!(is_grammar_error(result));
}

#[test]
fn test_grammar_same_open_and_close() {
    let result = Grammar::new(vec![], vec![], vec![("|".to_string(), "|".to_string())]);

    assert!(is_grammar_error(result));
}

#[test]
fn test_grammar_empty_class() {
    let result = Grammar::new(vec![vec![]], vec![Associativity::Left], vec![]);

    assert!(is_grammar_error(result));
}

#[test]
fn test_grammar_empty_symbol() {
    let result = Grammar::new(
        vec![vec![Operation::binary("")]],
        vec![Associativity::Left],
        vec![],
    );

    assert!(is_grammar_error(result));
}

#[test]
fn test_operation_from_encoding() {
    assert_eq!(Operation::from_encoding("2+").unwrap(), Operation::binary("+"));
    assert_eq!(Operation::from_encoding("1not").unwrap(), Operation::unary("not"));
    assert!(Operation::from_encoding("3?").is_err());
    assert!(Operation::from_encoding("+").is_err());
    assert!(Operation::from_encoding("2").is_err());
}

#[test]
fn test_associativity_from_encoding() {
    assert_eq!(Associativity::from_encoding("LEFT").unwrap(), Associativity::Left);
    assert_eq!(Associativity::from_encoding("Right").unwrap(), Associativity::Right);
    assert!(Associativity::from_encoding("middle").is_err());
}

#[test]
fn test_parse_definition() {
    let grammar = parse_definition(
        "# unary minus binds tightest\n\
         right 1-\n\
         \n\
         RIGHT 2^\n\
         left 2* 2/\n\
         Group ( )\n\
         left 2+\n",
    )
    .unwrap();

    assert_eq!(grammar.precedences().len(), 4);
    assert_eq!(grammar.groupers(), &[("(".to_string(), ")".to_string())]);
    assert_eq!(grammar.precedence_rank(&token(TokenKind::BinaryOperation, "+")), Some(3));
    assert_eq!(grammar.associativity_of("^"), Some(Associativity::Right));
}

#[test]
fn test_parse_definition_errors_name_the_line() {
    let error = parse_definition("left 2+\nsideways 2*\n").unwrap_err();

    assert_eq!(error.get_error_name(), "GrammarDefinitionError");
    assert!(error.get_tip().to_string().starts_with("line 2:"));
}

#[test]
fn test_parse_definition_rejects_malformed_lines() {
    assert!(parse_definition("group (\n").is_err());
    assert!(parse_definition("group ( ) ]\n").is_err());
    assert!(parse_definition("left\n").is_err());
    assert!(parse_definition("left 4+\n").is_err());
    assert!(parse_definition("left 2+\nright 2++\n").is_err());
}

#[test]
fn test_grammar_from_str() {
    let grammar: Grammar = "left 2+".parse().unwrap();

    assert_eq!(grammar.lookup("+"), Some(TokenKind::BinaryOperation));
}

#[test]
fn test_grammar_display_round_trip() {
    let grammar = arithmetic();
    let rendered = grammar.to_string();

    assert_eq!(rendered, "right 1-\nright 2^\nleft 2* 2/\nleft 2+\ngroup ( )\n");

    let reparsed = parse_definition(&rendered).unwrap();
    assert_eq!(reparsed.special_symbols(), grammar.special_symbols());
}

#[test]
fn test_grammar_from_missing_file() {
    let error = Grammar::from_file("tests/grammars/does-not-exist.grammar").unwrap_err();

    assert!(matches!(error.kind(), ErrorImpl::GrammarReadError { .. }));
}

#[test]
fn test_grammar_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Grammar>();
}
