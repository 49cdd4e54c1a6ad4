//! Utility macros for the parser.
//!
//! - `MK_TOKEN!` - Creates a Token instance taken from the input
//!
//! Sentinel tokens are built with `Token::start` and `Token::end` instead.

/// Creates a Token instance for a piece of the input.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's symbol
/// * `$index` - The token's position in the token stream
/// * `$span` - The character span in the source
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Identifier, "x".to_string(), 0, Span::new(0, 1));
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $index:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            index: Some($index),
            span: $span,
        }
    };
}
