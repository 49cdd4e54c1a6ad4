use crate::lexer::tokens::TokenKind;

/// Whether a token of kind `next` may directly follow one of kind `last`.
///
/// After anything that expects an operand, only the start of an operand may
/// follow. After a complete operand, only something that continues or ends
/// an expression may follow.
pub fn is_allowed_transition(last: TokenKind, next: TokenKind) -> bool {
    use TokenKind::*;

    match last {
        Start | BinaryOperation | UnaryOperation | OpenGroup => {
            matches!(next, Identifier | OpenGroup | UnaryOperation)
        }
        CloseGroup | Identifier => matches!(next, End | CloseGroup | BinaryOperation),
        End => false,
    }
}
