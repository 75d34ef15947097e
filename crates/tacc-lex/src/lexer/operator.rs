use super::core::{LexStatus, Lexer};
use crate::token::{Token, TokenCategory, OPERATORS};

/// Longest-match operator scanning. Every operator lexeme in this grammar
/// is one or two characters, so "longest match" reduces to: look one
/// character ahead and see whether `c` plus that character together spell
/// a known two-character operator; if so consume it, otherwise fall back
/// to the one-character operator for `c` alone (which dispatch in
/// `lexer::core` has already established exists). Ties within the table
/// are broken by [`OPERATORS`]'s fixed insertion order, though in practice
/// no two entries share a lexeme.
pub(super) fn lex_operator(lexer: &mut Lexer<'_>, c: char) -> (Token, LexStatus) {
    if let Some(next) = lexer.cursor.peek() {
        let mut candidate = String::with_capacity(2);
        candidate.push(c);
        candidate.push(next);
        if OPERATORS.iter().any(|(op, _)| *op == candidate) {
            lexer.cursor.next();
        }
    }

    let lexeme = lexer.cursor.slice_from(lexer.token_start).to_string();
    let subtype = OPERATORS
        .iter()
        .find(|(op, _)| *op == lexeme)
        .map(|(_, subtype)| *subtype)
        .expect("dispatch guaranteed at least a one-character operator match");
    (
        lexer.token(TokenCategory::Operator, lexeme, subtype),
        LexStatus::Ok,
    )
}
