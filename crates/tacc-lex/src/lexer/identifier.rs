use super::core::{LexStatus, Lexer};
use crate::token::{basic_type_subtype, reserved_word_subtype, Token, TokenCategory, TokenSubtype};
use crate::unicode::is_ident_continue;

/// Classifies a complete identifier-shaped lexeme. Pure and deterministic:
/// calling it twice on the same text always yields the same subtype (the
/// idempotence property required by spec §8).
pub fn classify(lexeme: &str) -> (TokenCategory, TokenSubtype) {
    if let Some(subtype) = basic_type_subtype(lexeme) {
        (TokenCategory::Type, subtype)
    } else if let Some(subtype) = reserved_word_subtype(lexeme) {
        (TokenCategory::Reserved, subtype)
    } else {
        (TokenCategory::Identifier, TokenSubtype::Identifier)
    }
}

pub(super) fn lex_identifier(lexer: &mut Lexer<'_>) -> (Token, LexStatus) {
    while let Some(c) = lexer.cursor.peek() {
        if is_ident_continue(c) {
            lexer.cursor.next();
        } else {
            break;
        }
    }
    let lexeme = lexer.cursor.slice_from(lexer.token_start).to_string();
    let (category, subtype) = classify(&lexeme);
    (lexer.token(category, lexeme, subtype), LexStatus::Ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::core::Lexer;

    #[test]
    fn basic_type_keyword_classified_as_type() {
        let mut lexer = Lexer::new("int32 rest");
        let (token, _) = lexer.next_token();
        assert_eq!(token.category, TokenCategory::Type);
        assert_eq!(token.subtype, TokenSubtype::TypeInt32);
    }

    #[test]
    fn reserved_word_classified_as_reserved() {
        let mut lexer = Lexer::new("while (");
        let (token, _) = lexer.next_token();
        assert_eq!(token.category, TokenCategory::Reserved);
        assert_eq!(token.subtype, TokenSubtype::ReservedWordWhile);
    }

    #[test]
    fn plain_name_classified_as_identifier() {
        let mut lexer = Lexer::new("my_var1");
        let (token, _) = lexer.next_token();
        assert_eq!(token.category, TokenCategory::Identifier);
        assert_eq!(token.value, "my_var1");
    }

    #[test]
    fn classify_is_idempotent() {
        assert_eq!(classify("while"), classify("while"));
        assert_eq!(classify("foo"), classify("foo"));
    }
}
