use super::core::{LexStatus, Lexer};
use crate::error::LexError;
use crate::token::{Token, TokenCategory, TokenSubtype};
use crate::unicode::parse_hex_codepoint;

/// Double-quoted string literal. The opening `"` has already been consumed
/// by dispatch in `lexer::core`. Supports `\n \t \r \b \f \a \v \\ \"`,
/// `\uHHHH`, `\UHHHHHHHH`, and the two-digit octal `\NN` escape. A literal,
/// un-escaped newline before the closing quote is treated the same as
/// running off the end of the source: the string is unterminated.
pub(super) fn lex_string(lexer: &mut Lexer<'_>) -> (Token, LexStatus) {
    loop {
        match lexer.cursor.next() {
            None => {
                let partial = lexer.cursor.slice_from(lexer.token_start).to_string();
                return lexer.error_token(LexError::UnterminatedString, partial);
            }
            Some('"') => break,
            Some('\n') => {
                let partial = lexer.cursor.slice_from(lexer.token_start).to_string();
                return lexer.error_token(LexError::UnterminatedString, partial);
            }
            Some('\\') => {
                if let Err(err) = consume_escape(lexer, true) {
                    let partial = lexer.cursor.slice_from(lexer.token_start).to_string();
                    return lexer.error_token(err, partial);
                }
            }
            Some(_) => {}
        }
    }
    let lexeme = lexer.cursor.slice_from(lexer.token_start).to_string();
    (
        lexer.token(
            TokenCategory::String,
            lexeme,
            TokenSubtype::ConstantStringDouble,
        ),
        LexStatus::Ok,
    )
}

/// Backtick raw string literal: no escapes at all, embedded newlines are
/// taken literally, closed by the next backtick.
pub(super) fn lex_raw_string(lexer: &mut Lexer<'_>) -> (Token, LexStatus) {
    loop {
        match lexer.cursor.next() {
            None => {
                let partial = lexer.cursor.slice_from(lexer.token_start).to_string();
                return lexer.error_token(LexError::UnterminatedRawString, partial);
            }
            Some('`') => break,
            Some(_) => {}
        }
    }
    let lexeme = lexer.cursor.slice_from(lexer.token_start).to_string();
    (
        lexer.token(
            TokenCategory::String,
            lexeme,
            TokenSubtype::ConstantStringBacktick,
        ),
        LexStatus::Ok,
    )
}

/// Single-quoted character literal: exactly one logical character (a
/// plain code point or an escape), with NO octal escape support — unlike
/// strings, `\NN` is illegal here.
pub(super) fn lex_char(lexer: &mut Lexer<'_>) -> (Token, LexStatus) {
    match lexer.cursor.next() {
        None => {
            let partial = lexer.cursor.slice_from(lexer.token_start).to_string();
            return lexer.error_token(LexError::UnterminatedChar, partial);
        }
        Some('\'') => {
            let lexeme = lexer.cursor.slice_from(lexer.token_start).to_string();
            return lexer.error_token(LexError::EmptyChar, lexeme);
        }
        Some('\\') => {
            if let Err(err) = consume_escape(lexer, false) {
                let partial = lexer.cursor.slice_from(lexer.token_start).to_string();
                return lexer.error_token(err, partial);
            }
        }
        Some(_) => {}
    }

    match lexer.cursor.next() {
        None => {
            let partial = lexer.cursor.slice_from(lexer.token_start).to_string();
            lexer.error_token(LexError::UnterminatedChar, partial)
        }
        Some('\'') => {
            let lexeme = lexer.cursor.slice_from(lexer.token_start).to_string();
            (
                lexer.token(TokenCategory::Char, lexeme, TokenSubtype::ConstantChar),
                LexStatus::Ok,
            )
        }
        Some(_) => {
            loop {
                match lexer.cursor.next() {
                    None => break,
                    Some('\'') => break,
                    Some(_) => continue,
                }
            }
            let partial = lexer.cursor.slice_from(lexer.token_start).to_string();
            lexer.error_token(LexError::CharTooLong, partial)
        }
    }
}

/// Consumes the escape sequence following a backslash already taken off
/// the cursor. `allow_octal` gates the `\NN` form, which strings support
/// and char literals do not.
fn consume_escape(lexer: &mut Lexer<'_>, allow_octal: bool) -> Result<(), LexError> {
    let Some(c) = lexer.cursor.next() else {
        return Err(LexError::IllegalEscape);
    };
    match c {
        'n' | 't' | 'r' | 'b' | 'f' | 'a' | 'v' | '\\' | '"' | '\'' => Ok(()),
        'u' => {
            let digits = take_hex_digits(lexer, 4);
            parse_hex_codepoint(&digits, 4).map(|_| ()).ok_or(LexError::IllegalEscape)
        }
        'U' => {
            let digits = take_hex_digits(lexer, 8);
            parse_hex_codepoint(&digits, 8).map(|_| ()).ok_or(LexError::IllegalEscape)
        }
        '0'..='7' if allow_octal => match lexer.cursor.next() {
            Some(d2) if ('0'..='7').contains(&d2) => Ok(()),
            _ => Err(LexError::IllegalEscape),
        },
        _ => Err(LexError::IllegalEscape),
    }
}

fn take_hex_digits(lexer: &mut Lexer<'_>, n: usize) -> String {
    let mut digits = String::with_capacity(n);
    for _ in 0..n {
        match lexer.cursor.peek() {
            Some(c) if c.is_ascii_hexdigit() => {
                lexer.cursor.next();
                digits.push(c);
            }
            _ => break,
        }
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_string() {
        let mut lexer = Lexer::new("\"hello\" rest");
        let (token, status) = lexer.next_token();
        assert_eq!(status, LexStatus::Ok);
        assert_eq!(token.category, TokenCategory::String);
        assert_eq!(token.value, "\"hello\"");
    }

    #[test]
    fn string_with_simple_escapes() {
        let mut lexer = Lexer::new("\"a\\nb\\\\c\"");
        let (token, status) = lexer.next_token();
        assert_eq!(status, LexStatus::Ok);
        assert_eq!(token.value, "\"a\\nb\\\\c\"");
    }

    #[test]
    fn string_with_unicode_escape() {
        let mut lexer = Lexer::new("\"\\u0041\"");
        let (_, status) = lexer.next_token();
        assert_eq!(status, LexStatus::Ok);
    }

    #[test]
    fn string_with_octal_escape() {
        let mut lexer = Lexer::new("\"\\12\"");
        let (_, status) = lexer.next_token();
        assert_eq!(status, LexStatus::Ok);
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let mut lexer = Lexer::new("\"no close");
        let (_, status) = lexer.next_token();
        assert_eq!(status, LexStatus::Err(LexError::UnterminatedString));
    }

    #[test]
    fn raw_string_allows_embedded_newline() {
        let mut lexer = Lexer::new("`line1\nline2`");
        let (token, status) = lexer.next_token();
        assert_eq!(status, LexStatus::Ok);
        assert_eq!(token.value, "`line1\nline2`");
    }

    #[test]
    fn char_literal_plain() {
        let mut lexer = Lexer::new("'x' rest");
        let (token, status) = lexer.next_token();
        assert_eq!(status, LexStatus::Ok);
        assert_eq!(token.category, TokenCategory::Char);
        assert_eq!(token.value, "'x'");
    }

    #[test]
    fn char_literal_with_escape() {
        let mut lexer = Lexer::new("'\\n'");
        let (_, status) = lexer.next_token();
        assert_eq!(status, LexStatus::Ok);
    }

    #[test]
    fn char_literal_does_not_support_octal_escapes() {
        let mut lexer = Lexer::new("'\\12'");
        let (_, status) = lexer.next_token();
        assert_eq!(status, LexStatus::Err(LexError::IllegalEscape));
    }

    #[test]
    fn empty_char_literal_is_an_error() {
        let mut lexer = Lexer::new("''");
        let (_, status) = lexer.next_token();
        assert_eq!(status, LexStatus::Err(LexError::EmptyChar));
    }

    #[test]
    fn overlong_char_literal_is_an_error() {
        let mut lexer = Lexer::new("'ab'");
        let (_, status) = lexer.next_token();
        assert_eq!(status, LexStatus::Err(LexError::CharTooLong));
    }

    #[test]
    fn unterminated_char_literal_is_an_error() {
        let mut lexer = Lexer::new("'x");
        let (_, status) = lexer.next_token();
        assert_eq!(status, LexStatus::Err(LexError::UnterminatedChar));
    }
}
