use super::core::{LexStatus, Lexer};
use crate::error::LexError;
use crate::token::{Token, TokenCategory, TokenSubtype};

/// Lexes a numeric literal. Greedily consumes digits, letters, `_`, and
/// `.`, then classifies the accumulated text per spec §4.2:
///
/// - `0x`/`0X` prefix with at least one hex digit body, no `.` → INTEGER (hex).
/// - exactly one `.`, no `0x` prefix → FLOAT (leading zeros before the
///   `.` normalised to one).
/// - no `.`, leading `0`, length > 1 → error (octal is not supported).
/// - trailing letters/`_` outside the hex case → error.
/// - two or more `.` → error.
pub(super) fn lex_number(lexer: &mut Lexer<'_>) -> (Token, LexStatus) {
    while let Some(c) = lexer.cursor.peek() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
            lexer.cursor.next();
        } else {
            break;
        }
    }
    let raw = lexer.cursor.slice_from(lexer.token_start).to_string();

    if let Some(body) = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
    {
        if body.is_empty() || body.contains('.') {
            return lexer.error_token(LexError::IllegalHexLiteral, raw);
        }
        if !body.chars().all(|c| c.is_ascii_hexdigit() || c == '_') {
            return lexer.error_token(LexError::IllegalHexLiteral, raw);
        }
        return (
            lexer.token(TokenCategory::Integer, raw, TokenSubtype::ConstantIntegerHex),
            LexStatus::Ok,
        );
    }

    let dot_count = raw.matches('.').count();
    if dot_count >= 2 {
        return lexer.error_token(LexError::TooManyDots, raw);
    }

    if dot_count == 1 {
        if raw.chars().any(|c| c.is_ascii_alphabetic()) {
            return lexer.error_token(LexError::IllegalSuffix, raw);
        }
        let normalised = normalise_leading_zeros(&raw);
        return (
            lexer.token(TokenCategory::Float, normalised, TokenSubtype::ConstantFloat),
            LexStatus::Ok,
        );
    }

    if raw.chars().any(|c| c.is_ascii_alphabetic() || c == '_') {
        return lexer.error_token(LexError::IllegalSuffix, raw);
    }
    if raw.starts_with('0') && raw.len() > 1 {
        return lexer.error_token(LexError::IllegalInteger, raw);
    }

    (
        lexer.token(
            TokenCategory::Integer,
            raw,
            TokenSubtype::ConstantIntegerDecimal,
        ),
        LexStatus::Ok,
    )
}

/// `00.5` → `0.5`; a lone `0` before the dot is left untouched.
fn normalise_leading_zeros(raw: &str) -> String {
    let (int_part, rest) = raw.split_once('.').expect("caller verified one dot");
    let trimmed = int_part.trim_start_matches('0');
    let int_part = if trimmed.is_empty() { "0" } else { trimmed };
    format!("{int_part}.{rest}")
}
