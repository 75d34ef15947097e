//! Lexical error taxonomy (see spec §7 "Lexical errors").

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("string not closed")]
    UnterminatedString,
    #[error("char not closed")]
    UnterminatedChar,
    #[error("raw string not closed")]
    UnterminatedRawString,
    #[error("illegal escape")]
    IllegalEscape,
    #[error("illegal char[too long]")]
    CharTooLong,
    #[error("empty character literal")]
    EmptyChar,
    #[error("illegal integer")]
    IllegalInteger,
    #[error("illegal hex literal")]
    IllegalHexLiteral,
    #[error("illegal suffix")]
    IllegalSuffix,
    #[error("too many dots")]
    TooManyDots,
    #[error("unknown character")]
    UnknownCharacter,
}
