//! Hand-written lexical scanner: turns source text into a stream of
//! classified [`Token`]s, one rune at a time, with no lookahead beyond a
//! single character of unread.

mod cursor;
mod error;
mod lexer;
mod token;
mod unicode;

pub use cursor::CharSource;
pub use error::LexError;
pub use lexer::{LexStatus, Lexer};
pub use token::{
    basic_type_subtype, reserved_word_subtype, Token, TokenCategory, TokenSubtype, DELIMITERS,
    OPERATORS,
};
