use tacc_util::{DiagnosticBuilder, Handler, Span};

use crate::cursor::CharSource;
use crate::error::LexError;
use crate::token::{Token, TokenCategory, TokenSubtype, DELIMITERS, OPERATORS};
use crate::unicode;

/// Outcome of one [`Lexer::next_token`] call. An `Err` does not stop the
/// lexer — the next call still advances and may produce further tokens or
/// errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexStatus {
    Ok,
    Err(LexError),
    Eof,
}

pub struct Lexer<'a> {
    pub(super) cursor: CharSource<'a>,
    handler: Handler,
    pub(super) token_start: usize,
    pub(super) token_start_line: u32,
    pub(super) token_start_column: u32,
    bom_checked: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: CharSource::new(source),
            handler: Handler::new(),
            token_start: 0,
            token_start_line: 1,
            token_start_column: 0,
            bom_checked: false,
        }
    }

    /// Diagnostics accumulated across every `next_token` call so far (in
    /// addition to the per-call [`LexStatus`]).
    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    fn skip_bom(&mut self) {
        if !self.bom_checked {
            self.bom_checked = true;
            if self.cursor.peek() == Some('\u{FEFF}') {
                self.cursor.next();
            }
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            let mut made_progress = false;
            while let Some(c) = self.cursor.peek() {
                if c.is_whitespace() {
                    self.cursor.next();
                    made_progress = true;
                } else {
                    break;
                }
            }
            if self.cursor.starts_with("//") {
                self.cursor.next();
                self.cursor.next();
                while let Some(c) = self.cursor.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.cursor.next();
                }
                made_progress = true;
            } else if self.cursor.starts_with("/*") {
                super::comment::skip_block_comment(&mut self.cursor);
                made_progress = true;
            }
            if !made_progress {
                break;
            }
        }
    }

    pub fn next_token(&mut self) -> (Token, LexStatus) {
        self.skip_bom();
        self.skip_whitespace_and_comments();

        self.token_start = self.cursor.position();

        let Some(ch) = self.cursor.next() else {
            return (
                Token::eof(self.cursor.line(), self.cursor.column()),
                LexStatus::Eof,
            );
        };
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        match ch {
            '"' => super::string::lex_string(self),
            '`' => super::string::lex_raw_string(self),
            '\'' => super::string::lex_char(self),
            c if unicode::is_ascii_ident_start(c) || unicode::is_ident_start(c) => {
                super::identifier::lex_identifier(self)
            }
            c if c.is_ascii_digit() => super::number::lex_number(self),
            c if OPERATORS.iter().any(|(op, _)| op.starts_with(c)) => {
                super::operator::lex_operator(self, c)
            }
            c if DELIMITERS.iter().any(|(d, _)| *d == c) => self.lex_delimiter(c),
            c => self.error_token(LexError::UnknownCharacter, c.to_string()),
        }
    }

    fn lex_delimiter(&mut self, c: char) -> (Token, LexStatus) {
        let subtype = DELIMITERS
            .iter()
            .find(|(d, _)| *d == c)
            .map(|(_, s)| *s)
            .expect("dispatch guaranteed a delimiter match");
        (
            self.token(TokenCategory::Delimiter, c.to_string(), subtype),
            LexStatus::Ok,
        )
    }

    pub(super) fn token(
        &self,
        category: TokenCategory,
        value: impl Into<String>,
        subtype: TokenSubtype,
    ) -> Token {
        Token::new(
            category,
            value,
            subtype,
            self.token_start_line,
            self.token_start_column,
        )
    }

    /// Builds the `(EXTRA, "")` error token the lexer emits on a non-fatal
    /// failure, recording the failure both in the returned [`LexStatus`]
    /// and in the accumulated [`Handler`].
    pub(super) fn error_token(
        &mut self,
        error: LexError,
        lexeme: impl Into<String>,
    ) -> (Token, LexStatus) {
        let lexeme = lexeme.into();
        let span = Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        );
        DiagnosticBuilder::error(error.to_string())
            .span(span)
            .emit(&mut self.handler);
        let token = self.token(TokenCategory::Extra, lexeme, TokenSubtype::Unknown);
        (token, LexStatus::Err(error))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let (token, status) = self.next_token();
        if status == LexStatus::Eof {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenSubtype;

    #[test]
    fn eof_on_empty_source() {
        let mut lexer = Lexer::new("");
        let (token, status) = lexer.next_token();
        assert_eq!(status, LexStatus::Eof);
        assert_eq!(token.category, TokenCategory::Eof);
    }

    #[test]
    fn skips_line_and_block_comments_and_whitespace() {
        let mut lexer = Lexer::new("  // comment\n/* block */  id");
        let (token, status) = lexer.next_token();
        assert_eq!(status, LexStatus::Ok);
        assert_eq!(token.category, TokenCategory::Identifier);
        assert_eq!(token.value, "id");
    }

    #[test]
    fn unterminated_block_comment_is_silently_accepted_at_eof() {
        let mut lexer = Lexer::new("/* never closed");
        let (token, status) = lexer.next_token();
        assert_eq!(status, LexStatus::Eof);
        assert_eq!(token.category, TokenCategory::Eof);
        assert!(!lexer.handler().has_errors());
    }

    #[test]
    fn unknown_character_reports_error_but_continues() {
        let mut lexer = Lexer::new("@ id");
        let (_, status) = lexer.next_token();
        assert_eq!(status, LexStatus::Err(LexError::UnknownCharacter));
        let (token, status) = lexer.next_token();
        assert_eq!(status, LexStatus::Ok);
        assert_eq!(token.value, "id");
    }

    #[test]
    fn iterator_stops_at_eof() {
        let lexer = Lexer::new("a b");
        let tokens: Vec<_> = lexer.collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].subtype, TokenSubtype::Identifier);
    }

    #[test]
    fn line_and_column_are_one_based_and_nondecreasing() {
        let lexer = Lexer::new("a\nbb ccc");
        let mut last = (0u32, 0u32);
        for tok in lexer {
            assert!(tok.line >= 1 && tok.column >= 1);
            assert!((tok.line, tok.column) >= last);
            last = (tok.line, tok.column);
        }
    }
}
