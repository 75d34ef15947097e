//! The public entry point: reflect tokens into grammar symbols, drive the
//! table-driven walker to completion, and hand back the populated symbol
//! table plus whatever diagnostics were accumulated along the way.

use std::sync::OnceLock;

use tacc_lex::{Lexer, LexStatus, Token, TokenCategory, TokenSubtype};
use tacc_util::{DiagnosticBuilder, Handler};

use crate::grammar::END;
use crate::symtab::SymbolTable;
use crate::tables::LrTable;
use crate::walker::{StepResult, Walker};

/// Maps a lexer token onto the grammar symbol the table was built over.
/// Literal categories (`num`, `real`, `id`, `basic`) collapse every lexeme
/// in that category onto one symbol; everything else is looked up by its
/// exact subtype.
fn reflect(token: &Token) -> &'static str {
    use TokenSubtype::*;
    match token.category {
        TokenCategory::Eof => END,
        TokenCategory::Type => "basic",
        TokenCategory::Integer => "num",
        TokenCategory::Float => "real",
        TokenCategory::Identifier => "id",
        _ => match token.subtype {
            DelimiterLBrace => "{",
            DelimiterRBrace => "}",
            DelimiterSemicolon => ";",
            DelimiterLBracket => "[",
            DelimiterRBracket => "]",
            DelimiterLParen => "(",
            DelimiterRParen => ")",
            OperatorAdd => "+",
            OperatorSub => "-",
            OperatorMul => "*",
            OperatorDiv => "/",
            OperatorMod => "%",
            OperatorAssign => "=",
            OperatorEq => "==",
            OperatorNotEq => "!=",
            OperatorLess => "<",
            OperatorLessEqual => "<=",
            OperatorGreater => ">",
            OperatorGreaterEqual => ">=",
            OperatorAnd => "&&",
            OperatorOr => "||",
            OperatorNot => "!",
            ReservedWordIf => "if",
            ReservedWordElse => "else",
            ReservedWordWhile => "while",
            ReservedWordDo => "do",
            ReservedWordBreak => "break",
            ReservedWordTrue => "true",
            ReservedWordFalse => "false",
            // A lexeme this grammar's terminal set doesn't recognise (e.g.
            // `++`, bitwise operators): the table has no action for it on
            // any state, so the walker reports `ParseError::NoAction`.
            _ => "<unsupported>",
        },
    }
}

/// Lazily builds the ACTION/GOTO table once and reuses it across every
/// `parse` call — table construction is pure and input-independent, so
/// there is no reason to redo it per source file.
#[derive(Default)]
pub struct Parser {
    table: OnceLock<LrTable>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces the table build now instead of on first [`Parser::parse`]
    /// call. Idempotent — a driver fanning out many parses across threads
    /// calls this once up front so every worker reuses the same built
    /// table read-only.
    pub fn ensure_table(&self) -> &LrTable {
        self.table.get_or_init(LrTable::build)
    }

    /// Drives `lexer` to completion (or the first unrecoverable parse
    /// error), calling `emit` once per rendered three-address line in
    /// program order, and returns the populated symbol table plus every
    /// diagnostic recorded along the way.
    pub fn parse(&self, lexer: &mut Lexer<'_>, mut emit: impl FnMut(&str)) -> (SymbolTable, Handler) {
        let table = self.ensure_table();
        let mut walker = Walker::new(table);
        // Declarations are skipped at run-time: the very first line always
        // jumps straight to the first real instruction, one line down.
        walker.emitter.emit("jmp", "L1", Vec::new());

        loop {
            let (token, status) = lexer.next_token();
            if let LexStatus::Err(_) = status {
                // The lexer already recorded its own diagnostic; skip the
                // malformed lexeme and keep parsing the rest of the file.
                continue;
            }

            let symbol = reflect(&token);
            if symbol == "{" {
                walker.symtab.enter_scope();
            }

            loop {
                match walker.next(symbol) {
                    Ok(StepResult::Reduce(_)) => continue,
                    Ok(StepResult::Shift) => {
                        walker.push_leaf(token.clone());
                        break;
                    }
                    Ok(StepResult::Goto) => break,
                    Ok(StepResult::Accept) => {
                        for line in walker.emitter.render_all() {
                            emit(&line);
                        }
                        let (symtab, _emitter, handler) = walker.finish();
                        return (symtab, handler);
                    }
                    Err(parse_error) => {
                        DiagnosticBuilder::error(parse_error.to_string()).emit(&mut walker.handler);
                        for line in walker.emitter.render_all() {
                            emit(&line);
                        }
                        let (symtab, _emitter, handler) = walker.finish();
                        return (symtab, handler);
                    }
                }
            }

            if symbol == "}" {
                walker.symtab.exit_scope();
            }
            if status == LexStatus::Eof {
                break;
            }
        }

        for line in walker.emitter.render_all() {
            emit(&line);
        }
        let (symtab, _emitter, handler) = walker.finish();
        (symtab, handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_an_empty_program_and_accepts() {
        let parser = Parser::new();
        let mut lexer = Lexer::new("{ }");
        let mut lines = Vec::new();
        let (_, handler) = parser.parse(&mut lexer, |line| lines.push(line.to_string()));
        assert!(!handler.has_errors());
        assert!(lines.iter().any(|l| l.contains("exit")));
    }

    #[test]
    fn declares_and_assigns_a_variable() {
        let parser = Parser::new();
        let mut lexer = Lexer::new("{ int32 x; x = 1 + 2; }");
        let mut lines = Vec::new();
        let (symtab, handler) = parser.parse(&mut lexer, |line| lines.push(line.to_string()));
        assert!(!handler.has_errors());
        assert!(lines.iter().any(|l| l.contains("alloc")));
        assert!(lines.iter().any(|l| l.contains("add")));
        assert!(lines.iter().any(|l| l.contains("mov")));
        drop(symtab);
    }

    #[test]
    fn undeclared_variable_is_reported_without_aborting() {
        let parser = Parser::new();
        let mut lexer = Lexer::new("{ x = 1; }");
        let mut lines = Vec::new();
        let (_, handler) = parser.parse(&mut lexer, |line| lines.push(line.to_string()));
        assert!(handler.has_errors());
    }

    #[test]
    fn reuses_the_same_table_across_calls() {
        let parser = Parser::new();
        let mut first = Lexer::new("{ }");
        let mut second = Lexer::new("{ int32 x; }");
        parser.parse(&mut first, |_| {});
        parser.parse(&mut second, |_| {});
    }

    #[test]
    fn ensure_table_called_repeatedly_builds_only_once() {
        let parser = Parser::new();
        let first = parser.ensure_table() as *const LrTable;
        let second = parser.ensure_table() as *const LrTable;
        assert_eq!(first, second);
    }
}
