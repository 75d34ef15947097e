//! The shift/reduce/goto driver over a built [`LrTable`].

use tacc_lex::Token;
use tacc_util::{DiagnosticBuilder, Handler};

use crate::ast::AstNode;
use crate::emitter::Emitter;
use crate::error::ParseError;
use crate::grammar::{is_terminal, PRODUCTIONS};
use crate::rules;
use crate::symtab::SymbolTable;
use crate::tables::{Action, LrTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    Shift,
    Reduce(usize),
    Goto,
    Accept,
}

pub struct Walker<'t> {
    table: &'t LrTable,
    state_stack: Vec<usize>,
    symbol_stack: Vec<&'static str>,
    node_stack: Vec<AstNode>,
    pub symtab: SymbolTable,
    pub emitter: Emitter,
    pub handler: Handler,
}

impl<'t> Walker<'t> {
    pub fn new(table: &'t LrTable) -> Self {
        Self {
            table,
            state_stack: vec![0],
            symbol_stack: Vec::new(),
            node_stack: Vec::new(),
            symtab: SymbolTable::new(),
            emitter: Emitter::new(),
            handler: Handler::new(),
        }
    }

    /// Reads the debug symbol stack `n` positions below the current top
    /// (`n = 0` is the top itself). Used by the `bool` rule to decide
    /// whether it is reducing inside an `if`/`while` condition versus a
    /// `do … while` or a plain assignment — see `rules::bool_reduction`.
    pub fn peek_symbol_back(&self, n: usize) -> Option<&'static str> {
        let len = self.symbol_stack.len();
        if len > n {
            Some(self.symbol_stack[len - 1 - n])
        } else {
            None
        }
    }

    /// Called by the driver after observing a [`StepResult::Shift`]: pushes
    /// the shifted token as a leaf AST node so the next reduction can
    /// consume it as a child.
    pub fn push_leaf(&mut self, token: Token) {
        self.node_stack.push(AstNode::leaf(token));
    }

    pub fn next(&mut self, symbol: &'static str) -> Result<StepResult, ParseError> {
        let state = *self.state_stack.last().expect("state stack is never empty");

        if is_terminal(symbol) {
            match self.table.action.get(&(state, symbol)) {
                Some(Action::Shift(target)) => {
                    self.state_stack.push(*target);
                    self.symbol_stack.push(symbol);
                    // `do` has no semantic rule of its own (the loop body
                    // that follows it reduces before `matched_stmt → do
                    // stmt while ( bool ) ;` ever fires), so the
                    // break-collection scope for its body is opened here,
                    // mirroring how the driver special-cases `{`/`}` for
                    // symbol-table scopes.
                    if symbol == "do" {
                        self.emitter.enter_loop();
                    }
                    Ok(StepResult::Shift)
                }
                Some(Action::Reduce(production_index)) => {
                    let production_index = *production_index;
                    self.reduce(production_index)?;
                    Ok(StepResult::Reduce(production_index))
                }
                Some(Action::Accept) => Ok(StepResult::Accept),
                None => Err(ParseError::NoAction {
                    state,
                    symbol: symbol.to_string(),
                }),
            }
        } else {
            match self.table.goto.get(&(state, symbol)) {
                Some(&target) => {
                    self.state_stack.push(target);
                    self.symbol_stack.push(symbol);
                    Ok(StepResult::Goto)
                }
                None => Err(ParseError::NoGoto {
                    state,
                    symbol: symbol.to_string(),
                }),
            }
        }
    }

    fn reduce(&mut self, production_index: usize) -> Result<(), ParseError> {
        let production = &PRODUCTIONS[production_index];
        let pop_count = if production.is_epsilon() { 0 } else { production.body.len() };

        let mut children = Vec::with_capacity(pop_count);
        for _ in 0..pop_count {
            children.push(
                self.node_stack
                    .pop()
                    .expect("node stack underflow during reduce"),
            );
        }
        children.reverse();

        // The symbol/state stacks still hold the pre-reduce depth here —
        // rules that peek back (the `bool` rule's do-while lookback) rely
        // on this ordering.
        let node = match rules::apply(self, production_index, children) {
            Ok(node) => node,
            Err(semantic_error) => {
                DiagnosticBuilder::error(semantic_error.to_string()).emit(&mut self.handler);
                AstNode::new("<error>", "error")
            }
        };

        for _ in 0..pop_count {
            self.state_stack.pop();
            self.symbol_stack.pop();
        }
        self.node_stack.push(node);

        let state_after_pop = *self.state_stack.last().expect("state stack is never empty");
        let goto_state = *self
            .table
            .goto
            .get(&(state_after_pop, production.head))
            .ok_or_else(|| ParseError::NoGoto {
                state: state_after_pop,
                symbol: production.head.to_string(),
            })?;
        self.state_stack.push(goto_state);
        self.symbol_stack.push(production.head);
        Ok(())
    }

    pub fn finish(self) -> (SymbolTable, Emitter, Handler) {
        (self.symtab, self.emitter, self.handler)
    }

    /// Pushes a symbol directly onto the debug symbol stack without going
    /// through `next()` — lets `rules` tests exercise `peek_symbol_back`
    /// in isolation without driving a full parse.
    #[cfg(test)]
    pub(crate) fn push_symbol_for_test(&mut self, symbol: &'static str) {
        self.symbol_stack.push(symbol);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::END;
    use tacc_lex::{TokenCategory, TokenSubtype};

    fn leaf(value: &str, subtype: TokenSubtype) -> Token {
        Token::new(TokenCategory::Identifier, value, subtype, 1, 1)
    }

    #[test]
    fn empty_block_parses_to_accept() {
        let table = LrTable::build();
        let mut walker = Walker::new(&table);

        let steps: &[&str] = &["{", "}", END];
        for &symbol in steps {
            loop {
                match walker.next(symbol) {
                    Ok(StepResult::Reduce(_)) => continue,
                    Ok(StepResult::Shift) => {
                        walker.push_leaf(leaf(symbol, TokenSubtype::DelimiterLBrace));
                        break;
                    }
                    Ok(StepResult::Accept) => return,
                    Ok(StepResult::Goto) => break,
                    Err(e) => panic!("unexpected parse error: {e}"),
                }
            }
        }
    }

    #[test]
    fn peek_symbol_back_returns_none_past_the_bottom() {
        let table = LrTable::build();
        let walker = Walker::new(&table);
        assert_eq!(walker.peek_symbol_back(10), None);
    }
}
