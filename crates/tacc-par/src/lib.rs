//! LR(1) table construction and the table-driven parser/semantic walker
//! for the small imperative language `tacc-lex` tokenises.
//!
//! [`grammar`] and [`first`]/[`items`]/[`tables`] build the ACTION/GOTO
//! table once; [`walker`]/[`rules`] drive it over a token stream, building
//! [`ast`] nodes, populating a [`symtab::SymbolTable`], and emitting
//! backpatched three-address code through an [`emitter::Emitter`].
//! [`parser::Parser`] is the crate's single public entry point.

mod ast;
mod emitter;
mod error;
mod first;
mod grammar;
mod items;
mod parser;
mod rules;
mod symtab;
mod tables;
mod walker;

pub use ast::{AstNode, Payload};
pub use emitter::{address_operand, EmitError, Emitter};
pub use error::{ParseError, SemanticError, TableError};
pub use grammar::{is_terminal, Production, EPSILON, PRODUCTIONS, TERMINALS};
pub use parser::Parser;
pub use symtab::{ItemKind, Scope, SymbolTable, SymbolTableItem};
pub use tables::{Action, LrTable};
pub use walker::{StepResult, Walker};
