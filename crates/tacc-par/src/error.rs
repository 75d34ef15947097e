//! Error taxonomy for grammar-table construction, parsing, and semantic
//! analysis (see spec §7 "Syntactic errors" / "Semantic errors" /
//! "Table-construction errors").

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("ACTION conflict in state {state} on {terminal}: kept {existing}, rejected {attempted}")]
    ActionConflict {
        state: usize,
        terminal: String,
        existing: String,
        attempted: String,
    },
    /// Constructed for completeness but never surfaced as a hard error —
    /// GOTO conflicts are silently ignored (first-installed wins) per the
    /// table-construction contract.
    #[error("GOTO conflict in state {state} on {symbol} ignored: kept {existing}, rejected {attempted}")]
    GotoConflictIgnored {
        state: usize,
        symbol: String,
        existing: usize,
        attempted: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no ACTION entry for state {state} on symbol {symbol}")]
    NoAction { state: usize, symbol: String },
    #[error("no GOTO entry for state {state} on symbol {symbol}")]
    NoGoto { state: usize, symbol: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error("variable `{name}` redeclared in the current scope")]
    Redeclared { name: String },
    #[error("use of undeclared variable `{name}`")]
    Undeclared { name: String },
    #[error("index {index} out of bounds for dimension {dimension} of `{name}` (bound {bound})")]
    ArrayIndexOutOfBounds {
        name: String,
        dimension: usize,
        index: i64,
        bound: i64,
    },
    #[error("invalid size {value} for dimension {dimension} of `{name}`")]
    InvalidArrayDimension {
        name: String,
        dimension: usize,
        value: i64,
    },
}
