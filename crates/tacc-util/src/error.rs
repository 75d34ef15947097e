//! Core error types shared by the util crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SymbolError {
    #[error("symbol not found: index {index}")]
    NotFound { index: u32 },
}

#[derive(Debug, Error)]
pub enum SourceMapError {
    #[error("invalid span: start {start} > end {end}")]
    InvalidSpan { start: usize, end: usize },
}

#[derive(Debug, Error)]
pub enum IndexVecError {
    #[error("index out of bounds: index {index}, length {length}")]
    OutOfBounds { index: usize, length: usize },
}

#[derive(Debug, Error)]
pub enum DiagnosticError {
    #[error("failed to format diagnostic: {0}")]
    FormatFailed(String),
}

pub type Result<T> = std::result::Result<T, DiagnosticError>;
