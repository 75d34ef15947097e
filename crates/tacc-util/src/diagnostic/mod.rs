//! Diagnostics: the common currency lexical, syntactic, and semantic errors
//! are converted into before being handed to whatever prints or collects
//! them (the driver, or a test harness).

mod builder;
mod level;

pub use builder::DiagnosticBuilder;
pub use level::Level;

use crate::span::Span;

#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Option<Span>,
    pub notes: Vec<String>,
}

/// Accumulates diagnostics for one lexing or parsing pass. Never aborts on
/// its own — callers inspect [`Handler::has_errors`] to decide whether to
/// stop.
#[derive(Default)]
pub struct Handler {
    diagnostics: Vec<Diagnostic>,
}

impl Handler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level.is_error())
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn drain(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}
