use crate::span::Span;

use super::level::Level;
use super::Diagnostic;

/// Fluent builder for a [`Diagnostic`]; call [`DiagnosticBuilder::emit`] to
/// hand it to a [`super::Handler`].
pub struct DiagnosticBuilder {
    level: Level,
    message: String,
    span: Option<Span>,
    notes: Vec<String>,
}

impl DiagnosticBuilder {
    fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            span: None,
            notes: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    pub fn span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn build(self) -> Diagnostic {
        Diagnostic {
            level: self.level,
            message: self.message,
            span: self.span,
            notes: self.notes,
        }
    }

    pub fn emit(self, handler: &mut super::Handler) {
        handler.push(self.build());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_carries_span_and_notes() {
        let diag = DiagnosticBuilder::error("illegal integer")
            .span(Span::point(3, 1, 4))
            .note("octal literals are not supported")
            .build();
        assert_eq!(diag.message, "illegal integer");
        assert_eq!(diag.notes.len(), 1);
        assert_eq!(diag.span.unwrap().line, 1);
    }
}
