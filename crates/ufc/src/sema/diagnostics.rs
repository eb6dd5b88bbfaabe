//! Semantic diagnostics and where they go

use crate::common::{SemanticErrorKind, Span};
use std::fmt;

/// A recoverable violation found while analyzing one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticDiagnostic {
    pub filename: String,
    pub span: Span,
    pub kind: SemanticErrorKind,
    /// Offending source text (identifier or port number)
    pub text: String,
}

impl fmt::Display for SemanticDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: error[{}]: {} `{}`",
            self.filename,
            self.span.start,
            self.kind.code(),
            self.kind,
            self.text
        )
    }
}

/// Receiver for semantic diagnostics.
///
/// The analyzer never formats or prints; it hands each violation to a sink
/// as soon as it is found.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: SemanticDiagnostic);
}

/// Collects diagnostics in report order
impl DiagnosticSink for Vec<SemanticDiagnostic> {
    fn report(&mut self, diagnostic: SemanticDiagnostic) {
        self.push(diagnostic);
    }
}
