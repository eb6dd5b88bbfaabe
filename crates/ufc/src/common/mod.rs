//! Common infrastructure shared by the analyzer, driver and backends

mod error;
mod span;

pub use error::{CompileError, CompileResult, DiagnosticReporter, SemanticErrorKind};
pub use span::Span;
