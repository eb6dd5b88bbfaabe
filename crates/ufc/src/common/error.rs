//! Error types and diagnostic reporting

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use std::collections::HashMap;
use thiserror::Error;
use super::Span;
use crate::sema::{DiagnosticSink, SemanticDiagnostic};

/// Fatal error: analysis stops and no device model is produced
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Malformed input at {span:?}")]
    MalformedInput { span: Span },

    #[error("Invalid declaration event stream: {0}")]
    EventStream(#[source] serde_json::Error),

    #[error("Model export failed: {0}")]
    Export(#[source] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompileError {
    pub fn malformed(span: Span) -> Self {
        Self::MalformedInput { span }
    }
}

pub type CompileResult<T> = Result<T, CompileError>;

/// Recoverable semantic violation; analysis continues and the device is
/// marked invalid
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticErrorKind {
    #[error("duplicated identifier")]
    DuplicatedIdentifier,

    #[error("undefined identifier")]
    UndefinedIdentifier,

    #[error("undefined port")]
    UndefinedPort,
}

impl SemanticErrorKind {
    /// Stable diagnostic code
    pub fn code(self) -> &'static str {
        match self {
            SemanticErrorKind::DuplicatedIdentifier => "E0001",
            SemanticErrorKind::UndefinedIdentifier => "E0002",
            SemanticErrorKind::UndefinedPort => "E0003",
        }
    }
}

/// Diagnostic reporter for pretty error output
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    file_ids: HashMap<String, usize>,
    writer: StandardStream,
    config: term::Config,
    reported: usize,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self::with_color(ColorChoice::Auto)
    }

    pub fn with_color(color: ColorChoice) -> Self {
        Self {
            files: SimpleFiles::new(),
            file_ids: HashMap::new(),
            writer: StandardStream::stderr(color),
            config: term::Config::default(),
            reported: 0,
        }
    }

    /// Register source text so diagnostics for `name` get labelled snippets
    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        let name = name.into();
        let file_id = self.files.add(name.clone(), source.into());
        self.file_ids.insert(name, file_id);
        file_id
    }

    /// Number of semantic diagnostics reported so far
    pub fn reported(&self) -> usize {
        self.reported
    }

    /// Convert a semantic diagnostic into a codespan diagnostic.
    ///
    /// Without registered source for the file, the location is given as a
    /// note instead of a label.
    pub fn to_codespan(&self, diagnostic: &SemanticDiagnostic) -> Diagnostic<usize> {
        let message = format!("{} `{}`", diagnostic.kind, diagnostic.text);
        let base = Diagnostic::error()
            .with_code(diagnostic.kind.code())
            .with_message(message);

        match self.file_ids.get(&diagnostic.filename) {
            Some(&file_id) => base.with_labels(vec![
                Label::primary(file_id, diagnostic.span).with_message(diagnostic.kind.to_string()),
            ]),
            None => base.with_notes(vec![format!(
                "in {} at bytes {}..{}",
                diagnostic.filename, diagnostic.span.start, diagnostic.span.end
            )]),
        }
    }

    fn emit(&self, diagnostic: &Diagnostic<usize>) {
        if let Err(e) = term::emit(&mut self.writer.lock(), &self.config, &self.files, diagnostic) {
            tracing::warn!(error = %e, "failed to render diagnostic");
        }
    }

    /// Report a fatal error for `filename`
    pub fn report_error(&self, filename: &str, error: &CompileError) {
        let diagnostic = match error {
            CompileError::MalformedInput { span } => {
                let base = Diagnostic::error().with_message("Malformed input");
                match self.file_ids.get(filename) {
                    Some(&file_id) => base.with_labels(vec![
                        Label::primary(file_id, *span)
                            .with_message("declaration could not be parsed"),
                    ]),
                    None => base.with_notes(vec![format!(
                        "in {} at bytes {}..{}",
                        filename, span.start, span.end
                    )]),
                }
            }

            CompileError::EventStream(err) => Diagnostic::error()
                .with_message(format!("Invalid declaration event stream: {}", err)),

            CompileError::Export(err) => Diagnostic::error()
                .with_message(format!("Model export failed: {}", err)),

            CompileError::Io(err) => {
                Diagnostic::error().with_message(format!("IO error: {}", err))
            }
        };

        self.emit(&diagnostic);
    }
}

impl DiagnosticSink for DiagnosticReporter {
    fn report(&mut self, diagnostic: SemanticDiagnostic) {
        let rendered = self.to_codespan(&diagnostic);
        self.emit(&rendered);
        self.reported += 1;
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}
