//! UFC - semantic analyzer for MINT microfluidic device descriptions
//!
//! This library turns the declaration events of a parsed MINT file into a
//! validated [`ufdevice`] model: a symbol table of components and a
//! multi-layer connectivity graph.
//!
//! ## Architecture
//!
//! The analyzer is organized into:
//! - **Common** (`common/`): Shared infrastructure (errors, spans, diagnostic rendering)
//! - **Sema** (`sema/`): Declaration events and the semantic analyzer
//! - **Driver** (`driver/`): Event stream decoding and run configuration
//! - **Backend** (`backend/`): Output formats for the finished device model

pub mod common;
pub mod sema;
pub mod driver;
pub mod backend;

// Re-exports for convenience
pub use common::{CompileError, CompileResult, DiagnosticReporter, SemanticErrorKind, Span};
pub use sema::{Declaration, DeviceModel, DiagnosticSink, SemanticAnalyzer, SemanticDiagnostic};
pub use driver::{AnalysisConfig, analyze_events};
pub use backend::{OutputFormat, emit};
