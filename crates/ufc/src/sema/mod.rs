//! Semantic analysis module
//!
//! This module turns declaration events into a validated device model and
//! reports duplicate names, undefined references and undefined ports.

mod analyzer;
mod diagnostics;
pub mod event;

pub use analyzer::{AnalysisState, DeviceModel, SemanticAnalyzer};
pub use diagnostics::{DiagnosticSink, SemanticDiagnostic};
pub use event::{Declaration, Ident, LayerBlock, PortRef};
