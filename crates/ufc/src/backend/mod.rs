//! Output backends for the finished device model
//!
//! Backends are responsible for presenting a [`DeviceModel`] to whatever
//! runs after analysis: a person reading a summary, a layout/routing stage
//! reading JSON, or Graphviz.

mod dot;
mod json;

use crate::common::CompileResult;
use crate::sema::DeviceModel;
use std::fmt::Write;
use ufdevice::Layer;

pub use dot::emit_dot;
pub use json::{DeviceExport, emit_json};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable counts per layer
    #[default]
    Summary,
    /// Full model as JSON
    Json,
    /// Graphviz DOT
    Dot,
}

/// Render `model` in `format`
pub fn emit(model: &DeviceModel, format: OutputFormat) -> CompileResult<String> {
    match format {
        OutputFormat::Summary => Ok(emit_summary(model)),
        OutputFormat::Json => emit_json(model),
        OutputFormat::Dot => Ok(emit_dot(model)),
    }
}

/// Human-readable overview of a device
pub fn emit_summary(model: &DeviceModel) -> String {
    let mut buf = String::new();
    let name = model.name.as_deref().unwrap_or("<unnamed>");
    let verdict = if model.valid { "valid" } else { "INVALID" };
    writeln!(buf, "device {name}: {verdict}").unwrap();
    writeln!(
        buf,
        "  {} components, {} vertices, {} edges",
        model.symbols.len(),
        model.graph.vertex_count(),
        model.graph.edge_count()
    )
    .unwrap();

    for layer in Layer::ALL {
        let components = model.symbols.on_layer(layer).count();
        let vertices = model.graph.vertices_on(layer).count();
        let edges = model.graph.edges_on(layer).count();
        if components + vertices + edges == 0 {
            continue;
        }
        writeln!(
            buf,
            "  {layer}: {components} components, {vertices} vertices, {edges} edges"
        )
        .unwrap();
    }

    let dangling = model.graph.dangling_edges().count();
    if dangling > 0 {
        writeln!(buf, "  dangling edges: {dangling}").unwrap();
    }
    buf
}
