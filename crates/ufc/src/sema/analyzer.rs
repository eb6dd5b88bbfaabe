//! Semantic analyzer - builds and validates the device model
//!
//! Declarations are handled one at a time in source order. Names are
//! resolved as soon as a declaration is seen, so a channel may only refer to
//! components declared before it.

use super::diagnostics::{DiagnosticSink, SemanticDiagnostic};
use super::event::{
    CellTrapGeometry, CellTrapParam, Declaration, Ident, MixerGeometry, MixerParam, PortRef,
    SQUARE_CELL_TRAP,
};
use crate::common::{CompileError, CompileResult, SemanticErrorKind, Span};
use tracing::debug;
use ufdevice::{Component, ComponentKind, DeviceGraph, Layer, SymbolTable};

/// Per-run bookkeeping
#[derive(Debug, Clone)]
pub struct AnalysisState {
    valid: bool,
    layer: Layer,
    device_name: Option<String>,
}

impl AnalysisState {
    pub fn new() -> Self {
        Self {
            valid: true,
            layer: Layer::Undefined,
            device_name: None,
        }
    }

    /// False once any semantic violation was found; never reset
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Layer new components are placed on
    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn device_name(&self) -> Option<&str> {
        self.device_name.as_deref()
    }
}

impl Default for AnalysisState {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a completed analysis.
///
/// Check `valid` before trusting the model: an invalid device is still
/// complete (every declaration had its effect) but may contain edges to
/// undeclared ports.
#[derive(Debug)]
pub struct DeviceModel {
    pub name: Option<String>,
    pub valid: bool,
    pub symbols: SymbolTable,
    pub graph: DeviceGraph,
}

/// Semantic analyzer for one MINT file
pub struct SemanticAnalyzer<'a> {
    filename: String,
    sink: &'a mut dyn DiagnosticSink,
    symbols: SymbolTable,
    graph: DeviceGraph,
    state: AnalysisState,
}

impl<'a> SemanticAnalyzer<'a> {
    pub fn new(filename: impl Into<String>, sink: &'a mut dyn DiagnosticSink) -> Self {
        Self {
            filename: filename.into(),
            sink,
            symbols: SymbolTable::new(),
            graph: DeviceGraph::new(),
            state: AnalysisState::new(),
        }
    }

    /// Analyze a whole declaration sequence.
    ///
    /// Stops at the first malformed declaration and returns its error; no
    /// model is produced in that case.
    pub fn analyze<I>(mut self, declarations: I) -> CompileResult<DeviceModel>
    where
        I: IntoIterator<Item = Declaration>,
    {
        for declaration in declarations {
            self.process(&declaration)?;
        }
        Ok(self.finish())
    }

    /// Handle a single declaration.
    ///
    /// Semantic violations are reported to the sink and recorded in the
    /// validity flag; only [`Declaration::Malformed`] yields an error.
    pub fn process(&mut self, declaration: &Declaration) -> CompileResult<()> {
        debug!(kind = declaration.kind(), layer = %self.state.layer, "declaration");
        match declaration {
            Declaration::Header { name } => {
                debug!(device = %name.name, "device header");
                self.state.device_name = Some(name.name.clone());
            }
            Declaration::EnterLayer { layer } => {
                self.state.layer = (*layer).into();
            }
            Declaration::ExitLayer { .. } => {
                self.state.layer = Layer::Undefined;
            }
            Declaration::Ports { names, radius } => {
                for name in names {
                    self.declare(name, ComponentKind::Port { radius: *radius });
                }
            }
            Declaration::Nodes { names } => {
                for name in names {
                    self.declare(name, ComponentKind::Node);
                }
            }
            Declaration::Channel { name, from, to } => self.declare_channel(name, from, to),
            Declaration::CellTrap {
                cell_type,
                names,
                params,
            } => self.declare_cell_traps(cell_type, names, params),
            Declaration::Mixer { name, params } => self.declare_mixer(name, params),
            Declaration::Malformed { span } => {
                return Err(CompileError::malformed(*span));
            }
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.state.is_valid()
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn graph(&self) -> &DeviceGraph {
        &self.graph
    }

    /// Hand over the model built so far
    pub fn finish(self) -> DeviceModel {
        debug!(
            components = self.symbols.len(),
            vertices = self.graph.vertex_count(),
            edges = self.graph.edge_count(),
            valid = self.state.valid,
            "analysis finished"
        );
        DeviceModel {
            name: self.state.device_name,
            valid: self.state.valid,
            symbols: self.symbols,
            graph: self.graph,
        }
    }

    fn error(&mut self, span: Span, kind: SemanticErrorKind, text: &str) {
        debug!(file = %self.filename, code = kind.code(), text, "{}", kind);
        self.state.invalidate();
        self.sink.report(SemanticDiagnostic {
            filename: self.filename.clone(),
            span,
            kind,
            text: text.to_string(),
        });
    }

    /// Register a component on the current layer and add a vertex for each
    /// of its ports.
    ///
    /// Vertices are added even when the name is a duplicate.
    fn declare(&mut self, name: &Ident, kind: ComponentKind) {
        let component = Component::new(name.name.as_str(), self.state.layer, kind);
        let ports = component.ports();
        debug!(id = %name.name, component = component.kind.name(), layer = %component.layer, "declare");

        if !self.symbols.put(name.name.as_str(), component) {
            self.error(name.span, SemanticErrorKind::DuplicatedIdentifier, &name.name);
        }
        for port in ports {
            self.graph.add_vertex(&name.name, port, self.state.layer);
        }
    }

    fn declare_cell_traps(&mut self, cell_type: &str, names: &[Ident], params: &[CellTrapParam]) {
        let g = CellTrapGeometry::from_params(params);
        let kind = if cell_type == SQUARE_CELL_TRAP {
            ComponentKind::SquareCellTrap {
                chamber_width: g.chamber_width,
                chamber_length: g.chamber_length,
                channel_width: g.channel_width,
            }
        } else {
            ComponentKind::LongCellTrap {
                num_chambers: g.num_chambers,
                chamber_width: g.chamber_width,
                chamber_length: g.chamber_length,
                chamber_spacing: g.chamber_spacing,
                channel_width: g.channel_width,
            }
        };
        for name in names {
            self.declare(name, kind.clone());
        }
    }

    fn declare_mixer(&mut self, name: &Ident, params: &[MixerParam]) {
        let g = MixerGeometry::from_params(params);
        self.declare(
            name,
            ComponentKind::Mixer {
                num_bends: g.num_bends,
                bend_spacing: g.bend_spacing,
                bend_length: g.bend_length,
                channel_width: g.channel_width,
            },
        );
    }

    /// Check that an endpoint names a declared component and one of its ports
    fn check_endpoint(&mut self, endpoint: &PortRef) {
        let id = &endpoint.component;
        let has_port = self
            .symbols
            .get(&id.name)
            .map(|component| component.has_port(endpoint.port));
        match has_port {
            None => self.error(id.span, SemanticErrorKind::UndefinedIdentifier, &id.name),
            Some(false) => {
                let port = endpoint.port.to_string();
                self.error(endpoint.port_span, SemanticErrorKind::UndefinedPort, &port);
            }
            Some(true) => {}
        }
    }

    /// Both endpoints are always checked, the channel is always registered
    /// and the edge is always added, whatever the checks found.
    fn declare_channel(&mut self, name: &Ident, from: &PortRef, to: &PortRef) {
        self.check_endpoint(from);
        self.check_endpoint(to);

        self.declare(name, ComponentKind::Channel);
        self.graph.add_edge(
            &from.component.name,
            from.port,
            &to.component.name,
            to.port,
            self.state.layer,
        );
    }
}
