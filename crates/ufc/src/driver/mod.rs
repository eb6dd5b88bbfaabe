//! Analysis driver
//!
//! Decodes a declaration event stream and feeds it to the semantic analyzer
//! in order. The stream is JSON: either one array of events, or events
//! written back to back (typically one per line).

use crate::backend::OutputFormat;
use crate::common::{CompileError, CompileResult, DiagnosticReporter};
use crate::sema::{Declaration, DeviceModel, DiagnosticSink, SemanticAnalyzer};
use serde::de::{self, Deserializer as _, SeqAccess, Visitor};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Options for one analysis run
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfig {
    /// Declaration event stream produced by a MINT front end
    pub events: PathBuf,
    /// MINT source the events were produced from, used to render diagnostics
    pub source: Option<PathBuf>,
    /// Where to write the emitted model; stdout when absent
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub verbose: bool,
}

impl AnalysisConfig {
    pub fn new(events: impl Into<PathBuf>) -> Self {
        Self {
            events: events.into(),
            ..Self::default()
        }
    }

    /// Name diagnostics are reported against
    pub fn filename(&self) -> String {
        self.source
            .as_ref()
            .unwrap_or(&self.events)
            .display()
            .to_string()
    }
}

/// Analyze the events in `events`, reporting against `filename`.
///
/// The first malformed declaration or undecodable event ends the run with an
/// error; semantic violations go to `sink` and leave the model invalid.
pub fn analyze_events(
    events: &str,
    filename: &str,
    sink: &mut dyn DiagnosticSink,
) -> CompileResult<DeviceModel> {
    let mut analyzer = SemanticAnalyzer::new(filename, sink);
    let mut count = 0usize;

    if events.trim_start().starts_with('[') {
        let mut deserializer = serde_json::Deserializer::from_str(events);
        let mut failure = None;
        let decoded = (&mut deserializer).deserialize_seq(ProcessElements {
            analyzer: &mut analyzer,
            count: &mut count,
            failure: &mut failure,
        });
        if let Some(error) = failure {
            return Err(error);
        }
        decoded.map_err(CompileError::EventStream)?;
        deserializer.end().map_err(CompileError::EventStream)?;
    } else {
        let stream = serde_json::Deserializer::from_str(events).into_iter::<Declaration>();
        for declaration in stream {
            let declaration = declaration.map_err(CompileError::EventStream)?;
            analyzer.process(&declaration)?;
            count += 1;
        }
    }

    debug!(declarations = count, "event stream consumed");
    Ok(analyzer.finish())
}

/// Feeds array elements to the analyzer as they are decoded, so an array
/// behaves like the same events written one per line
struct ProcessElements<'v, 'a> {
    analyzer: &'v mut SemanticAnalyzer<'a>,
    count: &'v mut usize,
    failure: &'v mut Option<CompileError>,
}

impl<'de> Visitor<'de> for ProcessElements<'_, '_> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an array of declaration events")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<(), A::Error> {
        while let Some(declaration) = seq.next_element::<Declaration>()? {
            if let Err(error) = self.analyzer.process(&declaration) {
                *self.failure = Some(error);
                return Err(de::Error::custom("analysis stopped"));
            }
            *self.count += 1;
        }
        Ok(())
    }
}

/// Read the files named by `config` and analyze them.
///
/// When a source file is given it is registered with `reporter` so
/// diagnostics show the offending lines.
pub fn analyze_file(
    config: &AnalysisConfig,
    reporter: &mut DiagnosticReporter,
) -> CompileResult<DeviceModel> {
    let filename = config.filename();

    if let Some(path) = &config.source {
        let source = fs::read_to_string(path)?;
        reporter.add_file(filename.as_str(), source);
    }

    let events = fs::read_to_string(&config.events)?;
    info!(file = %filename, events = %config.events.display(), "analyzing");

    let model = analyze_events(&events, &filename, reporter)?;
    info!(
        device = model.name.as_deref().unwrap_or("<unnamed>"),
        components = model.symbols.len(),
        valid = model.valid,
        "analysis complete"
    );
    Ok(model)
}
