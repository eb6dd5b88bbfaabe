//! UFC - semantic analyzer for MINT microfluidic device descriptions
//!
//! Usage: ufc [OPTIONS] <events> [--source <file.uf>] [-o <output>]

use anyhow::Context;
use clap::{Parser as ClapParser, ValueEnum};
use codespan_reporting::term::termcolor::ColorChoice;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use uf_compiler::backend::{self, OutputFormat};
use uf_compiler::common::{CompileError, DiagnosticReporter};
use uf_compiler::driver::{self, AnalysisConfig};

/// Output type
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Default)]
enum Emit {
    /// Component and edge counts per layer
    #[default]
    Summary,
    /// Device model as JSON
    Json,
    /// Connectivity graph as Graphviz DOT
    Dot,
}

/// When to color diagnostics
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Default)]
enum Color {
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(ClapParser, Debug)]
#[command(name = "ufc")]
#[command(author = "UF Toolchain Team")]
#[command(version)]
#[command(about = "Semantic analyzer for MINT microfluidic device descriptions", long_about = None)]
struct Args {
    /// Declaration event stream (JSON) produced by a MINT front end
    #[arg(required = true)]
    events: PathBuf,

    /// MINT source the events came from, for diagnostic snippets
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// What to emit for the analyzed device
    #[arg(short, long, value_enum, default_value = "summary")]
    emit: Emit,

    /// Diagnostic coloring
    #[arg(long, value_enum, default_value = "auto")]
    color: Color,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> AnalysisConfig {
        AnalysisConfig {
            events: self.events.clone(),
            source: self.source.clone(),
            output: self.output.clone(),
            format: match self.emit {
                Emit::Summary => OutputFormat::Summary,
                Emit::Json => OutputFormat::Json,
                Emit::Dot => OutputFormat::Dot,
            },
            verbose: self.verbose,
        }
    }

    fn color_choice(&self) -> ColorChoice {
        match self.color {
            Color::Auto => ColorChoice::Auto,
            Color::Always => ColorChoice::Always,
            Color::Never => ColorChoice::Never,
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns whether the device is valid; fatal analysis errors are reported
/// and count as invalid
fn run(args: &Args) -> anyhow::Result<bool> {
    let config = args.config();
    let filename = config.filename();
    let mut reporter = DiagnosticReporter::with_color(args.color_choice());

    if config.verbose {
        eprintln!("Analyzing {} ({:?})", filename, config.format);
    }

    let model = match driver::analyze_file(&config, &mut reporter) {
        Ok(model) => model,
        Err(CompileError::Io(e)) => {
            return Err(e).with_context(|| format!("cannot read input for {}", filename));
        }
        Err(e) => {
            reporter.report_error(&filename, &e);
            return Ok(false);
        }
    };

    let output = backend::emit(&model, config.format)
        .with_context(|| format!("cannot emit {:?} for {}", config.format, filename))?;

    match &config.output {
        Some(path) => fs::write(path, output)
            .with_context(|| format!("cannot write {}", path.display()))?,
        None => print!("{}", output),
    }

    if config.verbose {
        eprintln!(
            "{} semantic error(s) in {}",
            reporter.reported(),
            filename
        );
    }

    Ok(model.valid)
}
