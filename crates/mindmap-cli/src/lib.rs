//! mindmap command-line interface.
//!
pub mod loader;
pub mod render;

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::info;

use mindmap_core::{MindmapConfig, build_graph};
use mindmap_dot::{DotOptions, render_dot};
use mindmap_error::Result;

pub use loader::{DocumentFormat, load_config, load_document, parse_document};
pub use render::{OutputFormat, write_artifact};

/// Options for running mindmap.
#[derive(Debug, Clone)]
pub struct MindmapOptions {
    pub input: PathBuf,
    pub output_stem: PathBuf,
    pub formats: Vec<OutputFormat>,
    pub config: MindmapConfig,
    pub dot: DotOptions,
    /// Return the DOT text instead of writing artifacts.
    pub emit_dot: bool,
    pub dot_bin: String,
}

impl Default for MindmapOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from("mindmap.yaml"),
            output_stem: PathBuf::from("mindmap_output"),
            formats: vec![OutputFormat::Png, OutputFormat::Svg],
            config: MindmapConfig::default(),
            dot: DotOptions::default(),
            emit_dot: false,
            dot_bin: "dot".to_string(),
        }
    }
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutput {
    Dot(String),
    Artifacts(Vec<PathBuf>),
}

/// Load, build and render: the whole pipeline.
pub fn run_main(opts: &MindmapOptions) -> Result<RunOutput> {
    let dot_source = build_dot(&opts.input, &opts.config, &opts.dot)?;
    if opts.emit_dot {
        return Ok(RunOutput::Dot(dot_source));
    }

    let mut written = Vec::with_capacity(opts.formats.len());
    for &format in &opts.formats {
        written.push(write_artifact(
            &opts.dot_bin,
            &dot_source,
            &opts.output_stem,
            format,
        )?);
    }
    Ok(RunOutput::Artifacts(written))
}

/// Load the document at `input` and return its DOT rendering.
pub fn build_dot(input: &Path, config: &MindmapConfig, dot: &DotOptions) -> Result<String> {
    let start = Instant::now();

    let document = load_document(input)?;
    let graph = build_graph(&document, config)
        .map_err(|e| e.with_context("path", input.display().to_string()))?;

    info!(
        input = %input.display(),
        nodes = graph.len(),
        edges = graph.edges().len(),
        "Graph build: {:.2}ms",
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(render_dot(&graph, dot))
}
