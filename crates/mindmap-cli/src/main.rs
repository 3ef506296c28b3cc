use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use mindmap::{MindmapOptions, OutputFormat, RunOutput, load_config, run_main};
use mindmap_core::MindmapConfig;
use mindmap_dot::DotOptions;

#[derive(Parser, Debug)]
#[command(
    name = "mindmap",
    about = "mindmap: turn a nested outline into a color-graded Graphviz mind map",
    version
)]
pub struct Cli {
    /// Outline document (.yaml, .yml, .json or .toml)
    #[arg(short = 'i', long = "input", value_name = "FILE", default_value = "mindmap.yaml")]
    input: PathBuf,

    /// Output path without extension; one file per format is written next to it
    #[arg(short = 'o', long = "output", value_name = "STEM", default_value = "mindmap_output")]
    output: PathBuf,

    /// Output formats (repeatable)
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        num_args = 1..,
        action = clap::ArgAction::Append,
        default_values_t = [OutputFormat::Png, OutputFormat::Svg]
    )]
    formats: Vec<OutputFormat>,

    /// TOML file with root, palette and child_factor settings
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Label of the root node (overrides the config file)
    #[arg(long = "root-label", value_name = "LABEL")]
    root_label: Option<String>,

    /// Fill color of the root node (overrides the config file)
    #[arg(long = "root-color", value_name = "HEX")]
    root_color: Option<String>,

    /// Graph direction passed to Graphviz (LR, TB, RL, BT)
    #[arg(long = "rankdir", default_value = "LR")]
    rankdir: String,

    /// Print the DOT source to stdout instead of writing files
    #[arg(long = "emit-dot", default_value_t = false)]
    emit_dot: bool,

    /// Graphviz executable used for png/svg/pdf output
    #[arg(long = "dot-bin", value_name = "PATH", default_value = "dot")]
    dot_bin: String,
}

pub fn run(args: Cli) -> anyhow::Result<()> {
    let total_start = Instant::now();

    // Initialize tracing subscriber for logging
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => MindmapConfig::default(),
    };
    if let Some(label) = args.root_label {
        config.root_label = label;
    }
    if let Some(color) = args.root_color {
        config.root_color = color;
    }

    let opts = MindmapOptions {
        input: args.input,
        output_stem: args.output,
        formats: args.formats,
        config,
        dot: DotOptions {
            rankdir: args.rankdir,
            ..DotOptions::default()
        },
        emit_dot: args.emit_dot,
        dot_bin: args.dot_bin,
    };

    let result = run_main(&opts)
        .with_context(|| format!("failed to build mind map from {}", opts.input.display()))?;

    match result {
        RunOutput::Dot(dot) => print!("{dot}"),
        RunOutput::Artifacts(paths) => {
            for path in paths {
                eprintln!("Wrote {}", path.display());
            }
        }
    }

    let total_secs = total_start.elapsed().as_secs_f64();
    tracing::info!(total_secs, "complete");
    Ok(())
}

pub fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    run(args)
}
