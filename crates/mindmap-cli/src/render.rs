//! Output artifacts: DOT files and images rasterized by Graphviz.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;

use clap::ValueEnum;
use tracing::info;

use mindmap_error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum OutputFormat {
    Png,
    Svg,
    Pdf,
    /// The DOT source itself; Graphviz is not needed.
    Dot,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Dot => "dot",
        }
    }

    pub fn needs_graphviz(self) -> bool {
        !matches!(self, OutputFormat::Dot)
    }
}

/// `<stem>.<ext>`, appended so dotted stems such as `map.v2` survive.
pub fn output_path(stem: &Path, format: OutputFormat) -> PathBuf {
    let mut path = stem.as_os_str().to_owned();
    path.push(".");
    path.push(format.extension());
    PathBuf::from(path)
}

/// Arguments for one `dot` invocation reading DOT source from stdin.
pub fn graphviz_args(format: OutputFormat, output: &Path) -> Vec<OsString> {
    vec![
        OsString::from(format!("-T{}", format.extension())),
        OsString::from("-o"),
        output.as_os_str().to_owned(),
    ]
}

/// Write one artifact for `format` and return its path.
pub fn write_artifact(
    dot_bin: &str,
    dot_source: &str,
    stem: &Path,
    format: OutputFormat,
) -> Result<PathBuf> {
    let path = output_path(stem, format);
    ensure_parent_dir(&path)?;

    if format.needs_graphviz() {
        run_graphviz(dot_bin, dot_source, format, &path)?;
    } else {
        fs::write(&path, dot_source).map_err(|e| {
            Error::from(e)
                .with_operation("render::write_dot")
                .with_context("path", path.display().to_string())
        })?;
    }

    info!(path = %path.display(), format = format.extension(), "artifact written");
    Ok(path)
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            Error::from(e)
                .with_operation("render::ensure_parent_dir")
                .with_context("path", parent.display().to_string())
        })?;
    }
    Ok(())
}

/// Pipe `dot_source` into Graphviz; no intermediate source file is kept.
fn run_graphviz(dot_bin: &str, dot_source: &str, format: OutputFormat, output: &Path) -> Result<()> {
    let start = Instant::now();

    let mut child = Command::new(dot_bin)
        .args(graphviz_args(format, output))
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            Error::render_failed(format!("failed to start '{dot_bin}': {e}"))
                .with_operation("render::run_graphviz")
                .set_source(e)
        })?;

    // A binary that rejects its arguments exits before reading stdin, so a
    // failed write is reported together with its exit status and stderr.
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(dot_source.as_bytes()),
        None => Ok(()),
    };

    let result = child.wait_with_output().map_err(|e| {
        Error::render_failed(e.to_string())
            .with_operation("render::run_graphviz")
            .set_source(e)
    })?;
    let stderr = String::from_utf8_lossy(&result.stderr);

    if let Err(e) = written {
        return Err(Error::render_failed(format!(
            "failed to send DOT source to '{dot_bin}' (exited with {}): {}",
            result.status,
            stderr.trim()
        ))
        .with_operation("render::run_graphviz")
        .with_context("format", format.extension())
        .set_source(e));
    }

    if !result.status.success() {
        return Err(Error::render_failed(format!(
            "'{dot_bin}' exited with {}: {}",
            result.status,
            stderr.trim()
        ))
        .with_operation("render::run_graphviz")
        .with_context("format", format.extension()));
    }

    info!(
        format = format.extension(),
        "Graphviz rendering: {:.2}s",
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
