//! Reading outline documents and config files from disk.
//!
//! The parser is picked from the file extension. Mapping key order from the
//! source file is kept all the way into the graph.

use std::fs;
use std::path::Path;

use mindmap_core::{MindmapConfig, Node, Scalar};
use mindmap_error::{Error, Result};

/// Source syntax of an outline document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
    Toml,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            "json" => Ok(DocumentFormat::Json),
            "toml" => Ok(DocumentFormat::Toml),
            _ => Err(Error::unsupported_format(ext)
                .with_operation("loader::from_path")
                .with_context("path", path.display().to_string())),
        }
    }
}

/// Read and parse the outline at `path`.
pub fn load_document(path: &Path) -> Result<Node> {
    let format = DocumentFormat::from_path(path)?;
    let text = read_text(path)?;
    parse_document(&text, format)
        .map_err(|e| e.with_context("path", path.display().to_string()))
}

/// Parse outline text in the given syntax.
pub fn parse_document(text: &str, format: DocumentFormat) -> Result<Node> {
    match format {
        DocumentFormat::Yaml => {
            let value: serde_yaml::Value = serde_yaml::from_str(text).map_err(|e| {
                Error::deserialization_failed(e.to_string())
                    .with_operation("loader::parse_yaml")
                    .set_source(e)
            })?;
            from_yaml(value)
        }
        DocumentFormat::Json => {
            let value: serde_json::Value = serde_json::from_str(text).map_err(|e| {
                Error::deserialization_failed(e.to_string())
                    .with_operation("loader::parse_json")
                    .set_source(e)
            })?;
            Ok(from_json(value))
        }
        DocumentFormat::Toml => {
            let value: toml::Value = toml::from_str(text).map_err(|e| {
                Error::deserialization_failed(e.to_string())
                    .with_operation("loader::parse_toml")
                    .set_source(e)
            })?;
            Ok(from_toml(value))
        }
    }
}

/// Read a TOML build configuration.
pub fn load_config(path: &Path) -> Result<MindmapConfig> {
    let text = read_text(path)?;
    toml::from_str(&text).map_err(|e| {
        Error::deserialization_failed(e.to_string())
            .with_operation("loader::load_config")
            .with_context("path", path.display().to_string())
            .set_source(e)
    })
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        Error::from(e)
            .with_operation("loader::read")
            .with_context("path", path.display().to_string())
    })
}

fn from_yaml(value: serde_yaml::Value) -> Result<Node> {
    use serde_yaml::Value;

    Ok(match value {
        Value::Null => Node::null(),
        Value::Bool(b) => Node::Scalar(Scalar::Bool(b)),
        Value::Number(n) => Node::Scalar(yaml_number(&n)),
        Value::String(s) => Node::text(s),
        Value::Sequence(items) => {
            Node::Sequence(items.into_iter().map(from_yaml).collect::<Result<_>>()?)
        }
        Value::Mapping(map) => {
            let mut entries = Vec::with_capacity(map.len());
            for (key, value) in map {
                entries.push((yaml_key(key)?, from_yaml(value)?));
            }
            Node::Mapping(entries)
        }
        Value::Tagged(tagged) => from_yaml(tagged.value)?,
    })
}

fn yaml_number(n: &serde_yaml::Number) -> Scalar {
    if let Some(i) = n.as_i64() {
        Scalar::Integer(i)
    } else if let Some(x) = n.as_f64() {
        Scalar::Float(x)
    } else {
        Scalar::Text(n.to_string())
    }
}

/// YAML allows non-string keys; scalars become their display text.
fn yaml_key(key: serde_yaml::Value) -> Result<String> {
    match from_yaml(key)? {
        Node::Scalar(scalar) => Ok(scalar.to_string()),
        other => Err(Error::deserialization_failed(format!(
            "mapping keys must be scalars, found a {}",
            other.kind_name()
        ))
        .with_operation("loader::parse_yaml")),
    }
}

fn from_json(value: serde_json::Value) -> Node {
    use serde_json::Value;

    match value {
        Value::Null => Node::null(),
        Value::Bool(b) => Node::Scalar(Scalar::Bool(b)),
        Value::Number(n) => Node::Scalar(match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Scalar::Integer(i),
            (None, Some(x)) => Scalar::Float(x),
            (None, None) => Scalar::Text(n.to_string()),
        }),
        Value::String(s) => Node::text(s),
        Value::Array(items) => Node::Sequence(items.into_iter().map(from_json).collect()),
        Value::Object(map) => {
            Node::Mapping(map.into_iter().map(|(k, v)| (k, from_json(v))).collect())
        }
    }
}

fn from_toml(value: toml::Value) -> Node {
    use toml::Value;

    match value {
        Value::String(s) => Node::text(s),
        Value::Integer(i) => Node::Scalar(Scalar::Integer(i)),
        Value::Float(x) => Node::Scalar(Scalar::Float(x)),
        Value::Boolean(b) => Node::Scalar(Scalar::Bool(b)),
        Value::Datetime(dt) => Node::text(dt.to_string()),
        Value::Array(items) => Node::Sequence(items.into_iter().map(from_toml).collect()),
        Value::Table(table) => {
            Node::Mapping(table.into_iter().map(|(k, v)| (k, from_toml(v))).collect())
        }
    }
}
