//! Build configuration: root node, branch palette and child tint factor.

use serde::Deserialize;

use crate::color::HexColor;
use mindmap_error::{Error, Result};

/// Branch colors handed out to top-level keys in order, wrapping around.
pub const DEFAULT_PALETTE: [&str; 7] = [
    "#ff6b6b", // red
    "#4dabf7", // blue
    "#51cf66", // green
    "#ffa94d", // orange
    "#845ef7", // purple
    "#f06595", // pink
    "#20c997", // teal
];

/// How far each level below a top-level branch is blended toward white.
pub const DEFAULT_CHILD_FACTOR: f64 = 0.35;

/// User-facing configuration, as written in a config file.
///
/// Colors are plain strings here; [`MindmapConfig::resolve`] parses them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MindmapConfig {
    /// Identity of the root node; every other identity is prefixed with it.
    pub root_id: String,
    pub root_label: String,
    pub root_color: String,
    pub palette: Vec<String>,
    pub child_factor: f64,
}

impl Default for MindmapConfig {
    fn default() -> Self {
        Self {
            root_id: "Mind_Map".to_string(),
            root_label: "Mind Map".to_string(),
            root_color: "#f0f8ff".to_string(),
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            child_factor: DEFAULT_CHILD_FACTOR,
        }
    }
}

impl MindmapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, id: impl Into<String>, label: impl Into<String>) -> Self {
        self.root_id = id.into();
        self.root_label = label.into();
        self
    }

    pub fn with_root_color(mut self, color: impl Into<String>) -> Self {
        self.root_color = color.into();
        self
    }

    pub fn with_palette<I, S>(mut self, palette: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.palette = palette.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_child_factor(mut self, factor: f64) -> Self {
        self.child_factor = factor;
        self
    }

    /// Check the configuration without building anything.
    pub fn validate(&self) -> Result<()> {
        self.resolve().map(|_| ())
    }

    /// Parse every color and check the palette and factor.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        if self.root_id.is_empty() {
            return Err(Error::config_invalid("root_id must not be empty")
                .with_operation("config::resolve"));
        }
        if !self.child_factor.is_finite() {
            return Err(Error::config_invalid("child_factor must be a finite number")
                .with_operation("config::resolve")
                .with_context("child_factor", self.child_factor.to_string()));
        }

        let root_color = HexColor::parse(&self.root_color).map_err(|e| {
            e.with_operation("config::resolve")
                .with_context("field", "root_color")
        })?;

        let colors = self
            .palette
            .iter()
            .enumerate()
            .map(|(index, color)| {
                HexColor::parse(color).map_err(|e| {
                    e.with_operation("config::resolve")
                        .with_context("palette_index", index.to_string())
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ResolvedConfig {
            root_id: self.root_id.clone(),
            root_label: self.root_label.clone(),
            root_color,
            palette: Palette::new(colors)?,
            child_factor: self.child_factor,
        })
    }
}

/// A non-empty, ordered list of branch colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<HexColor>,
}

impl Palette {
    pub fn new(colors: Vec<HexColor>) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::config_invalid("palette must contain at least one color")
                .with_operation("palette::new"));
        }
        Ok(Self { colors })
    }

    /// Color of the top-level branch at `index`: `palette[index mod len]`.
    pub fn color_for(&self, index: usize) -> &HexColor {
        &self.colors[index % self.colors.len()]
    }
}

/// Configuration with every color parsed, ready for a build.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub root_id: String,
    pub root_label: String,
    pub root_color: HexColor,
    pub palette: Palette,
    pub child_factor: f64,
}
