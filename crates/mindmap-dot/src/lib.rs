//! Graph rendering module for producing DOT format output.
//!
//! Turns a built [`MindGraph`] into Graphviz DOT text, or streams builder
//! calls straight into DOT through [`DotSink`]. Layout and rasterization are
//! left to Graphviz.
//!
//! # Module Structure
//!
//! - [`dot`]: DOT format utilities and the [`DotBuilder`]

pub mod dot;

use std::time::Instant;

use mindmap_core::{GraphSink, HexColor, MindGraph};
use tracing::info;

pub use dot::DotBuilder;

/// Graph-level styling written into every DOT document.
#[derive(Debug, Clone, PartialEq)]
pub struct DotOptions {
    pub graph_name: String,
    pub rankdir: String,
    pub fontsize: String,
    pub fontname: String,
    /// Shape of the root node; every other node keeps Graphviz's default.
    pub root_shape: String,
}

impl Default for DotOptions {
    fn default() -> Self {
        Self {
            graph_name: "MindMap".to_string(),
            rankdir: "LR".to_string(),
            fontsize: "12".to_string(),
            fontname: "Helvetica".to_string(),
            root_shape: "box".to_string(),
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Render a built graph to DOT: all nodes first, then all edges.
///
/// Duplicate edges are written once per occurrence.
pub fn render_dot(graph: &MindGraph, options: &DotOptions) -> String {
    let render_start = Instant::now();

    let mut sink = DotSink::new(options);
    for node in graph.nodes() {
        if node.is_root {
            sink.add_root(&node.id, &node.label, &node.fill);
        } else {
            sink.add_node(&node.id, &node.label, &node.fill);
        }
    }
    sink.builder.blank();
    for edge in graph.edges() {
        sink.add_edge(&edge.from, &edge.to);
    }
    let output = sink.finish();

    info!(
        nodes = graph.len(),
        edges = graph.edges().len(),
        "DOT rendering: {:.2}ms",
        render_start.elapsed().as_secs_f64() * 1000.0
    );
    output
}

/// Graph sink that writes each call as a DOT statement as it arrives.
///
/// A repeated node statement for the same identity is merged by Graphviz,
/// with later attributes overriding earlier ones.
pub struct DotSink {
    builder: DotBuilder,
    root_shape: String,
}

impl DotSink {
    pub fn new(options: &DotOptions) -> Self {
        let mut builder = DotBuilder::new(&options.graph_name);
        builder
            .attr("rankdir", &options.rankdir)
            .attr("fontsize", &options.fontsize)
            .attr("fontname", &options.fontname)
            .blank();
        Self {
            builder,
            root_shape: options.root_shape.clone(),
        }
    }

    /// Close the graph and return the DOT text.
    pub fn finish(self) -> String {
        self.builder.build()
    }
}

impl GraphSink for DotSink {
    fn add_node(&mut self, id: &str, label: &str, fill: &HexColor) {
        self.builder.node_full(
            id,
            &[
                ("label", label),
                ("style", "filled"),
                ("fillcolor", fill.as_str()),
            ],
        );
    }

    fn add_edge(&mut self, from: &str, to: &str) {
        self.builder.edge(from, to);
    }

    fn add_root(&mut self, id: &str, label: &str, fill: &HexColor) {
        self.builder.node_full(
            id,
            &[
                ("label", label),
                ("shape", self.root_shape.as_str()),
                ("style", "filled"),
                ("fillcolor", fill.as_str()),
            ],
        );
    }
}
