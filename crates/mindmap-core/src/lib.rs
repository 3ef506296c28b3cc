pub mod builder;
pub mod color;
pub mod config;
pub mod document;
pub mod graph;

pub use builder::{TreeBuilder, build_graph, build_into, child_id, sanitize_label};
pub use color::{DEFAULT_LIGHTEN_FACTOR, HexColor, Rgb, hex_to_rgb, lighten, rgb_to_hex};
pub use config::{DEFAULT_CHILD_FACTOR, DEFAULT_PALETTE, MindmapConfig, Palette, ResolvedConfig};
pub use document::{Node, Scalar};
pub use graph::{GraphEdge, GraphNode, GraphSink, MindGraph};
pub use mindmap_error::{Error, ErrorKind, Result};
