//! Graph sink interface and the in-memory graph that implements it.

use indexmap::IndexMap;

use crate::color::HexColor;

/// Receiver of node and edge construction calls.
///
/// `add_node` is create-or-update on `id`: calling it again with the same
/// identity must not fail, and the later label and color win. `add_edge`
/// always appends; duplicate edges are kept.
pub trait GraphSink {
    fn add_node(&mut self, id: &str, label: &str, fill: &HexColor);

    fn add_edge(&mut self, from: &str, to: &str);

    /// Add the single root node. Sinks that style the root differently
    /// override this.
    fn add_root(&mut self, id: &str, label: &str, fill: &HexColor) {
        self.add_node(id, label, fill);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub fill: HexColor,
    pub is_root: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

impl GraphEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Build-once, append-only graph.
///
/// Nodes live in an identity-keyed map whose insertion is an upsert, so
/// two equal labels under one parent fold into a single node while each
/// occurrence still contributes its own edge. Iteration follows first
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MindGraph {
    nodes: IndexMap<String, GraphNode>,
    edges: Vec<GraphEdge>,
    root: Option<String>,
}

impl MindGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Number of edges from `from` to `to`, duplicates included.
    pub fn edges_between(&self, from: &str, to: &str) -> usize {
        self.edges
            .iter()
            .filter(|e| e.from == from && e.to == to)
            .count()
    }

    /// Targets of every edge leaving `id`, in insertion order.
    pub fn children(&self, id: &str) -> impl Iterator<Item = &GraphNode> {
        self.edges
            .iter()
            .filter(move |e| e.from == id)
            .filter_map(|e| self.nodes.get(&e.to))
    }

    pub fn root(&self) -> Option<&GraphNode> {
        self.root.as_deref().and_then(|id| self.nodes.get(id))
    }

    /// Number of distinct nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn upsert(&mut self, id: &str, label: &str, fill: &HexColor, is_root: bool) {
        match self.nodes.get_mut(id) {
            Some(existing) => {
                existing.label = label.to_string();
                existing.fill = fill.clone();
                existing.is_root |= is_root;
            }
            None => {
                self.nodes.insert(
                    id.to_string(),
                    GraphNode {
                        id: id.to_string(),
                        label: label.to_string(),
                        fill: fill.clone(),
                        is_root,
                    },
                );
            }
        }
    }
}

impl GraphSink for MindGraph {
    fn add_node(&mut self, id: &str, label: &str, fill: &HexColor) {
        self.upsert(id, label, fill, false);
    }

    fn add_edge(&mut self, from: &str, to: &str) {
        self.edges.push(GraphEdge::new(from, to));
    }

    fn add_root(&mut self, id: &str, label: &str, fill: &HexColor) {
        self.upsert(id, label, fill, true);
        self.root = Some(id.to_string());
    }
}
