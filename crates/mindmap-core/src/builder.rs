//! Tree-to-graph transformation.
//!
//! Every top-level key of the document becomes a branch off the root, colored
//! from the palette by position. Below that, each mapping level is tinted one
//! step lighter than its parent. Lists are transparent: nested containers
//! inside a list attach to the list's owner with the owner's color, and
//! scalar items become leaves.
//!
//! Node identity is `parent_id + "_" + sanitize(label)`. Identities include the
//! whole ancestor chain, so equal labels under different parents stay apart,
//! while equal labels under the same parent fold into one node and gain one
//! edge per occurrence.

use tracing::{debug, trace};

use crate::color::HexColor;
use crate::config::MindmapConfig;
use crate::document::{Node, Scalar};
use crate::graph::{GraphSink, MindGraph};
use mindmap_error::{Error, Result};

/// Replace every whitespace character with `_`.
pub fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Identity of a node labeled `label` directly under `parent_id`.
pub fn child_id(parent_id: &str, label: &str) -> String {
    format!("{}_{}", parent_id, sanitize_label(label))
}

/// Build a fresh graph from `document`.
///
/// Nothing is returned unless the whole document was translated.
pub fn build_graph(document: &Node, config: &MindmapConfig) -> Result<MindGraph> {
    let mut graph = MindGraph::new();
    build_into(document, config, &mut graph)?;
    Ok(graph)
}

/// Translate `document` into calls on `sink`.
///
/// The configuration and the document shape are both checked before the
/// first call reaches the sink, so an error leaves the sink untouched.
pub fn build_into<S>(document: &Node, config: &MindmapConfig, sink: &mut S) -> Result<()>
where
    S: GraphSink + ?Sized,
{
    let resolved = config
        .resolve()
        .map_err(|e| e.with_operation("builder::build"))?;

    let Node::Mapping(branches) = document else {
        return Err(Error::invalid_document_shape(format!(
            "top level must be a mapping, found a {}",
            document.kind_name()
        ))
        .with_operation("builder::build"));
    };

    debug!(
        root = %resolved.root_id,
        branches = branches.len(),
        "building mind map"
    );

    sink.add_root(
        &resolved.root_id,
        &resolved.root_label,
        &resolved.root_color,
    );

    let mut builder = TreeBuilder::new(sink, resolved.child_factor);
    for (index, (key, value)) in branches.iter().enumerate() {
        let color = resolved.palette.color_for(index);
        let branch_id = child_id(&resolved.root_id, key);
        debug!(index, branch = %branch_id, color = %color, "top-level branch");

        builder.emit(&resolved.root_id, &branch_id, key, color);
        builder.add_subtree(&branch_id, value, color);
    }

    Ok(())
}

/// Recursive walker that emits one subtree into a sink.
///
/// Exposed so a subtree can be attached under an arbitrary parent, which is
/// the only way a bare scalar reaches the walker.
pub struct TreeBuilder<'s, S: GraphSink + ?Sized> {
    sink: &'s mut S,
    child_factor: f64,
}

impl<'s, S: GraphSink + ?Sized> TreeBuilder<'s, S> {
    pub fn new(sink: &'s mut S, child_factor: f64) -> Self {
        Self { sink, child_factor }
    }

    /// Emit `node` below `parent_id`, whose own fill is `parent_color`.
    pub fn add_subtree(&mut self, parent_id: &str, node: &Node, parent_color: &HexColor) {
        match node {
            Node::Mapping(entries) => {
                let child_color = parent_color.lighten(self.child_factor);
                for (key, value) in entries {
                    let id = child_id(parent_id, key);
                    self.emit(parent_id, &id, key, &child_color);
                    self.add_subtree(&id, value, &child_color);
                }
            }
            Node::Sequence(items) => {
                for item in items {
                    match item {
                        Node::Mapping(_) | Node::Sequence(_) => {
                            self.add_subtree(parent_id, item, parent_color)
                        }
                        Node::Scalar(scalar) => self.add_leaf(parent_id, scalar, parent_color),
                    }
                }
            }
            Node::Scalar(scalar) => self.add_leaf(parent_id, scalar, parent_color),
        }
    }

    fn add_leaf(&mut self, parent_id: &str, scalar: &Scalar, parent_color: &HexColor) {
        let label = scalar.to_string();
        let id = child_id(parent_id, &label);
        let color = parent_color.lighten(self.child_factor);
        self.emit(parent_id, &id, &label, &color);
    }

    fn emit(&mut self, parent_id: &str, id: &str, label: &str, fill: &HexColor) {
        trace!(parent = parent_id, id, fill = %fill, "node");
        self.sink.add_node(id, label, fill);
        self.sink.add_edge(parent_id, id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::lighten;
    use crate::graph::GraphEdge;
    use mindmap_error::ErrorKind;
    use pretty_assertions::assert_eq;

    fn config() -> MindmapConfig {
        MindmapConfig::new()
            .with_root("Root", "Root label")
            .with_palette(["#ff6b6b", "#4dabf7"])
    }

    #[test]
    fn test_sanitize_label() {
        assert_eq!(sanitize_label("Deep work"), "Deep_work");
        assert_eq!(sanitize_label("a\tb\nc  d"), "a_b_c__d");
        assert_eq!(sanitize_label("no-space"), "no-space");
        assert_eq!(child_id("Root_Health", "Sleep well"), "Root_Health_Sleep_well");
    }

    #[test]
    fn test_color_inheritance_by_depth() {
        let doc = Node::mapping([(
            "A",
            Node::mapping([("B", Node::mapping([("C", "leaf".into())]))]),
        )]);
        let graph = build_graph(&doc, &config()).unwrap();

        let tint = |hex: &str| lighten(hex, 0.35).unwrap();
        let a = graph.node("Root_A").unwrap();
        let b = graph.node("Root_A_B").unwrap();
        let c = graph.node("Root_A_B_C").unwrap();
        let leaf = graph.node("Root_A_B_C_leaf").unwrap();

        assert_eq!(a.fill.as_str(), "#ff6b6b");
        assert_eq!(b.fill, tint("#ff6b6b"));
        assert_eq!(c.fill, tint(tint("#ff6b6b").as_str()));
        assert_eq!(leaf.fill, c.fill.lighten(0.35));
    }

    #[test]
    fn test_list_is_transparent() {
        let doc = Node::mapping([("A", Node::sequence(["x".into(), "y".into()]))]);
        let graph = build_graph(&doc, &config()).unwrap();

        assert_eq!(graph.len(), 4);
        assert_eq!(graph.edges_between("Root_A", "Root_A_x"), 1);
        assert_eq!(graph.edges_between("Root_A", "Root_A_y"), 1);
        let x = graph.node("Root_A_x").unwrap();
        let y = graph.node("Root_A_y").unwrap();
        assert_eq!(x.fill, y.fill);
        assert_eq!(x.fill.as_str(), lighten("#ff6b6b", 0.35).unwrap().as_str());
    }

    #[test]
    fn test_nested_containers_in_list_attach_to_owner() {
        let doc = Node::mapping([(
            "A",
            Node::sequence([
                Node::mapping([("B", Node::null())]),
                Node::sequence(["z".into()]),
            ]),
        )]);
        let graph = build_graph(&doc, &config()).unwrap();

        let b = graph.node("Root_A_B").unwrap();
        let z = graph.node("Root_A_z").unwrap();
        assert_eq!(graph.edges_between("Root_A", "Root_A_B"), 1);
        assert_eq!(graph.edges_between("Root_A", "Root_A_z"), 1);
        assert_eq!(b.fill, z.fill);
        assert_eq!(b.fill.as_str(), lighten("#ff6b6b", 0.35).unwrap().as_str());
    }

    #[test]
    fn test_sibling_collision_folds_node_and_duplicates_edge() {
        let doc = Node::mapping([("A", Node::sequence(["dup".into(), "dup".into()]))]);
        let graph = build_graph(&doc, &config()).unwrap();

        assert_eq!(graph.nodes().filter(|n| n.id == "Root_A_dup").count(), 1);
        assert_eq!(graph.edges_between("Root_A", "Root_A_dup"), 2);
    }

    #[test]
    fn test_whitespace_variants_collide() {
        let doc = Node::mapping([("A", Node::sequence(["a b".into(), "a_b".into()]))]);
        let graph = build_graph(&doc, &config()).unwrap();

        assert_eq!(graph.node("Root_A_a_b").unwrap().label, "a_b");
        assert_eq!(graph.edges_between("Root_A", "Root_A_a_b"), 2);
    }

    #[test]
    fn test_same_label_under_different_parents_is_distinct() {
        let doc = Node::mapping([
            ("A", Node::sequence(["Notes".into()])),
            ("B", Node::sequence(["Notes".into()])),
        ]);
        let graph = build_graph(&doc, &config()).unwrap();

        assert!(graph.contains("Root_A_Notes"));
        assert!(graph.contains("Root_B_Notes"));
        assert_ne!(
            graph.node("Root_A_Notes").unwrap().fill,
            graph.node("Root_B_Notes").unwrap().fill
        );
    }

    #[test]
    fn test_palette_cycles_over_top_level_keys() {
        let doc = Node::mapping([
            ("One", Node::null()),
            ("Two", Node::null()),
            ("Three", Node::null()),
        ]);
        let graph = build_graph(&doc, &config()).unwrap();

        assert_eq!(graph.node("Root_One").unwrap().fill.as_str(), "#ff6b6b");
        assert_eq!(graph.node("Root_Two").unwrap().fill.as_str(), "#4dabf7");
        assert_eq!(graph.node("Root_Three").unwrap().fill.as_str(), "#ff6b6b");
        assert_eq!(
            graph.node("Root_Two_None").unwrap().fill,
            lighten("#4dabf7", 0.35).unwrap()
        );
        assert_eq!(graph.len(), 7);
    }

    #[test]
    fn test_scalar_values_and_nulls() {
        let doc = Node::mapping([(
            "A",
            Node::mapping([
                ("count", Node::Scalar(Scalar::Integer(3))),
                ("done", Node::Scalar(Scalar::Bool(false))),
                ("empty", Node::null()),
            ]),
        )]);
        let graph = build_graph(&doc, &config()).unwrap();

        assert!(graph.contains("Root_A_count_3"));
        assert!(graph.contains("Root_A_done_false"));
        assert!(graph.contains("Root_A_empty"));
        let empty_children: Vec<_> = graph
            .children("Root_A_empty")
            .map(|n| (n.id.as_str(), n.label.as_str()))
            .collect();
        assert_eq!(empty_children, [("Root_A_empty_None", "None")]);
    }

    #[test]
    fn test_float_and_integer_siblings_stay_distinct() {
        let doc = Node::mapping([(
            "A",
            Node::sequence([
                Node::Scalar(Scalar::Float(1.0)),
                Node::Scalar(Scalar::Integer(1)),
            ]),
        )]);
        let graph = build_graph(&doc, &config()).unwrap();

        assert_eq!(graph.node("Root_A_1.0").unwrap().label, "1.0");
        assert_eq!(graph.node("Root_A_1").unwrap().label, "1");
        assert_eq!(graph.edges_between("Root_A", "Root_A_1.0"), 1);
        assert_eq!(graph.edges_between("Root_A", "Root_A_1"), 1);
        assert_eq!(graph.edges().len(), 3);
    }

    #[test]
    fn test_root_and_edges_in_order() {
        let doc = Node::mapping([("A", Node::sequence(["x".into()])), ("B", Node::null())]);
        let graph = build_graph(&doc, &config()).unwrap();

        let root = graph.root().unwrap();
        assert_eq!(root.id, "Root");
        assert_eq!(root.label, "Root label");
        assert_eq!(root.fill.as_str(), "#f0f8ff");
        assert_eq!(
            graph.edges(),
            &[
                GraphEdge::new("Root", "Root_A"),
                GraphEdge::new("Root_A", "Root_A_x"),
                GraphEdge::new("Root", "Root_B"),
                GraphEdge::new("Root_B", "Root_B_None"),
            ]
        );
    }

    #[test]
    fn test_top_level_must_be_mapping() {
        for doc in [Node::sequence(["a".into()]), Node::text("a"), Node::null()] {
            let err = build_graph(&doc, &config()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidDocumentShape);
        }
    }

    #[test]
    fn test_bad_palette_aborts_before_emitting() {
        let doc = Node::mapping([("A", Node::null())]);
        let mut graph = MindGraph::new();
        let err = build_into(&doc, &config().with_palette(["#zzzzzz"]), &mut graph).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidColorFormat);
        assert!(graph.is_empty());
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_direct_scalar_subtree() {
        let mut graph = MindGraph::new();
        let parent = HexColor::parse("#000000").unwrap();
        TreeBuilder::new(&mut graph, 0.5).add_subtree("P", &Node::text("lone leaf"), &parent);

        let leaf = graph.node("P_lone_leaf").unwrap();
        assert_eq!(leaf.label, "lone leaf");
        assert_eq!(leaf.fill.as_str(), "#7f7f7f");
        assert_eq!(graph.edges_between("P", "P_lone_leaf"), 1);
    }
}
