/// Edge-list text format.
///
/// One line per declaration. A line with two or more whitespace-separated
/// tokens declares an edge between the first two; any further tokens on the
/// line are ignored. A line with exactly one token declares a vertex with
/// no edges. Blank (or whitespace-only) lines are skipped. The format has
/// no comments and no escaping; a label is any run of non-whitespace bytes.
///
/// Parsing cannot fail: every text input maps to some graph.
use crate::model::LabeledGraph;

/// The declarations read from one edge-list document, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeList {
    /// Edge declarations as `(u, w)` label pairs. Self-loops and repeated
    /// pairs are preserved as written.
    pub edges: Vec<(String, String)>,
    /// Single-token lines: vertices declared without an edge.
    pub isolated: Vec<String>,
}

/// Parses edge-list text into its declarations.
pub fn parse_edge_list(input: &str) -> EdgeList {
    let mut list = EdgeList::default();
    for line in input.lines() {
        let mut tokens = line.split_whitespace();
        if let Some(u) = tokens.next() {
            match tokens.next() {
                Some(w) => list.edges.push((u.to_owned(), w.to_owned())),
                None => list.isolated.push(u.to_owned()),
            }
        }
    }
    list
}

/// Builds a graph from parsed declarations, creating vertices on first
/// mention in declaration order.
pub fn build_graph(list: &EdgeList) -> LabeledGraph {
    let mut graph = LabeledGraph::new();
    for (u, w) in &list.edges {
        graph.add_edge(u, w);
    }
    for label in &list.isolated {
        graph.ensure_vertex(label);
    }
    graph
}

/// Parses and builds in one step.
pub fn graph_from_str(input: &str) -> LabeledGraph {
    build_graph(&parse_edge_list(input))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
