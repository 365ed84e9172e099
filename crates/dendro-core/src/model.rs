/// The undirected labeled multigraph the classifier operates on.
///
/// Wraps a `petgraph` [`StableUnGraph`] with a `HashMap<String, NodeIndex>`
/// label index and an insertion-ordered vertex list. Indices stay valid
/// across edge removal because [`StableUnGraph`] uses tombstones, which the
/// chord test relies on: it repeatedly adds and removes probe edges without
/// disturbing vertex identity.
///
/// # Multiplicity contract
///
/// Edges are never deduplicated. Calling [`LabeledGraph::add_edge`] twice
/// with the same endpoints yields two parallel edges, and
/// [`LabeledGraph::remove_edge`] removes exactly one multiplicity. The
/// symmetry invariant of the abstract adjacency model (u appears in w's
/// list exactly as often as w appears in u's) holds by construction, since
/// each undirected edge is a single petgraph edge visible from both ends.
///
/// # Determinism
///
/// [`LabeledGraph::vertices`] iterates in insertion order, so everything
/// built on top of it (cycle witnesses, excluded-shape scans, chord-pair
/// enumeration) is deterministic for a given input.
use std::collections::{BTreeMap, HashMap};

use petgraph::stable_graph::{NodeIndex, StableUnGraph};

/// An undirected multigraph over string-labeled vertices.
///
/// Construct with [`LabeledGraph::new`] and populate via
/// [`LabeledGraph::add_edge`] / [`LabeledGraph::ensure_vertex`]; vertices
/// are created implicitly on first mention.
#[derive(Debug, Clone, Default)]
pub struct LabeledGraph {
    graph: StableUnGraph<String, ()>,
    label_to_index: HashMap<String, NodeIndex>,
    insertion_order: Vec<NodeIndex>,
}

impl LabeledGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a vertex by label, inserting it with an empty neighbor set
    /// if absent. Returns the vertex index either way.
    ///
    /// This is the explicit upsert behind "vertices are created on first
    /// mention": both edge endpoints and lone tokens go through it.
    pub fn ensure_vertex(&mut self, label: &str) -> NodeIndex {
        if let Some(&idx) = self.label_to_index.get(label) {
            return idx;
        }
        let idx = self.graph.add_node(label.to_owned());
        self.label_to_index.insert(label.to_owned(), idx);
        self.insertion_order.push(idx);
        idx
    }

    /// Adds an undirected edge between `u` and `w`, creating either vertex
    /// on first mention. Repeated calls create parallel edges.
    pub fn add_edge(&mut self, u: &str, w: &str) {
        let a = self.ensure_vertex(u);
        let b = self.ensure_vertex(w);
        self.graph.add_edge(a, b, ());
    }

    /// Removes one multiplicity of the edge between `u` and `w`.
    ///
    /// Returns `true` if an edge was removed, `false` if the vertices are
    /// unknown or not adjacent. Parallel edges lose a single copy per call.
    pub fn remove_edge(&mut self, u: &str, w: &str) -> bool {
        let (Some(&a), Some(&b)) = (self.label_to_index.get(u), self.label_to_index.get(w))
        else {
            return false;
        };
        match self.graph.find_edge(a, b) {
            Some(edge) => self.graph.remove_edge(edge).is_some(),
            None => false,
        }
    }

    /// Returns `true` iff at least one edge joins `u` and `w`.
    pub fn are_connected(&self, u: &str, w: &str) -> bool {
        match (self.label_to_index.get(u), self.label_to_index.get(w)) {
            (Some(&a), Some(&b)) => self.has_edge(a, b),
            _ => false,
        }
    }

    /// Index-based adjacency query, for callers that already hold indices.
    pub fn has_edge(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.graph.find_edge(a, b).is_some()
    }

    /// Looks up the index for a vertex label, or `None` if never mentioned.
    pub fn vertex_index(&self, label: &str) -> Option<NodeIndex> {
        self.label_to_index.get(label).copied()
    }

    /// The label of a vertex. Valid for any index returned by this graph.
    pub fn label(&self, idx: NodeIndex) -> &str {
        self.graph[idx].as_str()
    }

    /// Number of vertices, isolated ones included.
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of undirected edges, counting each parallel edge separately.
    ///
    /// Equals half the total adjacency-list length of the abstract model,
    /// which is exact because the symmetry invariant holds by construction.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterates vertex indices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.insertion_order.iter().copied()
    }

    /// Iterates the neighbors of `idx`, one entry per incident edge, so a
    /// parallel edge contributes its endpoint twice.
    pub fn neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    /// The degree of `idx`, counting parallel edges with multiplicity.
    pub fn degree(&self, idx: NodeIndex) -> usize {
        self.graph.neighbors(idx).count()
    }

    /// Dumps the adjacency structure as `label -> sorted neighbor labels`.
    ///
    /// Two graphs over the same labels have equal dumps iff they have the
    /// same edge multiset. Used to verify that temporary mutations (the
    /// chord probe) were fully reverted.
    pub fn adjacency(&self) -> BTreeMap<String, Vec<String>> {
        let mut out = BTreeMap::new();
        for idx in self.vertices() {
            let mut neighbors: Vec<String> = self
                .neighbors(idx)
                .map(|n| self.label(n).to_owned())
                .collect();
            neighbors.sort_unstable();
            out.insert(self.label(idx).to_owned(), neighbors);
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
