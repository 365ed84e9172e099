/// The four structural properties and the checks that compute them.
///
/// [`classify`] recomputes everything from scratch, in a fixed order,
/// because the later flags depend on the earlier ones:
///
/// 1. **acyclic**: the cycle enumerator reports zero simple cycles.
/// 2. **subcyclic**: the graph is not one of two excluded triangle shapes,
///    and every chord between non-adjacent vertices creates exactly one
///    (vertex-set-distinct) simple cycle.
/// 3. **tree**: acyclic and subcyclic.
/// 4. **numbered tree**: the decision table over the first two flags; see
///    [`GraphProperties::is_numbered_tree`].
///
/// Each failed check pushes one [`Diagnostic`] explaining why. Checks never
/// fail as errors: classification is total over any representable graph.
use std::collections::BTreeSet;
use std::fmt;

use petgraph::stable_graph::NodeIndex;
use serde::Serialize;

use crate::cycles::simple_cycles;
use crate::model::LabeledGraph;

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

/// The four derived flags of one classification pass.
///
/// Derived state: recomputed on demand, never incrementally maintained.
/// Any structural mutation invalidates a previously computed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphProperties {
    /// The graph contains no simple cycle of length ≥ 3.
    pub is_acyclic: bool,
    /// Not an excluded shape, and every missing chord closes exactly one
    /// cycle.
    pub is_subcyclic: bool,
    /// `is_acyclic && is_subcyclic`.
    pub is_tree: bool,
    /// Decision table over `(is_acyclic, is_subcyclic)`:
    ///
    /// | acyclic | subcyclic | result                        |
    /// |---------|-----------|-------------------------------|
    /// | true    | true      | true                          |
    /// | true    | false     | false                         |
    /// | false   | true      | false                         |
    /// | false   | false     | `edges == vertices - 1`       |
    ///
    /// The fourth row deliberately classifies some cyclic graphs as
    /// numbered trees. The table is the contract; do not "correct" it.
    pub is_numbered_tree: bool,
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// Identifies which property check produced a diagnostic.
///
/// Each variant corresponds to exactly one reportable situation; a single
/// classification pass emits at most one diagnostic per check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckId {
    /// A simple cycle was found; the graph is not acyclic.
    Acyclicity,
    /// The graph is one of the two excluded triangle shapes.
    ExcludedShape,
    /// A chord between non-adjacent vertices did not create exactly one
    /// cycle.
    ChordPair,
}

impl CheckId {
    /// Returns the stable hyphenated code used in rendered output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Acyclicity => "ACY-01",
            Self::ExcludedShape => "SUB-01",
            Self::ChordPair => "SUB-02",
        }
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A human-readable explanation of one failed property check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The check that produced this finding.
    pub check: CheckId,
    /// Explanation naming the offending cycle, shape, or vertex pair.
    pub message: String,
}

impl Diagnostic {
    /// Constructs a new [`Diagnostic`].
    pub fn new(check: CheckId, message: impl Into<String>) -> Self {
        Self {
            check,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.check, self.message)
    }
}

/// The output of one classification pass: the four flags plus any
/// diagnostics emitted while computing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// The computed property flags.
    pub properties: GraphProperties,
    /// Zero or more findings, in check order.
    pub diagnostics: Vec<Diagnostic>,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Computes all four properties of `graph` from scratch.
///
/// Takes `&mut` because the subcyclic chord test temporarily adds probe
/// edges; the graph is restored to its exact prior state on every path
/// before this function returns.
pub fn classify(graph: &mut LabeledGraph) -> Classification {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    let is_acyclic = check_acyclic(graph, &mut diagnostics);
    let is_subcyclic = check_subcyclic(graph, &mut diagnostics);

    let properties = GraphProperties {
        is_acyclic,
        is_subcyclic,
        is_tree: is_acyclic && is_subcyclic,
        is_numbered_tree: numbered_tree(graph, is_acyclic, is_subcyclic),
    };

    Classification {
        properties,
        diagnostics,
    }
}

/// Recomputes the properties, discarding diagnostics.
///
/// Exists for the repeat-timing harness: safe to call any number of times
/// on the same graph, always yielding the same answer.
pub fn recompute(graph: &mut LabeledGraph) -> GraphProperties {
    classify(graph).properties
}

// ---------------------------------------------------------------------------
// Acyclicity
// ---------------------------------------------------------------------------

/// True iff the enumerator reports zero cycles. Emits the representative
/// cycle path on failure.
fn check_acyclic(graph: &LabeledGraph, diagnostics: &mut Vec<Diagnostic>) -> bool {
    let record = simple_cycles(graph);
    if record.count > 0 {
        let witness = record.witness.unwrap_or_default();
        diagnostics.push(Diagnostic::new(
            CheckId::Acyclicity,
            format!("found a simple cycle: {witness}"),
        ));
        return false;
    }
    true
}

// ---------------------------------------------------------------------------
// Subcyclicity
// ---------------------------------------------------------------------------

/// The two degenerate shapes that disqualify subcyclicity outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExcludedShape {
    /// A triangle (≥3 triangle vertices) plus a dangling edge (≥2 edge
    /// vertices).
    TriangleWithPendantEdge,
    /// A triangle plus an isolated vertex (exactly 1 edge vertex).
    TriangleWithIsolatedVertex,
}

impl ExcludedShape {
    /// Short description used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::TriangleWithPendantEdge => "a triangle with a pendant edge",
            Self::TriangleWithIsolatedVertex => "a triangle with an isolated vertex",
        }
    }
}

/// Scans for the excluded shapes.
///
/// Triangle vertices: every vertex with two neighbors that are themselves
/// adjacent, together with those two neighbors. Edge vertices: every vertex
/// of degree 0 or 1, plus the sole neighbor of each degree-1 vertex.
/// Neighbor pairs are scanned with multiplicity, so a parallel edge takes
/// part in the pair enumeration like any other.
pub fn excluded_shape(graph: &LabeledGraph) -> Option<ExcludedShape> {
    let mut triangle_vertices: BTreeSet<NodeIndex> = BTreeSet::new();
    let mut edge_vertices: BTreeSet<NodeIndex> = BTreeSet::new();

    for v in graph.vertices() {
        let neighbors: Vec<NodeIndex> = graph.neighbors(v).collect();

        if neighbors.len() >= 2 {
            for i in 0..neighbors.len() {
                for j in i + 1..neighbors.len() {
                    if graph.has_edge(neighbors[i], neighbors[j]) {
                        triangle_vertices.insert(v);
                        triangle_vertices.insert(neighbors[i]);
                        triangle_vertices.insert(neighbors[j]);
                    }
                }
            }
        }

        if neighbors.len() <= 1 {
            edge_vertices.insert(v);
            if let Some(&sole) = neighbors.first() {
                edge_vertices.insert(sole);
            }
        }
    }

    if triangle_vertices.len() >= 3 && edge_vertices.len() >= 2 {
        return Some(ExcludedShape::TriangleWithPendantEdge);
    }
    if triangle_vertices.len() >= 3 && edge_vertices.len() == 1 {
        return Some(ExcludedShape::TriangleWithIsolatedVertex);
    }
    None
}

/// Runs `probe` on the graph with a temporary chord between `v` and `w`.
///
/// The chord is added before and removed after, on every exit path, so
/// callers never observe a graph with the probe edge left behind. `v` and
/// `w` must be currently non-adjacent; the removal then takes out exactly
/// the probe edge.
pub fn with_chord<T>(
    graph: &mut LabeledGraph,
    v: &str,
    w: &str,
    probe: impl FnOnce(&LabeledGraph) -> T,
) -> T {
    graph.add_edge(v, w);
    let out = probe(graph);
    graph.remove_edge(v, w);
    out
}

/// The full subcyclic check: exception scan, then the chord test over every
/// unordered pair of distinct, non-adjacent vertices.
///
/// Short-circuits on the first failing pair, after reverting its chord.
fn check_subcyclic(graph: &mut LabeledGraph, diagnostics: &mut Vec<Diagnostic>) -> bool {
    if let Some(shape) = excluded_shape(graph) {
        diagnostics.push(Diagnostic::new(
            CheckId::ExcludedShape,
            format!("graph is an excluded shape: {}", shape.describe()),
        ));
        return false;
    }

    let order: Vec<NodeIndex> = graph.vertices().collect();
    for (i, &v) in order.iter().enumerate() {
        for &w in &order[i + 1..] {
            if graph.has_edge(v, w) {
                continue;
            }
            let (lv, lw) = (graph.label(v).to_owned(), graph.label(w).to_owned());
            let count = with_chord(graph, &lv, &lw, |g| simple_cycles(g).count);
            if count != 1 {
                diagnostics.push(Diagnostic::new(
                    CheckId::ChordPair,
                    format!("chord {lv}-{lw} creates {count} simple cycles, expected exactly 1"),
                ));
                return false;
            }
        }
    }
    true
}

// ---------------------------------------------------------------------------
// Numbered tree
// ---------------------------------------------------------------------------

/// The numbered-tree decision table. The fourth row is reachable only for
/// cyclic, non-subcyclic graphs that still carry exactly `V - 1` edges.
fn numbered_tree(graph: &LabeledGraph, is_acyclic: bool, is_subcyclic: bool) -> bool {
    match (is_acyclic, is_subcyclic) {
        (true, true) => true,
        (true, false) | (false, true) => false,
        (false, false) => graph.edge_count() == graph.vertex_count().saturating_sub(1),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::parse::graph_from_str;

    fn classify_str(input: &str) -> Classification {
        let mut g = graph_from_str(input);
        classify(&mut g)
    }

    // ── fixed shapes from the property table ─────────────────────────────────

    /// Two vertices joined by a single edge: all four flags true.
    #[test]
    fn single_edge_is_a_numbered_tree() {
        let c = classify_str("A B");
        assert_eq!(
            c.properties,
            GraphProperties {
                is_acyclic: true,
                is_subcyclic: true,
                is_tree: true,
                is_numbered_tree: true,
            }
        );
        assert!(c.diagnostics.is_empty());
    }

    /// A triangle is cyclic and therefore not a tree; the diagnostic names
    /// the representative cycle.
    #[test]
    fn triangle_is_not_a_tree() {
        let c = classify_str("A B\nB C\nC A");
        assert!(!c.properties.is_acyclic);
        assert!(!c.properties.is_tree);
        let diag = c
            .diagnostics
            .iter()
            .find(|d| d.check == CheckId::Acyclicity)
            .expect("acyclicity diagnostic");
        assert!(diag.message.contains("A-B-C-A"), "message: {}", diag.message);
    }

    /// A triangle has every pair adjacent, so the chord test is vacuous and
    /// the triangle itself is subcyclic.
    #[test]
    fn triangle_is_subcyclic() {
        let c = classify_str("A B\nB C\nC A");
        assert!(c.properties.is_subcyclic);
        assert!(!c.properties.is_numbered_tree, "(false, true) row is false");
    }

    /// Star graph: adding any leaf-to-leaf chord closes exactly one
    /// triangle, so the star is subcyclic and a tree.
    #[test]
    fn star_graph_is_a_tree() {
        let c = classify_str("X A\nX B\nX C");
        assert_eq!(
            c.properties,
            GraphProperties {
                is_acyclic: true,
                is_subcyclic: true,
                is_tree: true,
                is_numbered_tree: true,
            }
        );
    }

    /// A path of four vertices: every chord closes exactly one cycle.
    #[test]
    fn path_graph_is_a_tree() {
        let c = classify_str("A B\nB C\nC D");
        assert!(c.properties.is_tree);
    }

    /// An empty graph and a lone vertex are trees vacuously.
    #[test]
    fn degenerate_small_graphs_are_trees() {
        assert!(classify_str("").properties.is_tree);
        assert!(classify_str("A").properties.is_tree);
    }

    /// Two isolated vertices fail the chord test: the probe edge creates no
    /// cycle at all.
    #[test]
    fn two_isolated_vertices_are_not_subcyclic() {
        let c = classify_str("A\nB");
        assert!(c.properties.is_acyclic);
        assert!(!c.properties.is_subcyclic);
        assert!(!c.properties.is_tree);
        let diag = c
            .diagnostics
            .iter()
            .find(|d| d.check == CheckId::ChordPair)
            .expect("chord diagnostic");
        assert!(
            diag.message.contains("A-B") && diag.message.contains("0"),
            "message: {}",
            diag.message
        );
    }

    /// Two disjoint edges: the first probed chord creates zero cycles, and
    /// the count in the diagnostic is the enumerator's own count.
    #[test]
    fn disjoint_edges_fail_chord_test_with_enumerator_count() {
        let mut g = graph_from_str("A B\nC D");
        // The same routine backs both checks: probing A-C by hand must see
        // the count the classifier reports.
        let probed = with_chord(&mut g, "A", "C", |g| simple_cycles(g).count);
        assert_eq!(probed, 0);

        let c = classify(&mut g);
        assert!(!c.properties.is_subcyclic);
        let diag = c
            .diagnostics
            .iter()
            .find(|d| d.check == CheckId::ChordPair)
            .expect("chord diagnostic");
        assert!(diag.message.contains("0 simple cycles"), "message: {}", diag.message);
    }

    // ── excluded shapes ──────────────────────────────────────────────────────

    /// Triangle plus a pendant vertex: the excluded-shape scan fires before
    /// any chord is probed.
    #[test]
    fn triangle_with_pendant_is_excluded() {
        let c = classify_str("A B\nB C\nC A\nC D");
        assert!(!c.properties.is_subcyclic);
        let diag = c
            .diagnostics
            .iter()
            .find(|d| d.check == CheckId::ExcludedShape)
            .expect("excluded-shape diagnostic");
        assert!(
            diag.message.contains("pendant edge"),
            "message: {}",
            diag.message
        );
    }

    /// Triangle plus an isolated vertex: the second excluded shape.
    #[test]
    fn triangle_with_isolated_vertex_is_excluded() {
        let g = graph_from_str("A B\nB C\nC A\nD");
        assert_eq!(
            excluded_shape(&g),
            Some(ExcludedShape::TriangleWithIsolatedVertex)
        );
    }

    /// A plain triangle matches neither excluded shape.
    #[test]
    fn plain_triangle_is_not_excluded() {
        let g = graph_from_str("A B\nB C\nC A");
        assert_eq!(excluded_shape(&g), None);
    }

    /// A plain path has edge vertices but no triangle vertices, so it is
    /// not excluded.
    #[test]
    fn path_is_not_excluded() {
        let g = graph_from_str("A B\nB C");
        assert_eq!(excluded_shape(&g), None);
    }

    // ── numbered-tree decision table ─────────────────────────────────────────

    /// Fourth row of the table: cyclic, non-subcyclic, yet `E == V - 1`.
    /// A triangle with a pendant edge and an isolated vertex has 4 edges
    /// and 5 vertices, landing exactly on `V - 1`.
    #[test]
    fn cyclic_graph_with_tree_edge_count_is_numbered() {
        let c = classify_str("A B\nB C\nC A\nC D\nE");
        assert!(!c.properties.is_acyclic);
        assert!(!c.properties.is_subcyclic, "excluded shape");
        assert!(!c.properties.is_tree);
        assert!(
            c.properties.is_numbered_tree,
            "4 edges, 5 vertices: the fourth row applies"
        );
    }

    /// Fourth row with the wrong edge count stays false.
    #[test]
    fn cyclic_graph_with_wrong_edge_count_is_not_numbered() {
        // Triangle plus pendant: 4 edges, 4 vertices.
        let c = classify_str("A B\nB C\nC A\nC D");
        assert!(!c.properties.is_acyclic);
        assert!(!c.properties.is_subcyclic);
        assert!(!c.properties.is_numbered_tree);
    }

    /// (true, false) row: acyclic but not subcyclic is not numbered.
    #[test]
    fn acyclic_not_subcyclic_is_not_numbered() {
        let c = classify_str("A B\nC D");
        assert!(c.properties.is_acyclic);
        assert!(!c.properties.is_subcyclic);
        assert!(!c.properties.is_numbered_tree);
    }

    // ── mutate-and-restore ───────────────────────────────────────────────────

    /// The chord probe restores the graph on the success path.
    #[test]
    fn with_chord_reverts_on_success() {
        let mut g = graph_from_str("A B\nB C");
        let before = g.adjacency();
        let _count = with_chord(&mut g, "A", "C", |g| simple_cycles(g).count);
        assert_eq!(g.adjacency(), before);
    }

    /// Classification leaves the adjacency structure untouched, including
    /// on the short-circuit chord-failure path.
    #[test]
    fn classify_restores_graph_on_failure_path() {
        let mut g = graph_from_str("A B\nC D");
        let before = g.adjacency();
        let c = classify(&mut g);
        assert!(!c.properties.is_subcyclic, "exercises the failure path");
        assert_eq!(g.adjacency(), before);
    }

    /// Classifying twice yields identical properties both times.
    #[test]
    fn classify_is_idempotent() {
        let mut g = graph_from_str("X A\nX B\nX C");
        let first = classify(&mut g).properties;
        let second = classify(&mut g).properties;
        assert_eq!(first, second);
    }

    /// `recompute` matches `classify` and drops the diagnostics.
    #[test]
    fn recompute_matches_classify() {
        let mut g = graph_from_str("A B\nB C\nC A");
        let full = classify(&mut g);
        let props = recompute(&mut g);
        assert_eq!(props, full.properties);
    }

    // ── diagnostics rendering ────────────────────────────────────────────────

    /// `Display` output carries the check code and the message.
    #[test]
    fn diagnostic_display_contains_code_and_message() {
        let d = Diagnostic::new(CheckId::ChordPair, "chord A-B creates 0 simple cycles");
        let rendered = d.to_string();
        assert!(rendered.starts_with("[SUB-02]"), "rendered: {rendered}");
        assert!(rendered.contains("chord A-B"), "rendered: {rendered}");
    }

    /// Codes are stable.
    #[test]
    fn check_codes_are_stable() {
        assert_eq!(CheckId::Acyclicity.code(), "ACY-01");
        assert_eq!(CheckId::ExcludedShape.code(), "SUB-01");
        assert_eq!(CheckId::ChordPair.code(), "SUB-02");
    }
}
