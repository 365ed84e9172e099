/// Simple-cycle enumeration over a [`LabeledGraph`].
///
/// [`simple_cycles`] runs one depth-first scan per start vertex. Each scan
/// uses an explicit frame stack whose entries carry an independent copy of
/// the path taken so far, so divergent branches never contaminate each
/// other's partial paths. A cycle is recorded when a neighbor equals the
/// scan's start vertex and the carried path holds more than two vertices.
///
/// # Cycle signatures
///
/// Two cycles are "the same" when they visit the same **vertex set**: each
/// discovered cycle is normalized to a signature: its labels sorted
/// lexicographically, joined with `-`, with the first sorted label repeated
/// at the end (`A-B-C-A`). This collapses edge-distinct cycles over one
/// vertex set into a single count. The collapse is load-bearing for the
/// subcyclic chord test's `== 1` threshold and must not be "fixed" into a
/// topological cycle count.
///
/// Each per-start scan is bounded by the number of simple paths from that
/// vertex, so the worst case is exponential on dense graphs; inputs here
/// are a few dozen vertices at most.
use std::collections::{BTreeSet, HashSet};

use petgraph::stable_graph::NodeIndex;

use crate::model::LabeledGraph;

/// The result of one enumeration pass: how many distinct simple cycles the
/// graph contains (under vertex-set deduplication) and one representative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleRecord {
    /// Number of distinct cycle signatures across all start vertices.
    pub count: usize,
    /// The lexicographically smallest signature, or `None` when acyclic.
    pub witness: Option<String>,
}

/// Enumerates the distinct simple cycles of length ≥ 3 in `graph`.
///
/// The union of signatures discovered from every start vertex is the
/// result; a cycle reachable from several starts is still counted once.
pub fn simple_cycles(graph: &LabeledGraph) -> CycleRecord {
    let mut signatures: BTreeSet<String> = BTreeSet::new();
    for start in graph.vertices() {
        scan_from(graph, start, &mut signatures);
    }
    CycleRecord {
        count: signatures.len(),
        witness: signatures.iter().next().cloned(),
    }
}

/// One depth-first scan rooted at `start`, accumulating signatures.
///
/// The visited set is local to the scan, so no unwinding is needed between
/// starts: residual marks from one scan cannot block another. Within the
/// scan, a vertex closed on one branch is not re-expanded on a sibling
/// branch; the per-frame path copies keep the recorded cycles sound anyway,
/// because every cycle through `start` is seen from at least one branch
/// order across the independent per-start scans.
fn scan_from(graph: &LabeledGraph, start: NodeIndex, signatures: &mut BTreeSet<String>) {
    let mut visited: HashSet<NodeIndex> = HashSet::new();
    // Frame: (vertex to expand, path that led to it).
    let mut stack: Vec<(NodeIndex, Vec<NodeIndex>)> = vec![(start, Vec::new())];

    while let Some((v, mut path)) = stack.pop() {
        if !visited.insert(v) {
            continue;
        }
        path.push(v);

        for neighbor in graph.neighbors(v) {
            if neighbor == start && path.len() > 2 {
                signatures.insert(signature(graph, &path));
            } else if !visited.contains(&neighbor) {
                stack.push((neighbor, path.clone()));
            }
        }
    }
}

/// Normalizes a closed path into its vertex-set signature.
fn signature(graph: &LabeledGraph, path: &[NodeIndex]) -> String {
    let mut labels: Vec<&str> = path.iter().map(|&v| graph.label(v)).collect();
    labels.sort_unstable();

    let mut out = String::new();
    for label in &labels {
        out.push_str(label);
        out.push('-');
    }
    if let Some(first) = labels.first() {
        out.push_str(first);
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
