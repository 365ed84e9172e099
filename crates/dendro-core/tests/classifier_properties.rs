//! Property-based tests for the classifier.
//!
//! Verifies the structural relationships between the four flags and the
//! restore-after-probe contract using `proptest`-generated small graphs
//! (up to 6 vertices, up to 10 edges).
#![allow(clippy::expect_used)]

use dendro_core::{LabeledGraph, classify, simple_cycles};
use proptest::prelude::*;

/// The vertex pool. Six labels keeps the state space small enough that
/// proptest shrinking terminates quickly while still covering triangles,
/// squares, stars, and disconnected pieces.
const LABELS: &[&str] = &["A", "B", "C", "D", "E", "F"];

/// Strategy: generate a small undirected multigraph.
///
/// Vertices are a prefix of the pool so every generated graph names its
/// vertices consistently; edges are index pairs into that prefix, with
/// self-loops filtered out but parallel edges allowed.
fn arb_graph() -> impl Strategy<Value = LabeledGraph> {
    (1usize..=LABELS.len()).prop_flat_map(|vertex_count| {
        let edges = prop::collection::vec((0..vertex_count, 0..vertex_count), 0..=10);
        (Just(vertex_count), edges).prop_map(|(vertex_count, raw_pairs)| {
            let mut g = LabeledGraph::new();
            for label in &LABELS[..vertex_count] {
                g.ensure_vertex(label);
            }
            for (u, w) in raw_pairs {
                if u != w {
                    g.add_edge(LABELS[u], LABELS[w]);
                }
            }
            g
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A graph is a tree exactly when it is both acyclic and subcyclic.
    #[test]
    fn tree_is_conjunction_of_acyclic_and_subcyclic(mut g in arb_graph()) {
        let p = classify(&mut g).properties;
        prop_assert_eq!(p.is_tree, p.is_acyclic && p.is_subcyclic);
    }

    /// The acyclic flag agrees with the cycle enumerator it is built on.
    #[test]
    fn acyclic_flag_matches_enumerator(mut g in arb_graph()) {
        let count = simple_cycles(&g).count;
        let p = classify(&mut g).properties;
        prop_assert_eq!(p.is_acyclic, count == 0);
    }

    /// Classification is idempotent: a second pass over the same graph
    /// yields the same flags and the same diagnostics.
    #[test]
    fn classify_is_idempotent(mut g in arb_graph()) {
        let first = classify(&mut g);
        let second = classify(&mut g);
        prop_assert_eq!(first, second);
    }

    /// The chord probes inside classification never leave the graph
    /// changed, on any path.
    #[test]
    fn classify_restores_the_graph(mut g in arb_graph()) {
        let before = g.adjacency();
        let _c = classify(&mut g);
        prop_assert_eq!(g.adjacency(), before);
    }

    /// A tree always satisfies the numbered-tree table (first row), and a
    /// numbered tree that is acyclic is always a tree.
    #[test]
    fn numbered_tree_rows_are_consistent(mut g in arb_graph()) {
        let p = classify(&mut g).properties;
        if p.is_tree {
            prop_assert!(p.is_numbered_tree);
        }
        if p.is_numbered_tree && p.is_acyclic {
            prop_assert!(p.is_tree);
        }
    }

    /// The witness is present exactly when the count is nonzero.
    #[test]
    fn witness_accompanies_nonzero_count(g in arb_graph()) {
        let record = simple_cycles(&g);
        prop_assert_eq!(record.witness.is_some(), record.count > 0);
    }
}
