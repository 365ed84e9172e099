#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod classify;
pub mod cycles;
pub mod model;
pub mod parse;

pub use classify::{
    CheckId, Classification, Diagnostic, ExcludedShape, GraphProperties, classify, excluded_shape,
    recompute, with_chord,
};
pub use cycles::{CycleRecord, simple_cycles};
pub use model::LabeledGraph;
pub use parse::{EdgeList, build_graph, graph_from_str, parse_edge_list};

/// Returns the current version of the dendro-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
