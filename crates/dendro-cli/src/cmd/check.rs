//! Implementation of `dendro check <file>`.
//!
//! Parses edge-list text, classifies the graph, and reports the verdict.
//! Diagnostics (why a property failed) go to stderr; the four verdict lines
//! (or one JSON object) go to stdout.
//!
//! Exit codes:
//! - 0 = the graph was classified, whatever the verdict
//! - 2 = the input could not be read (handled before this module runs)
use std::time::Instant;

use dendro_core::{classify, graph_from_str};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::format::{
    FormatMode, FormatterConfig, write_diagnostic, write_properties, write_timing_human,
};

/// Runs the `check` command.
///
/// Builds a graph from `content`, classifies it, and emits diagnostics to
/// stderr and the verdict to stdout. A failed property is part of the
/// verdict, not an error: this function returns `Ok(())` for every
/// classifiable input.
///
/// # Errors
///
/// Returns [`CliError::IoError`] only when writing the output itself fails.
pub fn run(
    content: &str,
    format: &OutputFormat,
    quiet: bool,
    verbose: bool,
    no_color: bool,
) -> Result<(), CliError> {
    let mut graph = graph_from_str(content);

    let started = Instant::now();
    let result = classify(&mut graph);
    let elapsed = started.elapsed();

    let mode = match format {
        OutputFormat::Human => FormatMode::Human,
        OutputFormat::Json => FormatMode::Json,
    };
    let fmt_config = FormatterConfig::from_flags(no_color, quiet, verbose);

    let stderr = std::io::stderr();
    let mut err_out = stderr.lock();

    for diag in &result.diagnostics {
        write_diagnostic(&mut err_out, diag, mode, &fmt_config).map_err(|e| CliError::IoError {
            source: "stderr".to_owned(),
            detail: e.to_string(),
        })?;
    }

    write_timing_human(&mut err_out, "classified", elapsed, &fmt_config).map_err(|e| {
        CliError::IoError {
            source: "stderr".to_owned(),
            detail: e.to_string(),
        }
    })?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_properties(&mut out, &result.properties, mode)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    /// A tree input classifies cleanly in human mode.
    #[test]
    fn run_tree_returns_ok() {
        let result = run("A B\nB C", &OutputFormat::Human, false, false, true);
        assert!(result.is_ok(), "expected Ok: {result:?}");
    }

    /// A cyclic input is still a success: the verdict is the output.
    #[test]
    fn run_cyclic_graph_returns_ok() {
        let result = run("A B\nB C\nC A", &OutputFormat::Human, false, false, true);
        assert!(result.is_ok(), "verdict is not an error: {result:?}");
    }

    /// Empty input is a valid (empty) graph.
    #[test]
    fn run_empty_input_returns_ok() {
        let result = run("", &OutputFormat::Human, false, false, true);
        assert!(result.is_ok());
    }

    /// JSON mode succeeds for both verdict outcomes.
    #[test]
    fn run_json_format_returns_ok() {
        assert!(run("A B", &OutputFormat::Json, false, false, true).is_ok());
        assert!(run("A\nB", &OutputFormat::Json, false, false, true).is_ok());
    }

    /// Quiet and verbose modes both complete.
    #[test]
    fn run_quiet_and_verbose_modes_return_ok() {
        assert!(run("A B", &OutputFormat::Human, true, false, true).is_ok());
        assert!(run("A B", &OutputFormat::Human, false, true, true).is_ok());
    }
}
