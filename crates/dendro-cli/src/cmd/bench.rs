//! Implementation of `dendro bench <file>...`.
//!
//! Builds each graph once, then times repeated classification passes over
//! it. Per-iteration durations and the mean go to stdout; the default pass
//! count is 10.
use std::time::{Duration, Instant};

use dendro_core::{LabeledGraph, graph_from_str, recompute};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::format::FormatMode;

/// Times `iterations` full classification passes over `graph`.
///
/// Every pass recomputes all four properties from scratch; nothing is
/// cached between passes, so each duration measures the same work.
pub fn time_classification(graph: &mut LabeledGraph, iterations: u32) -> Vec<Duration> {
    let mut durations = Vec::with_capacity(iterations as usize);
    for _ in 0..iterations {
        let started = Instant::now();
        let _props = recompute(graph);
        durations.push(started.elapsed());
    }
    durations
}

/// Mean duration of one pass. Zero when no passes ran.
pub fn mean_duration(durations: &[Duration]) -> Duration {
    if durations.is_empty() {
        return Duration::ZERO;
    }
    let total: Duration = durations.iter().sum();
    total / durations.len() as u32
}

/// Runs the `bench` command for one already-read input.
///
/// `label` names the input in the report (the path, or `-` for stdin).
///
/// # Errors
///
/// Returns [`CliError::IoError`] only when writing the report fails.
pub fn run(
    label: &str,
    content: &str,
    iterations: u32,
    format: &OutputFormat,
) -> Result<(), CliError> {
    let mut graph = graph_from_str(content);
    let durations = time_classification(&mut graph, iterations);
    let mean = mean_duration(&durations);

    let mode = match format {
        OutputFormat::Human => FormatMode::Human,
        OutputFormat::Json => FormatMode::Json,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, label, &durations, mean, mode).map_err(|e| CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    })
}

/// Writes one file's timing report to `writer`.
///
/// Human mode:
/// ```text
/// graphs/big.txt:
///   pass 1: 3ms
///   pass 2: 2ms
///   mean: 2ms
/// ```
///
/// JSON mode emits one NDJSON object per file:
/// ```json
/// {"file":"graphs/big.txt","passes_ms":[3,2],"mean_ms":2}
/// ```
fn write_report<W: std::io::Write>(
    writer: &mut W,
    label: &str,
    durations: &[Duration],
    mean: Duration,
    mode: FormatMode,
) -> std::io::Result<()> {
    match mode {
        FormatMode::Human => {
            writeln!(writer, "{label}:")?;
            for (i, d) in durations.iter().enumerate() {
                writeln!(writer, "  pass {}: {}ms", i + 1, d.as_millis())?;
            }
            writeln!(writer, "  mean: {}ms", mean.as_millis())
        }
        FormatMode::Json => {
            let passes: Vec<u128> = durations.iter().map(Duration::as_millis).collect();
            let line = serde_json::json!({
                "file": label,
                "passes_ms": passes,
                "mean_ms": mean.as_millis(),
            });
            writeln!(writer, "{line}")
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
