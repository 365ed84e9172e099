/// Output formatting: human-readable and JSON (NDJSON) modes.
///
/// This module implements two output strategies for the classifier's
/// results:
///
/// - **Human mode** (default): diagnostics are one line each, color-coded,
///   on stderr; the verdict is four plain sentences on stdout.
/// - **JSON mode**: each diagnostic is a single-line JSON object (NDJSON)
///   on stderr; the verdict is one JSON object on stdout.
///
/// Both modes support a **quiet** flag (suppress diagnostics) and a
/// **verbose** flag (add timing to stderr).
use std::io::{IsTerminal as _, Write};
use std::time::Duration;

use dendro_core::{Diagnostic, GraphProperties};

use crate::error::CliError;

// ---------------------------------------------------------------------------
// Color support detection
// ---------------------------------------------------------------------------

/// Returns `true` if ANSI color codes should be emitted to stderr.
///
/// Colors are disabled when any of the following conditions hold:
/// - `no_color_flag` is `true` (the `--no-color` CLI flag was passed).
/// - The `NO_COLOR` environment variable is present (any non-empty value).
/// - stderr is not a TTY (e.g. the output is piped to a file).
pub fn colors_enabled(no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stderr().is_terminal()
}

// ---------------------------------------------------------------------------
// ANSI escape sequences
// ---------------------------------------------------------------------------

const ANSI_YELLOW: &str = "\x1b[33m";
const ANSI_RESET: &str = "\x1b[0m";

// ---------------------------------------------------------------------------
// FormatterConfig
// ---------------------------------------------------------------------------

/// Configuration for the output formatter, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Whether ANSI colors are enabled.
    pub colors: bool,
    /// Suppress all non-error stderr output.
    pub quiet: bool,
    /// Emit timing to stderr.
    pub verbose: bool,
}

impl FormatterConfig {
    /// Constructs a [`FormatterConfig`] from the raw CLI flags.
    ///
    /// `no_color_flag` is the `--no-color` boolean. Color detection also
    /// checks the `NO_COLOR` env var and the stderr TTY state.
    pub fn from_flags(no_color_flag: bool, quiet: bool, verbose: bool) -> Self {
        Self {
            colors: colors_enabled(no_color_flag),
            quiet,
            verbose,
        }
    }
}

// ---------------------------------------------------------------------------
// Format mode
// ---------------------------------------------------------------------------

/// Output format selection, mirroring the CLI `--format` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    /// Human-readable, optionally colored output.
    Human,
    /// Structured NDJSON / JSON output.
    Json,
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// Writes a single [`Diagnostic`] to `writer` in human-readable format.
///
/// Format: `[F] SUB-02  chord A-C creates 0 simple cycles, expected exactly 1`
///
/// The `[F]` (finding) tag is yellow when `config.colors` is `true`. In
/// quiet mode nothing is written: diagnostics explain a verdict, they are
/// not errors.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_diagnostic_human<W: Write>(
    writer: &mut W,
    diag: &Diagnostic,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet {
        return Ok(());
    }

    if config.colors {
        writeln!(
            writer,
            "{ANSI_YELLOW}[F]{ANSI_RESET} {code}  {message}",
            code = diag.check,
            message = diag.message,
        )
    } else {
        writeln!(
            writer,
            "[F] {code}  {message}",
            code = diag.check,
            message = diag.message,
        )
    }
}

/// Writes a single [`Diagnostic`] to `writer` as a NDJSON line.
///
/// Each line is a self-contained JSON object:
/// ```json
/// {"check":"ACY-01","message":"found a simple cycle: A-B-C-A"}
/// ```
///
/// In quiet mode nothing is written.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_diagnostic_json<W: Write>(
    writer: &mut W,
    diag: &Diagnostic,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet {
        return Ok(());
    }

    let line = serde_json::json!({
        "check": diag.check.code(),
        "message": diag.message,
    });
    writeln!(writer, "{line}")
}

/// Writes a single [`Diagnostic`] to `writer` in the requested format.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_diagnostic<W: Write>(
    writer: &mut W,
    diag: &Diagnostic,
    mode: FormatMode,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    match mode {
        FormatMode::Human => write_diagnostic_human(writer, diag, config),
        FormatMode::Json => write_diagnostic_json(writer, diag, config),
    }
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// Writes the four property verdicts to `writer` as human-readable lines.
///
/// ```text
/// The graph is acyclic.
/// The graph is subcyclic.
/// The graph is a tree.
/// The graph is a numbered tree.
/// ```
///
/// Negative verdicts read "The graph is not ...". The verdict is the
/// command's primary output and is never suppressed by quiet mode.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_properties_human<W: Write>(
    writer: &mut W,
    props: &GraphProperties,
) -> std::io::Result<()> {
    let lines = [
        (props.is_acyclic, "acyclic"),
        (props.is_subcyclic, "subcyclic"),
        (props.is_tree, "a tree"),
        (props.is_numbered_tree, "a numbered tree"),
    ];
    for (holds, name) in lines {
        if holds {
            writeln!(writer, "The graph is {name}.")?;
        } else {
            writeln!(writer, "The graph is not {name}.")?;
        }
    }
    Ok(())
}

/// Writes the four property verdicts to `writer` as one JSON object.
///
/// ```json
/// {"is_acyclic":true,"is_subcyclic":true,"is_tree":true,"is_numbered_tree":true}
/// ```
///
/// # Errors
///
/// Returns [`CliError::IoError`] if serialization or writing fails.
pub fn write_properties_json<W: Write>(
    writer: &mut W,
    props: &GraphProperties,
) -> Result<(), CliError> {
    let json = serde_json::to_string(props).map_err(|e| CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    })?;
    writeln!(writer, "{json}").map_err(|e| CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    })
}

/// Writes the verdict to `writer` in the requested format.
///
/// # Errors
///
/// Returns [`CliError::IoError`] if writing fails.
pub fn write_properties<W: Write>(
    writer: &mut W,
    props: &GraphProperties,
    mode: FormatMode,
) -> Result<(), CliError> {
    match mode {
        FormatMode::Human => write_properties_human(writer, props).map_err(|e| CliError::IoError {
            source: "stdout".to_owned(),
            detail: e.to_string(),
        }),
        FormatMode::Json => write_properties_json(writer, props),
    }
}

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// Writes timing information to `writer` in verbose mode.
///
/// This is a no-op when `config.verbose` is `false`.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_timing_human<W: Write>(
    writer: &mut W,
    label: &str,
    duration: Duration,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if !config.verbose {
        return Ok(());
    }
    writeln!(writer, "{label} in {}ms", duration.as_millis())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
