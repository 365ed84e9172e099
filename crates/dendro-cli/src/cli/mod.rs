//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
///
/// Parsing `"-"` yields [`PathOrStdin::Stdin`]; anything else yields
/// [`PathOrStdin::Path`].  This avoids stringly-typed handling of the stdin
/// sentinel throughout the codebase.
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl PathOrStdin {
    /// A display label for error messages: `"-"` for stdin, otherwise the
    /// path as typed.
    pub fn display_label(&self) -> String {
        match self {
            Self::Stdin => "-".to_owned(),
            Self::Path(path) => path.display().to_string(),
        }
    }
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// Output format for CLI commands.
///
/// `Human` emits plain (optionally colored) text. `Json` emits structured
/// JSON: NDJSON lines for diagnostics on stderr, a single object for the
/// verdict on stdout.
#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, optionally colored output (default).
    Human,
    /// Structured JSON / NDJSON output.
    Json,
}

/// All top-level subcommands exposed by the `dendro` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Classify a graph: acyclic, subcyclic, tree, numbered tree.
    Check {
        /// Path to an edge-list file, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
    },

    /// Time repeated classification of one or more graphs.
    Bench {
        /// Paths to edge-list files, or `-` for stdin (at most one may be `-`).
        #[arg(value_name = "FILE", num_args = 1.., required = true)]
        files: Vec<PathOrStdin>,
        /// Number of classification passes per file.
        #[arg(long, default_value = "10")]
        iterations: u32,
    },

    /// Print the dendro-core library version.
    Version,
}

/// Root CLI struct for the `dendro` binary.
///
/// All global flags are defined here and marked `global = true` so that clap
/// propagates them to every subcommand.
#[derive(Parser)]
#[command(
    name = "dendro",
    version,
    about = "Tree and numbered-tree graph classifier",
    long_about = "Classifies undirected labeled graphs read from edge-list text.\n\
                  Reports whether a graph is acyclic, subcyclic, a tree, and a\n\
                  numbered tree, with diagnostics naming the offending cycle,\n\
                  shape, or vertex pair when a check fails."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Suppress all stderr output except errors (incompatible with `--verbose`).
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Increase stderr verbosity: timing and input metadata
    /// (incompatible with `--quiet`).
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Maximum input file size in bytes.
    ///
    /// Can also be set via the `DENDRO_MAX_FILE_SIZE` environment variable.
    /// The CLI flag takes precedence over the environment variable.
    /// Default: 268435456 (256 MB).
    #[arg(
        long,
        global = true,
        env = "DENDRO_MAX_FILE_SIZE",
        default_value = "268435456"
    )]
    pub max_file_size: u64,

    /// Disable ANSI color codes in human output.
    ///
    /// Also respects the `NO_COLOR` environment variable per
    /// <https://no-color.org>.
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,
}
