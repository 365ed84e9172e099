mod cli;
mod cmd;
mod error;
mod format;
mod io;

use clap::Parser as _;

use crate::cli::{Cli, Command};
use crate::error::CliError;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{}", e.message());
        std::process::exit(e.exit_code());
    }
}

/// Dispatches the parsed CLI to the subcommand implementations.
///
/// Input reading happens here so that every subcommand sees already-read
/// text and the size and UTF-8 rules are enforced uniformly.
fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Check { file } => {
            let content = io::read_input(&file, cli.max_file_size)?;
            cmd::check::run(&content, &cli.format, cli.quiet, cli.verbose, cli.no_color)
        }

        Command::Bench { files, iterations } => {
            // A file that fails to read is reported and skipped; the other
            // inputs still get timed. The run only fails when every input
            // was unreadable.
            let mut succeeded = 0usize;
            let mut failed = 0usize;
            for file in &files {
                match io::read_input(file, cli.max_file_size) {
                    Ok(content) => {
                        cmd::bench::run(&file.display_label(), &content, iterations, &cli.format)?;
                        succeeded += 1;
                    }
                    Err(e) => {
                        eprintln!("{}", e.message());
                        failed += 1;
                    }
                }
            }
            if succeeded == 0 && failed > 0 {
                return Err(CliError::AllInputsFailed { failed });
            }
            Ok(())
        }

        Command::Version => {
            println!("{}", dendro_core::version());
            Ok(())
        }
    }
}
