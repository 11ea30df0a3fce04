//! Main entry point for the cfgtree CLI.
//!
//! This is the command-line interface for the cfgtree configuration loader.
//! It provides commands for loading configuration:
//! - `load`: Load a configuration directory tree
//! - `file`: Load a single configuration file
//! - `merge`: Deep-merge configuration files
//! - `validate`: Validate an options file

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _level = cfgtree::init_logger(cli.verbose, cli.quiet);

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        options: cli.options,
        output: cli.output,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Load(cmd) => cmd.execute(&global),
        cli::Command::File(cmd) => cmd.execute(&global),
        cli::Command::Merge(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
