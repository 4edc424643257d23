//! CLI argument definitions for bindery.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "bindery",
    version,
    about = "Decide which source every gem must come from",
    long_about = "bindery binds every gem in a project to exactly one configured source, \
                  following the names sources volunteer through discovery and flagging \
                  gems that more than one source claims."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to Bindery.toml (defaults to searching upward from the current directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub manifest_path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Attribute every gem to its source
    Resolve {
        /// Fail when a gem is found in more than one source
        #[arg(long, conflicts_with = "lenient")]
        strict: bool,
        /// Warn when a gem is found in more than one source
        #[arg(long)]
        lenient: bool,
        /// Print the bindings as JSON
        #[arg(long)]
        json: bool,
    },

    /// List gems bound to a source by explicit declaration
    Pinned {
        /// Leave out gems bound to this source
        #[arg(long, value_name = "SOURCE")]
        skip: Option<String>,
    },

    /// List configured sources in resolution order
    Sources,
}

/// Parse command-line arguments.
pub fn parse() -> Cli {
    Cli::parse()
}
