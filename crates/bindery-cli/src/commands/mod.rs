//! Command dispatch and handler modules.

mod pinned;
mod resolve;
mod sources;

use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    let manifest_path = cli.manifest_path.as_deref();
    match cli.command {
        Command::Resolve {
            strict,
            lenient,
            json,
        } => resolve::exec(manifest_path, strict, lenient, json),
        Command::Pinned { skip } => pinned::exec(manifest_path, skip.as_deref()),
        Command::Sources => sources::exec(manifest_path),
    }
}

fn current_dir() -> Result<std::path::PathBuf> {
    Ok(std::env::current_dir().map_err(bindery_util::errors::BinderyError::Io)?)
}
