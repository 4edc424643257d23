//! Handler for `bindery sources`.

use std::path::Path;

use miette::Result;

use bindery_core::config::GlobalConfig;
use bindery_ops::ops_sources;

pub fn exec(manifest_path: Option<&Path>) -> Result<()> {
    let cwd = super::current_dir()?;
    let config = GlobalConfig::load()?;
    let entries = ops_sources::sources(&cwd, manifest_path, &config)?;
    for entry in entries {
        println!(
            "{:>2}  {:<12} {:<8} {}",
            entry.id, entry.name, entry.kind, entry.description
        );
    }
    Ok(())
}
