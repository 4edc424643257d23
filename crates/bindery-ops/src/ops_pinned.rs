//! Operation: list gems bound to a source by explicit declaration.

use std::path::Path;

use bindery_core::config::{GlobalConfig, Strictness};
use bindery_util::errors::BinderyError;

/// Directly bound gem names, leaving out those bound to the source named `skip`.
pub fn pinned(
    cwd: &Path,
    manifest_path: Option<&Path>,
    config: &GlobalConfig,
    skip: Option<&str>,
) -> miette::Result<Vec<String>> {
    let project = crate::load_project(cwd, manifest_path)?;
    // Strictness only matters once discovery runs.
    let mut map = crate::source_map(&project, config, Strictness::Lenient)?;

    let skip = match skip {
        Some(name) => Some(map.sources().find(name).ok_or_else(|| BinderyError::Generic {
            message: format!("No source named '{name}' in {}", project.root.display()),
        })?),
        None => None,
    };
    Ok(map.pinned_spec_names(skip))
}
