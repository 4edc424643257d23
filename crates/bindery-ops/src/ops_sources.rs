//! Operation: list configured sources in resolution order.

use std::path::Path;

use serde::Serialize;

use bindery_core::config::GlobalConfig;
use bindery_core::source::Source;

#[derive(Debug, Clone, Serialize)]
pub struct SourceEntry {
    pub id: usize,
    pub name: String,
    pub kind: &'static str,
    pub description: String,
}

/// Sources of the project, default first.
pub fn sources(
    cwd: &Path,
    manifest_path: Option<&Path>,
    config: &GlobalConfig,
) -> miette::Result<Vec<SourceEntry>> {
    let project = crate::load_project(cwd, manifest_path)?;
    let list = project
        .manifest
        .source_list(&project.root, config.resolver.allow_remote)?;
    Ok(list
        .iter()
        .map(|(id, name, source)| SourceEntry {
            id: id.index(),
            name: name.to_string(),
            kind: source.kind_name(),
            description: source.describe(),
        })
        .collect())
}
