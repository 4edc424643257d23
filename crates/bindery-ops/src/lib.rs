pub mod ops_pinned;
pub mod ops_resolve;
pub mod ops_sources;

use std::path::{Path, PathBuf};

use bindery_core::config::{GlobalConfig, Strictness};
use bindery_core::manifest::Manifest;
use bindery_core::MANIFEST_FILE;
use bindery_resolver::source_map::SourceMap;
use bindery_util::errors::BinderyError;

/// A loaded project: its manifest and the directory it lives in.
#[derive(Debug)]
pub struct Project {
    pub root: PathBuf,
    pub manifest: Manifest,
}

/// Walk up from `start` looking for `Bindery.toml`.
pub fn find_manifest(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(MANIFEST_FILE))
        .find(|candidate| candidate.is_file())
}

/// Load the project at `manifest_path`, or the nearest one above `cwd`.
pub fn load_project(cwd: &Path, manifest_path: Option<&Path>) -> miette::Result<Project> {
    let path = match manifest_path {
        Some(path) => cwd.join(path),
        None => find_manifest(cwd).ok_or_else(|| BinderyError::Manifest {
            message: format!(
                "Could not find {MANIFEST_FILE} in {} or any parent directory",
                cwd.display()
            ),
        })?,
    };
    let manifest = Manifest::from_path(&path)?;
    let root = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cwd.to_path_buf());
    tracing::debug!(manifest = %path.display(), "loaded project");
    Ok(Project { root, manifest })
}

/// Strictness from the command line if given, else environment and config.
pub fn effective_strictness(
    flag: Option<Strictness>,
    config: &GlobalConfig,
) -> miette::Result<Strictness> {
    match flag {
        Some(strictness) => Ok(strictness),
        None => Ok(config.strictness()?),
    }
}

/// Build the source map for a project.
pub fn source_map(
    project: &Project,
    config: &GlobalConfig,
    strictness: Strictness,
) -> miette::Result<SourceMap> {
    let sources = project
        .manifest
        .source_list(&project.root, config.resolver.allow_remote)?;
    let dependencies = project.manifest.dependency_list(&sources)?;
    Ok(SourceMap::new(sources, dependencies, strictness)?)
}
