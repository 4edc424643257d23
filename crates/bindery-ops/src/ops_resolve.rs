//! Operation: attribute every gem to the source it must come from.

use std::path::{Path, PathBuf};

use serde::Serialize;

use bindery_core::config::{GlobalConfig, Strictness};
use bindery_core::source::Source;
use bindery_resolver::warning::WarningSink;

/// Options for `bindery resolve`.
#[derive(Debug, Default)]
pub struct ResolveOptions {
    /// Explicit manifest location; otherwise searched upward from the cwd.
    pub manifest_path: Option<PathBuf>,
    /// Overrides the configured strictness.
    pub strictness: Option<Strictness>,
}

/// One gem and the source it is bound to.
#[derive(Debug, Clone, Serialize)]
pub struct Binding {
    pub name: String,
    /// Configured source name (`default` for the default source).
    pub source: String,
    pub kind: &'static str,
    pub description: String,
}

/// The outcome of `bindery resolve`.
#[derive(Debug, Serialize)]
pub struct Resolution {
    pub strictness: Strictness,
    pub bindings: Vec<Binding>,
}

/// Resolve the project found from `cwd`. Warnings go to `sink`.
pub fn resolve(
    cwd: &Path,
    opts: &ResolveOptions,
    config: &GlobalConfig,
    sink: &mut dyn WarningSink,
) -> miette::Result<Resolution> {
    let project = crate::load_project(cwd, opts.manifest_path.as_deref())?;
    let strictness = crate::effective_strictness(opts.strictness, config)?;
    let mut map = crate::source_map(&project, config, strictness)?;

    let requirements = map.all_requirements(sink)?;

    let sources = map.sources();
    let bindings = requirements
        .into_iter()
        .map(|(name, id)| {
            let source = &sources[id];
            Binding {
                name,
                source: sources.name(id).unwrap_or_default().to_string(),
                kind: source.kind_name(),
                description: source.describe(),
            }
        })
        .collect();

    Ok(Resolution {
        strictness,
        bindings,
    })
}
