use std::path::{Path, PathBuf};

use super::{DependencyNames, Source};
use crate::spec_index::SpecIndex;

/// Index file read from the root of a path source.
pub const PATH_INDEX_FILE: &str = "bindery-index.toml";

/// Gems vendored in a local directory.
#[derive(Debug, Clone)]
pub struct PathSource {
    path: PathBuf,
    specs: SpecIndex,
}

impl PathSource {
    pub fn new(path: impl Into<PathBuf>, specs: SpecIndex) -> Self {
        Self {
            path: path.into(),
            specs,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn specs(&self) -> &SpecIndex {
        &self.specs
    }
}

impl Source for PathSource {
    fn describe(&self) -> String {
        format!("source at `{}`", self.path.display())
    }

    fn dependency_names_to_double_check(
        &mut self,
        _names: &DependencyNames,
    ) -> Option<Vec<String>> {
        Some(self.specs.dependency_names())
    }

    fn unmet_deps(&self) -> Vec<String> {
        self.specs.unmet_dependency_names()
    }

    fn double_check_for(&mut self, _candidates: Vec<String>, _names: &DependencyNames) {}
}
