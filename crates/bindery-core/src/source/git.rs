use super::{DependencyNames, Source};
use crate::spec_index::SpecIndex;

/// Reference checked out when a git source does not name one.
pub const DEFAULT_GIT_REF: &str = "HEAD";

/// Gems checked out from a git repository.
///
/// Discovery works like [`super::PathSource`]: the specs of the checkout
/// are fully known, so verification has nothing to fetch.
#[derive(Debug, Clone)]
pub struct GitSource {
    url: String,
    reference: String,
    specs: SpecIndex,
}

impl GitSource {
    pub fn new(url: impl Into<String>, reference: impl Into<String>, specs: SpecIndex) -> Self {
        Self {
            url: url.into(),
            reference: reference.into(),
            specs,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn specs(&self) -> &SpecIndex {
        &self.specs
    }
}

impl Source for GitSource {
    fn describe(&self) -> String {
        format!("{} (at {})", self.url, self.reference)
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

    fn double_check_for(&mut self, candidates: Vec<String>, _names: &DependencyNames) {
        tracing::trace!(source = %self.url, ?candidates, "git checkout needs no double check");
    }
}
