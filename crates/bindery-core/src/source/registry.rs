use std::collections::BTreeSet;

use super::{DependencyNames, Source};
use crate::spec_index::{RegistryIndex, Spec};

/// A remote gem registry.
///
/// Specs are fetched lazily through a [`RegistryIndex`]. Every fetched spec
/// contributes its runtime dependencies to discovery. A runtime dependency of
/// a fetched spec that the registry does not serve is unmet.
#[derive(Debug)]
pub struct RegistrySource {
    url: String,
    index: Box<dyn RegistryIndex>,
    dependency_api: bool,
    allow_remote: bool,
    fetched: BTreeSet<String>,
    remote_specs: Vec<Spec>,
    not_served: BTreeSet<String>,
}

impl RegistrySource {
    pub fn new(url: impl Into<String>, index: impl RegistryIndex + 'static) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            index: Box::new(index),
            dependency_api: true,
            allow_remote: true,
            fetched: BTreeSet::new(),
            remote_specs: Vec::new(),
            not_served: BTreeSet::new(),
        }
    }

    /// Registries without a dependency API only offer a full index, which
    /// gives no per-gem dependency information to discover from.
    pub fn with_dependency_api(mut self, enabled: bool) -> Self {
        self.dependency_api = enabled;
        self
    }

    /// With remote access disabled only already-fetched specs are consulted.
    pub fn with_allow_remote(mut self, allowed: bool) -> Self {
        self.allow_remote = allowed;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn has_dependency_api(&self) -> bool {
        self.dependency_api
    }

    /// Specs fetched so far, in fetch order.
    pub fn remote_specs(&self) -> &[Spec] {
        &self.remote_specs
    }

    /// Whether `name` has already been looked up.
    pub fn has_fetched(&self, name: &str) -> bool {
        self.fetched.contains(name)
    }

    fn fetch_names<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        if !self.allow_remote {
            return;
        }
        for name in names {
            if !self.fetched.insert(name.to_string()) {
                continue;
            }
            match self.index.fetch(name) {
                Some(spec) => {
                    tracing::trace!(registry = %self.url, gem = name, "fetched spec");
                    self.remote_specs.push(spec);
                }
                None => {
                    tracing::trace!(registry = %self.url, gem = name, "gem not served");
                    self.not_served.insert(name.to_string());
                }
            }
        }
    }

    fn remote_dependency_names(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.remote_specs
            .iter()
            .flat_map(|spec| spec.dependencies.iter())
            .filter(|name| seen.insert(name.as_str()))
            .cloned()
            .collect()
    }
}

impl Source for RegistrySource {
    fn describe(&self) -> String {
        format!("registry at {}", self.url)
    }

    fn dependency_names_to_double_check(
        &mut self,
        names: &DependencyNames,
    ) -> Option<Vec<String>> {
        if !self.dependency_api {
            return None;
        }
        self.fetch_names(names.iter());
        let discovered = self.remote_dependency_names();
        // Probe the discovered names so that unmet_deps reflects them before
        // the resolver filters candidates. Their own dependencies surface on
        // the next call.
        self.fetch_names(discovered.iter().map(String::as_str));
        Some(discovered)
    }

    fn unmet_deps(&self) -> Vec<String> {
        self.remote_dependency_names()
            .into_iter()
            .filter(|name| self.not_served.contains(name))
            .collect()
    }

    fn double_check_for(&mut self, candidates: Vec<String>, _names: &DependencyNames) {
        if !self.allow_remote || !self.dependency_api || candidates.is_empty() {
            return;
        }
        tracing::debug!(registry = %self.url, ?candidates, "double checking");
        self.fetch_names(candidates.iter().map(String::as_str));
    }
}
