//! Attribution of gem names to sources.
//!
//! Declared dependencies are bound first: to their source block if they have
//! one, otherwise to the default source. Each non-default source is then
//! asked, pass after pass, which further names it could provide. Unbound
//! names are claimed by that source; a name already claimed by a different
//! source is ambiguous and is either fatal or a warning depending on
//! [`Strictness`]. Gems nobody could satisfy are finally handed to the
//! default source for one verification round.

use std::collections::{BTreeMap, BTreeSet};

use bindery_core::config::Strictness;
use bindery_core::dependency::Dependency;
use bindery_core::source::{DependencyNames, Source, SourceId, SourceKind};
use bindery_core::source_list::SourceList;
use bindery_util::errors::BinderyError;

use crate::conflict::AmbiguousSource;
use crate::warning::WarningSink;

/// Gem name to the source it must be installed from.
pub type Requirements = BTreeMap<String, SourceId>;

/// Binds gem names to sources for one resolution run.
///
/// Not safe to share between concurrent runs: the per-source name
/// accumulators and the sources' own discovery state are mutated in place.
#[derive(Debug)]
pub struct SourceMap<S = SourceKind> {
    sources: SourceList<S>,
    dependencies: Vec<Dependency>,
    strictness: Strictness,
    dependency_names: Vec<DependencyNames>,
    direct: Option<Requirements>,
}

impl<S: Source> SourceMap<S> {
    /// Fails if a dependency is pinned to a source that is not in `sources`.
    pub fn new(
        sources: SourceList<S>,
        dependencies: Vec<Dependency>,
        strictness: Strictness,
    ) -> Result<Self, BinderyError> {
        for dep in &dependencies {
            if let Some(id) = dep.source() {
                if !sources.contains(id) {
                    return Err(BinderyError::UnknownSource {
                        dependency: dep.name().to_string(),
                        source_name: id.to_string(),
                    });
                }
            }
        }
        let dependency_names = vec![DependencyNames::new(); sources.len()];
        Ok(Self {
            sources,
            dependencies,
            strictness,
            dependency_names,
            direct: None,
        })
    }

    pub fn sources(&self) -> &SourceList<S> {
        &self.sources
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    /// Names attributed to `id` so far, or `None` for an id this map does
    /// not know.
    pub fn dependency_names(&self, id: SourceId) -> Option<&DependencyNames> {
        self.dependency_names.get(id.index())
    }

    /// Bindings from explicit declarations only. Computed once per map.
    ///
    /// A later declaration of the same name overwrites an earlier one.
    pub fn direct_requirements(&mut self) -> &Requirements {
        let Self {
            dependencies,
            dependency_names,
            direct,
            ..
        } = self;
        direct.get_or_insert_with(|| {
            let mut requirements = Requirements::new();
            for dep in dependencies.iter() {
                let source = dep.source().unwrap_or(SourceId::DEFAULT);
                dependency_names[source.index()].push(dep.name());
                requirements.insert(dep.name().to_string(), source);
            }
            tracing::debug!(count = requirements.len(), "bound declared dependencies");
            requirements
        })
    }

    /// Directly bound names whose source is not `skip`.
    pub fn pinned_spec_names(&mut self, skip: Option<SourceId>) -> Vec<String> {
        self.direct_requirements()
            .iter()
            .filter(|(_, source)| Some(**source) != skip)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Extend the direct bindings with names the sources discover.
    ///
    /// In strict mode the first ambiguous gem aborts with
    /// [`BinderyError::AmbiguousSource`]. In lenient mode each ambiguous
    /// (gem, source pair) is reported once through `sink` and the earlier
    /// binding is kept.
    pub fn all_requirements(
        &mut self,
        sink: &mut dyn WarningSink,
    ) -> Result<Requirements, BinderyError> {
        let mut requirements = self.direct_requirements().clone();
        let mut reported = BTreeSet::new();
        let ids: Vec<SourceId> = self.sources.non_default_ids().collect();

        for &id in &ids {
            let pinned: BTreeSet<String> = self.pinned_spec_names(Some(id)).into_iter().collect();
            let mut pass = 0usize;

            loop {
                pass += 1;
                let requirement_count = requirements.len();

                let discovered = self.sources[id]
                    .dependency_names_to_double_check(&self.dependency_names[id.index()]);
                let candidates: Vec<String> = match discovered {
                    Some(names) => {
                        let unmet: BTreeSet<String> =
                            self.sources[id].unmet_deps().into_iter().collect();
                        let mut seen = BTreeSet::new();
                        names
                            .into_iter()
                            .filter(|name| seen.insert(name.clone()))
                            .filter(|name| !pinned.contains(name) && !unmet.contains(name))
                            .collect()
                    }
                    None => Vec::new(),
                };

                for name in &candidates {
                    match requirements.get(name).copied() {
                        None => {
                            tracing::debug!(gem = %name, source = %id, "claimed through discovery");
                            requirements.insert(name.clone(), id);
                            self.dependency_names[id.index()].push(name);
                        }
                        Some(previous) if previous == id => {}
                        Some(previous) => {
                            let conflict = AmbiguousSource::new(
                                name.clone(),
                                self.sources[previous].describe(),
                                self.sources[id].describe(),
                            );
                            if self.strictness.is_strict() {
                                return Err(conflict.into_error(self.strictness));
                            }
                            if reported.insert((name.clone(), previous.min(id), previous.max(id))) {
                                sink.warn(&format!(
                                    "Warning: {}",
                                    conflict.message(self.strictness)
                                ));
                            }
                        }
                    }
                }

                self.sources[id].double_check_for(candidates, &self.dependency_names[id.index()]);

                // Only this source can add bindings inside its own loop, so
                // the global size doubles as its convergence check.
                if requirement_count == requirements.len() {
                    tracing::debug!(source = %id, passes = pass, "discovery reached fixpoint");
                    break;
                }
            }
        }

        let unmet: DependencyNames = ids
            .iter()
            .flat_map(|&id| self.sources[id].unmet_deps())
            .filter(|name| !requirements.contains_key(name))
            .collect();
        tracing::debug!(count = unmet.len(), "handing unmet gems to the default source");
        self.sources[SourceId::DEFAULT]
            .double_check_for(unmet.into_vec(), &self.dependency_names[SourceId::DEFAULT.index()]);

        tracing::info!(bindings = requirements.len(), "source attribution complete");
        Ok(requirements)
    }
}
