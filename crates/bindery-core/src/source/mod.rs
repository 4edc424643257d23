//! Gem sources: the capability contract the attribution resolver consumes and
//! the closed set of source kinds bindery knows how to talk to.

mod git;
mod path;
mod registry;

pub use git::{GitSource, DEFAULT_GIT_REF};
pub use path::{PathSource, PATH_INDEX_FILE};
pub use registry::RegistrySource;

use std::collections::BTreeSet;

/// Handle naming one configured source.
///
/// The default source is always [`SourceId::DEFAULT`]; non-default sources
/// are numbered in configuration order starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceId(usize);

impl SourceId {
    pub const DEFAULT: SourceId = SourceId(0);

    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }

    pub fn is_default(self) -> bool {
        self == Self::DEFAULT
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Names a source is known to own, in order of first appearance.
///
/// The resolver owns one accumulator per source and lends it to the source's
/// discovery and verification hooks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyNames {
    names: Vec<String>,
    seen: BTreeSet<String>,
}

impl DependencyNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `name` unless already present. Returns `true` if it was added.
    pub fn push(&mut self, name: &str) -> bool {
        if self.seen.insert(name.to_string()) {
            self.names.push(name.to_string());
            true
        } else {
            false
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.names
    }
}

impl<S: AsRef<str>> FromIterator<S> for DependencyNames {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut names = Self::new();
        for name in iter {
            names.push(name.as_ref());
        }
        names
    }
}

/// What the attribution resolver needs from a gem source.
///
/// All calls are synchronous and may update the source's own discovery
/// state. `names` is the resolver's accumulator of gems attributed to this
/// source so far.
pub trait Source {
    /// Human-readable description used in conflict messages.
    fn describe(&self) -> String;

    /// Names this source might additionally provide, or `None` when it cannot
    /// discover names dynamically.
    fn dependency_names_to_double_check(&mut self, names: &DependencyNames)
        -> Option<Vec<String>>;

    /// Names this source expected to supply but could not resolve.
    fn unmet_deps(&self) -> Vec<String>;

    /// Verify and reconcile the final candidate list for this pass.
    fn double_check_for(&mut self, candidates: Vec<String>, names: &DependencyNames);
}

/// Every kind of source bindery can be configured with.
#[derive(Debug)]
pub enum SourceKind {
    Path(PathSource),
    Git(GitSource),
    Registry(RegistrySource),
}

impl SourceKind {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Path(_) => "path",
            Self::Git(_) => "git",
            Self::Registry(_) => "registry",
        }
    }
}

impl Source for SourceKind {
    fn describe(&self) -> String {
        match self {
            Self::Path(s) => s.describe(),
            Self::Git(s) => s.describe(),
            Self::Registry(s) => s.describe(),
        }
    }

    fn dependency_names_to_double_check(
        &mut self,
        names: &DependencyNames,
    ) -> Option<Vec<String>> {
        match self {
            Self::Path(s) => s.dependency_names_to_double_check(names),
            Self::Git(s) => s.dependency_names_to_double_check(names),
            Self::Registry(s) => s.dependency_names_to_double_check(names),
        }
    }

    fn unmet_deps(&self) -> Vec<String> {
        match self {
            Self::Path(s) => s.unmet_deps(),
            Self::Git(s) => s.unmet_deps(),
            Self::Registry(s) => s.unmet_deps(),
        }
    }

    fn double_check_for(&mut self, candidates: Vec<String>, names: &DependencyNames) {
        match self {
            Self::Path(s) => s.double_check_for(candidates, names),
            Self::Git(s) => s.double_check_for(candidates, names),
            Self::Registry(s) => s.double_check_for(candidates, names),
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}

impl From<PathSource> for SourceKind {
    fn from(source: PathSource) -> Self {
        Self::Path(source)
    }
}

impl From<GitSource> for SourceKind {
    fn from(source: GitSource) -> Self {
        Self::Git(source)
    }
}

impl From<RegistrySource> for SourceKind {
    fn from(source: RegistrySource) -> Self {
        Self::Registry(source)
    }
}
