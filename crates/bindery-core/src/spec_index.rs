//! Package spec snapshots: which gems a source contains and what each of
//! them depends on at runtime.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use bindery_util::errors::BinderyError;

/// A single gem and the names of its runtime dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spec {
    pub name: String,
    pub dependencies: Vec<String>,
}

/// Entry under `[packages.<name>]` in an index file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecEntry {
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// An index of gem specs, loaded from a TOML snapshot:
///
/// ```toml
/// [packages.rails]
/// dependencies = ["rack", "actionpack"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecIndex {
    #[serde(default)]
    packages: BTreeMap<String, SpecEntry>,
}

impl SpecIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package (builder pattern).
    pub fn with_package<I, S>(mut self, name: impl Into<String>, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(name, dependencies);
        self
    }

    pub fn insert<I, S>(&mut self, name: impl Into<String>, dependencies: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.packages.insert(
            name.into(),
            SpecEntry {
                dependencies: dependencies.into_iter().map(Into::into).collect(),
            },
        );
    }

    /// Load an index file.
    pub fn from_path(path: &Path) -> Result<Self, BinderyError> {
        let content = std::fs::read_to_string(path).map_err(|e| BinderyError::Config {
            message: format!("Failed to read index {}: {e}", path.display()),
        })?;
        toml::from_str(&content).map_err(|e| BinderyError::Config {
            message: format!("Failed to parse index {}: {e}", path.display()),
        })
    }

    /// Load an index file if it exists, otherwise return an empty index.
    pub fn from_path_or_empty(path: &Path) -> Result<Self, BinderyError> {
        if path.is_file() {
            Self::from_path(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn get(&self, name: &str) -> Option<Spec> {
        self.packages.get(name).map(|entry| Spec {
            name: name.to_string(),
            dependencies: entry.dependencies.clone(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Runtime dependency names of every package, deduplicated in order of
    /// first appearance.
    pub fn dependency_names(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.packages
            .values()
            .flat_map(|entry| entry.dependencies.iter())
            .filter(|name| seen.insert(name.as_str()))
            .cloned()
            .collect()
    }

    /// Dependency names that no package in this index provides.
    pub fn unmet_dependency_names(&self) -> Vec<String> {
        self.dependency_names()
            .into_iter()
            .filter(|name| !self.contains(name))
            .collect()
    }
}

impl std::str::FromStr for SpecIndex {
    type Err = BinderyError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        toml::from_str(content).map_err(|e| BinderyError::Config {
            message: format!("Failed to parse spec index: {e}"),
        })
    }
}

/// Metadata lookup backing a registry source.
///
/// Implementations may hit the network; bindery itself only ships the
/// in-memory [`SpecIndex`] implementation.
pub trait RegistryIndex: std::fmt::Debug {
    /// Fetch the spec for `name`, or `None` when the registry does not serve it.
    fn fetch(&self, name: &str) -> Option<Spec>;
}

impl RegistryIndex for SpecIndex {
    fn fetch(&self, name: &str) -> Option<Spec> {
        self.get(name)
    }
}
