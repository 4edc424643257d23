use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use bindery_util::errors::BinderyError;

use crate::dependency::Dependency;
use crate::source::{GitSource, PathSource, RegistrySource, SourceKind, PATH_INDEX_FILE};
use crate::source_list::{SourceList, DEFAULT_SOURCE_NAME};
use crate::spec_index::SpecIndex;

/// The parsed representation of a `Bindery.toml` file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub source: DefaultSourceSection,

    /// Non-default sources, in the order they are consulted.
    #[serde(default)]
    pub sources: Vec<NamedSource>,

    #[serde(default)]
    pub dependencies: BTreeMap<String, DependencyEntry>,
}

/// The `[source]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultSourceSection {
    #[serde(default)]
    pub default: Option<DefaultSourceEntry>,
}

/// The default source, either a registry URL or a detailed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultSourceEntry {
    Url(String),
    Detailed(SourceConfig),
}

/// A `[[sources]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedSource {
    pub name: String,
    #[serde(flatten)]
    pub config: SourceConfig,
}

/// How to reach a source. Relative paths are resolved against the project root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    Registry {
        url: String,
        /// Local snapshot of the registry's dependency API.
        #[serde(default)]
        index: Option<PathBuf>,
        #[serde(default = "default_dependency_api", rename = "dependency-api")]
        dependency_api: bool,
    },
    Git {
        url: String,
        #[serde(default = "default_git_ref", rename = "ref")]
        reference: String,
        #[serde(default)]
        index: Option<PathBuf>,
    },
    Path {
        path: PathBuf,
        #[serde(default)]
        index: Option<PathBuf>,
    },
}

fn default_dependency_api() -> bool {
    true
}

fn default_git_ref() -> String {
    crate::source::DEFAULT_GIT_REF.to_string()
}

/// A dependency, either a bare version requirement or a detailed table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependencyEntry {
    Requirement(String),
    Detailed(DetailedDependency),
}

/// A dependency with an optional requirement and source block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetailedDependency {
    #[serde(default)]
    pub version: Option<String>,
    /// Name of the `[[sources]]` entry this gem must come from.
    #[serde(default)]
    pub source: Option<String>,
}

impl DependencyEntry {
    pub fn source_name(&self) -> Option<&str> {
        match self {
            Self::Requirement(_) => None,
            Self::Detailed(d) => d.source.as_deref(),
        }
    }
}

impl SourceConfig {
    /// Materialize this configuration as a source.
    pub fn build(&self, root: &Path, allow_remote: bool) -> Result<SourceKind, BinderyError> {
        let source: SourceKind = match self {
            Self::Registry {
                url,
                index,
                dependency_api,
            } => {
                let specs = load_index(root, index.as_deref())?;
                RegistrySource::new(url.clone(), specs)
                    .with_dependency_api(*dependency_api)
                    .with_allow_remote(allow_remote)
                    .into()
            }
            Self::Git {
                url,
                reference,
                index,
            } => {
                let specs = load_index(root, index.as_deref())?;
                GitSource::new(url.clone(), reference.clone(), specs).into()
            }
            Self::Path { path, index } => {
                let specs = match index {
                    Some(index) => SpecIndex::from_path(&root.join(index))?,
                    None => SpecIndex::from_path_or_empty(&root.join(path).join(PATH_INDEX_FILE))?,
                };
                PathSource::new(path.clone(), specs).into()
            }
        };
        Ok(source)
    }
}

fn load_index(root: &Path, index: Option<&Path>) -> Result<SpecIndex, BinderyError> {
    match index {
        Some(index) => SpecIndex::from_path(&root.join(index)),
        None => Ok(SpecIndex::default()),
    }
}

impl Manifest {
    /// Load and parse a `Bindery.toml` file from the given path.
    ///
    /// Before parsing, `${env:VAR}` references in the manifest content are
    /// resolved using `.bindery.env` (if present alongside `Bindery.toml`) and
    /// process environment variables.
    pub fn from_path(path: &Path) -> Result<Self, BinderyError> {
        let content = std::fs::read_to_string(path).map_err(|e| BinderyError::Manifest {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;

        let dir = path.parent().unwrap_or(Path::new("."));
        let env_vars = crate::properties::load_env_file(&dir.join(crate::properties::ENV_FILE))?;
        let resolved = crate::properties::interpolate(&content, &env_vars);

        resolved.parse()
    }

    /// Build the source list: the default source, then `[[sources]]` in order.
    pub fn source_list(&self, root: &Path, allow_remote: bool) -> Result<SourceList, BinderyError> {
        self.validate_source_names()?;

        let default: SourceKind = match &self.source.default {
            Some(DefaultSourceEntry::Url(url)) => {
                RegistrySource::new(url.clone(), SpecIndex::default())
                    .with_allow_remote(allow_remote)
                    .into()
            }
            Some(DefaultSourceEntry::Detailed(config)) => config.build(root, allow_remote)?,
            None => RegistrySource::new(crate::DEFAULT_REGISTRY_URL, SpecIndex::default())
                .with_allow_remote(allow_remote)
                .into(),
        };

        let mut list = SourceList::new(default);
        for named in &self.sources {
            let source = named.config.build(root, allow_remote)?;
            list.add(named.name.clone(), source);
        }
        Ok(list)
    }

    /// Declared dependencies, with source blocks resolved against `sources`.
    pub fn dependency_list<S>(&self, sources: &SourceList<S>) -> Result<Vec<Dependency>, BinderyError> {
        self.dependencies
            .iter()
            .map(|(name, entry)| match entry.source_name() {
                None => Ok(Dependency::new(name.clone())),
                Some(source_name) => sources
                    .find(source_name)
                    .map(|id| Dependency::pinned(name.clone(), id))
                    .ok_or_else(|| BinderyError::UnknownSource {
                        dependency: name.clone(),
                        source_name: source_name.to_string(),
                    }),
            })
            .collect()
    }

    fn validate_source_names(&self) -> Result<(), BinderyError> {
        let mut seen = BTreeSet::new();
        for named in &self.sources {
            if named.name.trim().is_empty() {
                return Err(BinderyError::Manifest {
                    message: "Source names must not be empty".to_string(),
                });
            }
            if named.name == DEFAULT_SOURCE_NAME {
                return Err(BinderyError::Manifest {
                    message: format!(
                        "Source name '{DEFAULT_SOURCE_NAME}' is reserved for [source.default]"
                    ),
                });
            }
            if !seen.insert(named.name.as_str()) {
                return Err(BinderyError::Manifest {
                    message: format!("Source '{}' is declared more than once", named.name),
                });
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for Manifest {
    type Err = BinderyError;

    /// Parse a `Bindery.toml` from a string (no interpolation).
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        toml::from_str(content).map_err(|e| BinderyError::Manifest {
            message: format!("Failed to parse Bindery.toml: {e}"),
        })
    }
}
