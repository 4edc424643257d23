//! The ordered collection of configured sources.

use std::ops::{Index, IndexMut};

use crate::source::{SourceId, SourceKind};

/// Name the default source is registered under.
pub const DEFAULT_SOURCE_NAME: &str = "default";

#[derive(Debug)]
struct Entry<S> {
    name: String,
    source: S,
}

/// One default source followed by the non-default sources in the order they
/// were configured. That order drives resolver iteration and must be stable.
#[derive(Debug)]
pub struct SourceList<S = SourceKind> {
    entries: Vec<Entry<S>>,
}

impl<S> SourceList<S> {
    pub fn new(default: S) -> Self {
        Self {
            entries: vec![Entry {
                name: DEFAULT_SOURCE_NAME.to_string(),
                source: default,
            }],
        }
    }

    /// Append a non-default source and return its id.
    pub fn add(&mut self, name: impl Into<String>, source: S) -> SourceId {
        let id = SourceId::new(self.entries.len());
        self.entries.push(Entry {
            name: name.into(),
            source,
        });
        id
    }

    /// Add a non-default source (builder pattern).
    pub fn with_source(mut self, name: impl Into<String>, source: S) -> Self {
        self.add(name, source);
        self
    }

    pub fn default_source(&self) -> &S {
        &self.entries[0].source
    }

    /// Ids of the non-default sources, in configuration order.
    pub fn non_default_ids(&self) -> impl Iterator<Item = SourceId> {
        (1..self.entries.len()).map(SourceId::new)
    }

    /// The non-default sources, in configuration order.
    pub fn non_default_sources(&self) -> impl Iterator<Item = &S> {
        self.entries[1..].iter().map(|e| &e.source)
    }

    pub fn get(&self, id: SourceId) -> Option<&S> {
        self.entries.get(id.index()).map(|e| &e.source)
    }

    pub fn contains(&self, id: SourceId) -> bool {
        id.index() < self.entries.len()
    }

    /// Configured name of a source.
    pub fn name(&self, id: SourceId) -> Option<&str> {
        self.entries.get(id.index()).map(|e| e.name.as_str())
    }

    /// Look up a source by its configured name.
    pub fn find(&self, name: &str) -> Option<SourceId> {
        self.entries
            .iter()
            .position(|e| e.name == name)
            .map(SourceId::new)
    }

    /// All sources, default first.
    pub fn iter(&self) -> impl Iterator<Item = (SourceId, &str, &S)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (SourceId::new(i), e.name.as_str(), &e.source))
    }

    /// Number of sources, including the default.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: a list holds at least the default source.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S> Index<SourceId> for SourceList<S> {
    type Output = S;

    fn index(&self, id: SourceId) -> &S {
        &self.entries[id.index()].source
    }
}

impl<S> IndexMut<SourceId> for SourceList<S> {
    fn index_mut(&mut self, id: SourceId) -> &mut S {
        &mut self.entries[id.index()].source
    }
}
