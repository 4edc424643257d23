use crate::source::SourceId;

/// A requested gem, optionally pinned to an explicit source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    name: String,
    source: Option<SourceId>,
}

impl Dependency {
    /// A dependency served by whichever source is the default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: None,
        }
    }

    /// A dependency declared inside a source block.
    pub fn pinned(name: impl Into<String>, source: SourceId) -> Self {
        Self {
            name: name.into(),
            source: Some(source),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> Option<SourceId> {
        self.source
    }
}

impl std::fmt::Display for Dependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpinned_dependency_has_no_source() {
        let dep = Dependency::new("rack");
        assert_eq!(dep.name(), "rack");
        assert!(dep.source().is_none());
    }

    #[test]
    fn pinned_dependency_keeps_source() {
        let dep = Dependency::pinned("rack", SourceId::new(2));
        assert_eq!(dep.source(), Some(SourceId::new(2)));
        assert_eq!(dep.to_string(), "rack");
    }
}
