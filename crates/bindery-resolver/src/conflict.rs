//! Ambiguous source reporting.

use std::fmt;

use bindery_core::config::Strictness;
use bindery_util::errors::BinderyError;

/// A discovered gem that two distinct sources both claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousSource {
    pub name: String,
    /// Source descriptions, sorted so the report does not depend on which
    /// source was examined first.
    pub sources: [String; 2],
}

impl AmbiguousSource {
    pub fn new(name: impl Into<String>, first: String, second: String) -> Self {
        let mut sources = [first, second];
        sources.sort();
        Self {
            name: name.into(),
            sources,
        }
    }

    /// The user-facing report.
    ///
    /// Strict mode says the gem *must* be moved into a source block; lenient
    /// mode says it *should*.
    pub fn message(&self, strictness: Strictness) -> String {
        let verb = if strictness.is_strict() { "must" } else { "should" };
        let mut lines = vec![format!(
            "The gem '{}' was found in multiple relevant sources.",
            self.name
        )];
        lines.extend(self.sources.iter().map(|s| format!("  * {s}")));
        lines.push(format!(
            "You {verb} add this gem to the source block for the source you wish it to be installed from."
        ));
        lines.join("\n")
    }

    /// The security error raised in strict mode.
    pub fn into_error(self, strictness: Strictness) -> BinderyError {
        let message = self.message(strictness);
        BinderyError::AmbiguousSource {
            name: self.name,
            sources: self.sources,
            message,
        }
    }
}

impl fmt::Display for AmbiguousSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} vs {}",
            self.name, self.sources[0], self.sources[1]
        )
    }
}
