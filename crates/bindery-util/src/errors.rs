use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all bindery operations.
#[derive(Debug, Error, Diagnostic)]
pub enum BinderyError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed manifest (e.g. Bindery.toml).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your Bindery.toml for syntax errors"))]
    Manifest { message: String },

    /// Invalid global configuration or spec index file.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A dependency was pinned to a source that is not configured.
    #[error("Dependency '{dependency}' refers to unknown source '{source_name}'")]
    #[diagnostic(help("Declare the source in a [[sources]] entry of Bindery.toml"))]
    UnknownSource {
        dependency: String,
        source_name: String,
    },

    /// A discovered gem is claimed by two distinct sources.
    ///
    /// This is the shape of a dependency-confusion attack, so it is reported
    /// as a security failure and aborts resolution.
    #[error("{message}")]
    #[diagnostic(code(bindery::security::ambiguous_source))]
    AmbiguousSource {
        name: String,
        sources: [String; 2],
        message: String,
    },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

impl BinderyError {
    /// Returns `true` for failures that indicate a possible supply-chain attack.
    pub fn is_security(&self) -> bool {
        matches!(self, Self::AmbiguousSource { .. })
    }
}

/// Convenience alias for `miette::Result<T>`.
pub type BinderyResult<T> = miette::Result<T>;
