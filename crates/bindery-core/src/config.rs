use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use bindery_util::errors::BinderyError;

/// Environment variable overriding `resolver.strict`.
pub const STRICT_ENV: &str = "BINDERY_STRICT";

/// How the resolver treats a gem claimed by two sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Ambiguity is a fatal security error.
    Strict,
    /// Ambiguity is reported as a warning and the first claim wins.
    #[default]
    Lenient,
}

impl Strictness {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::Lenient
        }
    }

    pub fn is_strict(self) -> bool {
        self == Self::Strict
    }
}

impl std::fmt::Display for Strictness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strict => f.write_str("strict"),
            Self::Lenient => f.write_str("lenient"),
        }
    }
}

/// Global user configuration loaded from `~/.bindery/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub resolver: ResolverConfig,
}

/// Resolver settings from `[resolver]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Disallow gems that are found in more than one source.
    #[serde(default)]
    pub strict: bool,
    #[serde(default = "default_allow_remote", rename = "allow-remote")]
    pub allow_remote: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            strict: false,
            allow_remote: default_allow_remote(),
        }
    }
}

fn default_allow_remote() -> bool {
    true
}

impl GlobalConfig {
    /// Load the global configuration from `~/.bindery/config.toml`, or return defaults if the file doesn't exist.
    pub fn load() -> Result<Self, BinderyError> {
        Self::load_from(&Self::default_path())
    }

    /// Load the configuration at `path`, or defaults if there is no such file.
    pub fn load_from(path: &Path) -> Result<Self, BinderyError> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| BinderyError::Config {
            message: format!("Failed to read global config: {e}"),
        })?;
        toml::from_str(&content).map_err(|e| BinderyError::Config {
            message: format!("Failed to parse global config: {e}"),
        })
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Strictness after applying the `BINDERY_STRICT` override.
    pub fn strictness(&self) -> Result<Strictness, BinderyError> {
        let env = std::env::var(STRICT_ENV).ok();
        self.strictness_with_env(env.as_deref())
    }

    /// Strictness given an explicit value for the environment override.
    pub fn strictness_with_env(&self, env: Option<&str>) -> Result<Strictness, BinderyError> {
        let strict = match env {
            Some(value) => parse_flag(value)?,
            None => self.resolver.strict,
        };
        Ok(Strictness::from_strict(strict))
    }
}

fn parse_flag(value: &str) -> Result<bool, BinderyError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(BinderyError::Config {
            message: format!("{STRICT_ENV} must be a boolean, got '{other}'"),
        }),
    }
}

/// Returns the path to the bindery data directory (`~/.bindery/`).
pub fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".bindery")
}
