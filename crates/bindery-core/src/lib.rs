//! Core data types for bindery.
//!
//! This crate defines the values the source attribution resolver works on:
//! declared dependencies, the closed set of source kinds and the capability
//! contract they share, the ordered source list, package spec indexes,
//! manifest parsing, and global configuration.
//!
//! This crate is intentionally free of async code and network I/O.

/// Registry used as the default source when a manifest does not name one.
pub const DEFAULT_REGISTRY_URL: &str = "https://rubygems.org";

/// File name of the project manifest.
pub const MANIFEST_FILE: &str = "Bindery.toml";

pub mod config;
pub mod dependency;
pub mod manifest;
pub mod properties;
pub mod source;
pub mod source_list;
pub mod spec_index;
