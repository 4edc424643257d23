//! Shared utilities for bindery.
//!
//! This crate provides the cross-cutting error type used by all other
//! bindery crates.

pub mod errors;
