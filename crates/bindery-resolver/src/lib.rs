//! Source attribution engine: binds every gem name to exactly one source,
//! follows names that sources volunteer through discovery until each source
//! reaches a fixpoint, and detects gems claimed by more than one source.

pub mod conflict;
pub mod source_map;
pub mod warning;
