//! Strips comments from source files in place.
//!
//! Files are classified by extension (JS/TS/JSON, Python, HTML/XML, CSS) and
//! run through a fixed set of regex passes. The removal is lexical only:
//! comment delimiters inside string literals are removed too.
//!
//! A run is split in two steps, [`crate::core::engine::StripEngine::plan`] which
//! walks the tree and applies the exclusions, and
//! [`crate::core::engine::StripEngine::apply`] which rewrites the files.

pub mod builders;
pub mod core;
pub mod utils;
