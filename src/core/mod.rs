// This file is the module declaration file for the `core` module.
// It declares the submodules that make up the stripping pipeline and
// exposes them to the rest of the crate.

// `config` module:
// The exclusion rules for a run (`StripperConfig`) and the `ConfigManager`
// that loads them from an optional TOML file.
pub mod config;

// `engine` module:
// `StripEngine`, which plans a traversal and then applies the comment
// transforms file by file.
pub mod engine;

// `source` module:
// The `SourceTree` trait the engine reads and writes through, with the real
// filesystem (`DiskTree`) and an in-memory tree (`MemoryTree`).
pub mod source;
