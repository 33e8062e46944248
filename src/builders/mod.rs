// This file is the module declaration file for the `builders` module.
// It declares and makes public the building blocks the engine is assembled
// from.

// `patterns` module:
// The extension classes, the extension lookup table and the regex passes
// that remove comments for each class.
pub mod patterns;

// `reporter` module:
// Per-file status lines and the run summary. `ConsoleReporter` prints them,
// `MemoryReporter` collects them.
pub mod reporter;

// `validator` module:
// Checks an exclusion configuration for names that can never match.
pub mod validator;
