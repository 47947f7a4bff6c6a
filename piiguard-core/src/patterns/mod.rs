//! Pattern rule compilation.
//!
//! Turns the configured `PatternRule`s into `CompiledPattern`s consumed by
//! the `PatternMatcher` detector.

pub mod compiler;

pub use compiler::{compile_patterns, CompiledPattern, CompiledPatterns};
