// piiguard-core/src/engines/mod.rs
//! Detector implementations.
//!
//! Each detector lives in its own file and implements `PiiDetector`:
//! `pattern_engine` scans for structured identifiers with regular
//! expressions, `entity_engine` maps named-entity spans onto the PII
//! taxonomy.

pub mod pattern_engine;
pub mod entity_engine;

pub use entity_engine::{EntityRecognizer, GazetteerBackend, NerBackend, RecognizedEntity};
pub use pattern_engine::PatternMatcher;
