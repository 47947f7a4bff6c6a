// piiguard-core/src/lib.rs
//! # PiiGuard Core Library
//!
//! `piiguard-core` finds personally identifiable information in OCR output,
//! quantifies the privacy risk of a document, and produces redacted artifacts:
//! a masked transcript and, when word-location data is available, an image with
//! the PII regions blurred.
//!
//! The library is a pure in-process transformation. It performs no OCR, no
//! networking and no persistence; callers hand it text, optional OCR word boxes
//! and optional image bytes.
//!
//! ## Modules
//!
//! * `config`: `GuardConfig`, the pattern registry, weight table, thresholds and detector settings.
//! * `patterns`: Compiles pattern rules into regular expressions.
//! * `validators`: Checksum and structure checks for Aadhaar, PAN and GSTIN.
//! * `pii_match`: The `PiiMatch` and `PiiKind` data model plus PII-safe logging helpers.
//! * `offsets`: Byte/character offset mapping.
//! * `engine`: The `PiiDetector` trait.
//! * `engines`: `PatternMatcher` and `EntityRecognizer`.
//! * `aggregate`: `MatchAggregator`, merging detector outputs.
//! * `risk`: `RiskScorer` and `RiskAssessment`.
//! * `redact`: `TextRedactor` and `ImageRedactor`.
//! * `ocr`: `WordBox` and Tesseract TSV parsing.
//! * `pipeline`: The shared `Pipeline` host.
//! * `report`: The serializable `PiiReport`.
//! * `headless`: One-shot helpers.
//!
//! ## Usage Example
//!
//! ```rust
//! use piiguard_core::{GuardConfig, Pipeline};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = GuardConfig::load_default()?;
//!     let pipeline = Pipeline::without_entities(&config)?;
//!
//!     let analysis = pipeline.analyze_text("Contact me at a@b.com");
//!     assert_eq!(analysis.redacted_text, "Contact me at *******");
//!     assert_eq!(analysis.risk.score, 4);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Configuration loading returns `anyhow::Result` with context. Component APIs
//! that can fail return [`PiiGuardError`]. Detection and scoring never fail.
//!
//! ---
//! License: MIT OR APACHE 2.0

pub mod aggregate;
pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod ocr;
pub mod offsets;
pub mod patterns;
pub mod pii_match;
pub mod pipeline;
pub mod redact;
pub mod report;
pub mod risk;
pub mod validators;

/// Re-exports the configuration types and functions.
pub use config::{
    config_candidate_paths,
    merge_config,
    validate_config,
    EntityConfig,
    GazetteerTerms,
    GuardConfig,
    ImageConfig,
    OverlapPolicy,
    PatternRule,
    RiskThresholds,
    CONFIG_ENV_VAR,
    MAX_PATTERN_LENGTH,
};

pub use errors::PiiGuardError;

pub use engine::PiiDetector;
pub use engines::{EntityRecognizer, GazetteerBackend, NerBackend, PatternMatcher, RecognizedEntity};

pub use pii_match::{redact_sensitive, DetectorKind, PiiKind, PiiMatch};

pub use aggregate::MatchAggregator;
pub use risk::{RiskAssessment, RiskLevel, RiskScorer, WeightTable};
pub use redact::{ImageRedactor, TextRedactor};

pub use ocr::{load_word_boxes, parse_tesseract_tsv, parse_word_boxes, WordBox};

pub use pipeline::{ImageAnalysis, Pipeline, TextAnalysis};
pub use report::PiiReport;

pub use headless::{headless_analyze_image, headless_analyze_text, headless_redact_text, HeadlessDetectors};

pub use patterns::compiler::{compile_patterns, CompiledPattern, CompiledPatterns};
