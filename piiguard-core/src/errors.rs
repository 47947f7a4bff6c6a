//! errors.rs - Custom error types for the piiguard-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `piiguard-core` library.
///
/// Startup failures (`ModelUnavailable`, `InvalidPattern`, `PatternLengthExceeded`,
/// `InvalidConfig`) are fatal for the process. `InvalidSpan` is recovered locally
/// by the text redactor. `Decode`/`Encode` terminate a single request.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PiiGuardError {
    #[error("Entity recognition model is unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Failed to compile PII pattern '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("Pattern '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Invalid span [{start}, {end}) for text of length {len}")]
    InvalidSpan { start: usize, end: usize, len: usize },

    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode redacted image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Image format could not be determined from its bytes")]
    UnsupportedImageFormat,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
