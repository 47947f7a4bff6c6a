// piiguard-core/src/engine.rs
//! Defines the `PiiDetector` trait shared by every detector.
//!
//! A detector is a read-only, shareable component that scans text and reports
//! typed spans. The pipeline holds one detector per strategy (patterns,
//! entities) and runs them in a fixed order, so callers never depend on a
//! concrete detector type.
//!
//! License: MIT OR APACHE 2.0

use crate::pii_match::{DetectorKind, PiiMatch};

/// A trait that defines the core functionality of a PII detector.
///
/// Implementations must be immutable after construction: `detect` takes
/// `&self` and may be called concurrently from many requests.
pub trait PiiDetector: Send + Sync {
    /// Finds PII in `text`.
    ///
    /// Returned spans are half-open character offsets with
    /// `0 <= start < end <= text.chars().count()`, in discovery order.
    /// Detection never fails: malformed candidates are skipped.
    fn detect(&self, text: &str) -> Vec<PiiMatch>;

    /// Which detector family produced the matches.
    fn detector_kind(&self) -> DetectorKind;

    /// A short, human-readable name used in logs.
    fn name(&self) -> &str;
}
