// piiguard-core/src/pii_match.rs
//! Provides core data structures for detected PII and utility functions for
//! logging matches without leaking the matched values.

use serde::{Serialize, Deserialize};
use log::debug;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use sha2::{Sha256, Digest};
use hex;

lazy_static! {
    /// A static boolean that is initialized once to determine if PII is allowed in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("PIIGUARD_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// The PII taxonomy. Structured kinds come from pattern rules, free-form
/// kinds from entity recognition. Any other name is carried as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PiiKind {
    NationalId,
    TaxId,
    Phone,
    Email,
    BusinessId,
    Name,
    Location,
    Organization,
    Date,
    Other(String),
}

impl PiiKind {
    pub fn as_str(&self) -> &str {
        match self {
            PiiKind::NationalId => "national_id",
            PiiKind::TaxId => "tax_id",
            PiiKind::Phone => "phone",
            PiiKind::Email => "email",
            PiiKind::BusinessId => "business_id",
            PiiKind::Name => "name",
            PiiKind::Location => "location",
            PiiKind::Organization => "organization",
            PiiKind::Date => "date",
            PiiKind::Other(name) => name.as_str(),
        }
    }
}

impl fmt::Display for PiiKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PiiKind {
    type Err = std::convert::Infallible;

    /// Accepts canonical names (`national_id`), hyphenated or spaced forms
    /// (`national-id`) and the document names used for Indian identifiers
    /// (`aadhaar`, `pan`, `gst`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Ok(match normalized.as_str() {
            "national_id" | "aadhaar" => PiiKind::NationalId,
            "tax_id" | "pan" => PiiKind::TaxId,
            "phone" => PiiKind::Phone,
            "email" => PiiKind::Email,
            "business_id" | "gst" | "gstin" => PiiKind::BusinessId,
            "name" | "person" => PiiKind::Name,
            "location" => PiiKind::Location,
            "organization" | "organisation" => PiiKind::Organization,
            "date" => PiiKind::Date,
            _ => PiiKind::Other(s.trim().to_string()),
        })
    }
}

impl From<String> for PiiKind {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for PiiKind {
    fn from(s: &str) -> Self {
        PiiKind::from(s.to_string())
    }
}

impl From<PiiKind> for String {
    fn from(kind: PiiKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Which detector produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorKind {
    #[default]
    Pattern,
    Entity,
}

/// One detected piece of PII.
///
/// `start`/`end` are half-open **character** offsets into the source text.
/// The detector is dropped when the match is serialized for callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiiMatch {
    #[serde(rename = "type")]
    pub kind: PiiKind,
    pub value: String,
    pub start: usize,
    pub end: usize,
    #[serde(skip_serializing, default)]
    pub source: DetectorKind,
}

impl PiiMatch {
    pub fn new(kind: PiiKind, value: impl Into<String>, start: usize, end: usize, source: DetectorKind) -> Self {
        Self {
            kind,
            value: value.into(),
            start,
            end,
            source,
        }
    }

    /// Number of characters covered by the span.
    pub fn char_len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn overlaps(&self, other: &PiiMatch) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn sample_hash(&self) -> String {
        canonical_sample_hash(self.kind.as_str(), &self.value)
    }
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.chars().count())
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

pub fn log_detection_debug(module_path: &str, m: &PiiMatch) {
    debug!(
        "{} Detected {} via {:?} at [{}, {}): '{}' (hash {})",
        module_path,
        m.kind,
        m.source,
        m.start,
        m.end,
        get_loggable_content(&m.value),
        &m.sample_hash()[..12]
    );
}

pub fn log_skipped_match_debug(module_path: &str, rule_name: &str, original_sensitive_content: &str, reason: &str) {
    debug!(
        "{} Skipped candidate for rule '{}': '{}' ({})",
        module_path,
        rule_name,
        get_loggable_content(original_sensitive_content),
        reason
    );
}

pub fn canonical_sample_hash(rule_id: &str, snippet: &str) -> String {
    let normalized = snippet
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let mut hasher = Sha256::new();
    hasher.update(rule_id.as_bytes());
    hasher.update(b":");
    hasher.update(normalized.as_bytes());
    hex::encode(hasher.finalize())
}
