// piiguard-ner/src/lib.rs
//! A small, deterministic named-entity tagger.
//!
//! Spans are reported as byte ranges into the input together with a
//! spaCy-style label (`PERSON`, `GPE`, `LOC`, `ORG`, `DATE`, `MONEY`).
//! Mapping labels onto a PII taxonomy is left to the caller.
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod tokens;
pub mod gazetteer;
pub mod dates;
pub mod heuristics;
pub mod scoring;
pub mod engine;

use core::fmt;

/// Confidence attached to a tagged span, in `0.0..=1.0`.
pub type Confidence = f64;

/// Entity categories emitted by the tagger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityLabel {
    Person,
    /// Geo-political entity: countries, states, cities.
    Gpe,
    /// Non-GPE locations: rivers, mountain ranges, seas.
    Loc,
    Org,
    Date,
    Money,
}

impl EntityLabel {
    /// The canonical upper-case label name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityLabel::Person => "PERSON",
            EntityLabel::Gpe => "GPE",
            EntityLabel::Loc => "LOC",
            EntityLabel::Org => "ORG",
            EntityLabel::Date => "DATE",
            EntityLabel::Money => "MONEY",
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub use engine::{EntitySpan, EntityTagger};
pub use gazetteer::{Gazetteer, GazetteerError};
