// piiguard-core/src/engines/entity_engine.rs
//! A `PiiDetector` that maps named-entity spans onto the PII taxonomy.
//!
//! The recognition capability itself sits behind the `NerBackend` trait so the
//! built-in gazetteer tagger from `piiguard-ner` can be swapped for another
//! model, or for a fake in tests. Exactly one backend is loaded per process.
//! License: MIT OR APACHE 2.0

use std::fmt;

use log::{debug, info};

use piiguard_ner::{EntityLabel, EntityTagger, Gazetteer};

use crate::config::{EntityConfig, GazetteerTerms, DEFAULT_MIN_CONFIDENCE};
use crate::engine::PiiDetector;
use crate::errors::PiiGuardError;
use crate::offsets::CharOffsetMapper;
use crate::pii_match::{log_detection_debug, log_skipped_match_debug, DetectorKind, PiiKind, PiiMatch};

/// A span reported by a recognition backend, in **byte** offsets, carrying the
/// backend's native label (`PERSON`, `GPE`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedEntity {
    pub start: usize,
    pub end: usize,
    pub label: String,
}

impl RecognizedEntity {
    pub fn new(start: usize, end: usize, label: impl Into<String>) -> Self {
        Self { start, end, label: label.into() }
    }
}

/// Named-entity recognition over text.
pub trait NerBackend: Send + Sync + fmt::Debug {
    /// Returns typed byte spans over `text`.
    fn recognize(&self, text: &str) -> Vec<RecognizedEntity>;

    /// A short backend identifier for logs.
    fn backend_name(&self) -> &str;
}

/// Maps a native entity label onto a PII kind. Unmapped labels yield `None`.
pub fn map_entity_label(label: &str) -> Option<PiiKind> {
    match label {
        "PERSON" => Some(PiiKind::Name),
        "GPE" | "LOC" => Some(PiiKind::Location),
        "ORG" => Some(PiiKind::Organization),
        "DATE" => Some(PiiKind::Date),
        _ => None,
    }
}

/// The built-in backend: gazetteer automaton plus heuristic taggers.
#[derive(Debug)]
pub struct GazetteerBackend {
    tagger: EntityTagger,
}

impl GazetteerBackend {
    /// Builds the automata. Failure means the model is unavailable.
    pub fn load(min_confidence: f64, extra_terms: &GazetteerTerms) -> Result<Self, PiiGuardError> {
        let extra = extra_terms
            .person
            .iter()
            .map(|t| (t.as_str(), EntityLabel::Person))
            .chain(extra_terms.location.iter().map(|t| (t.as_str(), EntityLabel::Gpe)))
            .chain(extra_terms.organization.iter().map(|t| (t.as_str(), EntityLabel::Org)));

        let gazetteer = Gazetteer::with_extra_terms(extra)
            .map_err(|e| PiiGuardError::ModelUnavailable(format!("gazetteer build failed: {}", e)))?;

        info!(
            "Loaded built-in entity model: {} gazetteer terms, min confidence {:.2}.",
            gazetteer.len(),
            min_confidence
        );

        Ok(Self {
            tagger: EntityTagger::with_gazetteer(gazetteer, min_confidence),
        })
    }
}

impl NerBackend for GazetteerBackend {
    fn recognize(&self, text: &str) -> Vec<RecognizedEntity> {
        self.tagger
            .tag(text)
            .into_iter()
            .map(|span| RecognizedEntity::new(span.start, span.end, span.label.as_str()))
            .collect()
    }

    fn backend_name(&self) -> &str {
        "gazetteer"
    }
}

/// Free-form PII detector wrapping one `NerBackend`.
#[derive(Debug)]
pub struct EntityRecognizer {
    backend: Box<dyn NerBackend>,
}

impl EntityRecognizer {
    pub fn new(backend: Box<dyn NerBackend>) -> Self {
        debug!("EntityRecognizer using backend '{}'.", backend.backend_name());
        Self { backend }
    }

    /// Loads the built-in backend from the `entities` config section.
    pub fn from_config(config: &EntityConfig) -> Result<Self, PiiGuardError> {
        let min_confidence = config.min_confidence.unwrap_or(DEFAULT_MIN_CONFIDENCE);
        let backend = GazetteerBackend::load(min_confidence, &config.gazetteer)?;
        Ok(Self::new(Box::new(backend)))
    }
}

impl PiiDetector for EntityRecognizer {
    fn detect(&self, text: &str) -> Vec<PiiMatch> {
        if text.is_empty() {
            return Vec::new();
        }

        let mapper = CharOffsetMapper::new(text);
        let mut matches = Vec::new();

        for entity in self.backend.recognize(text) {
            let Some(kind) = map_entity_label(&entity.label) else {
                continue;
            };
            let Some(value) = text.get(entity.start..entity.end).filter(|v| !v.is_empty()) else {
                log_skipped_match_debug(
                    module_path!(),
                    &entity.label,
                    "",
                    &format!("backend span [{}, {}) is not a valid range", entity.start, entity.end),
                );
                continue;
            };

            let (start, end) = mapper.char_range(entity.start, entity.end);
            let m = PiiMatch::new(kind, value, start, end, DetectorKind::Entity);
            log_detection_debug(module_path!(), &m);
            matches.push(m);
        }

        debug!("EntityRecognizer found {} match(es).", matches.len());
        matches
    }

    fn detector_kind(&self) -> DetectorKind {
        DetectorKind::Entity
    }

    fn name(&self) -> &str {
        self.backend.backend_name()
    }
}
