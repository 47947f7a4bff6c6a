// piiguard-core/src/pipeline.rs
//! The detection, scoring and redaction pipeline.
//!
//! A `Pipeline` is built once from a validated configuration and then shared
//! (typically behind an `Arc`) by every request. It holds only immutable
//! state: the compiled pattern registry, the loaded entity model and the
//! scoring tables.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, info};
use serde::Serialize;

use crate::aggregate::MatchAggregator;
use crate::config::{validate_config, GuardConfig};
use crate::engine::PiiDetector;
use crate::engines::{EntityRecognizer, NerBackend, PatternMatcher};
use crate::errors::PiiGuardError;
use crate::ocr::WordBox;
use crate::pii_match::PiiMatch;
use crate::redact::{ImageRedactor, TextRedactor};
use crate::risk::{RiskAssessment, RiskScorer, WeightTable};

/// Result of analyzing one text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextAnalysis {
    pub matches: Vec<PiiMatch>,
    pub redacted_text: String,
    pub risk: RiskAssessment,
}

/// Result of analyzing one image and its OCR output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAnalysis {
    pub text: TextAnalysis,
    /// Encoded in the same format as the input image.
    pub redacted_image: Vec<u8>,
}

#[derive(Debug)]
pub struct Pipeline {
    patterns: PatternMatcher,
    entities: Option<EntityRecognizer>,
    aggregator: MatchAggregator,
    scorer: RiskScorer,
    text_redactor: TextRedactor,
    image_redactor: ImageRedactor,
}

impl Pipeline {
    /// Builds the pipeline, loading the built-in entity model when entities
    /// are enabled.
    pub fn from_config(config: &GuardConfig) -> Result<Self, PiiGuardError> {
        let entities = if config.entities_enabled() {
            Some(EntityRecognizer::from_config(&config.entities)?)
        } else {
            None
        };
        Self::assemble(config, entities)
    }

    /// Builds the pipeline around a caller-supplied recognition backend.
    pub fn with_entity_backend(config: &GuardConfig, backend: Box<dyn NerBackend>) -> Result<Self, PiiGuardError> {
        Self::assemble(config, Some(EntityRecognizer::new(backend)))
    }

    /// Builds a pattern-only pipeline.
    pub fn without_entities(config: &GuardConfig) -> Result<Self, PiiGuardError> {
        Self::assemble(config, None)
    }

    fn assemble(config: &GuardConfig, entities: Option<EntityRecognizer>) -> Result<Self, PiiGuardError> {
        let patterns = PatternMatcher::from_rules(&config.patterns)?;
        validate_config(config).map_err(|e| PiiGuardError::InvalidConfig(format!("{:#}", e)))?;

        let weights = WeightTable::from_config(config);
        let pipeline = Self {
            patterns,
            entities,
            aggregator: MatchAggregator::new(config.overlap_policy(), weights.clone()),
            scorer: RiskScorer::new(weights, config.risk_thresholds()),
            text_redactor: TextRedactor::default(),
            image_redactor: ImageRedactor::new(config.blur_sigma()),
        };

        info!(
            "Pipeline ready: {} pattern(s), entity recognition {}, overlap policy {:?}.",
            pipeline.patterns.patterns().len(),
            pipeline.entities.as_ref().map_or("disabled", |e| e.name()),
            pipeline.aggregator.policy()
        );
        Ok(pipeline)
    }

    pub fn pattern_matcher(&self) -> &PatternMatcher {
        &self.patterns
    }

    pub fn entity_recognizer(&self) -> Option<&EntityRecognizer> {
        self.entities.as_ref()
    }

    pub fn scorer(&self) -> &RiskScorer {
        &self.scorer
    }

    pub fn text_redactor(&self) -> &TextRedactor {
        &self.text_redactor
    }

    pub fn image_redactor(&self) -> &ImageRedactor {
        &self.image_redactor
    }

    /// Runs both detectors and aggregates their output.
    pub fn detect(&self, text: &str) -> Vec<PiiMatch> {
        let pattern_matches = self.patterns.detect(text);
        let entity_matches = match &self.entities {
            Some(recognizer) => recognizer.detect(text),
            None => Vec::new(),
        };
        debug!(
            "Detected {} pattern and {} entity match(es).",
            pattern_matches.len(),
            entity_matches.len()
        );
        self.aggregator.aggregate(pattern_matches, entity_matches)
    }

    pub fn analyze_text(&self, text: &str) -> TextAnalysis {
        let matches = self.detect(text);
        let risk = self.scorer.score(&matches);
        let redacted_text = self.text_redactor.redact(text, &matches);
        TextAnalysis {
            matches,
            redacted_text,
            risk,
        }
    }

    /// Analyzes OCR text and blurs the matching word regions of the image.
    /// A decode or encode failure fails the whole request.
    pub fn analyze_image(
        &self,
        image_bytes: &[u8],
        text: &str,
        word_boxes: &[WordBox],
    ) -> Result<ImageAnalysis, PiiGuardError> {
        let analysis = self.analyze_text(text);
        let redacted_image = self
            .image_redactor
            .redact(image_bytes, word_boxes, &analysis.matches)?;
        Ok(ImageAnalysis {
            text: analysis,
            redacted_image,
        })
    }
}
