// piiguard-core/src/engines/pattern_engine.rs
//! A `PiiDetector` that scans text with the compiled pattern registry.
//! License: MIT OR APACHE 2.0

use log::debug;

use crate::config::PatternRule;
use crate::engine::PiiDetector;
use crate::errors::PiiGuardError;
use crate::offsets::CharOffsetMapper;
use crate::patterns::compiler::{compile_patterns, CompiledPattern, CompiledPatterns};
use crate::pii_match::{log_detection_debug, log_skipped_match_debug, DetectorKind, PiiMatch};
use crate::validators;

/// Structured-PII detector backed by regular expressions.
///
/// Patterns are applied in registry order; within one pattern, hits follow
/// the regex engine's leftmost, non-overlapping semantics. The input is
/// matched as-is, with no normalization.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    patterns: CompiledPatterns,
}

impl PatternMatcher {
    pub fn new(patterns: CompiledPatterns) -> Self {
        Self { patterns }
    }

    /// Compiles `rules` and builds a matcher. Any invalid pattern is an error.
    pub fn from_rules(rules: &[PatternRule]) -> Result<Self, PiiGuardError> {
        Ok(Self::new(compile_patterns(rules)?))
    }

    pub fn patterns(&self) -> &CompiledPatterns {
        &self.patterns
    }

    fn passes_validation(&self, pattern: &CompiledPattern, candidate: &str) -> bool {
        if !pattern.programmatic_validation {
            return true;
        }
        validators::validate_for_kind(&pattern.kind, candidate)
    }
}

impl PiiDetector for PatternMatcher {
    fn detect(&self, text: &str) -> Vec<PiiMatch> {
        if text.is_empty() || self.patterns.is_empty() {
            return Vec::new();
        }

        let mapper = CharOffsetMapper::new(text);
        let mut matches = Vec::new();

        for pattern in self.patterns.iter() {
            for hit in pattern.regex.find_iter(text) {
                if hit.start() == hit.end() {
                    continue;
                }
                if !self.passes_validation(pattern, hit.as_str()) {
                    log_skipped_match_debug(module_path!(), &pattern.name, hit.as_str(), "failed programmatic validation");
                    continue;
                }

                let (start, end) = mapper.char_range(hit.start(), hit.end());
                let m = PiiMatch::new(pattern.kind.clone(), hit.as_str(), start, end, DetectorKind::Pattern);
                log_detection_debug(module_path!(), &m);
                matches.push(m);
            }
        }

        debug!("PatternMatcher found {} match(es) across {} pattern(s).", matches.len(), self.patterns.len());
        matches
    }

    fn detector_kind(&self) -> DetectorKind {
        DetectorKind::Pattern
    }

    fn name(&self) -> &str {
        "pattern"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GuardConfig;
    use crate::pii_match::PiiKind;

    fn default_matcher() -> PatternMatcher {
        let config = GuardConfig::load_default().unwrap();
        PatternMatcher::from_rules(&config.patterns).unwrap()
    }

    #[test]
    fn test_email_scenario() {
        let text = "Contact me at a@b.com";
        let matches = default_matcher().detect(text);
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.kind, PiiKind::Email);
        assert_eq!(m.value, "a@b.com");
        assert_eq!((m.start, m.end), (14, 21));
        assert_eq!(m.source, DetectorKind::Pattern);
    }

    #[test]
    fn test_registry_order_then_discovery_order() {
        let text = "mail x@y.org or z@w.in, Aadhaar 2345 6789 0123";
        let matches = default_matcher().detect(text);
        let kinds: Vec<&PiiKind> = matches.iter().map(|m| &m.kind).collect();
        assert_eq!(kinds, vec![&PiiKind::NationalId, &PiiKind::Email, &PiiKind::Email]);
        assert!(matches[1].start < matches[2].start);
    }

    #[test]
    fn test_offsets_are_characters() {
        let text = "नाम: ABCPE1234F";
        let matches = default_matcher().detect(text);
        assert_eq!(matches.len(), 1);
        let chars: Vec<char> = text.chars().collect();
        let m = &matches[0];
        let slice: String = chars[m.start..m.end].iter().collect();
        assert_eq!(slice, m.value);
    }

    #[test]
    fn test_validation_filters_candidates() {
        let rules = vec![PatternRule {
            name: "pan".to_string(),
            pattern: Some("[A-Z]{5}[0-9]{4}[A-Z]".to_string()),
            programmatic_validation: true,
            ..Default::default()
        }];
        let matcher = PatternMatcher::from_rules(&rules).unwrap();
        let matches = matcher.detect("ABCDE1234F and ABCPE1234F");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].value, "ABCPE1234F");
    }

    #[test]
    fn test_empty_text() {
        assert!(default_matcher().detect("").is_empty());
    }
}
