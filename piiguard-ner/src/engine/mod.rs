//! The entity tagger.
//!
//! Runs the gazetteer and every heuristic finder over one token stream,
//! scores the candidates, drops those under the confidence threshold and
//! resolves overlaps so that the output, like a statistical NER model's,
//! never contains two spans covering the same byte.

extern crate alloc;
use alloc::vec::Vec;

use crate::dates::{find_month_dates, find_numeric_dates};
use crate::gazetteer::{Gazetteer, GazetteerError};
use crate::heuristics::{
    extend_given_name, find_field_names, find_honorific_names, find_money, find_organizations,
};
use crate::scoring::{calculate_confidence, Evidence, ScoringWeights};
use crate::tokens::tokenize;
use crate::{Confidence, EntityLabel};

/// An unscored span proposed by one of the finders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub start: usize,
    pub end: usize,
    pub label: EntityLabel,
    pub evidence: Evidence,
    pub token_count: usize,
}

impl Candidate {
    pub fn new(start: usize, end: usize, label: EntityLabel, evidence: Evidence, token_count: usize) -> Self {
        Self { start, end, label, evidence, token_count }
    }
}

/// A tagged entity. `start`/`end` are byte offsets into the tagged text.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySpan {
    pub start: usize,
    pub end: usize,
    pub label: EntityLabel,
    pub confidence: Confidence,
}

/// Combines the gazetteer with the heuristic finders.
#[derive(Debug)]
pub struct EntityTagger {
    gazetteer: Gazetteer,
    scoring_weights: ScoringWeights,
    min_confidence: f64,
}

impl EntityTagger {
    /// Builds a tagger over the built-in gazetteer.
    pub fn new(min_confidence: f64) -> Result<Self, GazetteerError> {
        Ok(Self::with_gazetteer(Gazetteer::builtin()?, min_confidence))
    }

    pub fn with_gazetteer(gazetteer: Gazetteer, min_confidence: f64) -> Self {
        Self {
            gazetteer,
            scoring_weights: ScoringWeights::default(),
            min_confidence,
        }
    }

    /// Tags `text`, returning non-overlapping spans in ascending start order.
    pub fn tag(&self, text: &str) -> Vec<EntitySpan> {
        if text.is_empty() {
            return Vec::new();
        }

        let tokens = tokenize(text);
        let mut candidates: Vec<Candidate> = Vec::new();

        for hit in self.gazetteer.find(text) {
            if hit.label == EntityLabel::Person {
                if let Some(c) = extend_given_name(text, &tokens, hit.start, hit.end) {
                    candidates.push(c);
                }
            } else {
                candidates.push(Candidate::new(hit.start, hit.end, hit.label, Evidence::Gazetteer, 1));
            }
        }

        candidates.extend(find_honorific_names(text, &tokens));
        candidates.extend(find_field_names(text, &tokens));
        candidates.extend(find_organizations(text, &tokens));
        candidates.extend(find_numeric_dates(text, &tokens));
        candidates.extend(find_month_dates(text, &tokens));
        candidates.extend(find_money(text, &tokens));

        let mut scored: Vec<EntitySpan> = candidates
            .into_iter()
            .filter(|c| c.end > c.start)
            .map(|c| EntitySpan {
                start: c.start,
                end: c.end,
                label: c.label,
                confidence: calculate_confidence(c.evidence, c.token_count, &self.scoring_weights),
            })
            .filter(|s| s.confidence >= self.min_confidence)
            .collect();

        resolve_overlaps(&mut scored)
    }
}

/// Drops spans strictly inside a same-label span, then keeps the most
/// confident span of every overlapping group, then the longest, then the
/// earliest.
fn resolve_overlaps(spans: &mut Vec<EntitySpan>) -> Vec<EntitySpan> {
    let snapshot = spans.clone();
    spans.retain(|s| {
        !snapshot.iter().any(|o| {
            o.label == s.label
                && o.start <= s.start
                && s.end <= o.end
                && (o.end - o.start) > (s.end - s.start)
        })
    });

    spans.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(core::cmp::Ordering::Equal)
            .then_with(|| (b.end - b.start).cmp(&(a.end - a.start)))
            .then_with(|| a.start.cmp(&b.start))
    });

    let mut kept: Vec<EntitySpan> = Vec::with_capacity(spans.len());
    for span in spans.drain(..) {
        if kept.iter().all(|k| span.end <= k.start || span.start >= k.end) {
            kept.push(span);
        }
    }
    kept.sort_by_key(|s| s.start);
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn tagged<'a>(text: &'a str, tagger: &EntityTagger) -> Vec<(&'a str, EntityLabel)> {
        tagger.tag(text).iter().map(|s| (&text[s.start..s.end], s.label)).collect()
    }

    #[test]
    fn test_tags_mixed_document() {
        let tagger = EntityTagger::new(0.5).unwrap();
        let text = "Mr. Rahul Sharma of Pune joined Infosys Technologies Ltd on 12 March 2021.";
        assert_eq!(
            tagged(text, &tagger),
            vec![
                ("Rahul Sharma", EntityLabel::Person),
                ("Pune", EntityLabel::Gpe),
                ("Infosys Technologies Ltd", EntityLabel::Org),
                ("12 March 2021", EntityLabel::Date),
            ]
        );
    }

    #[test]
    fn test_overlaps_resolved_by_confidence() {
        let tagger = EntityTagger::new(0.5).unwrap();
        // The full name outranks the "India" GPE inside it.
        let text = "Account at State Bank of India";
        assert_eq!(tagged(text, &tagger), vec![("State Bank of India", EntityLabel::Org)]);
    }

    #[test]
    fn test_threshold_filters_weak_evidence() {
        let tagger = EntityTagger::new(0.99).unwrap();
        assert!(tagger.tag("Ravi lives in Pune").is_empty());
    }

    #[test]
    fn test_empty_text() {
        let tagger = EntityTagger::new(0.5).unwrap();
        assert!(tagger.tag("").is_empty());
    }
}
