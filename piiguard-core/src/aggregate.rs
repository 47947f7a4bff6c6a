// piiguard-core/src/aggregate.rs
//! Combines detector outputs into one ordered match list.
//!
//! License: MIT OR APACHE 2.0

use std::cmp::Ordering;

use log::debug;

use crate::config::OverlapPolicy;
use crate::pii_match::{DetectorKind, PiiMatch};
use crate::risk::WeightTable;

/// Merges pattern and entity matches according to an `OverlapPolicy`.
///
/// Output order is always detector-then-discovery: every pattern match in the
/// order the matcher reported it, followed by the entity matches.
#[derive(Debug, Clone)]
pub struct MatchAggregator {
    policy: OverlapPolicy,
    weights: WeightTable,
}

impl MatchAggregator {
    pub fn new(policy: OverlapPolicy, weights: WeightTable) -> Self {
        Self { policy, weights }
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    pub fn aggregate(&self, pattern_matches: Vec<PiiMatch>, entity_matches: Vec<PiiMatch>) -> Vec<PiiMatch> {
        let mut combined = pattern_matches;
        combined.extend(entity_matches);

        match self.policy {
            OverlapPolicy::Preserve => combined,
            OverlapPolicy::PreferHigherWeight => {
                let before = combined.len();
                let resolved = self.resolve_overlaps(combined);
                debug!("Overlap resolution dropped {} of {} match(es).", before - resolved.len(), before);
                resolved
            }
        }
    }

    /// Ranks matches by weight (desc), pattern source first, start (asc),
    /// length (desc), keeps each one that does not overlap an earlier keeper,
    /// then restores the original order.
    fn resolve_overlaps(&self, matches: Vec<PiiMatch>) -> Vec<PiiMatch> {
        let mut ranked: Vec<(usize, PiiMatch)> = matches.into_iter().enumerate().collect();
        ranked.sort_by(|(_, a), (_, b)| self.rank(a, b));

        let mut kept: Vec<(usize, PiiMatch)> = Vec::with_capacity(ranked.len());
        for (idx, m) in ranked {
            if kept.iter().all(|(_, k)| !k.overlaps(&m)) {
                kept.push((idx, m));
            }
        }

        kept.sort_by_key(|(idx, _)| *idx);
        kept.into_iter().map(|(_, m)| m).collect()
    }

    fn rank(&self, a: &PiiMatch, b: &PiiMatch) -> Ordering {
        let source_rank = |m: &PiiMatch| match m.source {
            DetectorKind::Pattern => 0,
            DetectorKind::Entity => 1,
        };
        self.weights
            .weight(&b.kind)
            .cmp(&self.weights.weight(&a.kind))
            .then_with(|| source_rank(a).cmp(&source_rank(b)))
            .then_with(|| a.start.cmp(&b.start))
            .then_with(|| b.char_len().cmp(&a.char_len()))
    }
}

impl Default for MatchAggregator {
    fn default() -> Self {
        Self::new(OverlapPolicy::default(), WeightTable::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pii_match::PiiKind;

    fn pattern(kind: PiiKind, start: usize, end: usize) -> PiiMatch {
        PiiMatch::new(kind, "v", start, end, DetectorKind::Pattern)
    }

    fn entity(kind: PiiKind, start: usize, end: usize) -> PiiMatch {
        PiiMatch::new(kind, "v", start, end, DetectorKind::Entity)
    }

    #[test]
    fn test_preserve_concatenates_in_detector_order() {
        let agg = MatchAggregator::default();
        let out = agg.aggregate(
            vec![pattern(PiiKind::Email, 10, 20), pattern(PiiKind::Phone, 0, 5)],
            vec![entity(PiiKind::Organization, 12, 18)],
        );
        let kinds: Vec<PiiKind> = out.iter().map(|m| m.kind.clone()).collect();
        assert_eq!(kinds, vec![PiiKind::Email, PiiKind::Phone, PiiKind::Organization]);
    }

    #[test]
    fn test_preserve_keeps_identical_duplicates() {
        let agg = MatchAggregator::default();
        let out = agg.aggregate(vec![pattern(PiiKind::Email, 0, 5)], vec![pattern(PiiKind::Email, 0, 5)]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_prefer_higher_weight_drops_lower() {
        let agg = MatchAggregator::new(OverlapPolicy::PreferHigherWeight, WeightTable::default());
        let out = agg.aggregate(
            vec![pattern(PiiKind::Email, 10, 20)],
            vec![entity(PiiKind::Organization, 12, 30), entity(PiiKind::Name, 40, 45)],
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].kind, PiiKind::Email);
        assert_eq!(out[1].kind, PiiKind::Name);
    }

    #[test]
    fn test_prefer_higher_weight_tie_prefers_pattern() {
        let agg = MatchAggregator::new(OverlapPolicy::PreferHigherWeight, WeightTable::default());
        let out = agg.aggregate(vec![pattern(PiiKind::Name, 0, 5)], vec![entity(PiiKind::Name, 0, 5)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].source, DetectorKind::Pattern);
    }
}
