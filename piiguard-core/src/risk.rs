// piiguard-core/src/risk.rs
//! Risk scoring: a weighted sum over detected PII, bucketed into levels.
//!
//! License: MIT OR APACHE 2.0

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{GuardConfig, RiskThresholds};
use crate::pii_match::{PiiKind, PiiMatch};

/// Weight used for kinds missing from the table.
pub const UNKNOWN_KIND_WEIGHT: u32 = 1;

/// Built-in weights, highest for national-ID-class identifiers.
pub const DEFAULT_WEIGHTS: &[(PiiKind, u32)] = &[
    (PiiKind::NationalId, 10),
    (PiiKind::TaxId, 8),
    (PiiKind::BusinessId, 7),
    (PiiKind::Phone, 6),
    (PiiKind::Name, 5),
    (PiiKind::Email, 4),
    (PiiKind::Location, 3),
    (PiiKind::Organization, 2),
    (PiiKind::Date, 1),
];

/// Per-kind integer weights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable {
    weights: BTreeMap<PiiKind, u32>,
}

impl WeightTable {
    pub fn new(weights: BTreeMap<PiiKind, u32>) -> Self {
        Self { weights }
    }

    /// Default weights overlaid with the configured ones.
    pub fn from_config(config: &GuardConfig) -> Self {
        let mut table = Self::default();
        table.weights.extend(config.weights.iter().map(|(k, w)| (k.clone(), *w)));
        table
    }

    pub fn weight(&self, kind: &PiiKind) -> u32 {
        self.weights.get(kind).copied().unwrap_or(UNKNOWN_KIND_WEIGHT)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PiiKind, u32)> {
        self.weights.iter().map(|(k, w)| (k, *w))
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::new(DEFAULT_WEIGHTS.iter().cloned().collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate risk for one input. `count` includes duplicate matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub score: u32,
    pub count: usize,
}

impl RiskAssessment {
    /// The assessment for an input with no matches.
    pub fn none() -> Self {
        Self { level: RiskLevel::Low, score: 0, count: 0 }
    }
}

#[derive(Debug, Clone)]
pub struct RiskScorer {
    weights: WeightTable,
    thresholds: RiskThresholds,
}

impl RiskScorer {
    pub fn new(weights: WeightTable, thresholds: RiskThresholds) -> Self {
        Self { weights, thresholds }
    }

    pub fn from_config(config: &GuardConfig) -> Self {
        Self::new(WeightTable::from_config(config), config.risk_thresholds())
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn level_for(&self, score: u32) -> RiskLevel {
        if score >= self.thresholds.high {
            RiskLevel::High
        } else if score >= self.thresholds.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Pure and order-independent.
    pub fn score(&self, matches: &[PiiMatch]) -> RiskAssessment {
        let score = matches
            .iter()
            .fold(0u32, |acc, m| acc.saturating_add(self.weights.weight(&m.kind)));

        RiskAssessment {
            level: self.level_for(score),
            score,
            count: matches.len(),
        }
    }
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new(WeightTable::default(), RiskThresholds::default())
    }
}
