// piiguard-ner/src/scoring/mod.rs

/// The kind of evidence that produced a candidate span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evidence {
    /// Term listed in the gazetteer.
    Gazetteer,
    /// Given name from the gazetteer, possibly extended with a surname.
    GivenName,
    /// Title such as `Mr.` or `Smt.` in front of capitalized words.
    Honorific,
    /// Form field label such as `Name:`.
    FieldCue,
    /// Capitalized run containing an organization keyword.
    OrgKeyword,
    /// `12/03/2024`, `2024-03-12`
    NumericDate,
    /// `12 March 2024`, `March 2024`
    MonthDate,
    /// Currency marker followed by an amount.
    Currency,
}

/// Base confidence per evidence kind.
#[derive(Debug, Clone)]
pub struct ScoringWeights {
    pub gazetteer: f64,
    pub given_name: f64,
    pub honorific: f64,
    pub field_cue: f64,
    pub org_keyword: f64,
    pub numeric_date: f64,
    pub month_date: f64,
    pub currency: f64,
    /// Added per token beyond the first.
    pub multi_token_bonus: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            gazetteer: 0.9,
            given_name: 0.6,
            honorific: 0.95,
            field_cue: 0.85,
            org_keyword: 0.7,
            numeric_date: 0.8,
            month_date: 0.85,
            currency: 0.9,
            multi_token_bonus: 0.05,
        }
    }
}

impl ScoringWeights {
    fn base(&self, evidence: Evidence) -> f64 {
        match evidence {
            Evidence::Gazetteer => self.gazetteer,
            Evidence::GivenName => self.given_name,
            Evidence::Honorific => self.honorific,
            Evidence::FieldCue => self.field_cue,
            Evidence::OrgKeyword => self.org_keyword,
            Evidence::NumericDate => self.numeric_date,
            Evidence::MonthDate => self.month_date,
            Evidence::Currency => self.currency,
        }
    }
}

/// Calculates a confidence score (0.0 - 1.0) for a candidate span.
pub fn calculate_confidence(
    evidence: Evidence,
    token_count: usize,
    weights: &ScoringWeights,
) -> f64 {
    let extra_tokens = token_count.saturating_sub(1) as f64;
    (weights.base(evidence) + extra_tokens * weights.multi_token_bonus).min(1.0)
}
