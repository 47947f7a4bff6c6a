// piiguard-core/src/report.rs
//! The JSON report handed to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pii_match::PiiMatch;
use crate::pipeline::TextAnalysis;
use crate::risk::RiskAssessment;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiiReport {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// File name or other identifier of the input.
    pub source: String,
    pub extracted_text: String,
    pub redacted_text: String,
    pub detected_pii: Vec<PiiMatch>,
    pub risk_assessment: RiskAssessment,
}

impl PiiReport {
    pub fn new(source: impl Into<String>, extracted_text: impl Into<String>, analysis: TextAnalysis) -> Self {
        Self {
            report_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            source: source.into(),
            extracted_text: extracted_text.into(),
            redacted_text: analysis.redacted_text,
            detected_pii: analysis.matches,
            risk_assessment: analysis.risk,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pii_match::{DetectorKind, PiiKind};
    use crate::risk::RiskLevel;

    #[test]
    fn test_report_shape() {
        let analysis = TextAnalysis {
            matches: vec![PiiMatch::new(PiiKind::Email, "a@b.com", 14, 21, DetectorKind::Pattern)],
            redacted_text: "Contact me at *******".to_string(),
            risk: RiskAssessment { level: RiskLevel::Low, score: 4, count: 1 },
        };
        let report = PiiReport::new("note.txt", "Contact me at a@b.com", analysis);
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["source"], "note.txt");
        assert_eq!(json["detected_pii"][0], serde_json::json!({"type": "email", "value": "a@b.com", "start": 14, "end": 21}));
        assert_eq!(json["risk_assessment"], serde_json::json!({"level": "Low", "score": 4, "count": 1}));
        assert!(json["generated_at"].as_str().unwrap().contains('T'));
        assert_eq!(json["report_id"].as_str().unwrap().len(), 36);
    }
}
