// piiguard-core/src/redact/text.rs
//! Masks PII spans in text with a same-length run of a mask character.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, warn};

use crate::errors::PiiGuardError;
use crate::pii_match::{redact_sensitive, PiiMatch};

pub const DEFAULT_MASK_CHAR: char = '*';

#[derive(Debug, Clone, Copy)]
pub struct TextRedactor {
    mask: char,
}

impl TextRedactor {
    pub fn new(mask: char) -> Self {
        Self { mask }
    }

    /// Checks `0 <= start < end <= len` for a text of `len` characters.
    pub fn check_span(m: &PiiMatch, len: usize) -> Result<(), PiiGuardError> {
        if m.start >= m.end || m.end > len {
            return Err(PiiGuardError::InvalidSpan { start: m.start, end: m.end, len });
        }
        Ok(())
    }

    /// Returns `text` with every valid match span masked.
    ///
    /// Spans are applied in descending start order and every mask has the
    /// span's length, so overlapping or duplicate matches cannot shift later
    /// offsets. Invalid spans are logged and skipped. The result has exactly
    /// as many characters as `text`.
    pub fn redact(&self, text: &str, matches: &[PiiMatch]) -> String {
        if matches.is_empty() {
            return text.to_string();
        }

        let mut chars: Vec<char> = text.chars().collect();
        let len = chars.len();

        let mut ordered: Vec<&PiiMatch> = matches.iter().collect();
        ordered.sort_by(|a, b| b.start.cmp(&a.start));

        let mut masked = 0usize;
        for m in ordered {
            if let Err(e) = Self::check_span(m, len) {
                warn!("Skipping {} match {}: {}", m.kind, redact_sensitive(&m.value), e);
                continue;
            }
            chars[m.start..m.end].fill(self.mask);
            masked += 1;
        }

        debug!("Masked {} of {} span(s).", masked, matches.len());
        chars.into_iter().collect()
    }
}

impl Default for TextRedactor {
    fn default() -> Self {
        Self::new(DEFAULT_MASK_CHAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pii_match::{DetectorKind, PiiKind};

    fn m(start: usize, end: usize) -> PiiMatch {
        PiiMatch::new(PiiKind::Email, "v", start, end, DetectorKind::Pattern)
    }

    #[test]
    fn test_masks_span() {
        let out = TextRedactor::default().redact("Contact me at a@b.com", &[m(14, 21)]);
        assert_eq!(out, "Contact me at *******");
    }

    #[test]
    fn test_overlapping_and_duplicate_spans() {
        let text = "abcdefghij";
        let out = TextRedactor::default().redact(text, &[m(2, 6), m(4, 8), m(2, 6)]);
        assert_eq!(out, "ab******ij");
    }

    #[test]
    fn test_invalid_spans_skipped() {
        let text = "hello world";
        let out = TextRedactor::default().redact(text, &[m(5, 5), m(8, 3), m(6, 40), m(0, 5)]);
        assert_eq!(out, "***** world");
    }

    #[test]
    fn test_multibyte_length_preserved() {
        let text = "नाम राहुल";
        let out = TextRedactor::default().redact(text, &[m(4, 9)]);
        assert_eq!(out.chars().count(), text.chars().count());
        assert!(out.ends_with("*****"));
    }

    #[test]
    fn test_check_span_error() {
        let err = TextRedactor::check_span(&m(3, 10), 5).unwrap_err();
        assert!(matches!(err, PiiGuardError::InvalidSpan { start: 3, end: 10, len: 5 }));
    }
}
