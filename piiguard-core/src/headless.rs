// piiguard-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for one-shot use of the pipeline (non-interactive).
//!
//! Each call builds a fresh `Pipeline`, which compiles the pattern registry
//! and loads the entity model. Long-running hosts should build one
//! `Pipeline` and share it instead.

use anyhow::{Context, Result};

use crate::config::GuardConfig;
use crate::ocr::WordBox;
use crate::pipeline::{ImageAnalysis, Pipeline, TextAnalysis};

/// Selects which detectors a headless run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadlessDetectors {
    /// Pattern rules and entity recognition.
    All,
    /// Pattern rules only.
    PatternsOnly,
}

fn build_pipeline(config: &GuardConfig, detectors: HeadlessDetectors) -> Result<Pipeline> {
    let pipeline = match detectors {
        HeadlessDetectors::All => Pipeline::from_config(config),
        HeadlessDetectors::PatternsOnly => Pipeline::without_entities(config),
    };
    pipeline.context("Failed to build PII pipeline")
}

/// Detects, scores and redacts `text` in a single call.
pub fn headless_analyze_text(config: &GuardConfig, text: &str, detectors: HeadlessDetectors) -> Result<TextAnalysis> {
    Ok(build_pipeline(config, detectors)?.analyze_text(text))
}

/// Returns only the redacted form of `text`.
pub fn headless_redact_text(config: &GuardConfig, text: &str, detectors: HeadlessDetectors) -> Result<String> {
    Ok(headless_analyze_text(config, text, detectors)?.redacted_text)
}

/// Analyzes OCR text and blurs PII regions of the image in a single call.
pub fn headless_analyze_image(
    config: &GuardConfig,
    image_bytes: &[u8],
    text: &str,
    word_boxes: &[WordBox],
    detectors: HeadlessDetectors,
) -> Result<ImageAnalysis> {
    let pipeline = build_pipeline(config, detectors)?;
    pipeline
        .analyze_image(image_bytes, text, word_boxes)
        .context("Image redaction failed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PatternRule;
    use anyhow::Result;

    #[test]
    fn test_headless_redact_text_patterns_only() -> Result<()> {
        let config = GuardConfig {
            patterns: vec![PatternRule {
                name: "email".to_string(),
                pattern: Some(r"[a-z]+@[a-z]+\.[a-z]{2,}".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let out = headless_redact_text(&config, "mail ravi@site.in now", HeadlessDetectors::PatternsOnly)?;
        assert_eq!(out, "mail ************ now");
        Ok(())
    }

    #[test]
    fn test_headless_analyze_image_blurs_marked_box() -> Result<()> {
        use ::image::{DynamicImage, ImageFormat, Rgb, RgbImage};
        use std::io::Cursor;

        let img = RgbImage::from_fn(32, 16, |x, _| if x % 2 == 0 { Rgb([255, 255, 255]) } else { Rgb([0, 0, 0]) });
        let mut png = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img).write_to(&mut png, ImageFormat::Png)?;
        let boxes = vec![
            WordBox::new("mail", 0, 0, 16, 16, 93.0),
            WordBox::new("ravi@site.in", 16, 0, 16, 16, 88.0),
        ];

        let config = GuardConfig::load_default()?;
        let analysis = headless_analyze_image(
            &config,
            png.get_ref(),
            "mail ravi@site.in",
            &boxes,
            HeadlessDetectors::PatternsOnly,
        )?;

        assert_eq!(analysis.text.redacted_text, "mail ************");
        let out = ::image::load_from_memory(&analysis.redacted_image)?.to_rgb8();
        assert_eq!(out.get_pixel(2, 8).0, [255, 255, 255]);
        let blurred = out.get_pixel(24, 8).0[0];
        assert!(blurred > 40 && blurred < 215);
        Ok(())
    }

    #[test]
    fn test_headless_analyze_image_rejects_garbage() -> Result<()> {
        let config = GuardConfig::load_default()?;
        let boxes = vec![WordBox::new("ravi@site.in", 0, 0, 4, 4, 90.0)];
        let err = headless_analyze_image(
            &config,
            b"no pixels here",
            "ravi@site.in",
            &boxes,
            HeadlessDetectors::PatternsOnly,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Image redaction failed"));
        Ok(())
    }

    #[test]
    fn test_headless_rejects_bad_pattern() {
        let config = GuardConfig {
            patterns: vec![PatternRule {
                name: "broken".to_string(),
                pattern: Some("(".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(headless_analyze_text(&config, "x", HeadlessDetectors::PatternsOnly).is_err());
    }
}
