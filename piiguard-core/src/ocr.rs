// piiguard-core/src/ocr.rs
//! OCR word-location data consumed by the image redactor.
//!
//! Word boxes arrive either as a JSON array of `WordBox` objects or as raw
//! Tesseract TSV (`tesseract <img> - tsv`, or `image_to_data`).
//!
//! License: MIT OR APACHE 2.0

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

/// Number of columns in a Tesseract TSV row.
const TSV_COLUMNS: usize = 12;

/// One OCR-recognized token and its pixel rectangle.
///
/// `confidence` uses the OCR engine's scale; values `<= 0` mark the box as
/// unreliable and exclude it from spatial redaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordBox {
    pub text: String,
    #[serde(alias = "left")]
    pub x: i32,
    #[serde(alias = "top")]
    pub y: i32,
    pub width: i32,
    pub height: i32,
    #[serde(alias = "conf")]
    pub confidence: f32,
}

impl WordBox {
    pub fn new(text: impl Into<String>, x: i32, y: i32, width: i32, height: i32, confidence: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width,
            height,
            confidence,
        }
    }

    pub fn is_reliable(&self) -> bool {
        self.confidence > 0.0
    }
}

/// Parses Tesseract TSV into word boxes.
///
/// Columns: `level page_num block_num par_num line_num word_num left top
/// width height conf text`. The header row, short rows and rows with empty
/// text are skipped. A confidence that does not parse becomes `-1`.
pub fn parse_tesseract_tsv(tsv: &str) -> Vec<WordBox> {
    let mut boxes = Vec::new();

    for line in tsv.lines() {
        let cols: Vec<&str> = line.split('\t').collect();
        if cols.len() < TSV_COLUMNS || cols[0] == "level" {
            continue;
        }

        let text = cols[11].trim();
        if text.is_empty() {
            continue;
        }

        let int = |s: &str| s.trim().parse::<i32>().unwrap_or(0);
        boxes.push(WordBox {
            text: text.to_string(),
            x: int(cols[6]),
            y: int(cols[7]),
            width: int(cols[8]),
            height: int(cols[9]),
            confidence: cols[10].trim().parse().unwrap_or(-1.0),
        });
    }

    debug!("Parsed {} word box(es) from TSV.", boxes.len());
    boxes
}

/// Parses word boxes from JSON (an array) or Tesseract TSV, by content.
pub fn parse_word_boxes(content: &str) -> Result<Vec<WordBox>> {
    if content.trim_start().starts_with('[') {
        serde_json::from_str(content).context("Failed to parse word boxes as JSON")
    } else {
        Ok(parse_tesseract_tsv(content))
    }
}

/// Reads and parses a word-box file.
pub fn load_word_boxes<P: AsRef<Path>>(path: P) -> Result<Vec<WordBox>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read word boxes from {}", path.display()))?;
    parse_word_boxes(&content).with_context(|| format!("Invalid word box file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TSV: &str = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext\n\
1\t1\t0\t0\t0\t0\t0\t0\t640\t480\t-1\t\n\
5\t1\t1\t1\t1\t1\t36\t92\t60\t18\t96.5\tContact\n\
5\t1\t1\t1\t1\t2\t100\t92\t20\t18\tn/a\tme\n\
5\t1\t1\t1\t1\t3\t124\t92\t80\t18\t91\ta@b.com\n";

    #[test]
    fn test_parse_tsv() {
        let boxes = parse_tesseract_tsv(TSV);
        assert_eq!(boxes.len(), 3);
        assert_eq!(boxes[0], WordBox::new("Contact", 36, 92, 60, 18, 96.5));
        assert_eq!(boxes[1].confidence, -1.0);
        assert!(!boxes[1].is_reliable());
        assert_eq!(boxes[2].text, "a@b.com");
    }

    #[test]
    fn test_parse_json_with_aliases() {
        let json = r#"[{"text":"a@b.com","left":1,"top":2,"width":3,"height":4,"conf":50}]"#;
        let boxes = parse_word_boxes(json).unwrap();
        assert_eq!(boxes, vec![WordBox::new("a@b.com", 1, 2, 3, 4, 50.0)]);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(parse_word_boxes("[{\"text\": 1}]").is_err());
    }
}
