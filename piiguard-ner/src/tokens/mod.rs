// piiguard-ner/src/tokens/mod.rs
//! Word tokenization with byte offsets.
//!
//! A token is a maximal run of alphanumeric characters. Everything between
//! two tokens is a "gap", which the taggers inspect to decide whether
//! neighbouring tokens belong to the same entity.

use alloc::vec::Vec;
use core::str::CharIndices;

/// Orthographic shape of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `Mumbai`, `McDonald`
    Capitalized,
    /// `UIDAI`, `PAN`
    Upper,
    /// `works`
    Lower,
    /// `2024`
    Numeric,
    /// `12th`, `a1b2`
    Mixed,
}

/// A single word token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

impl<'a> Token<'a> {
    pub fn shape(&self) -> Shape {
        let mut chars = self.text.chars();
        let Some(first) = chars.next() else { return Shape::Mixed; };

        if self.text.chars().all(|c| c.is_numeric()) {
            return Shape::Numeric;
        }
        if self.text.chars().any(|c| c.is_numeric()) {
            return Shape::Mixed;
        }
        if first.is_uppercase() {
            if self.text.chars().count() > 1 && self.text.chars().all(|c| c.is_uppercase()) {
                Shape::Upper
            } else {
                Shape::Capitalized
            }
        } else if self.text.chars().all(|c| c.is_lowercase()) {
            Shape::Lower
        } else {
            Shape::Mixed
        }
    }

    /// True for `Capitalized` and `Upper` shapes.
    pub fn is_title_like(&self) -> bool {
        matches!(self.shape(), Shape::Capitalized | Shape::Upper)
    }

    pub fn is_numeric(&self) -> bool {
        self.shape() == Shape::Numeric
    }
}

/// Iterator over the tokens of a string.
pub struct Tokenizer<'a> {
    input: &'a str,
    chars: CharIndices<'a>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices(),
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = loop {
            let (idx, c) = self.chars.next()?;
            if c.is_alphanumeric() {
                break idx;
            }
        };

        let mut end = self.input.len();
        for (idx, c) in self.chars.by_ref() {
            if !c.is_alphanumeric() {
                end = idx;
                break;
            }
        }

        Some(Token {
            text: &self.input[start..end],
            start,
            end,
        })
    }
}

/// Collects all tokens of `input`.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Tokenizer::new(input).collect()
}

/// The text between two tokens.
pub fn gap<'a>(input: &'a str, prev: &Token<'_>, next: &Token<'_>) -> &'a str {
    if next.start <= prev.end {
        return "";
    }
    &input[prev.end..next.start]
}

/// A gap that keeps two words inside one name: horizontal whitespace only.
pub fn is_inline_space(gap: &str) -> bool {
    !gap.is_empty() && gap.chars().all(|c| c == ' ' || c == '\t')
}
