// piiguard-core/src/offsets.rs
//! Conversion from byte offsets (what `regex` and the tagger report) to
//! character offsets (what `PiiMatch` carries).

/// Maps byte indices of a string to character indices.
#[derive(Debug)]
pub struct CharOffsetMapper {
    /// Byte offset of every char start, plus `text.len()` as the final entry.
    byte_starts: Vec<usize>,
}

impl CharOffsetMapper {
    pub fn new(text: &str) -> Self {
        let mut byte_starts: Vec<usize> = Vec::with_capacity(text.len() + 1);
        byte_starts.extend(text.char_indices().map(|(idx, _)| idx));
        byte_starts.push(text.len());
        Self { byte_starts }
    }

    /// Number of characters in the mapped text.
    pub fn char_len(&self) -> usize {
        self.byte_starts.len() - 1
    }

    /// Character index of the char starting at `byte_index`. Indices inside a
    /// multi-byte char resolve to the char that contains them.
    pub fn to_char(&self, byte_index: usize) -> usize {
        match self.byte_starts.binary_search(&byte_index) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        }
    }

    /// Converts a byte range into a character range.
    pub fn char_range(&self, start: usize, end: usize) -> (usize, usize) {
        (self.to_char(start), self.to_char(end))
    }
}
