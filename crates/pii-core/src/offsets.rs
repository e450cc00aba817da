//! Character offset to byte offset conversion

/// Maps character offsets of one text onto UTF-8 byte offsets
///
/// Recognizers that count characters (most NER services do) are translated
/// through this before their spans reach the core, which works in bytes.
pub struct CharOffsets {
    // Byte index where each char starts, plus the text length as the final entry
    boundaries: Vec<usize>,
}

impl CharOffsets {
    pub fn new(text: &str) -> Self {
        let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        boundaries.push(text.len());
        Self { boundaries }
    }

    /// Byte offset for a character offset; `None` past the end of the text
    pub fn to_byte(&self, char_offset: usize) -> Option<usize> {
        self.boundaries.get(char_offset).copied()
    }

    pub fn char_len(&self) -> usize {
        self.boundaries.len() - 1
    }
}
