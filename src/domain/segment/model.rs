use serde::{Deserialize, Serialize};

/// Default target length (in characters) for a single synthesis unit
pub const DEFAULT_MAX_UNIT_LENGTH: usize = 600;

/// A bounded slice of the script scheduled for one synthesis call.
///
/// `sequence_index` values emitted by the segmenter are dense and start at 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextUnit {
    pub sequence_index: usize,
    pub content: String,
}

impl TextUnit {
    pub fn new(sequence_index: usize, content: impl Into<String>) -> Self {
        Self {
            sequence_index,
            content: content.into(),
        }
    }

    /// Length in characters, the unit the length budgets are expressed in
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}
