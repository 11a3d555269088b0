/// Reserved token ids shared with the trained tokenizer.
pub const PAD_ID: u32 = 4;
pub const BOS_ID: u32 = 5;
pub const EOS_ID: u32 = 6;

/// Token ids produced by the decoding loop, beginning with BOS and
/// terminated by EOS or the step cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSequence {
    ids: Vec<u32>,
}

impl TokenSequence {
    /// A fresh sequence holding only the start token.
    pub fn start() -> Self {
        Self { ids: vec![BOS_ID] }
    }

    pub fn from_ids(ids: Vec<u32>) -> Self {
        Self { ids }
    }

    pub fn push(&mut self, id: u32) {
        self.ids.push(id);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn last(&self) -> Option<u32> {
        self.ids.last().copied()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.ids
    }

    /// Ids with the reserved PAD/BOS/EOS tokens stripped.
    pub fn content_tokens(&self) -> Vec<u32> {
        self.ids
            .iter()
            .copied()
            .filter(|id| *id != PAD_ID && *id != BOS_ID && *id != EOS_ID)
            .collect()
    }
}
