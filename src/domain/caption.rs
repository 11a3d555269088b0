use std::fmt;

/// Returned when decoding produced no content tokens at all.
pub const EMPTY_CAPTION_PLACEHOLDER: &str = "No meaningful caption generated.";

/// Natural-language caption with control tokens already stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption(String);

impl Caption {
    /// Wraps detokenized text, substituting the placeholder when the
    /// decode came back empty.
    pub fn from_decoded(text: String) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Self(EMPTY_CAPTION_PLACEHOLDER.to_string())
        } else {
            Self(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Caption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of the append-only caption log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionRecord {
    pub filename: String,
    pub caption: String,
}

impl CaptionRecord {
    pub fn new(filename: String, caption: String) -> Self {
        Self { filename, caption }
    }
}
