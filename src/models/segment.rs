//! Segments: the output of matching one text node
//!
//! A segment sequence for a text node concatenates back to exactly the
//! node's original text.

use serde::{Deserialize, Serialize};

/// A run of a text node's content, either plain or highlighted
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Segment {
    /// Text copied through unchanged
    Literal { text: String },
    /// A dictionary hit: `word` is the dictionary key, `text` the original casing
    Highlighted { word: String, text: String },
}

impl Segment {
    pub fn literal(text: impl Into<String>) -> Self {
        Segment::Literal { text: text.into() }
    }

    pub fn highlighted(word: impl Into<String>, text: impl Into<String>) -> Self {
        Segment::Highlighted {
            word: word.into(),
            text: text.into(),
        }
    }

    /// Text this segment covers in the source string
    pub fn text(&self) -> &str {
        match self {
            Segment::Literal { text } | Segment::Highlighted { text, .. } => text,
        }
    }

    pub fn is_highlighted(&self) -> bool {
        matches!(self, Segment::Highlighted { .. })
    }
}

/// Concatenate segment texts, ignoring tags
pub fn concat_segments(segments: &[Segment]) -> String {
    segments.iter().map(Segment::text).collect()
}
