//! Word segmentation utilities
//!
//! CJK text has no spaces between words, so the tokenizer hands it to a
//! word segmenter. Natively this is UAX #29 word boundaries via
//! `unicode-segmentation`; in the browser the JS layer can plug in
//! `Intl.Segmenter` (see `api::intl`).

use unicode_segmentation::UnicodeSegmentation;

/// One segment of a word-boundary split
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordSegment {
    pub text: String,
    /// False for pure punctuation and whitespace segments
    pub is_word_like: bool,
}

impl WordSegment {
    pub fn new(text: impl Into<String>, is_word_like: bool) -> Self {
        Self {
            text: text.into(),
            is_word_like,
        }
    }
}

/// Splits text at word boundaries
///
/// Segments cover the input completely and in order.
pub trait WordSegmenter {
    fn segment(&self, text: &str) -> Vec<WordSegment>;

    /// Only the word-like segments
    fn words(&self, text: &str) -> Vec<String> {
        self.segment(text)
            .into_iter()
            .filter(|s| s.is_word_like)
            .map(|s| s.text)
            .collect()
    }
}

/// UAX #29 word boundaries
#[derive(Clone, Copy, Debug, Default)]
pub struct UnicodeWordSegmenter;

impl WordSegmenter for UnicodeWordSegmenter {
    fn segment(&self, text: &str) -> Vec<WordSegment> {
        text.split_word_bounds()
            .map(|s| WordSegment::new(s, s.chars().any(char::is_alphanumeric)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_cover_input() {
        let text = "Hello, 世界! 東京へ";
        let joined: String = UnicodeWordSegmenter
            .segment(text)
            .iter()
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn test_punctuation_is_not_word_like() {
        let words = UnicodeWordSegmenter.words("日本、東京。");
        assert!(!words.is_empty());
        assert!(words.iter().all(|w| !w.contains('、') && !w.contains('。')));
    }

    #[test]
    fn test_latin_words() {
        assert_eq!(
            UnicodeWordSegmenter.words("don't stop, now"),
            vec!["don't", "stop", "now"]
        );
    }
}
