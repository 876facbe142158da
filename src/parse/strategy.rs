//! Tokenizer strategies
//!
//! Each strategy pairs a predicate (does this rule apply to this text on
//! this host?) with a splitting rule. The tokenizer asks them in order and
//! the first one that applies wins, so new site rules are added by
//! inserting another strategy.

use crate::utils::{UnicodeWordSegmenter, WordSegmenter};

/// Punctuation removed by the site space-split rule (hyphen included)
pub const SITE_STRIPPED_PUNCTUATION: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '-', '_', '`', '~',
    '(', ')',
];

/// Punctuation removed by the default rule (hyphen kept, so `well-known` stays whole)
pub const DEFAULT_STRIPPED_PUNCTUATION: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '_', '`', '~', '(',
    ')',
];

/// A pluggable splitting rule
pub trait TokenizerStrategy {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Whether this rule handles `text` on page `hostname`
    fn applies(&self, text: &str, hostname: &str) -> bool;

    /// Raw word candidates, before trimming and empty-token removal
    fn split(&self, text: &str) -> Vec<String>;
}

/// CJK punctuation, Hiragana, Katakana, half/full-width forms, CJK ideographs
pub fn is_cjk_char(c: char) -> bool {
    matches!(c,
        '\u{3000}'..='\u{303F}'
        | '\u{3040}'..='\u{309F}'
        | '\u{30A0}'..='\u{30FF}'
        | '\u{FF00}'..='\u{FFEF}'
        | '\u{4E00}'..='\u{9FAF}')
}

pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk_char)
}

/// Remove `punctuation` and split the rest on whitespace
fn strip_and_split(text: &str, punctuation: &[char]) -> Vec<String> {
    let stripped: String = text.chars().filter(|c| !punctuation.contains(c)).collect();
    stripped.split_whitespace().map(str::to_string).collect()
}

/// Plain space splitting for sites that already wrap each word
#[derive(Clone, Debug)]
pub struct SiteSpaceSplit {
    hosts: Vec<String>,
}

impl SiteSpaceSplit {
    pub fn new(hosts: Vec<String>) -> Self {
        Self { hosts }
    }
}

impl TokenizerStrategy for SiteSpaceSplit {
    fn name(&self) -> &'static str {
        "site-space-split"
    }

    fn applies(&self, _text: &str, hostname: &str) -> bool {
        self.hosts.iter().any(|host| host == hostname)
    }

    fn split(&self, text: &str) -> Vec<String> {
        strip_and_split(text, SITE_STRIPPED_PUNCTUATION)
    }
}

/// Word segmentation for text containing CJK characters
pub struct CjkSegmentation {
    segmenter: Box<dyn WordSegmenter>,
}

impl CjkSegmentation {
    pub fn new(segmenter: Box<dyn WordSegmenter>) -> Self {
        Self { segmenter }
    }
}

impl Default for CjkSegmentation {
    fn default() -> Self {
        Self::new(Box::new(UnicodeWordSegmenter))
    }
}

impl TokenizerStrategy for CjkSegmentation {
    fn name(&self) -> &'static str {
        "cjk-segmentation"
    }

    fn applies(&self, text: &str, _hostname: &str) -> bool {
        contains_cjk(text)
    }

    fn split(&self, text: &str) -> Vec<String> {
        self.segmenter.words(text)
    }
}

/// Fallback: strip punctuation except hyphens, split on whitespace
#[derive(Clone, Copy, Debug, Default)]
pub struct PunctuationSpaceSplit;

impl TokenizerStrategy for PunctuationSpaceSplit {
    fn name(&self) -> &'static str {
        "punctuation-space-split"
    }

    fn applies(&self, _text: &str, _hostname: &str) -> bool {
        true
    }

    fn split(&self, text: &str) -> Vec<String> {
        strip_and_split(text, DEFAULT_STRIPPED_PUNCTUATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cjk_detection_ranges() {
        assert!(contains_cjk("東京"));
        assert!(contains_cjk("ひらがな"));
        assert!(contains_cjk("カタカナ"));
        assert!(contains_cjk("ｈａｌｆ"));
        assert!(contains_cjk("a\u{3001}b"));
        assert!(!contains_cjk("plain ascii, café"));
        assert!(!contains_cjk("한국어"));
    }

    #[test]
    fn test_default_split_keeps_hyphen() {
        assert_eq!(
            PunctuationSpaceSplit.split("a well-known (fact)."),
            vec!["a", "well-known", "fact"]
        );
    }

    #[test]
    fn test_site_split_drops_hyphen() {
        let strategy = SiteSpaceSplit::new(vec!["www.lingq.com".to_string()]);
        assert!(strategy.applies("anything", "www.lingq.com"));
        assert!(!strategy.applies("anything", "example.com"));
        assert_eq!(strategy.split("well-known fact!"), vec!["wellknown", "fact"]);
    }
}
