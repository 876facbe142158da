//! Text tokenizer
//!
//! Turns the content of one text node into ordered word candidates.
//! Tokens keep their left-to-right order and are not deduplicated; the
//! matcher relies on that order to walk the source text once.

use super::strategy::{CjkSegmentation, PunctuationSpaceSplit, SiteSpaceSplit, TokenizerStrategy};
use crate::config::HighlightConfig;
use crate::utils::WordSegmenter;

/// Ordered list of strategies, first applicable wins
pub struct Tokenizer {
    strategies: Vec<Box<dyn TokenizerStrategy>>,
}

impl Tokenizer {
    /// Site rule, then CJK segmentation, then the default split
    pub fn new(config: &HighlightConfig) -> Self {
        Self::with_segmenter(config, Box::new(crate::utils::UnicodeWordSegmenter))
    }

    /// Same rule order with a custom CJK word segmenter
    pub fn with_segmenter(config: &HighlightConfig, segmenter: Box<dyn WordSegmenter>) -> Self {
        Self {
            strategies: vec![
                Box::new(SiteSpaceSplit::new(config.space_split_hosts.clone())),
                Box::new(CjkSegmentation::new(segmenter)),
                Box::new(PunctuationSpaceSplit),
            ],
        }
    }

    pub fn with_strategies(strategies: Vec<Box<dyn TokenizerStrategy>>) -> Self {
        Self { strategies }
    }

    /// Insert a rule ahead of the existing ones
    pub fn prepend(&mut self, strategy: Box<dyn TokenizerStrategy>) {
        self.strategies.insert(0, strategy);
    }

    /// Name of the rule that would handle `text` on `hostname`
    pub fn strategy_for(&self, text: &str, hostname: &str) -> Option<&'static str> {
        self.select(text, hostname).map(|s| s.name())
    }

    pub fn tokenize(&self, text: &str, hostname: &str) -> Vec<String> {
        let Some(strategy) = self.select(text, hostname) else {
            return Vec::new();
        };

        strategy
            .split(text)
            .into_iter()
            .filter_map(|token| {
                let trimmed = token.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .collect()
    }

    fn select(&self, text: &str, hostname: &str) -> Option<&dyn TokenizerStrategy> {
        self.strategies
            .iter()
            .find(|s| s.applies(text, hostname))
            .map(|s| s.as_ref())
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(&HighlightConfig::default())
    }
}

/// Tokenize with the default rules
pub fn tokenize(text: &str, hostname: &str) -> Vec<String> {
    Tokenizer::default().tokenize(text, hostname)
}
