//! Known-word dictionary
//!
//! The dictionary is fetched wholesale from the word server (`GET /words`)
//! and replaced on every sync; there is no incremental merge.

use super::serde_helpers::{null_as_default, serialize_option_as_null};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Everything the server knows about one saved word
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct WordInfo {
    /// The word in its original casing
    #[serde(default, deserialize_with = "null_as_default")]
    pub word: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub note: String,

    /// Where the word was captured from (org link, file path, ...)
    #[serde(default, alias = "originPath", deserialize_with = "null_as_default")]
    pub origin_path: String,

    /// Explanation / translation
    #[serde(default, alias = "explanation", deserialize_with = "null_as_default")]
    pub exp: String,

    #[serde(default, serialize_with = "serialize_option_as_null")]
    pub link: Option<String>,
}

/// Mapping from dictionary key (normally lowercase) to word info
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Dictionary {
    #[serde(rename = "wordInfos")]
    entries: HashMap<String, WordInfo>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the body of `GET /words`
    ///
    /// Invalid JSON is an error. A well-formed body without a usable
    /// `wordInfos` object yields an empty dictionary, and individual
    /// entries that do not look like word infos are dropped.
    pub fn from_json(body: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        Ok(Self::from_value(value))
    }

    /// Same as [`Dictionary::from_json`] for an already decoded payload
    pub fn from_value(value: serde_json::Value) -> Self {
        let infos = match value {
            serde_json::Value::Object(mut root) => root.remove("wordInfos"),
            _ => None,
        };

        let Some(serde_json::Value::Object(infos)) = infos else {
            log::warn!("Dictionary payload has no wordInfos object, treating as empty");
            return Self::new();
        };

        let mut entries = HashMap::with_capacity(infos.len());
        for (key, raw) in infos {
            match serde_json::from_value::<WordInfo>(raw) {
                Ok(info) => {
                    entries.insert(key, info);
                }
                Err(e) => log::warn!("Skipping malformed entry '{}': {}", key, e),
            }
        }

        Self { entries }
    }

    pub fn insert(&mut self, key: impl Into<String>, info: WordInfo) {
        self.entries.insert(key.into(), info);
    }

    pub fn get(&self, key: &str) -> Option<&WordInfo> {
        self.entries.get(key)
    }

    /// Resolve a token to the key it matches
    ///
    /// The lowercased token is tried first, then the token as written.
    pub fn lookup_key(&self, token: &str) -> Option<&str> {
        let lower = token.to_lowercase();
        if let Some((key, _)) = self.entries.get_key_value(lower.as_str()) {
            return Some(key.as_str());
        }
        self.entries
            .get_key_value(token)
            .map(|(key, _)| key.as_str())
    }

    /// Word info for a highlighted text, using the same lookup order as matching
    pub fn lookup(&self, token: &str) -> Option<&WordInfo> {
        self.lookup_key(token).and_then(|key| self.entries.get(key))
    }

    /// Drop a word under its lowercase and original-case keys
    ///
    /// Returns true when anything was removed.
    pub fn remove_word(&mut self, word: &str) -> bool {
        let lower = word.to_lowercase();
        let removed_lower = self.entries.remove(&lower).is_some();
        let removed_exact = lower != word && self.entries.remove(word).is_some();
        removed_lower || removed_exact
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(word: &str) -> WordInfo {
        WordInfo {
            word: word.to_string(),
            ..WordInfo::default()
        }
    }

    #[test]
    fn test_parse_server_payload() {
        let body = r#"{
            "wordInfos": {
                "companies": {"word": "Companies", "note": "会社", "origin_path": "[halo]", "exp": "firms"},
                "tokyo": {"word": "Tokyo", "note": null, "originPath": "jp.org", "exp": "capital", "link": "https://example.com"}
            }
        }"#;
        let dict = Dictionary::from_json(body).unwrap();
        assert_eq!(dict.len(), 2);

        let companies = dict.get("companies").unwrap();
        assert_eq!(companies.word, "Companies");
        assert_eq!(companies.origin_path, "[halo]");
        assert_eq!(companies.link, None);

        let tokyo = dict.get("tokyo").unwrap();
        assert_eq!(tokyo.note, "");
        assert_eq!(tokyo.origin_path, "jp.org");
        assert_eq!(tokyo.link.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_missing_word_infos_is_empty() {
        let dict = Dictionary::from_json(r#"{"status": "ok"}"#).unwrap();
        assert!(dict.is_empty());

        let dict = Dictionary::from_json(r#"{"wordInfos": null}"#).unwrap();
        assert!(dict.is_empty());

        let dict = Dictionary::from_json("[1, 2, 3]").unwrap();
        assert!(dict.is_empty());
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Dictionary::from_json("<html>502</html>").is_err());
    }

    #[test]
    fn test_malformed_entry_is_skipped() {
        let body = r#"{"wordInfos": {"good": {"word": "good"}, "bad": 42}}"#;
        let dict = Dictionary::from_json(body).unwrap();
        assert_eq!(dict.len(), 1);
        assert!(dict.get("good").is_some());
    }

    #[test]
    fn test_lookup_prefers_lowercase_then_exact() {
        let mut dict = Dictionary::new();
        dict.insert("apple", info("apple"));
        dict.insert("NASA", info("NASA"));

        assert_eq!(dict.lookup_key("Apple"), Some("apple"));
        assert_eq!(dict.lookup_key("APPLE"), Some("apple"));
        assert_eq!(dict.lookup_key("NASA"), Some("NASA"));
        assert_eq!(dict.lookup_key("Nasa"), None);
        assert_eq!(dict.lookup_key("pear"), None);
    }

    #[test]
    fn test_remove_word_covers_both_keys() {
        let mut dict = Dictionary::new();
        dict.insert("tokyo", info("Tokyo"));
        dict.insert("Tokyo", info("Tokyo"));
        dict.insert("osaka", info("Osaka"));

        assert!(dict.remove_word("Tokyo"));
        assert_eq!(dict.len(), 1);
        assert!(!dict.remove_word("kyoto"));
    }
}
