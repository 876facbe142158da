//! Highlighter configuration
//!
//! `HighlightConfig` is the user-facing part (server address, page host,
//! hover delay), handed over from the extension's settings storage as JSON.
//! The tag/class lists and marker names are fixed constants.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default capture server (paw-server)
pub const DEFAULT_SERVER: &str = "http://localhost:5001";

/// Site whose pages are tokenized by plain space splitting
pub const LINGQ_HOST: &str = "www.lingq.com";

/// Site whose clickable-word mode only covers the colored article spans
pub const NHK_HOST: &str = "www3.nhk.or.jp";

/// Custom element name used for highlight markers
pub const MARKER_TAG: &str = "xqdd_highlight_new_word";

/// Class carried by an active marker
pub const MARKER_CLASS: &str = "xqdd_highlight_new_word";

/// Class carried by a marker while highlighting is disabled
pub const MARKER_DISABLED_CLASS: &str = "xqdd_highlight_disable";

/// Attribute holding the lowercased matched word
pub const MARKER_WORD_ATTR: &str = "word";

/// Class of the spans created by clickable-word mode
pub const CLICKABLE_CLASS: &str = "clickable-word";

/// Parent tags whose text children may be highlighted
pub const ALLOWED_PARENT_TAGS: [&str; 26] = [
    "PRE", "A", "P", "H1", "H2", "H3", "H4", "H5", "H6", "B", "SMALL", "STRONG", "Q", "DIV",
    "SPAN", "LI", "TD", "OPTION", "I", "BUTTON", "UL", "CODE", "EM", "TH", "CITE", "RUBY",
];

/// Parent tags excluded from clickable-word mode on top of the highlight allow-list
pub const CLICKABLE_EXCLUDED_TAGS: [&str; 3] = ["A", "BUTTON", "CITE"];

/// Classes of the info bubble; text inside them is never highlighted
pub const BUBBLE_CLASSES: [&str; 5] = [
    "xqdd_bubble",
    "xqdd_bubble_word",
    "xqdd_bubble_exp",
    "xqdd_bubble_origin_path",
    "xqdd_bubble_note",
];

lazy_static! {
    pub static ref ALLOWED_TAG_SET: HashSet<&'static str> =
        ALLOWED_PARENT_TAGS.iter().copied().collect();
    pub static ref CLICKABLE_TAG_SET: HashSet<&'static str> = ALLOWED_PARENT_TAGS
        .iter()
        .copied()
        .filter(|tag| !CLICKABLE_EXCLUDED_TAGS.contains(tag))
        .collect();
}

/// Runtime configuration supplied by the extension
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct HighlightConfig {
    /// Base URL of the capture server
    pub server: String,

    /// Hostname of the page being processed
    pub hostname: String,

    /// Hosts tokenized by plain space splitting
    pub space_split_hosts: Vec<String>,

    /// Delay before the info bubble is shown or hidden
    pub hover_delay_ms: u32,
}

impl HighlightConfig {
    /// Config for a given page host, everything else default
    pub fn for_host(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            ..Self::default()
        }
    }

    /// `GET`/`DELETE` endpoint of the word list
    pub fn words_endpoint(&self) -> String {
        format!("{}/words", self.server.trim_end_matches('/'))
    }

    /// `POST` endpoint receiving captures
    pub fn capture_endpoint(&self) -> String {
        format!("{}/paw", self.server.trim_end_matches('/'))
    }

    /// `POST` endpoint storing a page's HTML before a capture
    pub fn source_endpoint(&self) -> String {
        format!("{}/source", self.server.trim_end_matches('/'))
    }
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            hostname: String::new(),
            space_split_hosts: vec![LINGQ_HOST.to_string()],
            hover_delay_ms: 500,
        }
    }
}
