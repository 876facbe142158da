//! Capture protocol settings
//!
//! The options page stores the protocol list as free text: either JSON
//! (`{"protocol": "paw", "format": "html"}` or an array of such objects) or
//! a comma list like `paw,anki`. Each entry becomes one capture action.

use crate::error::{HighlightError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROTOCOL: &str = "paw";

/// Body representation sent to the server
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CaptureFormat {
    Text,
    Html,
    Markdown,
}

impl CaptureFormat {
    /// Unknown and missing formats fall back to text
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::to_ascii_lowercase).as_deref() {
            Some("html") => CaptureFormat::Html,
            Some("markdown") => CaptureFormat::Markdown,
            _ => CaptureFormat::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureFormat::Text => "text",
            CaptureFormat::Html => "html",
            CaptureFormat::Markdown => "markdown",
        }
    }
}

/// One configured capture action
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ProtocolSetting {
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    /// Ask the server to store the page HTML first
    #[serde(default)]
    pub download: bool,
    /// Clear the selection after sending
    #[serde(default)]
    pub deselect: bool,
}

impl ProtocolSetting {
    pub fn named(protocol: impl Into<String>) -> Self {
        Self {
            protocol: Some(protocol.into()),
            ..Self::default()
        }
    }

    pub fn protocol(&self) -> &str {
        match self.protocol.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => DEFAULT_PROTOCOL,
        }
    }

    pub fn format(&self) -> CaptureFormat {
        CaptureFormat::parse(self.format.as_deref())
    }

    /// Protocol name, rejected when it cannot appear in an `org-protocol://` link
    pub fn validated_protocol(&self) -> Result<&str> {
        let name = self.protocol();
        let valid = name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(name)
        } else {
            Err(HighlightError::InvalidProtocol(name.to_string()))
        }
    }
}

/// Parse the protocol setting text into capture actions
///
/// Never returns an empty list.
pub fn parse_protocols(text: &str) -> Vec<ProtocolSetting> {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(text) {
        let items = match value {
            serde_json::Value::Array(items) => items,
            other @ serde_json::Value::Object(_) => vec![other],
            _ => Vec::new(),
        };
        let parsed: Vec<ProtocolSetting> = items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect();
        if !parsed.is_empty() {
            return parsed;
        }
    }

    let parsed: Vec<ProtocolSetting> = text
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(ProtocolSetting::named)
        .collect();

    if parsed.is_empty() {
        vec![ProtocolSetting::named(DEFAULT_PROTOCOL)]
    } else {
        parsed
    }
}

/// Pick the action at `item`, falling back to the first one
pub fn select_protocol(protocols: &[ProtocolSetting], item: Option<usize>) -> ProtocolSetting {
    item.and_then(|i| protocols.get(i))
        .or_else(|| protocols.first())
        .cloned()
        .unwrap_or_else(|| ProtocolSetting::named(DEFAULT_PROTOCOL))
}
