//! Capture payloads
//!
//! What gets sent to `POST /paw`, and the `org-protocol://` link used when
//! the server cannot be reached.

use super::protocol::{CaptureFormat, ProtocolSetting};
use crate::config::{CLICKABLE_CLASS, MARKER_TAG};
use crate::dom::{DomTree, NodeKind};
use crate::error::{HighlightError, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Characters left alone by JavaScript's `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub const UNTITLED_PAGE: &str = "[untitled page]";

/// Capture-related extension settings
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct CaptureSettings {
    /// org-capture template key
    pub template: String,
    /// Query parameter names used in the org-protocol link
    #[serde(rename = "url")]
    pub url_key: String,
    #[serde(rename = "title")]
    pub title_key: String,
    #[serde(rename = "note")]
    pub note_key: String,
    #[serde(rename = "body")]
    pub body_key: String,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            template: "w".to_string(),
            url_key: "url".to_string(),
            title_key: "title".to_string(),
            note_key: "note".to_string(),
            body_key: "body".to_string(),
        }
    }
}

/// The page a capture comes from
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageContext {
    pub url: String,
    pub title: String,
}

impl PageContext {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            url: url.into(),
            title: if title.is_empty() { UNTITLED_PAGE.to_string() } else { title },
        }
    }
}

/// Captured content, as text and as HTML
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CapturedSelection {
    pub text: String,
    pub html: String,
    /// Text of the surrounding paragraph
    pub note: String,
}

/// Body of `POST /paw`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CapturePayload {
    pub protocol: String,
    pub url: String,
    pub title: String,
    pub note: String,
    pub body: String,
    pub format: String,
    pub template: String,
    /// Server-side path of the downloaded page, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_file: Option<String>,
}

impl CapturePayload {
    pub fn build(
        setting: &ProtocolSetting,
        settings: &CaptureSettings,
        page: &PageContext,
        selection: &CapturedSelection,
    ) -> Self {
        let format = setting.format();
        let body = match format {
            CaptureFormat::Html => selection.html.clone(),
            CaptureFormat::Text => selection.text.clone(),
            CaptureFormat::Markdown => {
                // No HTML-to-Markdown converter here; the server receives the
                // plain text and the format tag
                selection.text.clone()
            }
        };

        Self {
            protocol: setting.protocol().to_string(),
            url: page.url.clone(),
            title: page.title.clone(),
            note: selection.note.clone(),
            body,
            format: format.as_str().to_string(),
            template: settings.template.clone(),
            html_file: None,
        }
    }

    /// `org-protocol://` fallback link for this payload
    pub fn org_protocol_link(&self, settings: &CaptureSettings) -> String {
        let enc = |s: &str| utf8_percent_encode(s, URI_COMPONENT).to_string();
        format!(
            "org-protocol://{}?template={}&{}={}&{}={}&{}={}&{}={}",
            self.protocol,
            self.template,
            settings.url_key,
            enc(&self.url),
            settings.title_key,
            enc(&self.title),
            settings.note_key,
            enc(&self.note),
            settings.body_key,
            enc(&self.body),
        )
    }
}

/// Reply of `POST /source`, which stores the page HTML on the server
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceUpload {
    #[serde(default)]
    pub temp_file_path: Option<String>,
}

impl SourceUpload {
    /// Body of `POST /source` for the page's outer HTML
    pub fn request_body(source: &str) -> String {
        serde_json::json!({ "source": source }).to_string()
    }

    /// Server path of the stored page
    pub fn parse_reply(body: &str) -> Result<String> {
        let reply: SourceUpload = serde_json::from_str(body)?;
        reply
            .temp_file_path
            .filter(|path| !path.is_empty())
            .ok_or_else(|| HighlightError::Payload("source upload reply has no temp_file_path".to_string()))
    }
}

/// Text of the paragraph around `node`
///
/// Uses the nearest `P` ancestor, or the nearest element when the node is
/// not inside a paragraph.
pub fn note_for_node<D: DomTree>(dom: &D, node: &D::Node) -> String {
    let element = match dom.kind(node) {
        NodeKind::Element => Some(node.clone()),
        _ => dom.parent_element(node),
    };
    let Some(element) = element else {
        return String::new();
    };
    let context = dom.closest(&element, "p").unwrap_or(element);
    dom.text_content(&context)
}

/// Whether a click on `element` captures a single word
///
/// True for highlight markers and for the spans of clickable-word mode.
pub fn is_word_element<D: DomTree>(dom: &D, element: &D::Node) -> bool {
    dom.tag_name(element) == MARKER_TAG.to_ascii_uppercase() || dom.has_class(element, CLICKABLE_CLASS)
}

/// Selection covering exactly one highlight marker or clickable word
pub fn word_selection<D: DomTree>(dom: &D, element: &D::Node) -> Result<CapturedSelection> {
    if !is_word_element(dom, element) {
        return Err(HighlightError::Dom(
            "node is neither a highlight marker nor a clickable word".to_string(),
        ));
    }
    let marker = element;
    let text = dom.text_content(marker);
    Ok(CapturedSelection {
        html: text.clone(),
        text,
        note: note_for_node(dom, marker),
    })
}
