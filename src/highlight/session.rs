//! Highlight session
//!
//! Two states, `Disabled` (initial) and `Active`. Enabling installs the
//! latest dictionary and runs a highlight pass over every eligible text
//! node; disabling only flips marker classes so it can be undone cheaply.
//!
//! The dictionary fetch is the only asynchronous step. Callers take a
//! [`SyncTicket`] before fetching and hand the response back through
//! [`HighlightSession::complete_sync`]. Responses are installed in the order
//! they land, so the last one to arrive wins even if it was requested first.

use super::filter::{eligible_text_nodes, is_eligible};
use super::projector::{
    activate_markers, deactivate_markers, is_active_marker, markers_for_word, project, unwrap_element,
};
use super::matcher::build_segments;
use crate::config::HighlightConfig;
use crate::dom::DomTree;
use crate::error::{HighlightError, Result};
use crate::models::{Dictionary, WordInfo};
use crate::parse::Tokenizer;
use serde::Serialize;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    Disabled,
    Active,
}

/// Identifies one dictionary fetch
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SyncTicket(u64);

/// Outcome of one highlight pass
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HighlightReport {
    pub nodes_scanned: usize,
    pub nodes_rewritten: usize,
    pub markers_created: usize,
    pub nodes_failed: usize,
}

pub struct HighlightSession {
    config: HighlightConfig,
    tokenizer: Tokenizer,
    dictionary: Dictionary,
    state: SessionState,
    issued: u64,
    installed: Option<SyncTicket>,
}

impl HighlightSession {
    pub fn new(config: HighlightConfig) -> Self {
        let tokenizer = Tokenizer::new(&config);
        Self::with_tokenizer(config, tokenizer)
    }

    pub fn with_tokenizer(config: HighlightConfig, tokenizer: Tokenizer) -> Self {
        Self {
            config,
            tokenizer,
            dictionary: Dictionary::new(),
            state: SessionState::Disabled,
            issued: 0,
            installed: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Ticket of the most recently installed sync, if any
    pub fn installed_sync(&self) -> Option<SyncTicket> {
        self.installed
    }

    /// Start a dictionary fetch
    pub fn begin_sync(&mut self) -> SyncTicket {
        self.issued += 1;
        SyncTicket(self.issued)
    }

    /// Finish a fetch started with [`begin_sync`](Self::begin_sync)
    ///
    /// On success the payload replaces the dictionary and the session is
    /// enabled over `root`. On failure the error is logged and both the
    /// previous dictionary and the session state are left as they were.
    pub fn complete_sync<D: DomTree>(
        &mut self,
        dom: &mut D,
        root: &D::Node,
        ticket: SyncTicket,
        response: Result<String>,
    ) -> Result<HighlightReport> {
        let dictionary = match response.and_then(|body| Dictionary::from_json(&body)) {
            Ok(dictionary) => dictionary,
            Err(e) => {
                log::error!("Dictionary sync {:?} failed: {}", ticket, e);
                return Err(e);
            }
        };

        if self.installed.map_or(false, |installed| installed > ticket) {
            log::debug!("Sync {:?} landed after a newer one, installing anyway", ticket);
        }
        self.installed = Some(ticket);
        self.install_dictionary(dictionary);
        self.enable(dom, root)
    }

    /// Replace the dictionary wholesale
    pub fn install_dictionary(&mut self, dictionary: Dictionary) {
        log::info!("Installed dictionary with {} words", dictionary.len());
        self.dictionary = dictionary;
    }

    /// Enter `Active` and highlight everything eligible under `root`
    ///
    /// Safe to call while already active: existing markers are restored to
    /// their active look and their text is no longer eligible, so nothing
    /// gets wrapped twice.
    pub fn enable<D: DomTree>(&mut self, dom: &mut D, root: &D::Node) -> Result<HighlightReport> {
        self.state = SessionState::Active;
        activate_markers(dom, root)?;

        let mut report = HighlightReport::default();
        for node in eligible_text_nodes(dom, root, is_eligible) {
            report.nodes_scanned += 1;
            match self.highlight_node(dom, &node) {
                Ok(0) => {}
                Ok(created) => {
                    report.nodes_rewritten += 1;
                    report.markers_created += created;
                }
                Err(e) => {
                    log::warn!("Skipping text node {:?}: {}", node, e);
                    report.nodes_failed += 1;
                }
            }
        }

        log::info!(
            "Highlight done: {} nodes scanned, {} rewritten, {} markers",
            report.nodes_scanned,
            report.nodes_rewritten,
            report.markers_created
        );
        Ok(report)
    }

    /// Tokenize, match and project a single text node
    ///
    /// Returns the number of markers created; zero means the node was left
    /// untouched.
    pub fn highlight_node<D: DomTree>(&self, dom: &mut D, node: &D::Node) -> Result<usize> {
        let text = dom.text_content(node);
        if text.trim().is_empty() {
            return Ok(0);
        }
        let tokens = self.tokenizer.tokenize(&text, &self.config.hostname);
        let segments = build_segments(&text, &tokens, &self.dictionary);
        Ok(project(dom, node, &segments)?.len())
    }

    /// Enter `Disabled`, greying out every marker under `root`
    pub fn disable<D: DomTree>(&mut self, dom: &mut D, root: &D::Node) -> Result<usize> {
        self.state = SessionState::Disabled;
        let count = deactivate_markers(dom, root)?;
        log::info!("Disabled auto highlight ({} markers)", count);
        Ok(count)
    }

    /// Unwrap every marker of a word the server has deleted
    ///
    /// Other words' markers are untouched. The word is also dropped from
    /// the local dictionary. Returns the number of markers unwrapped.
    pub fn delete_word<D: DomTree>(&mut self, dom: &mut D, root: &D::Node, word: &str) -> Result<usize> {
        if !self.is_active() {
            return Err(HighlightError::SessionInactive);
        }

        let markers = markers_for_word(dom, root, word);
        for marker in &markers {
            unwrap_element(dom, marker)?;
        }
        self.dictionary.remove_word(word);

        log::info!("Deleted '{}': unwrapped {} markers", word, markers.len());
        Ok(markers.len())
    }

    /// Word info behind a marker element, looked up by its text
    ///
    /// Inert markers, and every marker while the session is disabled, have
    /// no info to show.
    pub fn info_for_marker<D: DomTree>(&self, dom: &D, marker: &D::Node) -> Option<&WordInfo> {
        if !self.is_active() || !is_active_marker(dom, marker) {
            return None;
        }
        self.dictionary.lookup(&dom.text_content(marker))
    }
}
