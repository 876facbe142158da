//! Stateless word operations
//!
//! Tokenizing, matching and protocol parsing exposed directly to JS, for the
//! options page and for debugging from the console.

use super::helpers::{serialize, to_js_error};
use crate::capture::parse_protocols as parse_protocol_list;
use crate::highlight::build_segments as build_segment_list;
use crate::models::Dictionary;
use crate::parse::Tokenizer;
use crate::wasm_log;
use wasm_bindgen::prelude::*;

/// Split `text` into candidate tokens the way a page on `hostname` would
///
/// # Returns
/// JS array of strings
#[wasm_bindgen]
pub fn tokenize(text: &str, hostname: &str) -> Result<JsValue, JsValue> {
    let tokenizer = Tokenizer::default();
    let tokens = tokenizer.tokenize(text, hostname);
    wasm_log!(
        "tokenize: {} tokens via {:?}",
        tokens.len(),
        tokenizer.strategy_for(text, hostname)
    );
    serialize(&tokens, "Failed to serialize tokens")
}

/// Match `text` against a `GET /words` body
///
/// # Parameters
/// - `text`: text of one node
/// - `hostname`: page hostname, selects the tokenizer rule
/// - `words_json`: raw server response
///
/// # Returns
/// JS array of segments, empty when nothing matched
#[wasm_bindgen(js_name = buildSegments)]
pub fn build_segments(text: &str, hostname: &str, words_json: &str) -> Result<JsValue, JsValue> {
    let dictionary = Dictionary::from_json(words_json).map_err(to_js_error)?;
    let tokens = Tokenizer::default().tokenize(text, hostname);
    let segments = build_segment_list(text, &tokens, &dictionary);
    serialize(&segments, "Failed to serialize segments")
}

/// Parse the protocol setting from the options page
#[wasm_bindgen(js_name = parseProtocols)]
pub fn parse_protocols(text: &str) -> Result<JsValue, JsValue> {
    serialize(&parse_protocol_list(text), "Failed to serialize protocols")
}
