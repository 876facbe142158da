//! WASM build test
//!
//! Checks that the module loads in a browser and the exported entry points
//! work against a real document.

#![cfg(target_arch = "wasm32")]

use paw_highlight::api::{build_segments, parse_protocols, tokenize, PawHighlighter};
use paw_highlight::dom::{DomTree, WebDom};
use paw_highlight::highlight::markers_under;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const WORDS: &str = r#"{"wordInfos": {"companies": {"word": "companies", "exp": "firms"}}}"#;

#[wasm_bindgen_test]
fn test_tokenize_returns_array() {
    let tokens = tokenize("The companies, again.", "example.com").unwrap();
    assert!(js_sys::Array::is_array(&tokens));
    assert_eq!(js_sys::Array::from(&tokens).length(), 3);
}

#[wasm_bindgen_test]
fn test_build_segments_rejects_bad_json() {
    assert!(build_segments("companies", "example.com", "{").is_err());
}

#[wasm_bindgen_test]
fn test_parse_protocols_defaults() {
    let protocols = parse_protocols("").unwrap();
    assert_eq!(js_sys::Array::from(&protocols).length(), 1);
}

#[wasm_bindgen_test]
fn test_highlighter_marks_document() {
    let dom = WebDom::from_window().unwrap();
    let body = dom.body().unwrap();
    let mut dom = dom;
    let p = dom.create_element("p").unwrap();
    let text = dom.create_text("Some companies here").unwrap();
    dom.append_child(&p, &text).unwrap();
    dom.append_child(&body, &p).unwrap();

    let highlighter = PawHighlighter::new(JsValue::UNDEFINED).unwrap();
    assert!(!highlighter.is_active());
    highlighter.enable_with(WORDS).unwrap();
    assert!(highlighter.is_active());

    assert_eq!(markers_under(&dom, &p).len(), 1);
    assert_eq!(dom.text_content(&p), "Some companies here");

    assert_eq!(highlighter.disable().unwrap(), 1);
    dom.remove_child(&body, &p).unwrap();
}
