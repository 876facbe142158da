//! Paw highlighter WASM API
//!
//! The JavaScript-facing layer: browser bindings for fetch and
//! `Intl.Segmenter`, the per-page `PawHighlighter` class and a few
//! stateless helpers.
//!
//! # Module Structure
//!
//! - `helpers`: logging macros, serde bridging and error conversion
//! - `intl`: `Intl.Segmenter` word segmenter
//! - `net`: requests to the capture server
//! - `highlighter`: the `PawHighlighter` class
//! - `words`: stateless tokenize/match/protocol functions

pub mod helpers;
pub mod highlighter;
pub mod intl;
pub mod net;
pub mod words;

pub use highlighter::{normalize_config, PawHighlighter};
pub use intl::IntlSegmenter;
pub use words::{build_segments, parse_protocols, tokenize};
