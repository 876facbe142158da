//! Paw word highlighter WASM module
//!
//! Highlights saved vocabulary on arbitrary web pages. Text nodes are split
//! into tokens, matched against the dictionary fetched from the capture
//! server, and rewritten into marker elements that the content script
//! decorates with an info bubble.

pub mod api;
pub mod capture;
pub mod config;
pub mod dom;
pub mod error;
pub mod highlight;
pub mod models;
pub mod parse;
pub mod utils;

// Re-export commonly used types
pub use config::HighlightConfig;
pub use error::{HighlightError, Result};
pub use highlight::{HighlightReport, HighlightSession, SessionState};
pub use models::{Dictionary, Segment, WordInfo};
pub use parse::Tokenizer;

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        wasm_warn!("Logger already initialized: {}", e);
    }

    log::info!("Paw highlighter WASM module initialized");
}
