//! Parsing module for the highlighting engine
//!
//! Splits raw text-node content into word candidates. Which rule applies is
//! decided per node from the page host and the text itself.

pub mod strategy;
pub mod tokenizer;

// Re-export commonly used types
pub use strategy::*;
pub use tokenizer::*;
