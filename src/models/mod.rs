//! Models module for the highlighting engine
//!
//! Data shared by the tokenizer, matcher and DOM layers: the known-word
//! dictionary and the segment sequence produced per text node.

pub mod segment;
pub mod serde_helpers;
pub mod word_info;

// Re-export commonly used types
pub use segment::{concat_segments, Segment};
pub use word_info::{Dictionary, WordInfo};
