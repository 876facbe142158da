//! Utility modules for the highlighting engine

pub mod segmenter;

// Re-export commonly used types
pub use segmenter::*;
