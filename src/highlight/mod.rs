//! Highlighting engine
//!
//! - `matcher`: tokens + dictionary -> segments
//! - `filter`: which text nodes may be rewritten
//! - `projector`: segments -> DOM nodes, marker toggling and unwrapping
//! - `session`: enable/disable lifecycle over a page
//! - `bubble`: info bubble content and hover debouncing
//! - `clickable`: single-click word mode

pub mod bubble;
pub mod clickable;
pub mod filter;
pub mod matcher;
pub mod projector;
pub mod session;

pub use bubble::{
    classify_hover, BubbleCommand, BubbleContent, HoverTarget, HoverTracker, TimerKind, TimerRequest,
};
pub use clickable::{unwrap_clickable_words, wrap_clickable_words};
pub use filter::{is_clickable_eligible, is_eligible};
pub use matcher::build_segments;
pub use projector::{is_active_marker, is_marker, markers_for_word, markers_under, project};
pub use session::{HighlightReport, HighlightSession, SessionState, SyncTicket};
