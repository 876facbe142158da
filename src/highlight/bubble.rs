//! Info bubble state
//!
//! The bubble shows the saved note for the marker under the pointer. Show
//! and hide are debounced: every pointer event supersedes the pending timer,
//! and a timer that fires after being superseded does nothing. The JS layer
//! owns the real `setTimeout`; this module only decides what each event and
//! each timer means.

use super::projector::{is_active_marker, is_marker};
use crate::config::BUBBLE_CLASSES;
use crate::dom::{DomTree, NodeKind};
use crate::models::WordInfo;
use serde::Serialize;

/// Text shown in the bubble for one word
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BubbleContent {
    /// The link when the word has one, else the word itself
    pub heading: String,
    pub exp: String,
    pub origin_path: String,
    pub note: String,
    /// Word handed to the delete and capture buttons
    pub word: String,
}

impl From<&WordInfo> for BubbleContent {
    fn from(info: &WordInfo) -> Self {
        Self {
            heading: info.link.clone().unwrap_or_else(|| info.word.clone()),
            exp: info.exp.clone(),
            origin_path: info.origin_path.clone(),
            note: info.note.clone(),
            word: info.word.clone(),
        }
    }
}

/// What lies under the pointer
#[derive(Clone, Debug, PartialEq)]
pub enum HoverTarget<N> {
    /// A highlight marker
    Marker(N),
    /// The bubble itself or one of its parts
    Bubble,
    /// Anything else, including nothing at all
    Elsewhere,
}

/// Classify the node under the pointer
///
/// Only active markers count while highlighting is on. A greyed-out marker,
/// or any marker while `highlighting` is false, is treated as plain page
/// content.
pub fn classify_hover<D: DomTree>(dom: &D, node: Option<&D::Node>, highlighting: bool) -> HoverTarget<D::Node> {
    let Some(node) = node else {
        return HoverTarget::Elsewhere;
    };
    let mut current = match dom.kind(node) {
        NodeKind::Element => Some(node.clone()),
        _ => dom.parent_element(node),
    };
    while let Some(element) = current {
        if is_marker(dom, &element) {
            if highlighting && is_active_marker(dom, &element) {
                return HoverTarget::Marker(element);
            }
            return HoverTarget::Elsewhere;
        }
        if BUBBLE_CLASSES.iter().any(|c| dom.has_class(&element, c)) {
            return HoverTarget::Bubble;
        }
        current = dom.parent_element(&element);
    }
    HoverTarget::Elsewhere
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    Show,
    Hide,
}

/// A timer the caller must start
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerRequest {
    pub generation: u64,
    pub kind: TimerKind,
    pub delay_ms: u32,
}

/// What the caller must do with the bubble
#[derive(Clone, Debug, PartialEq)]
pub enum BubbleCommand<N> {
    Show(N),
    Hide,
    Nothing,
}

/// Pointer tracking for one page
#[derive(Clone, Debug)]
pub struct HoverTracker<N> {
    delay_ms: u32,
    generation: u64,
    hovered: Option<N>,
    shown: Option<N>,
    allow_hide: bool,
}

impl<N: Clone + PartialEq> HoverTracker<N> {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            generation: 0,
            hovered: None,
            shown: None,
            allow_hide: true,
        }
    }

    /// Marker the bubble currently describes
    pub fn shown(&self) -> Option<&N> {
        self.shown.as_ref()
    }

    fn schedule(&mut self, kind: TimerKind) -> Option<TimerRequest> {
        self.generation += 1;
        Some(TimerRequest {
            generation: self.generation,
            kind,
            delay_ms: self.delay_ms,
        })
    }

    /// Pointer moved; may ask for a timer
    pub fn pointer_moved(&mut self, target: HoverTarget<N>) -> Option<TimerRequest> {
        match target {
            HoverTarget::Marker(node) => {
                self.allow_hide = false;
                self.hovered = Some(node);
                self.schedule(TimerKind::Show)
            }
            HoverTarget::Bubble => {
                // Staying inside the bubble cancels any pending hide
                self.allow_hide = false;
                self.generation += 1;
                None
            }
            HoverTarget::Elsewhere => {
                self.hovered = None;
                if self.allow_hide {
                    return None;
                }
                self.allow_hide = true;
                self.schedule(TimerKind::Hide)
            }
        }
    }

    /// Pointer left the bubble element
    pub fn bubble_left(&mut self) -> Option<TimerRequest> {
        self.pointer_moved(HoverTarget::Elsewhere)
    }

    /// A previously requested timer fired
    pub fn timer_fired(&mut self, request: TimerRequest) -> BubbleCommand<N> {
        if request.generation != self.generation {
            return BubbleCommand::Nothing;
        }
        match request.kind {
            TimerKind::Show => match &self.hovered {
                Some(node) if self.shown.as_ref() != Some(node) => {
                    self.shown = Some(node.clone());
                    BubbleCommand::Show(node.clone())
                }
                _ => BubbleCommand::Nothing,
            },
            TimerKind::Hide if self.allow_hide => {
                self.shown = None;
                BubbleCommand::Hide
            }
            TimerKind::Hide => BubbleCommand::Nothing,
        }
    }

    /// Page scrolled: hide right away
    pub fn scrolled(&mut self) -> BubbleCommand<N> {
        self.generation += 1;
        self.allow_hide = true;
        self.hovered = None;
        self.shown = None;
        BubbleCommand::Hide
    }
}
