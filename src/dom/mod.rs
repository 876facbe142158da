//! DOM boundary
//!
//! The highlighter never touches `web_sys` directly. It works against
//! [`DomTree`], which the browser build implements over the live document
//! ([`WebDom`]) and native code and tests implement with an in-memory arena
//! ([`MemoryDom`]).

pub mod memory;
pub mod web;

pub use memory::{MemoryDom, NodeId};
pub use web::WebDom;

use crate::error::Result;

/// Node categories the engine cares about
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
    Other,
}

/// Minimal DOM surface needed to find, rewrite and unwrap text nodes
///
/// Tag names are reported in upper case, the way HTML documents report them.
pub trait DomTree {
    /// Handle to a node; cheap to clone and comparable by identity
    type Node: Clone + PartialEq + std::fmt::Debug;

    fn kind(&self, node: &Self::Node) -> NodeKind;

    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    fn parent_element(&self, node: &Self::Node) -> Option<Self::Node>;

    /// `textContent` of the node
    fn text_content(&self, node: &Self::Node) -> String;

    fn tag_name(&self, element: &Self::Node) -> String;

    fn has_class(&self, element: &Self::Node, class: &str) -> bool;

    fn class_name(&self, element: &Self::Node) -> String;

    fn set_class_name(&mut self, element: &Self::Node, class: &str) -> Result<()>;

    fn attribute(&self, element: &Self::Node, name: &str) -> Option<String>;

    fn set_attribute(&mut self, element: &Self::Node, name: &str, value: &str) -> Result<()>;

    fn set_style(&mut self, element: &Self::Node, property: &str, value: &str) -> Result<()>;

    /// Create a detached text node
    fn create_text(&mut self, text: &str) -> Result<Self::Node>;

    /// Create a detached element
    fn create_element(&mut self, tag: &str) -> Result<Self::Node>;

    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<()>;

    fn insert_before(
        &mut self,
        parent: &Self::Node,
        child: &Self::Node,
        reference: &Self::Node,
    ) -> Result<()>;

    fn remove_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<()>;

    /// Text nodes under `root` in document order
    fn text_nodes_under(&self, root: &Self::Node) -> Vec<Self::Node> {
        let mut found = Vec::new();
        let mut stack = vec![root.clone()];
        while let Some(node) = stack.pop() {
            match self.kind(&node) {
                NodeKind::Text => found.push(node),
                NodeKind::Element => {
                    let mut children = self.children(&node);
                    children.reverse();
                    stack.extend(children);
                }
                NodeKind::Other => {}
            }
        }
        found
    }

    /// Elements under `root` (root excluded) with the given tag, in document order
    fn elements_by_tag(&self, root: &Self::Node, tag: &str) -> Vec<Self::Node> {
        let wanted = tag.to_ascii_uppercase();
        let mut found = Vec::new();
        let mut stack: Vec<Self::Node> = self.children(root).into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            if self.kind(&node) != NodeKind::Element {
                continue;
            }
            if self.tag_name(&node) == wanted {
                found.push(node.clone());
            }
            stack.extend(self.children(&node).into_iter().rev());
        }
        found
    }

    /// Nearest ancestor element (self included) with the given tag
    fn closest(&self, node: &Self::Node, tag: &str) -> Option<Self::Node> {
        let wanted = tag.to_ascii_uppercase();
        let mut current = match self.kind(node) {
            NodeKind::Element => Some(node.clone()),
            _ => self.parent_element(node),
        };
        while let Some(element) = current {
            if self.tag_name(&element) == wanted {
                return Some(element);
            }
            current = self.parent_element(&element);
        }
        None
    }

    /// Replace `old` with `new_nodes` in `old`'s parent, keeping order
    fn replace_with(&mut self, old: &Self::Node, new_nodes: &[Self::Node]) -> Result<()> {
        let parent = self.parent_element(old).ok_or_else(|| {
            crate::error::HighlightError::Dom("node to replace has no parent".to_string())
        })?;
        for node in new_nodes {
            self.insert_before(&parent, node, old)?;
        }
        self.remove_child(&parent, old)
    }
}
