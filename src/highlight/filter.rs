//! Text node eligibility
//!
//! Only text whose immediate parent is an ordinary content tag is touched.
//! Marker elements are not in the allow-list, so text already inside a
//! marker is never wrapped a second time.

use crate::config::{ALLOWED_TAG_SET, BUBBLE_CLASSES, CLICKABLE_TAG_SET};
use crate::dom::{DomTree, NodeKind};
use std::collections::HashSet;

fn parent_passes<D: DomTree>(dom: &D, node: &D::Node, tags: &HashSet<&'static str>) -> bool {
    if dom.kind(node) != NodeKind::Text {
        return false;
    }
    let Some(parent) = dom.parent_element(node) else {
        return false;
    };
    if !tags.contains(dom.tag_name(&parent).as_str()) {
        return false;
    }
    !BUBBLE_CLASSES.iter().any(|class| dom.has_class(&parent, class))
}

/// Whether a text node may be highlighted
pub fn is_eligible<D: DomTree>(dom: &D, node: &D::Node) -> bool {
    parent_passes(dom, node, &ALLOWED_TAG_SET)
}

/// Whether a text node may be split into clickable words
pub fn is_clickable_eligible<D: DomTree>(dom: &D, node: &D::Node) -> bool {
    parent_passes(dom, node, &CLICKABLE_TAG_SET)
}

/// Eligible, non-blank text nodes under `root` in document order
pub fn eligible_text_nodes<D: DomTree>(
    dom: &D,
    root: &D::Node,
    accept: fn(&D, &D::Node) -> bool,
) -> Vec<D::Node> {
    dom.text_nodes_under(root)
        .into_iter()
        .filter(|node| accept(dom, node))
        .filter(|node| !dom.text_content(node).trim().is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MARKER_TAG;
    use crate::dom::MemoryDom;

    #[test]
    fn test_allowed_parent_accepted() {
        let mut dom = MemoryDom::new();
        let p = dom.add_element(dom.body(), "p");
        let text = dom.add_text(p, "hello");
        assert!(is_eligible(&dom, &text));
    }

    #[test]
    fn test_disallowed_parent_rejected() {
        let mut dom = MemoryDom::new();
        let script = dom.add_element(dom.body(), "script");
        let text = dom.add_text(script, "var x = 1;");
        let textarea = dom.add_element(dom.body(), "textarea");
        let typed = dom.add_text(textarea, "draft");
        let direct = dom.add_text(dom.body(), "loose body text");

        assert!(!is_eligible(&dom, &text));
        assert!(!is_eligible(&dom, &typed));
        assert!(!is_eligible(&dom, &direct));
    }

    #[test]
    fn test_bubble_classes_rejected() {
        let mut dom = MemoryDom::new();
        let bubble = dom.add_element_with_class(dom.body(), "div", "xqdd_bubble");
        let note = dom.add_element_with_class(bubble, "span", "xqdd_bubble_note extra");
        let text = dom.add_text(note, "a note");
        let own = dom.add_text(bubble, "inside bubble");

        assert!(!is_eligible(&dom, &text));
        assert!(!is_eligible(&dom, &own));
    }

    #[test]
    fn test_marker_text_not_eligible() {
        let mut dom = MemoryDom::new();
        let p = dom.add_element(dom.body(), "p");
        let marker = dom.add_element(p, MARKER_TAG);
        let text = dom.add_text(marker, "word");
        assert!(!is_eligible(&dom, &text));
    }

    #[test]
    fn test_element_is_not_eligible() {
        let mut dom = MemoryDom::new();
        let p = dom.add_element(dom.body(), "p");
        assert!(!is_eligible(&dom, &p));
    }

    #[test]
    fn test_clickable_excludes_links() {
        let mut dom = MemoryDom::new();
        let a = dom.add_element(dom.body(), "a");
        let text = dom.add_text(a, "link text");
        assert!(is_eligible(&dom, &text));
        assert!(!is_clickable_eligible(&dom, &text));
    }

    #[test]
    fn test_blank_nodes_skipped() {
        let mut dom = MemoryDom::new();
        let p = dom.add_element(dom.body(), "p");
        dom.add_text(p, "  \n ");
        let words = dom.add_text(p, "words");
        assert_eq!(eligible_text_nodes(&dom, &dom.body(), is_eligible), vec![words]);
    }
}
