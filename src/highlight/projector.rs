//! Projecting segments onto the DOM
//!
//! A text node that produced segments is replaced in place by one text node
//! per literal and one marker element per highlight. Markers can later be
//! switched inert, re-activated, or unwrapped back into plain text.

use crate::config::{MARKER_CLASS, MARKER_DISABLED_CLASS, MARKER_TAG, MARKER_WORD_ATTR};
use crate::dom::DomTree;
use crate::error::Result;
use crate::models::Segment;

/// Create a detached marker element for one highlighted word
pub fn create_marker<D: DomTree>(dom: &mut D, word: &str, text: &str) -> Result<D::Node> {
    let marker = dom.create_element(MARKER_TAG)?;
    dom.set_attribute(&marker, MARKER_WORD_ATTR, &word.to_lowercase())?;
    dom.set_class_name(&marker, MARKER_CLASS)?;
    let content = dom.create_text(text)?;
    dom.append_child(&marker, &content)?;
    Ok(marker)
}

/// Replace `text_node` with nodes built from `segments`
///
/// Empty segment lists leave the node untouched. Returns the created
/// marker elements.
pub fn project<D: DomTree>(dom: &mut D, text_node: &D::Node, segments: &[Segment]) -> Result<Vec<D::Node>> {
    if segments.is_empty() {
        return Ok(Vec::new());
    }

    let mut nodes = Vec::with_capacity(segments.len());
    let mut markers = Vec::new();
    for segment in segments {
        match segment {
            Segment::Literal { text } if text.is_empty() => {}
            Segment::Literal { text } => nodes.push(dom.create_text(text)?),
            Segment::Highlighted { word, text } => {
                let marker = create_marker(dom, word, text)?;
                markers.push(marker.clone());
                nodes.push(marker);
            }
        }
    }

    // Inline links collapse around the inserted markers otherwise
    if let Some(parent) = dom.parent_element(text_node) {
        if dom.tag_name(&parent) == "A" {
            dom.set_style(&parent, "display", "inline-block")?;
            dom.set_style(&parent, "margin", "auto")?;
        }
    }

    dom.replace_with(text_node, &nodes)?;
    Ok(markers)
}

/// Whether `node` is a marker element, in either state
pub fn is_marker<D: DomTree>(dom: &D, node: &D::Node) -> bool {
    dom.tag_name(node) == MARKER_TAG.to_ascii_uppercase()
}

/// Whether `node` is a marker that has not been greyed out by a disable
pub fn is_active_marker<D: DomTree>(dom: &D, node: &D::Node) -> bool {
    is_marker(dom, node) && dom.has_class(node, MARKER_CLASS)
}

/// All marker elements under `root`, active or not
pub fn markers_under<D: DomTree>(dom: &D, root: &D::Node) -> Vec<D::Node> {
    dom.elements_by_tag(root, MARKER_TAG)
}

/// Markers under `root` for `word` (compared lowercased)
pub fn markers_for_word<D: DomTree>(dom: &D, root: &D::Node, word: &str) -> Vec<D::Node> {
    let wanted = word.to_lowercase();
    markers_under(dom, root)
        .into_iter()
        .filter(|m| dom.attribute(m, MARKER_WORD_ATTR).as_deref() == Some(wanted.as_str()))
        .collect()
}

/// Set every marker's class; returns how many markers were touched
pub fn set_marker_class<D: DomTree>(dom: &mut D, root: &D::Node, class: &str) -> Result<usize> {
    let markers = markers_under(dom, root);
    for marker in &markers {
        dom.set_class_name(marker, class)?;
    }
    Ok(markers.len())
}

/// Make markers visually inert without removing them
pub fn deactivate_markers<D: DomTree>(dom: &mut D, root: &D::Node) -> Result<usize> {
    set_marker_class(dom, root, MARKER_DISABLED_CLASS)
}

/// Restore the active look of every marker
pub fn activate_markers<D: DomTree>(dom: &mut D, root: &D::Node) -> Result<usize> {
    set_marker_class(dom, root, MARKER_CLASS)
}

/// Replace an element with a plain text node holding its text
pub fn unwrap_element<D: DomTree>(dom: &mut D, element: &D::Node) -> Result<D::Node> {
    let text = dom.text_content(element);
    let replacement = dom.create_text(&text)?;
    dom.replace_with(element, std::slice::from_ref(&replacement))?;
    Ok(replacement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;

    fn paragraph(text: &str) -> (MemoryDom, crate::dom::NodeId, crate::dom::NodeId) {
        let mut dom = MemoryDom::new();
        let p = dom.add_element(dom.body(), "p");
        let node = dom.add_text(p, text);
        (dom, p, node)
    }

    #[test]
    fn test_project_replaces_node_in_place() {
        let mut dom = MemoryDom::new();
        let p = dom.add_element(dom.body(), "p");
        dom.add_element(p, "br");
        let node = dom.add_text(p, "the Companies win");
        dom.add_element(p, "hr");

        let segments = vec![
            Segment::literal("the "),
            Segment::highlighted("companies", "Companies"),
            Segment::literal(" win"),
        ];
        let markers = project(&mut dom, &node, &segments).unwrap();

        assert_eq!(markers.len(), 1);
        assert_eq!(
            dom.inner_html(p),
            "<br></br>the <xqdd_highlight_new_word word=\"companies\" class=\"xqdd_highlight_new_word\">Companies</xqdd_highlight_new_word> win<hr></hr>"
        );
        assert!(!dom.is_attached(node));
    }

    #[test]
    fn test_project_empty_leaves_node() {
        let (mut dom, p, node) = paragraph("hello world");
        let markers = project(&mut dom, &node, &[]).unwrap();
        assert!(markers.is_empty());
        assert_eq!(dom.children(&p), vec![node]);
    }

    #[test]
    fn test_empty_literal_creates_no_node() {
        let (mut dom, p, node) = paragraph("word");
        project(
            &mut dom,
            &node,
            &[Segment::highlighted("word", "word"), Segment::literal("")],
        )
        .unwrap();
        assert_eq!(dom.children(&p).len(), 1);
    }

    #[test]
    fn test_anchor_parent_gets_inline_block() {
        let mut dom = MemoryDom::new();
        let a = dom.add_element(dom.body(), "a");
        let node = dom.add_text(a, "word");
        project(&mut dom, &node, &[Segment::highlighted("word", "word")]).unwrap();
        assert_eq!(
            dom.attribute(&a, "style").as_deref(),
            Some("display: inline-block; margin: auto;")
        );
    }

    #[test]
    fn test_deactivate_and_reactivate() {
        let (mut dom, p, node) = paragraph("one two");
        project(
            &mut dom,
            &node,
            &[
                Segment::highlighted("one", "one"),
                Segment::literal(" "),
                Segment::highlighted("two", "two"),
            ],
        )
        .unwrap();

        assert_eq!(deactivate_markers(&mut dom, &p).unwrap(), 2);
        let markers = markers_under(&dom, &p);
        assert!(markers.iter().all(|m| dom.has_class(m, MARKER_DISABLED_CLASS)));
        assert!(markers.iter().all(|m| is_marker(&dom, m) && !is_active_marker(&dom, m)));
        assert_eq!(dom.text_content(&p), "one two");

        assert_eq!(activate_markers(&mut dom, &p).unwrap(), 2);
        assert!(markers.iter().all(|m| is_active_marker(&dom, m)));
    }

    #[test]
    fn test_unwrap_marker() {
        let (mut dom, p, node) = paragraph("say Hello");
        let markers = project(
            &mut dom,
            &node,
            &[Segment::literal("say "), Segment::highlighted("hello", "Hello")],
        )
        .unwrap();

        unwrap_element(&mut dom, &markers[0]).unwrap();
        assert_eq!(dom.inner_html(p), "say Hello");
        assert!(markers_under(&dom, &p).is_empty());
    }

    #[test]
    fn test_markers_for_word_is_case_insensitive() {
        let (mut dom, p, node) = paragraph("Apple apple pear");
        project(
            &mut dom,
            &node,
            &[
                Segment::highlighted("apple", "Apple"),
                Segment::literal(" "),
                Segment::highlighted("apple", "apple"),
                Segment::literal(" "),
                Segment::highlighted("pear", "pear"),
            ],
        )
        .unwrap();
        assert_eq!(markers_for_word(&dom, &p, "APPLE").len(), 2);
        assert_eq!(markers_for_word(&dom, &p, "pear").len(), 1);
    }
}
