//! Single-click word mode
//!
//! Every word of eligible text is wrapped in its own
//! `<span class="clickable-word">`, so one click selects exactly that word
//! for capture. Whitespace stays as plain text between the spans.

use super::filter::{eligible_text_nodes, is_clickable_eligible};
use super::projector::unwrap_element;
use crate::config::{CLICKABLE_CLASS, LINGQ_HOST, NHK_HOST};
use crate::dom::DomTree;
use crate::error::Result;
use crate::utils::WordSegmenter;

/// Roots to process on `hostname`
///
/// NHK Easy articles mark the readable text with `color*` spans; LingQ has
/// its own word widgets and is left alone.
pub fn clickable_roots<D: DomTree>(dom: &D, root: &D::Node, hostname: &str) -> Vec<D::Node> {
    match hostname {
        NHK_HOST => dom
            .elements_by_tag(root, "span")
            .into_iter()
            .filter(|span| dom.class_name(span).starts_with("color"))
            .collect(),
        LINGQ_HOST => Vec::new(),
        _ => vec![root.clone()],
    }
}

/// Wrap the words of every eligible text node under the site's roots
///
/// Returns the number of spans created.
pub fn wrap_clickable_words<D: DomTree>(
    dom: &mut D,
    root: &D::Node,
    hostname: &str,
    segmenter: &dyn WordSegmenter,
) -> Result<usize> {
    let mut created = 0;
    for scope in clickable_roots(dom, root, hostname) {
        for node in eligible_text_nodes(dom, &scope, is_clickable_eligible) {
            let already_wrapped = dom
                .parent_element(&node)
                .map_or(false, |parent| dom.has_class(&parent, CLICKABLE_CLASS));
            if already_wrapped {
                continue;
            }
            created += wrap_node(dom, &node, segmenter)?;
        }
    }
    log::info!("Clickable words enabled ({} spans)", created);
    Ok(created)
}

fn wrap_node<D: DomTree>(dom: &mut D, node: &D::Node, segmenter: &dyn WordSegmenter) -> Result<usize> {
    let text = dom.text_content(node);
    let mut replacement = Vec::new();
    let mut spans = 0;

    for segment in segmenter.segment(&text) {
        if segment.text.trim().is_empty() {
            replacement.push(dom.create_text(&segment.text)?);
            continue;
        }
        let span = dom.create_element("span")?;
        dom.set_class_name(&span, CLICKABLE_CLASS)?;
        let content = dom.create_text(&segment.text)?;
        dom.append_child(&span, &content)?;
        replacement.push(span);
        spans += 1;
    }

    dom.replace_with(node, &replacement)?;
    Ok(spans)
}

/// Turn every clickable span under `root` back into plain text
pub fn unwrap_clickable_words<D: DomTree>(dom: &mut D, root: &D::Node) -> Result<usize> {
    let spans: Vec<D::Node> = dom
        .elements_by_tag(root, "span")
        .into_iter()
        .filter(|span| dom.has_class(span, CLICKABLE_CLASS))
        .collect();
    for span in &spans {
        unwrap_element(dom, span)?;
    }
    Ok(spans.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;
    use crate::utils::UnicodeWordSegmenter;

    #[test]
    fn test_wraps_each_word() {
        let mut dom = MemoryDom::new();
        let p = dom.add_element(dom.body(), "p");
        dom.add_text(p, "Hi there, you");
        let body = dom.body();

        let spans = wrap_clickable_words(&mut dom, &body, "example.com", &UnicodeWordSegmenter).unwrap();
        assert_eq!(spans, 4);
        assert_eq!(
            dom.inner_html(p),
            "<span class=\"clickable-word\">Hi</span> <span class=\"clickable-word\">there</span><span class=\"clickable-word\">,</span> <span class=\"clickable-word\">you</span>"
        );
        assert_eq!(dom.text_content(&p), "Hi there, you");
    }

    #[test]
    fn test_second_pass_is_noop() {
        let mut dom = MemoryDom::new();
        let p = dom.add_element(dom.body(), "p");
        dom.add_text(p, "one two");
        let body = dom.body();

        wrap_clickable_words(&mut dom, &body, "", &UnicodeWordSegmenter).unwrap();
        let html = dom.inner_html(p);
        assert_eq!(wrap_clickable_words(&mut dom, &body, "", &UnicodeWordSegmenter).unwrap(), 0);
        assert_eq!(dom.inner_html(p), html);
    }

    #[test]
    fn test_links_are_not_wrapped() {
        let mut dom = MemoryDom::new();
        let a = dom.add_element(dom.body(), "a");
        dom.add_text(a, "follow me");
        let body = dom.body();
        assert_eq!(wrap_clickable_words(&mut dom, &body, "", &UnicodeWordSegmenter).unwrap(), 0);
    }

    #[test]
    fn test_nhk_only_color_spans() {
        let mut dom = MemoryDom::new();
        let p = dom.add_element(dom.body(), "p");
        dom.add_text(p, "menu text");
        let colored = dom.add_element_with_class(p, "span", "colorN");
        dom.add_text(colored, "東京");
        let body = dom.body();

        let spans = wrap_clickable_words(&mut dom, &body, NHK_HOST, &UnicodeWordSegmenter).unwrap();
        assert!(spans >= 1);
        assert_eq!(dom.text_content(&dom.children(&p)[0]), "menu text");
        assert_eq!(dom.kind(&dom.children(&p)[0]), crate::dom::NodeKind::Text);
    }

    #[test]
    fn test_unwrap_restores_text() {
        let mut dom = MemoryDom::new();
        let li = dom.add_element(dom.body(), "li");
        dom.add_text(li, "alpha beta");
        let body = dom.body();

        wrap_clickable_words(&mut dom, &body, "", &UnicodeWordSegmenter).unwrap();
        assert_eq!(unwrap_clickable_words(&mut dom, &body).unwrap(), 2);
        assert_eq!(dom.inner_html(li), "alpha beta");
    }
}
