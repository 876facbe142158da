//! Live browser DOM via web-sys

use super::{DomTree, NodeKind};
use crate::error::{HighlightError, Result};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Node};

fn dom_err(context: &str, err: JsValue) -> HighlightError {
    HighlightError::Dom(format!("{}: {:?}", context, err))
}

/// [`DomTree`] over the page's `document`
#[derive(Clone, Debug)]
pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Wrap `window.document`
    pub fn from_window() -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| HighlightError::Dom("no window.document".to_string()))?;
        Ok(Self::new(document))
    }

    /// `document.body` as a node
    pub fn body(&self) -> Result<Node> {
        self.document
            .body()
            .map(Node::from)
            .ok_or_else(|| HighlightError::Dom("document has no body".to_string()))
    }

    fn as_element<'a>(&self, node: &'a Node) -> Result<&'a Element> {
        node.dyn_ref::<Element>()
            .ok_or_else(|| HighlightError::Dom(format!("{:?} is not an element", node.node_name())))
    }
}

impl DomTree for WebDom {
    type Node = Node;

    fn kind(&self, node: &Node) -> NodeKind {
        match node.node_type() {
            Node::ELEMENT_NODE => NodeKind::Element,
            Node::TEXT_NODE => NodeKind::Text,
            _ => NodeKind::Other,
        }
    }

    fn children(&self, node: &Node) -> Vec<Node> {
        let list = node.child_nodes();
        (0..list.length()).filter_map(|i| list.get(i)).collect()
    }

    fn parent_element(&self, node: &Node) -> Option<Node> {
        node.parent_element().map(Node::from)
    }

    fn text_content(&self, node: &Node) -> String {
        node.text_content().unwrap_or_default()
    }

    fn tag_name(&self, element: &Node) -> String {
        element
            .dyn_ref::<Element>()
            .map(|e| e.tag_name().to_ascii_uppercase())
            .unwrap_or_default()
    }

    fn has_class(&self, element: &Node, class: &str) -> bool {
        element
            .dyn_ref::<Element>()
            .map(|e| e.class_list().contains(class))
            .unwrap_or(false)
    }

    fn class_name(&self, element: &Node) -> String {
        element
            .dyn_ref::<Element>()
            .map(|e| e.class_name())
            .unwrap_or_default()
    }

    fn set_class_name(&mut self, element: &Node, class: &str) -> Result<()> {
        self.as_element(element)?.set_class_name(class);
        Ok(())
    }

    fn attribute(&self, element: &Node, name: &str) -> Option<String> {
        element.dyn_ref::<Element>()?.get_attribute(name)
    }

    fn set_attribute(&mut self, element: &Node, name: &str, value: &str) -> Result<()> {
        self.as_element(element)?
            .set_attribute(name, value)
            .map_err(|e| dom_err("setAttribute", e))
    }

    fn set_style(&mut self, element: &Node, property: &str, value: &str) -> Result<()> {
        let html = element
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| HighlightError::Dom("style on a non-HTML element".to_string()))?;
        html.style()
            .set_property(property, value)
            .map_err(|e| dom_err("style.setProperty", e))
    }

    fn create_text(&mut self, text: &str) -> Result<Node> {
        Ok(self.document.create_text_node(text).into())
    }

    fn create_element(&mut self, tag: &str) -> Result<Node> {
        self.document
            .create_element(tag)
            .map(Node::from)
            .map_err(|e| dom_err("createElement", e))
    }

    fn append_child(&mut self, parent: &Node, child: &Node) -> Result<()> {
        parent
            .append_child(child)
            .map(|_| ())
            .map_err(|e| dom_err("appendChild", e))
    }

    fn insert_before(&mut self, parent: &Node, child: &Node, reference: &Node) -> Result<()> {
        parent
            .insert_before(child, Some(reference))
            .map(|_| ())
            .map_err(|e| dom_err("insertBefore", e))
    }

    fn remove_child(&mut self, parent: &Node, child: &Node) -> Result<()> {
        parent
            .remove_child(child)
            .map(|_| ())
            .map_err(|e| dom_err("removeChild", e))
    }

    fn elements_by_tag(&self, root: &Node, tag: &str) -> Vec<Node> {
        let Some(root) = root.dyn_ref::<Element>() else {
            return Vec::new();
        };
        match root.query_selector_all(tag) {
            Ok(list) => (0..list.length()).filter_map(|i| list.get(i)).collect(),
            Err(e) => {
                log::warn!("querySelectorAll({}) failed: {:?}", tag, e);
                Vec::new()
            }
        }
    }
}
