//! In-memory DOM
//!
//! Arena-backed tree used natively and by the test suite. Detached nodes
//! stay in the arena; only parent/child links change.

use super::{DomTree, NodeKind};
use crate::error::{HighlightError, Result};

/// Index of a node in a [`MemoryDom`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Debug)]
enum NodeData {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Clone, Debug)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Clone, Debug)]
pub struct MemoryDom {
    nodes: Vec<Node>,
    body: NodeId,
}

impl MemoryDom {
    /// Empty document consisting of a `BODY` element
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            body: NodeId(0),
        };
        dom.body = dom.push(NodeData::Element {
            tag: "BODY".to_string(),
            attributes: Vec::new(),
        });
        dom
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Append a new element under `parent`
    pub fn add_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.push(NodeData::Element {
            tag: tag.to_ascii_uppercase(),
            attributes: Vec::new(),
        });
        self.link(parent, id);
        id
    }

    /// Append a new element with a class under `parent`
    pub fn add_element_with_class(&mut self, parent: NodeId, tag: &str, class: &str) -> NodeId {
        let id = self.add_element(parent, tag);
        self.put_attribute(id, "class", class);
        id
    }

    /// Append a new text node under `parent`
    pub fn add_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.push(NodeData::Text(text.to_string()));
        self.link(parent, id);
        id
    }

    /// Whether the node is still attached under the body
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == self.body {
                return true;
            }
            current = self.nodes[node.0].parent;
        }
        false
    }

    /// HTML-like serialization for assertions (no escaping)
    pub fn to_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    /// Serialization of the children of `id`
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in &self.nodes[id.0].children {
            self.write_html(*child, &mut out);
        }
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let node = &self.nodes[id.0];
        match &node.data {
            NodeData::Text(text) => out.push_str(text),
            NodeData::Element { tag, attributes } => {
                let tag = tag.to_ascii_lowercase();
                out.push('<');
                out.push_str(&tag);
                for (name, value) in attributes {
                    out.push_str(&format!(" {}=\"{}\"", name, value));
                }
                out.push('>');
                for child in &node.children {
                    self.write_html(*child, out);
                }
                out.push_str(&format!("</{}>", tag));
            }
        }
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        NodeId(self.nodes.len() - 1)
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.nodes[child.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != child);
        }
    }

    fn put_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let NodeData::Element { attributes, .. } = &mut self.nodes[id.0].data {
            match attributes.iter_mut().find(|(n, _)| n == name) {
                Some((_, v)) => *v = value.to_string(),
                None => attributes.push((name.to_string(), value.to_string())),
            }
        }
    }

    fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| HighlightError::Dom(format!("unknown node {:?}", id)))
    }

    fn element(&self, id: NodeId) -> Result<&Node> {
        let node = self.node(id)?;
        match node.data {
            NodeData::Element { .. } => Ok(node),
            NodeData::Text(_) => Err(HighlightError::Dom(format!("{:?} is not an element", id))),
        }
    }
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl DomTree for MemoryDom {
    type Node = NodeId;

    fn kind(&self, node: &NodeId) -> NodeKind {
        match self.nodes.get(node.0).map(|n| &n.data) {
            Some(NodeData::Element { .. }) => NodeKind::Element,
            Some(NodeData::Text(_)) => NodeKind::Text,
            None => NodeKind::Other,
        }
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.nodes
            .get(node.0)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn parent_element(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    fn text_content(&self, node: &NodeId) -> String {
        match self.nodes.get(node.0) {
            Some(Node {
                data: NodeData::Text(text),
                ..
            }) => text.clone(),
            Some(n) => n.children.iter().map(|c| self.text_content(c)).collect(),
            None => String::new(),
        }
    }

    fn tag_name(&self, element: &NodeId) -> String {
        match self.nodes.get(element.0).map(|n| &n.data) {
            Some(NodeData::Element { tag, .. }) => tag.clone(),
            _ => String::new(),
        }
    }

    fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.class_name(element)
            .split_whitespace()
            .any(|c| c == class)
    }

    fn class_name(&self, element: &NodeId) -> String {
        self.attribute(element, "class").unwrap_or_default()
    }

    fn set_class_name(&mut self, element: &NodeId, class: &str) -> Result<()> {
        self.set_attribute(element, "class", class)
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        match self.nodes.get(element.0).map(|n| &n.data) {
            Some(NodeData::Element { attributes, .. }) => attributes
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.clone()),
            _ => None,
        }
    }

    fn set_attribute(&mut self, element: &NodeId, name: &str, value: &str) -> Result<()> {
        self.element(*element)?;
        self.put_attribute(*element, name, value);
        Ok(())
    }

    fn set_style(&mut self, element: &NodeId, property: &str, value: &str) -> Result<()> {
        let mut declarations: Vec<(String, String)> = self
            .attribute(element, "style")
            .unwrap_or_default()
            .split(';')
            .filter_map(|decl| {
                let (name, val) = decl.split_once(':')?;
                Some((name.trim().to_string(), val.trim().to_string()))
            })
            .filter(|(name, _)| name != property)
            .collect();
        declarations.push((property.to_string(), value.to_string()));

        let style = declarations
            .iter()
            .map(|(name, val)| format!("{}: {};", name, val))
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute(element, "style", &style)
    }

    fn create_text(&mut self, text: &str) -> Result<NodeId> {
        Ok(self.push(NodeData::Text(text.to_string())))
    }

    fn create_element(&mut self, tag: &str) -> Result<NodeId> {
        if tag.is_empty() {
            return Err(HighlightError::Dom("empty tag name".to_string()));
        }
        Ok(self.push(NodeData::Element {
            tag: tag.to_ascii_uppercase(),
            attributes: Vec::new(),
        }))
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<()> {
        self.element(*parent)?;
        self.node(*child)?;
        self.detach(*child);
        self.link(*parent, *child);
        Ok(())
    }

    fn insert_before(&mut self, parent: &NodeId, child: &NodeId, reference: &NodeId) -> Result<()> {
        self.element(*parent)?;
        self.node(*child)?;
        if !self.nodes[parent.0].children.contains(reference) {
            return Err(HighlightError::Dom(format!(
                "{:?} is not a child of {:?}",
                reference, parent
            )));
        }
        self.detach(*child);
        let index = self.nodes[parent.0]
            .children
            .iter()
            .position(|c| c == reference)
            .ok_or_else(|| HighlightError::Dom("reference node vanished".to_string()))?;
        self.nodes[parent.0].children.insert(index, *child);
        self.nodes[child.0].parent = Some(*parent);
        Ok(())
    }

    fn remove_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<()> {
        if self.nodes.get(child.0).and_then(|n| n.parent) != Some(*parent) {
            return Err(HighlightError::Dom(format!(
                "{:?} is not a child of {:?}",
                child, parent
            )));
        }
        self.detach(*child);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_serialize() {
        let mut dom = MemoryDom::new();
        let p = dom.add_element_with_class(dom.body(), "p", "intro");
        dom.add_text(p, "hello ");
        let em = dom.add_element(p, "em");
        dom.add_text(em, "world");

        assert_eq!(dom.to_html(p), r#"<p class="intro">hello <em>world</em></p>"#);
        assert_eq!(dom.text_content(&dom.body()), "hello world");
        assert_eq!(dom.tag_name(&em), "EM");
        assert!(dom.has_class(&p, "intro"));
    }

    #[test]
    fn test_text_nodes_in_document_order() {
        let mut dom = MemoryDom::new();
        let p = dom.add_element(dom.body(), "p");
        let a = dom.add_text(p, "a");
        let b_parent = dom.add_element(p, "b");
        let b = dom.add_text(b_parent, "b");
        let c = dom.add_text(dom.body(), "c");

        assert_eq!(dom.text_nodes_under(&dom.body()), vec![a, b, c]);
    }

    #[test]
    fn test_replace_with_keeps_siblings() {
        let mut dom = MemoryDom::new();
        let p = dom.add_element(dom.body(), "p");
        dom.add_text(p, "before");
        let middle = dom.add_text(p, "middle");
        dom.add_text(p, "after");

        let x = dom.create_text("X").unwrap();
        let y = dom.create_element("span").unwrap();
        dom.replace_with(&middle, &[x, y]).unwrap();

        assert_eq!(dom.inner_html(p), "beforeX<span></span>after");
        assert!(!dom.is_attached(middle));
    }

    #[test]
    fn test_remove_child_checks_parent() {
        let mut dom = MemoryDom::new();
        let p = dom.add_element(dom.body(), "p");
        let stray = dom.create_text("stray").unwrap();
        assert!(dom.remove_child(&p, &stray).is_err());
    }

    #[test]
    fn test_set_style_replaces_property() {
        let mut dom = MemoryDom::new();
        let a = dom.add_element(dom.body(), "a");
        dom.set_style(&a, "display", "block").unwrap();
        dom.set_style(&a, "margin", "auto").unwrap();
        dom.set_style(&a, "display", "inline-block").unwrap();
        assert_eq!(
            dom.attribute(&a, "style").as_deref(),
            Some("margin: auto; display: inline-block;")
        );
    }
}
