// SPDX-License-Identifier: PMPL-1.0-or-later
//! Host document model.
//!
//! A [`Document`] is a flat arena of element and text nodes. Elements carry
//! their attributes in insertion order, the computed style the host resolved
//! for them (if any) and optional layout geometry. The semantic cache only
//! ever reads a document.

pub mod html;
pub mod style;

pub use style::{ComputedStyle, Display, Rect, Visibility};

/// Handle of a node inside its [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone)]
pub struct ElementData {
    /// Lowercase tag name
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    /// `None` for nodes the host never styled (detached, not rendered)
    pub style: Option<ComputedStyle>,
    pub geometry: Option<Rect>,
}

impl ElementData {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.iter().any(|(n, _)| n == name)
    }
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub kind: NodeKind,
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    title: String,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document with a styled `<html>` root
    pub fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            kind: NodeKind::Element(ElementData {
                tag: "html".to_string(),
                attributes: Vec::new(),
                style: Some(ComputedStyle::default()),
                geometry: None,
            }),
        };
        Self { nodes: vec![root], title: String::new() }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append an element under `parent`. The new element starts with the
    /// user-agent style derived from the parent's style, or no style when the
    /// parent has none.
    pub fn append_element(&mut self, parent: NodeId, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        let tag = tag.to_ascii_lowercase();
        let attributes: Vec<(String, String)> = attributes
            .iter()
            .map(|(n, v)| (n.to_ascii_lowercase(), v.to_string()))
            .collect();
        let hidden = attributes.iter().any(|(n, _)| n == "hidden");
        let style = self
            .element(parent)
            .and_then(|p| p.style.as_ref())
            .map(|ps| ComputedStyle::for_element(ps, &tag, hidden));
        self.push(parent, NodeKind::Element(ElementData { tag, attributes, style, geometry: None }))
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push(parent, NodeKind::Text(text.to_string()))
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { parent: Some(parent), children: Vec::new(), kind });
        if let Some(p) = self.nodes.get_mut(parent.0) {
            p.children.push(id);
        }
        id
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(el) = self.element_mut(node) {
            let name = name.to_ascii_lowercase();
            match el.attributes.iter_mut().find(|(n, _)| *n == name) {
                Some(slot) => slot.1 = value.to_string(),
                None => el.attributes.push((name, value.to_string())),
            }
        }
    }

    pub fn set_style(&mut self, node: NodeId, style: ComputedStyle) {
        if let Some(el) = self.element_mut(node) {
            el.style = Some(style);
        }
    }

    pub fn clear_style(&mut self, node: NodeId) {
        if let Some(el) = self.element_mut(node) {
            el.style = None;
        }
    }

    pub fn set_geometry(&mut self, node: NodeId, rect: Rect) {
        if let Some(el) = self.element_mut(node) {
            el.geometry = Some(rect);
        }
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.node(id)?.kind {
            NodeKind::Element(el) => Some(el),
            NodeKind::Text(_) => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.nodes.get_mut(id.0)?.kind {
            NodeKind::Element(el) => Some(el),
            NodeKind::Text(_) => None,
        }
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attr(name)
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|el| el.tag.as_str())
    }

    /// All node ids in document (pre-)order
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// First element with `tag` in document order
    pub fn find_by_tag(&self, tag: &str) -> Option<NodeId> {
        if self.tag(self.root()) == Some(tag) {
            return Some(self.root());
        }
        self.descendants(self.root())
            .into_iter()
            .find(|id| self.tag(*id) == Some(tag))
    }

    pub fn body(&self) -> Option<NodeId> {
        self.find_by_tag("body")
    }

    /// Concatenated raw text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node in self.descendants(id) {
            if let Some(Node { kind: NodeKind::Text(t), .. }) = self.node(node) {
                out.push_str(t);
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
