// SPDX-License-Identifier: PMPL-1.0-or-later
//! Accessible name and description computation.
//!
//! Precedence: `aria-labelledby`, `aria-label`, native markup, `title`. The
//! first non-empty candidate wins and is tagged with its source. Broken id
//! references are skipped.

use super::element::{AccessibleName, NameSource};
use crate::aria::allows_name_from_content;
use crate::dom::{Display, Document, ElementData, NodeId, NodeKind, Visibility};
use std::collections::HashMap;

/// Elements whose content never contributes to a name
const NO_CONTENT_ELEMENTS: &[&str] = &["script", "style", "template", "noscript", "title", "head"];

/// Input types whose native name comes from `<label>` then `placeholder`
const TEXT_INPUT_TYPES: &[&str] = &["email", "number", "password", "search", "tel", "text", "url"];

enum NativeName {
    Name(String),
    /// `alt=""` marks the image as decoration; naming stops here
    Decorative,
    Nothing,
}

/// Collapse runs of whitespace and trim
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Id and label lookups over one document
pub struct NameContext<'d> {
    doc: &'d Document,
    ids: HashMap<&'d str, NodeId>,
    labels: HashMap<&'d str, Vec<NodeId>>,
}

impl<'d> NameContext<'d> {
    pub fn new(doc: &'d Document) -> Self {
        let mut ids = HashMap::new();
        let mut labels: HashMap<&'d str, Vec<NodeId>> = HashMap::new();

        for node in std::iter::once(doc.root()).chain(doc.descendants(doc.root())) {
            let Some(el) = doc.element(node) else { continue };
            if let Some(id) = el.attr("id").filter(|id| !id.is_empty()) {
                // first occurrence wins
                ids.entry(id).or_insert(node);
            }
            if el.tag == "label" {
                if let Some(target) = el.attr("for").filter(|f| !f.is_empty()) {
                    labels.entry(target).or_default().push(node);
                }
            }
        }

        Self { doc, ids, labels }
    }

    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    pub fn accessible_name(&self, node: NodeId, role: &str) -> AccessibleName {
        let Some(el) = self.doc.element(node) else {
            return AccessibleName::none();
        };

        if let Some(refs) = el.attr("aria-labelledby") {
            let name = self.referenced_text(refs);
            if !name.is_empty() {
                return AccessibleName { name, source: NameSource::AriaLabelledby };
            }
        }

        if let Some(label) = el.attr("aria-label").map(normalize).filter(|l| !l.is_empty()) {
            return AccessibleName { name: label, source: NameSource::AriaLabel };
        }

        match self.native_name(node, el, role) {
            NativeName::Name(name) if !name.is_empty() => {
                return AccessibleName { name, source: NameSource::NativeMarkup };
            }
            NativeName::Decorative => return AccessibleName::none(),
            _ => {}
        }

        if let Some(title) = el.attr("title").map(normalize).filter(|t| !t.is_empty()) {
            return AccessibleName { name: title, source: NameSource::Title };
        }

        AccessibleName::none()
    }

    /// `aria-describedby`, falling back to `title` when the title was not
    /// already used as the name
    pub fn accessible_description(&self, node: NodeId, name_source: NameSource) -> String {
        let Some(el) = self.doc.element(node) else {
            return String::new();
        };
        if let Some(refs) = el.attr("aria-describedby") {
            let description = self.referenced_text(refs);
            if !description.is_empty() {
                return description;
            }
        }
        if name_source != NameSource::Title {
            if let Some(title) = el.attr("title") {
                return normalize(title);
            }
        }
        String::new()
    }

    /// Whether author markup (not content) names the element
    pub fn has_author_name(&self, node: NodeId) -> bool {
        let Some(el) = self.doc.element(node) else {
            return false;
        };
        let non_empty = |v: Option<&str>| v.map(|s| !s.trim().is_empty()).unwrap_or(false);
        non_empty(el.attr("aria-label"))
            || non_empty(el.attr("title"))
            || el
                .attr("aria-labelledby")
                .map(|refs| !self.referenced_text(refs).is_empty())
                .unwrap_or(false)
    }

    fn referenced_text(&self, refs: &str) -> String {
        let parts: Vec<String> = refs
            .split_whitespace()
            .filter_map(|id| self.element_by_id(id))
            .map(|target| {
                let label = self
                    .doc
                    .attr(target, "aria-label")
                    .map(normalize)
                    .unwrap_or_default();
                if label.is_empty() {
                    self.contents(target, None, true)
                } else {
                    label
                }
            })
            .filter(|text| !text.is_empty())
            .collect();
        normalize(&parts.join(" "))
    }

    fn native_name(&self, node: NodeId, el: &ElementData, role: &str) -> NativeName {
        let attr = |name: &str| el.attr(name).map(normalize).filter(|v| !v.is_empty());
        let first = |candidates: [Option<String>; 2]| {
            candidates
                .into_iter()
                .flatten()
                .next()
                .map(NativeName::Name)
                .unwrap_or(NativeName::Nothing)
        };

        match el.tag.as_str() {
            "input" => {
                let input_type = el.attr("type").map(|t| t.trim().to_ascii_lowercase());
                match input_type.as_deref().unwrap_or("text") {
                    "button" => first([attr("value"), None]),
                    "submit" => first([attr("value"), Some("Submit".to_string())]),
                    "reset" => first([attr("value"), Some("Reset".to_string())]),
                    "image" => first([attr("alt"), attr("value")]),
                    "hidden" => NativeName::Nothing,
                    t if TEXT_INPUT_TYPES.contains(&t) => first([self.label_text(node, el), attr("placeholder")]),
                    _ => first([self.label_text(node, el), None]),
                }
            }
            "textarea" => first([self.label_text(node, el), attr("placeholder")]),
            "select" | "meter" | "progress" | "output" => first([self.label_text(node, el), None]),
            "button" => first([self.label_text(node, el), Some(self.contents(node, None, false))]),
            "fieldset" => first([self.child_contents(node, "legend"), None]),
            "figure" => first([self.child_contents(node, "figcaption"), None]),
            "table" => first([self.child_contents(node, "caption"), None]),
            "details" => first([self.child_contents(node, "summary"), None]),
            "svg" => first([self.child_contents(node, "title"), None]),
            "img" => match el.attr("alt") {
                Some(alt) if alt.trim().is_empty() => NativeName::Decorative,
                Some(alt) => NativeName::Name(normalize(alt)),
                None => NativeName::Nothing,
            },
            "area" => first([attr("alt"), None]),
            _ if allows_name_from_content(role) => NativeName::Name(self.contents(node, None, false)),
            _ => NativeName::Nothing,
        }
    }

    fn label_text(&self, node: NodeId, el: &ElementData) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(id) = el.attr("id") {
            if let Some(labels) = self.labels.get(id) {
                parts.extend(labels.iter().map(|label| self.contents(*label, Some(node), false)));
            }
        }
        if parts.iter().all(|p| p.is_empty()) {
            let mut ancestor = self.doc.parent(node);
            while let Some(current) = ancestor {
                if self.doc.tag(current) == Some("label") {
                    parts.push(self.contents(current, Some(node), false));
                    break;
                }
                ancestor = self.doc.parent(current);
            }
        }
        let text = normalize(&parts.join(" "));
        (!text.is_empty()).then_some(text)
    }

    fn child_contents(&self, node: NodeId, tag: &str) -> Option<String> {
        self.doc
            .children(node)
            .iter()
            .find(|child| self.doc.tag(**child) == Some(tag))
            .map(|child| self.contents(*child, None, false))
            .filter(|text| !text.is_empty())
    }

    /// Text alternative of an element's content
    pub fn contents(&self, node: NodeId, exclude: Option<NodeId>, include_hidden: bool) -> String {
        let mut out = String::new();
        self.collect_contents(node, exclude, include_hidden, &mut out);
        normalize(&out)
    }

    fn collect_contents(&self, node: NodeId, exclude: Option<NodeId>, include_hidden: bool, out: &mut String) {
        let mut stack: Vec<Piece> = self.doc.children(node).iter().rev().map(|c| Piece::Visit(*c)).collect();
        while let Some(piece) = stack.pop() {
            let child = match piece {
                Piece::Visit(child) => child,
                Piece::Space => {
                    out.push(' ');
                    continue;
                }
            };
            if Some(child) == exclude {
                continue;
            }
            let Some(child_node) = self.doc.node(child) else { continue };
            let el = match &child_node.kind {
                NodeKind::Text(text) => {
                    out.push_str(text);
                    continue;
                }
                NodeKind::Element(el) => el,
            };

            if NO_CONTENT_ELEMENTS.contains(&el.tag.as_str()) {
                continue;
            }
            if !include_hidden && is_hidden(el) {
                continue;
            }

            let block = el.style.as_ref().map(|s| s.display != Display::Inline).unwrap_or(true);
            if block {
                out.push(' ');
            }

            if let Some(label) = el.attr("aria-label").filter(|l| !l.trim().is_empty()) {
                out.push_str(label);
            } else {
                match el.tag.as_str() {
                    "img" | "area" => out.push_str(el.attr("alt").unwrap_or("")),
                    "input" => {
                        let input_type = el.attr("type").unwrap_or("text").to_ascii_lowercase();
                        if !matches!(input_type.as_str(), "hidden" | "checkbox" | "radio" | "file") {
                            out.push_str(el.attr("value").unwrap_or(""));
                        }
                    }
                    "select" | "textarea" => {}
                    _ => {
                        // closing space goes below the children
                        if block {
                            stack.push(Piece::Space);
                        }
                        stack.extend(self.doc.children(child).iter().rev().map(|c| Piece::Visit(*c)));
                        continue;
                    }
                }
            }

            if block {
                out.push(' ');
            }
        }
    }
}

/// Work item of the content walk
enum Piece {
    Visit(NodeId),
    Space,
}

fn is_hidden(el: &ElementData) -> bool {
    if el.has_attr("hidden") {
        return true;
    }
    if el
        .attr("aria-hidden")
        .map(|v| v.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false)
    {
        return true;
    }
    match &el.style {
        Some(style) => style.display == Display::None || style.visibility != Visibility::Visible,
        None => true,
    }
}
