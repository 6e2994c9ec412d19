// SPDX-License-Identifier: PMPL-1.0-or-later
//! HTML loader.
//!
//! Parses markup with `scraper` and resolves a computed style for every
//! element: user-agent defaults, then `<style>` rules in source order, then
//! the inline `style` attribute. Selector specificity is not modelled; later
//! rules win over earlier ones and inline declarations win over both.
//!
//! Only rules that apply on screen are loaded: `@media` groups count when one
//! of their queries is a bare `all` or `screen`; every other at-rule body is
//! skipped.

use super::style::{parse_declarations, parse_px, ComputedStyle};
use super::{Document, NodeId, Rect};
use regex::Regex;
use scraper::{ElementRef, Html, Node as HtmlNode, Selector};
use std::sync::LazyLock;
use tracing::debug;

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid regex"));

struct StyleRule {
    selector: Selector,
    declarations: Vec<(String, String)>,
}

/// Parse an HTML document into a styled [`Document`]
pub fn parse_html(markup: &str) -> Document {
    let html = Html::parse_document(markup);
    let rules = collect_style_rules(&html);
    debug!("Loaded {} style rule(s)", rules.len());

    let mut doc = Document::new();
    let root = html.root_element();
    let root_id = doc.root();
    for (name, value) in root.value().attrs() {
        doc.set_attribute(root_id, name, value);
    }
    let base = ComputedStyle::default();
    let mut root_style = ComputedStyle::for_element(&base, "html", false);
    let (width, height) = apply_author_styles(&mut root_style, &base, root, &rules);
    doc.set_style(root_id, root_style);
    if let (Some(w), Some(h)) = (width, height) {
        doc.set_geometry(root_id, Rect::sized(w, h));
    }

    load_children(&mut doc, &rules, root, root_id);

    if let Ok(title_sel) = Selector::parse("title") {
        if let Some(title) = html.select(&title_sel).next() {
            let text: String = title.text().collect();
            doc.set_title(&text.split_whitespace().collect::<Vec<_>>().join(" "));
        }
    }

    doc
}

fn collect_style_rules(html: &Html) -> Vec<StyleRule> {
    let mut rules = Vec::new();
    let Ok(style_sel) = Selector::parse("style") else {
        return rules;
    };

    for style_el in html.select(&style_sel) {
        let css: String = style_el.text().collect();
        let css = COMMENT_RE.replace_all(&css, "");

        for (selector_text, body) in style_blocks(&css) {
            let declarations = parse_declarations(body);
            match Selector::parse(selector_text) {
                Ok(selector) => rules.push(StyleRule { selector, declarations }),
                Err(_) => debug!("Skipping unsupported selector {:?}", selector_text),
            }
        }
    }

    rules
}

/// Split a comment-free style sheet into (selector, declarations) pairs.
/// Applicable `@media` groups are entered; other at-rules are skipped whole.
fn style_blocks(css: &str) -> Vec<(&str, &str)> {
    let bytes = css.as_bytes();
    let mut blocks = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => {
                let prelude = css[start..i].trim();
                if prelude.starts_with('@') && media_applies(prelude) {
                    i += 1;
                    start = i;
                    continue;
                }
                let end = matching_brace(bytes, i);
                if !prelude.is_empty() && !prelude.starts_with('@') {
                    blocks.push((prelude, &css[i + 1..end]));
                }
                i = end + 1;
                start = i;
            }
            // closes an entered group, or is stray
            b'}' => {
                i += 1;
                start = i;
            }
            // statement at-rules such as @import and @charset
            b';' if css[start..i].trim_start().starts_with('@') => {
                i += 1;
                start = i;
            }
            _ => i += 1,
        }
    }
    blocks
}

/// Index of the `}` closing the block opened at `open`, or the sheet length
/// when the block is unterminated
fn matching_brace(bytes: &[u8], open: usize) -> usize {
    let mut depth = 0usize;
    for (offset, byte) in bytes[open..].iter().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return open + offset;
                }
            }
            _ => {}
        }
    }
    bytes.len()
}

/// Whether an `@media` prelude matches a plain screen
fn media_applies(prelude: &str) -> bool {
    let prelude = prelude.to_ascii_lowercase();
    let Some(queries) = prelude.strip_prefix("@media") else {
        return false;
    };
    if queries.trim().is_empty() {
        return true;
    }
    queries.split(',').any(|query| {
        let query = query.split_whitespace().collect::<Vec<_>>().join(" ");
        matches!(query.as_str(), "all" | "screen" | "only screen" | "only all")
    })
}

fn load_children(doc: &mut Document, rules: &[StyleRule], root: ElementRef<'_>, root_id: NodeId) {
    let mut stack: Vec<_> = root.children().rev().map(|child| (child, root_id)).collect();
    while let Some((child, parent)) = stack.pop() {
        match child.value() {
            HtmlNode::Text(text) => {
                doc.append_text(parent, text);
            }
            HtmlNode::Element(_) => {
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                // scraper does not keep source order; sort for stable output
                let mut attrs: Vec<(&str, &str)> = child_el.value().attrs().collect();
                attrs.sort_by(|a, b| a.0.cmp(b.0));
                let id = doc.append_element(parent, child_el.value().name(), &attrs);

                let parent_style = doc.element(parent).and_then(|e| e.style.clone());
                let own_style = doc.element(id).and_then(|e| e.style.clone());
                if let (Some(parent_style), Some(mut style)) = (parent_style, own_style) {
                    let (width, height) = apply_author_styles(&mut style, &parent_style, child_el, rules);
                    doc.set_style(id, style);
                    if let (Some(w), Some(h)) = (width, height) {
                        doc.set_geometry(id, Rect::sized(w, h));
                    }
                }

                stack.extend(child.children().rev().map(|grandchild| (grandchild, id)));
            }
            _ => {}
        }
    }
}

/// Apply matching sheet rules and the inline style; returns the declared
/// pixel width and height, if any
fn apply_author_styles(
    style: &mut ComputedStyle,
    parent: &ComputedStyle,
    element: ElementRef<'_>,
    rules: &[StyleRule],
) -> (Option<f64>, Option<f64>) {
    let mut width = None;
    let mut height = None;

    let inline = element
        .value()
        .attr("style")
        .map(parse_declarations)
        .unwrap_or_default();

    let matched = rules
        .iter()
        .filter(|rule| rule.selector.matches(&element))
        .flat_map(|rule| rule.declarations.iter());

    for (property, value) in matched.chain(inline.iter()) {
        match property.as_str() {
            "width" => width = parse_px(value),
            "height" => height = parse_px(value),
            _ => style.apply(property, value, parent),
        }
    }

    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::dom::{Display, Visibility};

    fn find(doc: &Document, tag: &str) -> NodeId {
        doc.find_by_tag(tag).expect("tag present")
    }

    #[test]
    fn test_parse_structure_and_title() {
        let doc = parse_html(
            r#"<html lang="en"><head><title> My   Page </title></head>
               <body><main><h1 id="top">Hello</h1></main></body></html>"#,
        );
        assert_eq!(doc.title(), "My Page");
        assert_eq!(doc.attr(doc.root(), "lang"), Some("en"));
        let h1 = find(&doc, "h1");
        assert_eq!(doc.attr(h1, "id"), Some("top"));
        assert_eq!(doc.text_content(h1), "Hello");
    }

    #[test]
    fn test_stylesheet_then_inline_order() {
        let doc = parse_html(
            r#"<html><head><style>
                 p { color: #555; }
                 .loud { color: red; font-size: 2em; }
               </style></head>
               <body><p class="loud" style="color: blue">x</p><p>y</p></body></html>"#,
        );
        let first = find(&doc, "p");
        let style = doc.element(first).and_then(|e| e.style.clone()).expect("style");
        assert_eq!(style.color, Color::rgb(0, 0, 255));
        assert_eq!(style.font_size, 32.0);
    }

    #[test]
    fn test_hidden_attribute_and_visibility() {
        let doc = parse_html(
            r#"<body><div hidden>a</div><section style="visibility:hidden"><span>b</span></section></body>"#,
        );
        let div = find(&doc, "div");
        assert_eq!(doc.element(div).and_then(|e| e.style.as_ref()).map(|s| s.display), Some(Display::None));
        let span = find(&doc, "span");
        assert_eq!(
            doc.element(span).and_then(|e| e.style.as_ref()).map(|s| s.visibility),
            Some(Visibility::Hidden)
        );
    }

    #[test]
    fn test_geometry_from_declared_size() {
        let doc = parse_html(
            r#"<body><span style="width:1px;height:1px;overflow:hidden">skip</span></body>"#,
        );
        let span = find(&doc, "span");
        let el = doc.element(span).expect("element");
        assert_eq!(el.geometry, Some(Rect::sized(1.0, 1.0)));
        assert!(el.style.as_ref().map(|s| s.overflow_hidden).unwrap_or(false));
    }

    #[test]
    fn test_unsupported_selectors_are_skipped() {
        let doc = parse_html(
            r#"<html><head><style>
                 /* comment { color: red } */
                 p::-webkit-scrollbar { color: red; }
                 @font-face { font-family: x; }
                 p { color: green; }
               </style></head><body><p>x</p></body></html>"#,
        );
        let p = find(&doc, "p");
        assert_eq!(
            doc.element(p).and_then(|e| e.style.as_ref()).map(|s| s.color),
            Some(Color::rgb(0, 128, 0))
        );
    }

    fn color_of(doc: &Document, tag: &str) -> Option<Color> {
        doc.element(find(doc, tag)).and_then(|e| e.style.as_ref()).map(|s| s.color)
    }

    #[test]
    fn test_print_and_feature_media_ignored() {
        let doc = parse_html(
            r#"<html><head><style>
                 @media print { nav { display: none } }
                 @media (max-width: 600px) { main { display: none } p { color: red } }
                 @import url(extra.css);
                 @supports (display: grid) { p { color: blue } }
               </style></head>
               <body><nav>n</nav><main><p>x</p></main></body></html>"#,
        );
        for tag in ["nav", "main"] {
            let display = doc.element(find(&doc, tag)).and_then(|e| e.style.as_ref()).map(|s| s.display);
            assert_ne!(display, Some(Display::None), "{} should stay displayed", tag);
        }
        assert_eq!(color_of(&doc, "p"), Some(Color::BLACK));
    }

    #[test]
    fn test_screen_media_applied() {
        let doc = parse_html(
            r#"<html><head><style>
                 @media screen, print { p { color: green } }
                 @media all { h1 { color: #00f } }
                 @media only screen and (min-width: 1px) { p { color: red } }
               </style></head><body><h1>t</h1><p>x</p></body></html>"#,
        );
        assert_eq!(color_of(&doc, "p"), Some(Color::rgb(0, 128, 0)));
        assert_eq!(color_of(&doc, "h1"), Some(Color::rgb(0, 0, 255)));
    }

    #[test]
    fn test_deep_nesting_loads_every_level() {
        let depth = 10_000;
        let markup = format!("<body>{}deep{}</body>", "<div>".repeat(depth), "</div>".repeat(depth));
        let doc = parse_html(&markup);
        let body = doc.body().expect("body");
        let divs = doc
            .descendants(body)
            .into_iter()
            .filter(|n| doc.tag(*n) == Some("div"))
            .count();
        assert_eq!(divs, depth);
        assert_eq!(doc.text_content(body), "deep");
    }
}
