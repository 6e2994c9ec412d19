// SPDX-License-Identifier: PMPL-1.0-or-later
//! Computed style values supplied by the host.
//!
//! The loader in [`crate::dom::html`] resolves a small CSS subset into these
//! values; hosts with a real rendering engine fill them in directly.

use crate::color::{parse_color, Color};
use regex::Regex;
use std::sync::LazyLock;

static COLOR_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)#[0-9a-f]{3,8}\b|(?:rgb|hsl)a?\([^)]*\)|\b[a-z]+\b").expect("valid regex")
});

/// Default font size of the root element in px
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Block,
    Inline,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
    Collapse,
}

/// Layout box of an element in CSS px
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn sized(width: f64, height: f64) -> Self {
        Self { x: 0.0, y: 0.0, width, height }
    }

    pub fn is_zero_area(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyle {
    pub display: Display,
    pub visibility: Visibility,
    pub color: Color,
    pub background_color: Color,
    pub background_image: bool,
    pub opacity: f64,
    pub font_size: f64,
    pub font_weight: u16,
    pub overflow_hidden: bool,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display: Display::Block,
            visibility: Visibility::Visible,
            color: Color::BLACK,
            background_color: Color::TRANSPARENT,
            background_image: false,
            opacity: 1.0,
            font_size: DEFAULT_FONT_SIZE,
            font_weight: 400,
            overflow_hidden: false,
        }
    }
}

const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "br", "button", "cite", "code", "data", "dfn", "em", "i",
    "img", "input", "kbd", "label", "mark", "meter", "output", "progress", "q", "s", "samp",
    "select", "small", "span", "strong", "sub", "sup", "svg", "textarea", "time", "u", "var",
];

const NOT_RENDERED_ELEMENTS: &[&str] = &[
    "base", "head", "link", "meta", "noscript", "script", "style", "template", "title",
];

const BOLD_ELEMENTS: &[&str] = &["b", "strong", "th", "h1", "h2", "h3", "h4", "h5", "h6"];

impl ComputedStyle {
    /// Style of a child before any author declarations: inherited
    /// properties from the parent plus user-agent defaults for `tag`
    pub fn for_element(parent: &ComputedStyle, tag: &str, hidden_attr: bool) -> Self {
        let mut style = Self {
            display: Display::Block,
            visibility: parent.visibility,
            color: parent.color,
            background_color: Color::TRANSPARENT,
            background_image: false,
            opacity: 1.0,
            font_size: parent.font_size,
            font_weight: parent.font_weight,
            overflow_hidden: false,
        };

        if hidden_attr || NOT_RENDERED_ELEMENTS.contains(&tag) {
            style.display = Display::None;
        } else if INLINE_ELEMENTS.contains(&tag) {
            style.display = Display::Inline;
        }

        let heading_scale = match tag {
            "h1" => Some(2.0),
            "h2" => Some(1.5),
            "h3" => Some(1.17),
            "h4" => Some(1.0),
            "h5" => Some(0.83),
            "h6" => Some(0.67),
            _ => None,
        };
        if let Some(scale) = heading_scale {
            style.font_size = parent.font_size * scale;
        }
        if BOLD_ELEMENTS.contains(&tag) {
            style.font_weight = 700;
        }

        style
    }

    /// Apply one author declaration. Unknown properties and unparsable
    /// values are ignored.
    pub fn apply(&mut self, property: &str, value: &str, parent: &ComputedStyle) {
        let value = value.trim();
        let lower = value.to_ascii_lowercase();
        match property {
            "display" => {
                self.display = match lower.as_str() {
                    "none" => Display::None,
                    "inline" => Display::Inline,
                    _ => Display::Block,
                }
            }
            "visibility" => {
                self.visibility = match lower.as_str() {
                    "hidden" => Visibility::Hidden,
                    "collapse" => Visibility::Collapse,
                    "inherit" => parent.visibility,
                    _ => Visibility::Visible,
                }
            }
            "color" => {
                if lower == "inherit" {
                    self.color = parent.color;
                } else if let Some(c) = parse_color(&lower) {
                    self.color = c;
                }
            }
            "background-color" => {
                if let Some(c) = parse_color(&lower) {
                    self.background_color = c;
                }
            }
            "background-image" => {
                self.background_image = lower.contains("url(") || lower.contains("gradient(");
            }
            "background" => {
                if lower.contains("url(") || lower.contains("gradient(") {
                    self.background_image = true;
                }
                if let Some(c) = background_shorthand_color(&lower) {
                    self.background_color = c;
                }
            }
            "opacity" => {
                if let Some(v) = parse_number_or_percent(&lower) {
                    self.opacity = v.clamp(0.0, 1.0);
                }
            }
            "font-size" => {
                if let Some(px) = parse_font_size(&lower, parent.font_size) {
                    self.font_size = px;
                }
            }
            "font-weight" => {
                if let Some(w) = parse_font_weight(&lower, parent.font_weight) {
                    self.font_weight = w;
                }
            }
            "overflow" => {
                self.overflow_hidden = lower
                    .split_whitespace()
                    .any(|v| v == "hidden" || v == "clip");
            }
            _ => {}
        }
    }
}

/// Split a declaration block into (property, value) pairs in source order
pub fn parse_declarations(block: &str) -> Vec<(String, String)> {
    block
        .split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim().to_ascii_lowercase();
            let value = value.trim().trim_end_matches("!important").trim();
            if name.is_empty() || value.is_empty() {
                return None;
            }
            Some((name, value.to_string()))
        })
        .collect()
}

/// Pixel value of a length like `12px`; other units are not resolved
pub fn parse_px(value: &str) -> Option<f64> {
    let value = value.trim();
    if value == "0" {
        return Some(0.0);
    }
    value.strip_suffix("px")?.trim().parse().ok()
}

fn parse_number_or_percent(value: &str) -> Option<f64> {
    match value.strip_suffix('%') {
        Some(pct) => pct.trim().parse::<f64>().ok().map(|v| v / 100.0),
        None => value.parse().ok(),
    }
}

fn background_shorthand_color(value: &str) -> Option<Color> {
    if let Some(c) = parse_color(value) {
        return Some(c);
    }
    COLOR_TOKEN_RE
        .find_iter(value)
        .find_map(|m| parse_color(m.as_str()))
}

pub fn parse_font_size(value: &str, parent_px: f64) -> Option<f64> {
    let keyword = match value {
        "xx-small" => Some(9.0),
        "x-small" => Some(10.0),
        "small" => Some(13.0),
        "medium" => Some(16.0),
        "large" => Some(18.0),
        "x-large" => Some(24.0),
        "xx-large" => Some(32.0),
        "smaller" => Some(parent_px / 1.2),
        "larger" => Some(parent_px * 1.2),
        "inherit" => Some(parent_px),
        _ => None,
    };
    if keyword.is_some() {
        return keyword;
    }

    let number = |s: &str| s.trim().parse::<f64>().ok();
    if let Some(v) = value.strip_suffix("rem") {
        number(v).map(|n| n * DEFAULT_FONT_SIZE)
    } else if let Some(v) = value.strip_suffix("em") {
        number(v).map(|n| n * parent_px)
    } else if let Some(v) = value.strip_suffix("px") {
        number(v)
    } else if let Some(v) = value.strip_suffix("pt") {
        number(v).map(|n| n * 4.0 / 3.0)
    } else if let Some(v) = value.strip_suffix('%') {
        number(v).map(|n| n * parent_px / 100.0)
    } else if value == "0" {
        Some(0.0)
    } else {
        None
    }
}

pub fn parse_font_weight(value: &str, parent: u16) -> Option<u16> {
    match value {
        "normal" => Some(400),
        "bold" => Some(700),
        "bolder" => Some(if parent < 600 { 700 } else { 900 }),
        "lighter" => Some(if parent > 500 { 400 } else { 100 }),
        "inherit" => Some(parent),
        other => other.parse::<u16>().ok().filter(|w| (1..=1000).contains(w)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_declarations() {
        let decls = parse_declarations("color: #000 ; Background-Color:white !important;;bogus");
        assert_eq!(
            decls,
            vec![
                ("color".to_string(), "#000".to_string()),
                ("background-color".to_string(), "white".to_string()),
            ]
        );
    }

    #[test]
    fn test_font_size_units() {
        assert_eq!(parse_font_size("12px", 16.0), Some(12.0));
        assert_eq!(parse_font_size("2em", 10.0), Some(20.0));
        assert_eq!(parse_font_size("1.5rem", 10.0), Some(24.0));
        assert_eq!(parse_font_size("18pt", 16.0), Some(24.0));
        assert_eq!(parse_font_size("150%", 16.0), Some(24.0));
        assert_eq!(parse_font_size("large", 16.0), Some(18.0));
        assert_eq!(parse_font_size("calc(1em + 2px)", 16.0), None);
    }

    #[test]
    fn test_font_weight() {
        assert_eq!(parse_font_weight("bold", 400), Some(700));
        assert_eq!(parse_font_weight("600", 400), Some(600));
        assert_eq!(parse_font_weight("bolder", 700), Some(900));
        assert_eq!(parse_font_weight("heavy", 400), None);
    }

    #[test]
    fn test_user_agent_defaults() {
        let root = ComputedStyle::default();
        let h1 = ComputedStyle::for_element(&root, "h1", false);
        assert_eq!(h1.font_size, 32.0);
        assert_eq!(h1.font_weight, 700);
        assert_eq!(h1.display, Display::Block);
        assert_eq!(ComputedStyle::for_element(&root, "span", false).display, Display::Inline);
        assert_eq!(ComputedStyle::for_element(&root, "div", true).display, Display::None);
    }

    #[test]
    fn test_background_shorthand() {
        let root = ComputedStyle::default();
        let mut style = ComputedStyle::for_element(&root, "div", false);
        style.apply("background", "url(hero.png) no-repeat #336699", &root);
        assert!(style.background_image);
        assert_eq!(style.background_color, Color::rgb(0x33, 0x66, 0x99));

        style.apply("background", "fixed hsl(0 0% 0%)", &root);
        assert_eq!(style.background_color, Color::BLACK);
    }

    #[test]
    fn test_inherited_properties() {
        let root = ComputedStyle::default();
        let mut parent = ComputedStyle::for_element(&root, "div", false);
        parent.apply("color", "#777", &root);
        parent.apply("visibility", "hidden", &root);
        parent.apply("background-color", "black", &root);
        let child = ComputedStyle::for_element(&parent, "p", false);
        assert_eq!(child.color, Color::rgb(0x77, 0x77, 0x77));
        assert_eq!(child.visibility, Visibility::Hidden);
        assert!(child.background_color.is_transparent());
    }
}
