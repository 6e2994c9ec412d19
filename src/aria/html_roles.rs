// SPDX-License-Identifier: PMPL-1.0-or-later
//! ARIA in HTML role table.
//!
//! Entries are keyed by tag, optionally qualified by a discriminator:
//! `a[href]`, `img[emptyalt]`, `img[accname]`, `input[type=text][list]`,
//! `section[accname]`, `select[size-or-multiple]`, `figure[figcaption]`,
//! `header[scoped]`. Lookup tries the most specific key first.

use super::{is_valid_role, FALLBACK_ROLE};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleInfo {
    pub default_role: &'static str,
    pub allowed_roles: &'static [&'static str],
    pub any_role_allowed: bool,
    pub no_role_allowed: bool,
}

impl RoleInfo {
    const fn any(role: &'static str) -> Self {
        Self { default_role: role, allowed_roles: &[], any_role_allowed: true, no_role_allowed: false }
    }

    const fn fixed(role: &'static str) -> Self {
        Self { default_role: role, allowed_roles: &[], any_role_allowed: false, no_role_allowed: true }
    }

    const fn allowing(role: &'static str, allowed: &'static [&'static str]) -> Self {
        Self { default_role: role, allowed_roles: allowed, any_role_allowed: false, no_role_allowed: false }
    }
}

/// Role of an unknown tag
pub const UNKNOWN_ELEMENT: RoleInfo = RoleInfo::any(FALLBACK_ROLE);

const PRESENTATION: &[&str] = &["none", "presentation"];
const LINK_ROLES: &[&str] = &[
    "button", "checkbox", "menuitem", "menuitemcheckbox", "menuitemradio", "option", "radio",
    "switch", "tab", "treeitem",
];
const BUTTON_ROLES: &[&str] = &[
    "checkbox", "combobox", "gridcell", "link", "menuitem", "menuitemcheckbox", "menuitemradio",
    "option", "radio", "separator", "slider", "switch", "tab", "treeitem",
];
const LIST_ROLES: &[&str] = &[
    "directory", "group", "listbox", "menu", "menubar", "none", "presentation", "radiogroup",
    "tablist", "toolbar", "tree",
];
const SECTION_ROLES: &[&str] = &[
    "alert", "alertdialog", "application", "banner", "complementary", "contentinfo", "dialog",
    "document", "feed", "log", "main", "marquee", "navigation", "none", "note", "presentation",
    "search", "status", "tabpanel",
];
const NAMED_IMG_ROLES: &[&str] = &[
    "button", "checkbox", "link", "menuitem", "menuitemcheckbox", "menuitemradio", "meter",
    "option", "progressbar", "radio", "scrollbar", "separator", "slider", "switch", "tab",
    "treeitem", "doc-cover",
];
const HEADING_ROLES: &[&str] = &["none", "presentation", "tab", "doc-subtitle"];
const LANDMARK_SECTIONING_ROLES: &[&str] = &["group", "none", "presentation"];

const HTML_ROLES: &[(&str, RoleInfo)] = &[
    ("a[href]", RoleInfo::allowing("link", LINK_ROLES)),
    ("a", RoleInfo::any(FALLBACK_ROLE)),
    ("abbr", RoleInfo::any(FALLBACK_ROLE)),
    ("address", RoleInfo::any("group")),
    ("area[href]", RoleInfo::fixed("link")),
    ("area", RoleInfo::allowing(FALLBACK_ROLE, &[])),
    ("article", RoleInfo::allowing("article", &["application", "document", "feed", "main", "none", "presentation", "region"])),
    ("aside", RoleInfo::allowing("complementary", &["feed", "none", "note", "presentation", "region", "search"])),
    ("audio", RoleInfo::allowing(FALLBACK_ROLE, &["application"])),
    ("blockquote", RoleInfo::any("blockquote")),
    ("body", RoleInfo::fixed(FALLBACK_ROLE)),
    ("button", RoleInfo::allowing("button", BUTTON_ROLES)),
    ("caption", RoleInfo::fixed("caption")),
    ("code", RoleInfo::any("code")),
    ("datalist", RoleInfo::fixed("listbox")),
    ("dd", RoleInfo::fixed("definition")),
    ("del", RoleInfo::any("deletion")),
    ("details", RoleInfo::fixed("group")),
    ("dialog", RoleInfo::allowing("dialog", &["alertdialog"])),
    ("div", RoleInfo::any(FALLBACK_ROLE)),
    ("dl", RoleInfo::allowing(FALLBACK_ROLE, &["group", "list", "none", "presentation"])),
    ("dt", RoleInfo::allowing("term", &["listitem"])),
    ("em", RoleInfo::any("emphasis")),
    ("fieldset", RoleInfo::allowing("group", &["none", "presentation", "radiogroup"])),
    ("figure[figcaption]", RoleInfo::allowing("figure", &["group", "none", "presentation"])),
    ("figure", RoleInfo::any("figure")),
    ("footer[scoped]", RoleInfo::allowing(FALLBACK_ROLE, LANDMARK_SECTIONING_ROLES)),
    ("footer", RoleInfo::allowing("contentinfo", LANDMARK_SECTIONING_ROLES)),
    ("form", RoleInfo::allowing("form", &["none", "presentation", "search"])),
    ("h1", RoleInfo::allowing("heading", HEADING_ROLES)),
    ("h2", RoleInfo::allowing("heading", HEADING_ROLES)),
    ("h3", RoleInfo::allowing("heading", HEADING_ROLES)),
    ("h4", RoleInfo::allowing("heading", HEADING_ROLES)),
    ("h5", RoleInfo::allowing("heading", HEADING_ROLES)),
    ("h6", RoleInfo::allowing("heading", HEADING_ROLES)),
    ("header[scoped]", RoleInfo::allowing(FALLBACK_ROLE, LANDMARK_SECTIONING_ROLES)),
    ("header", RoleInfo::allowing("banner", LANDMARK_SECTIONING_ROLES)),
    ("hgroup", RoleInfo::any("group")),
    ("hr", RoleInfo::allowing("separator", &["none", "presentation", "doc-pagebreak"])),
    ("html", RoleInfo::fixed("document")),
    ("iframe", RoleInfo::allowing(FALLBACK_ROLE, &["application", "document", "img", "none", "presentation"])),
    ("img[emptyalt]", RoleInfo::allowing("none", PRESENTATION)),
    ("img[accname]", RoleInfo::allowing("img", NAMED_IMG_ROLES)),
    ("img", RoleInfo::fixed("img")),
    ("input[type=button]", RoleInfo::allowing("button", &["checkbox", "combobox", "link", "menuitem", "menuitemcheckbox", "menuitemradio", "option", "radio", "switch", "tab"])),
    ("input[type=checkbox]", RoleInfo::allowing("checkbox", &["button", "menuitemcheckbox", "option", "switch"])),
    ("input[type=color]", RoleInfo::fixed(FALLBACK_ROLE)),
    ("input[type=date]", RoleInfo::fixed(FALLBACK_ROLE)),
    ("input[type=datetime-local]", RoleInfo::fixed(FALLBACK_ROLE)),
    ("input[type=email][list]", RoleInfo::fixed("combobox")),
    ("input[type=email]", RoleInfo::fixed("textbox")),
    ("input[type=file]", RoleInfo::fixed(FALLBACK_ROLE)),
    ("input[type=image]", RoleInfo::allowing("button", &["link", "menuitem", "menuitemcheckbox", "menuitemradio", "radio", "switch"])),
    ("input[type=month]", RoleInfo::fixed(FALLBACK_ROLE)),
    ("input[type=number]", RoleInfo::fixed("spinbutton")),
    ("input[type=password]", RoleInfo::fixed("textbox")),
    ("input[type=radio]", RoleInfo::allowing("radio", &["menuitemradio"])),
    ("input[type=range]", RoleInfo::fixed("slider")),
    ("input[type=reset]", RoleInfo::fixed("button")),
    ("input[type=search][list]", RoleInfo::fixed("combobox")),
    ("input[type=search]", RoleInfo::fixed("searchbox")),
    ("input[type=submit]", RoleInfo::fixed("button")),
    ("input[type=tel][list]", RoleInfo::fixed("combobox")),
    ("input[type=tel]", RoleInfo::fixed("textbox")),
    ("input[type=text][list]", RoleInfo::fixed("combobox")),
    ("input[type=text]", RoleInfo::allowing("textbox", &["combobox", "searchbox", "spinbutton"])),
    ("input[type=time]", RoleInfo::fixed(FALLBACK_ROLE)),
    ("input[type=url][list]", RoleInfo::fixed("combobox")),
    ("input[type=url]", RoleInfo::fixed("textbox")),
    ("input[type=week]", RoleInfo::fixed(FALLBACK_ROLE)),
    ("ins", RoleInfo::any("insertion")),
    ("label", RoleInfo::fixed(FALLBACK_ROLE)),
    ("legend", RoleInfo::fixed(FALLBACK_ROLE)),
    ("li", RoleInfo::allowing("listitem", &["menuitem", "menuitemcheckbox", "menuitemradio", "none", "option", "presentation", "radio", "separator", "tab", "treeitem"])),
    ("main", RoleInfo::fixed("main")),
    ("math", RoleInfo::fixed("math")),
    ("menu", RoleInfo::allowing("list", LIST_ROLES)),
    ("meter", RoleInfo::fixed("meter")),
    ("nav", RoleInfo::allowing("navigation", &["menu", "menubar", "none", "presentation", "tablist"])),
    ("ol", RoleInfo::allowing("list", LIST_ROLES)),
    ("optgroup", RoleInfo::fixed("group")),
    ("option", RoleInfo::fixed("option")),
    ("output", RoleInfo::any("status")),
    ("p", RoleInfo::any("paragraph")),
    ("progress", RoleInfo::fixed("progressbar")),
    ("search", RoleInfo::allowing("search", &["form", "group", "none", "presentation", "region"])),
    ("section[accname]", RoleInfo::allowing("region", SECTION_ROLES)),
    ("section", RoleInfo::any(FALLBACK_ROLE)),
    ("select[size-or-multiple]", RoleInfo::fixed("listbox")),
    ("select", RoleInfo::allowing("combobox", &["menu"])),
    ("span", RoleInfo::any(FALLBACK_ROLE)),
    ("strong", RoleInfo::any("strong")),
    ("sub", RoleInfo::any("subscript")),
    ("summary", RoleInfo::fixed(FALLBACK_ROLE)),
    ("sup", RoleInfo::any("superscript")),
    ("svg", RoleInfo::any("graphics-document")),
    ("table", RoleInfo::any("table")),
    ("tbody", RoleInfo::any("rowgroup")),
    ("td", RoleInfo::any("cell")),
    ("textarea", RoleInfo::fixed("textbox")),
    ("tfoot", RoleInfo::any("rowgroup")),
    ("th", RoleInfo::any("columnheader")),
    ("thead", RoleInfo::any("rowgroup")),
    ("time", RoleInfo::any("time")),
    ("tr", RoleInfo::any("row")),
    ("ul", RoleInfo::allowing("list", LIST_ROLES)),
    ("video", RoleInfo::allowing(FALLBACK_ROLE, &["application"])),
];

/// Input types whose role changes to combobox with a `list` attribute
const LIST_INPUT_TYPES: &[&str] = &["email", "search", "tel", "text", "url"];

/// The element facts that discriminate table entries
#[derive(Debug, Clone, Default)]
pub struct RoleQuery<'a> {
    pub tag: &'a str,
    /// Lowercased `type` attribute
    pub type_attr: Option<&'a str>,
    pub has_href: bool,
    pub alt: Option<&'a str>,
    /// aria-label, aria-labelledby or title gives the element a name
    pub has_author_name: bool,
    pub has_list: bool,
    pub size_or_multiple: bool,
    pub has_figcaption: bool,
    /// Inside article, aside, main, nav or section
    pub in_sectioning_content: bool,
}

impl RoleQuery<'_> {
    fn keys(&self) -> Vec<String> {
        let tag = self.tag;
        let mut keys = Vec::with_capacity(3);
        match tag {
            "a" | "area" if self.has_href => keys.push(format!("{}[href]", tag)),
            "img" => match self.alt {
                Some(alt) if alt.is_empty() && !self.has_author_name => keys.push("img[emptyalt]".into()),
                Some(_) => keys.push("img[accname]".into()),
                None if self.has_author_name => keys.push("img[accname]".into()),
                None => {}
            },
            "input" => {
                let input_type = self.type_attr.unwrap_or("text");
                if self.has_list && LIST_INPUT_TYPES.contains(&input_type) {
                    keys.push(format!("input[type={}][list]", input_type));
                }
                keys.push(format!("input[type={}]", input_type));
                // unknown types behave as text
                keys.push("input[type=text]".into());
            }
            "section" if self.has_author_name => keys.push("section[accname]".into()),
            "select" if self.size_or_multiple => keys.push("select[size-or-multiple]".into()),
            "figure" if self.has_figcaption => keys.push("figure[figcaption]".into()),
            "header" | "footer" if self.in_sectioning_content => keys.push(format!("{}[scoped]", tag)),
            _ => {}
        }
        keys.push(tag.to_string());
        keys
    }
}

/// Find the table entry for an element, falling back to the generic entry
pub fn lookup_role(query: &RoleQuery<'_>) -> RoleInfo {
    for key in query.keys() {
        if let Some((_, info)) = HTML_ROLES.iter().find(|(k, _)| *k == key) {
            return *info;
        }
    }
    UNKNOWN_ELEMENT
}

/// How an explicit `role` attribute was treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleStatus {
    /// No explicit role; the native role applies
    Implicit,
    /// The explicit role is valid and allowed on this element
    Accepted,
    /// The explicit role is valid but not allowed here
    NotAllowed,
    /// No token of the explicit role is a known role
    Unknown,
}

/// Resolve the effective role from the table entry and the raw `role`
/// attribute. The first valid token of the attribute is considered.
pub fn resolve_role(info: &RoleInfo, explicit: Option<&str>) -> (&'static str, RoleStatus) {
    let Some(explicit) = explicit.map(str::trim).filter(|r| !r.is_empty()) else {
        return (info.default_role, RoleStatus::Implicit);
    };

    let lowered = explicit.to_ascii_lowercase();
    let Some(token) = lowered.split_whitespace().find(|t| is_valid_role(t)) else {
        return (info.default_role, RoleStatus::Unknown);
    };

    if info.no_role_allowed {
        return (info.default_role, RoleStatus::NotAllowed);
    }

    if info.any_role_allowed || token == info.default_role || info.allowed_roles.contains(&token) {
        match static_role(token) {
            Some(role) => (role, RoleStatus::Accepted),
            None => (info.default_role, RoleStatus::Unknown),
        }
    } else {
        (info.default_role, RoleStatus::NotAllowed)
    }
}

fn static_role(token: &str) -> Option<&'static str> {
    super::VALID_ROLES.iter().copied().find(|r| *r == token)
}
