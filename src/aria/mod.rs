// SPDX-License-Identifier: PMPL-1.0-or-later
//! Role and attribute reference tables.
//!
//! - [`html_roles`]: ARIA in HTML, default roles and allowed overrides per
//!   tag/attribute combination
//! - [`attributes`]: ARIA states and properties with their value types
//! - this module: the WAI-ARIA role taxonomy the cache and rules consult

pub mod attributes;
pub mod html_roles;

pub use html_roles::{lookup_role, resolve_role, RoleInfo, RoleQuery, RoleStatus};

/// Role assigned when neither an explicit nor a native role applies
pub const FALLBACK_ROLE: &str = "generic";

/// Every role defined by WAI-ARIA 1.2, Graphics ARIA and the DPUB subset used
/// in the HTML role table
const VALID_ROLES: &[&str] = &[
    "alert", "alertdialog", "application", "article", "banner", "blockquote", "button",
    "caption", "cell", "checkbox", "code", "columnheader", "combobox", "complementary",
    "contentinfo", "definition", "deletion", "dialog", "directory", "document", "emphasis",
    "feed", "figure", "form", "generic", "grid", "gridcell", "group", "heading", "img",
    "insertion", "link", "list", "listbox", "listitem", "log", "main", "marquee", "math",
    "menu", "menubar", "menuitem", "menuitemcheckbox", "menuitemradio", "meter", "navigation",
    "none", "note", "option", "paragraph", "presentation", "progressbar", "radio", "radiogroup",
    "region", "row", "rowgroup", "rowheader", "scrollbar", "search", "searchbox", "separator",
    "slider", "spinbutton", "status", "strong", "subscript", "superscript", "switch", "tab",
    "table", "tablist", "tabpanel", "term", "textbox", "time", "timer", "toolbar", "tooltip",
    "tree", "treegrid", "treeitem", "graphics-document", "graphics-object", "graphics-symbol",
    "doc-cover", "doc-pagebreak", "doc-subtitle",
];

/// Roles that are landmarks whenever they resolve
const LANDMARK_ROLES: &[&str] = &[
    "application", "banner", "complementary", "contentinfo", "main", "navigation", "search",
];

/// Roles that are landmarks only when they have an accessible name
const NAMED_LANDMARK_ROLES: &[&str] = &["form", "region"];

const WIDGET_ROLES: &[&str] = &[
    "button", "checkbox", "combobox", "grid", "gridcell", "link", "listbox", "menu", "menubar",
    "menuitem", "menuitemcheckbox", "menuitemradio", "option", "progressbar", "radio",
    "radiogroup", "scrollbar", "searchbox", "separator", "slider", "spinbutton", "switch", "tab",
    "tablist", "tabpanel", "textbox", "tree", "treegrid", "treeitem",
];

/// Widget roles whose instances must have an accessible name
const NAME_REQUIRED_ROLES: &[&str] = &[
    "button", "checkbox", "combobox", "grid", "gridcell", "link", "listbox", "menuitem",
    "menuitemcheckbox", "menuitemradio", "option", "progressbar", "radio", "radiogroup",
    "scrollbar", "searchbox", "slider", "spinbutton", "switch", "tab", "tabpanel", "textbox",
    "tree", "treegrid", "treeitem",
];

/// Roles whose accessible name may be computed from their content
const NAME_FROM_CONTENT_ROLES: &[&str] = &[
    "button", "cell", "checkbox", "columnheader", "gridcell", "heading", "link", "menuitem",
    "menuitemcheckbox", "menuitemradio", "option", "radio", "row", "rowheader", "switch", "tab",
    "tooltip", "treeitem",
];

/// Required states and properties per role
const REQUIRED_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("checkbox", &["aria-checked"]),
    ("combobox", &["aria-expanded"]),
    ("heading", &["aria-level"]),
    ("menuitemcheckbox", &["aria-checked"]),
    ("menuitemradio", &["aria-checked"]),
    ("meter", &["aria-valuenow"]),
    ("radio", &["aria-checked"]),
    ("scrollbar", &["aria-controls", "aria-valuenow"]),
    ("slider", &["aria-valuenow"]),
    ("switch", &["aria-checked"]),
];

pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

pub fn is_landmark_role(role: &str, has_name: bool) -> bool {
    LANDMARK_ROLES.contains(&role) || (has_name && NAMED_LANDMARK_ROLES.contains(&role))
}

pub fn is_widget_role(role: &str) -> bool {
    WIDGET_ROLES.contains(&role)
}

pub fn is_name_required(role: &str) -> bool {
    NAME_REQUIRED_ROLES.contains(&role)
}

pub fn allows_name_from_content(role: &str) -> bool {
    NAME_FROM_CONTENT_ROLES.contains(&role)
}

pub fn is_presentational(role: &str) -> bool {
    role == "none" || role == "presentation"
}

pub fn required_attributes(role: &str) -> &'static [&'static str] {
    REQUIRED_ATTRIBUTES
        .iter()
        .find(|(r, _)| *r == role)
        .map(|(_, attrs)| *attrs)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmarks_needing_names() {
        assert!(is_landmark_role("main", false));
        assert!(!is_landmark_role("region", false));
        assert!(is_landmark_role("region", true));
        assert!(!is_landmark_role("form", false));
        assert!(!is_landmark_role("heading", true));
    }

    #[test]
    fn test_role_tables() {
        assert!(is_valid_role("switch"));
        assert!(!is_valid_role("buton"));
        assert!(is_widget_role("slider"));
        assert!(!is_widget_role("main"));
        assert_eq!(required_attributes("slider"), &["aria-valuenow"]);
        assert!(required_attributes("button").is_empty());
        assert!(allows_name_from_content("link"));
        assert!(!allows_name_from_content("img"));
    }
}
