// SPDX-License-Identifier: PMPL-1.0-or-later
//! ARIA states and properties and the value types they accept.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Boolean,
    /// true | false | mixed
    Tristate,
    /// true | false | undefined
    TrueFalseUndefined,
    IdRef,
    IdRefs,
    Integer,
    Number,
    String,
    Token(&'static [&'static str]),
    TokenList(&'static [&'static str]),
}

const ATTRIBUTES: &[(&str, ValueType)] = &[
    ("aria-activedescendant", ValueType::IdRef),
    ("aria-atomic", ValueType::Boolean),
    ("aria-autocomplete", ValueType::Token(&["inline", "list", "both", "none"])),
    ("aria-braillelabel", ValueType::String),
    ("aria-brailleroledescription", ValueType::String),
    ("aria-busy", ValueType::Boolean),
    ("aria-checked", ValueType::Tristate),
    ("aria-colcount", ValueType::Integer),
    ("aria-colindex", ValueType::Integer),
    ("aria-colindextext", ValueType::String),
    ("aria-colspan", ValueType::Integer),
    ("aria-controls", ValueType::IdRefs),
    ("aria-current", ValueType::Token(&["page", "step", "location", "date", "time", "true", "false"])),
    ("aria-describedby", ValueType::IdRefs),
    ("aria-description", ValueType::String),
    ("aria-details", ValueType::IdRef),
    ("aria-disabled", ValueType::Boolean),
    ("aria-dropeffect", ValueType::TokenList(&["copy", "execute", "link", "move", "none", "popup"])),
    ("aria-errormessage", ValueType::IdRef),
    ("aria-expanded", ValueType::TrueFalseUndefined),
    ("aria-flowto", ValueType::IdRefs),
    ("aria-grabbed", ValueType::TrueFalseUndefined),
    ("aria-haspopup", ValueType::Token(&["false", "true", "menu", "listbox", "tree", "grid", "dialog"])),
    ("aria-hidden", ValueType::TrueFalseUndefined),
    ("aria-invalid", ValueType::Token(&["grammar", "false", "spelling", "true"])),
    ("aria-keyshortcuts", ValueType::String),
    ("aria-label", ValueType::String),
    ("aria-labelledby", ValueType::IdRefs),
    ("aria-level", ValueType::Integer),
    ("aria-live", ValueType::Token(&["assertive", "off", "polite"])),
    ("aria-modal", ValueType::Boolean),
    ("aria-multiline", ValueType::Boolean),
    ("aria-multiselectable", ValueType::Boolean),
    ("aria-orientation", ValueType::Token(&["horizontal", "vertical", "undefined"])),
    ("aria-owns", ValueType::IdRefs),
    ("aria-placeholder", ValueType::String),
    ("aria-posinset", ValueType::Integer),
    ("aria-pressed", ValueType::Tristate),
    ("aria-readonly", ValueType::Boolean),
    ("aria-relevant", ValueType::TokenList(&["additions", "all", "removals", "text"])),
    ("aria-required", ValueType::Boolean),
    ("aria-roledescription", ValueType::String),
    ("aria-rowcount", ValueType::Integer),
    ("aria-rowindex", ValueType::Integer),
    ("aria-rowindextext", ValueType::String),
    ("aria-rowspan", ValueType::Integer),
    ("aria-selected", ValueType::TrueFalseUndefined),
    ("aria-setsize", ValueType::Integer),
    ("aria-sort", ValueType::Token(&["ascending", "descending", "none", "other"])),
    ("aria-valuemax", ValueType::Number),
    ("aria-valuemin", ValueType::Number),
    ("aria-valuenow", ValueType::Number),
    ("aria-valuetext", ValueType::String),
];

/// One `aria-*` attribute as written on an element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AriaAttribute {
    pub name: String,
    pub value: String,
    /// The name is a defined ARIA state or property
    pub is_defined: bool,
    /// The value matches the attribute's value type
    pub is_valid: bool,
}

impl AriaAttribute {
    pub fn new(name: &str, value: &str) -> Self {
        let name = name.to_ascii_lowercase();
        let value_type = value_type(&name);
        let is_valid = value_type.map(|t| is_valid_value(t, value)).unwrap_or(false);
        Self {
            name,
            value: value.to_string(),
            is_defined: value_type.is_some(),
            is_valid,
        }
    }
}

pub fn value_type(name: &str) -> Option<ValueType> {
    ATTRIBUTES.iter().find(|(n, _)| *n == name).map(|(_, t)| *t)
}

pub fn is_valid_value(value_type: ValueType, value: &str) -> bool {
    let v = value.trim().to_ascii_lowercase();
    match value_type {
        ValueType::Boolean => v == "true" || v == "false",
        ValueType::Tristate => matches!(v.as_str(), "true" | "false" | "mixed"),
        ValueType::TrueFalseUndefined => matches!(v.as_str(), "true" | "false" | "undefined"),
        ValueType::IdRef => !v.is_empty() && !v.contains(char::is_whitespace),
        ValueType::IdRefs => !v.is_empty(),
        ValueType::Integer => v.parse::<i64>().is_ok(),
        ValueType::Number => v.parse::<f64>().map(|n| n.is_finite()).unwrap_or(false),
        ValueType::String => true,
        ValueType::Token(tokens) => tokens.contains(&v.as_str()),
        ValueType::TokenList(tokens) => {
            !v.is_empty() && v.split_whitespace().all(|t| tokens.contains(&t))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defined_and_valid() {
        let attr = AriaAttribute::new("aria-expanded", "TRUE");
        assert!(attr.is_defined && attr.is_valid);

        let attr = AriaAttribute::new("aria-expanded", "yes");
        assert!(attr.is_defined && !attr.is_valid);

        let attr = AriaAttribute::new("aria-labeledby", "x");
        assert!(!attr.is_defined && !attr.is_valid);
    }

    #[test]
    fn test_value_types() {
        assert!(is_valid_value(ValueType::Integer, "3"));
        assert!(!is_valid_value(ValueType::Integer, "3.5"));
        assert!(is_valid_value(ValueType::Number, "3.5"));
        assert!(!is_valid_value(ValueType::IdRef, "a b"));
        assert!(is_valid_value(ValueType::TokenList(&["additions", "text"]), "additions text"));
        assert!(!is_valid_value(ValueType::Token(&["polite"]), "rude"));
    }
}
