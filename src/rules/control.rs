// SPDX-License-Identifier: PMPL-1.0-or-later
//! Form control rules - WCAG 3.3.2 Labels or Instructions, 4.1.2 Name, Role, Value
//!
//! Checks that form controls have accessible names and that the name does
//! not rest on the `title` attribute alone:
//! - labelable controls need a label, aria-label or aria-labelledby
//! - image buttons need alt text
//! - buttons need visible content
//! - control ids must be unique so label[for] resolves

use super::{msg, RuleCategory, RuleCheck, RuleInfo, RuleScope, RuleTier};
use crate::cache::{ElementDescriptor, NameSource, SemanticCache};
use crate::engine::ResultSink;
use crate::error::RuleError;
use crate::results::Classification;
use std::collections::HashMap;

/// Input types named by their value or by a default label
const BUTTON_INPUT_TYPES: &[&str] = &["button", "image", "reset", "submit"];

const LABELABLE_TARGETS: &[&str] = &["input", "select", "textarea", "meter", "progress"];

pub static CONTROL_1: RuleInfo = RuleInfo {
    id: "CONTROL_1",
    summary: "Form controls must have accessible names",
    scope: RuleScope::Element,
    category: RuleCategory::Forms,
    tier: RuleTier::Triage,
    required: true,
    wcag_primary: "3.3.2",
    wcag_related: &["1.3.1", "2.4.6", "4.1.2"],
    target_resources: LABELABLE_TARGETS,
    requires_attribute: None,
    messages: &[
        msg("ELEMENT_PASS_1", 2),
        msg("ELEMENT_FAIL_1", 1),
        msg("ELEMENT_HIDDEN_1", 1),
    ],
};

pub static CONTROL_2: RuleInfo = RuleInfo {
    id: "CONTROL_2",
    summary: "Image inputs must have accessible names",
    scope: RuleScope::Element,
    category: RuleCategory::Forms,
    tier: RuleTier::Triage,
    required: true,
    wcag_primary: "3.3.2",
    wcag_related: &["1.1.1", "4.1.2"],
    target_resources: &["input[type=\"image\"]"],
    requires_attribute: Some("alt"),
    messages: &[
        msg("ELEMENT_PASS_1", 1),
        msg("ELEMENT_FAIL_1", 0),
        msg("ELEMENT_HIDDEN_1", 0),
    ],
};

pub static CONTROL_4: RuleInfo = RuleInfo {
    id: "CONTROL_4",
    summary: "Button elements should have visible content",
    scope: RuleScope::Element,
    category: RuleCategory::Forms,
    tier: RuleTier::More,
    required: false,
    wcag_primary: "3.3.2",
    wcag_related: &["4.1.2"],
    target_resources: &["button"],
    requires_attribute: None,
    messages: &[
        msg("ELEMENT_PASS_1", 0),
        msg("ELEMENT_PASS_2", 0),
        msg("ELEMENT_FAIL_1", 0),
        msg("ELEMENT_HIDDEN_1", 0),
    ],
};

pub static CONTROL_5: RuleInfo = RuleInfo {
    id: "CONTROL_5",
    summary: "Form control ids must be unique",
    scope: RuleScope::Element,
    category: RuleCategory::Forms,
    tier: RuleTier::Triage,
    required: true,
    wcag_primary: "4.1.2",
    wcag_related: &["1.3.1"],
    target_resources: &["input", "select", "textarea", "button", "[id]"],
    requires_attribute: Some("id"),
    messages: &[
        msg("ELEMENT_PASS_1", 2),
        msg("ELEMENT_FAIL_1", 2),
        msg("ELEMENT_HIDDEN_1", 1),
    ],
};

pub static CONTROL_9: RuleInfo = RuleInfo {
    id: "CONTROL_9",
    summary: "Form controls should not be labelled by the title attribute alone",
    scope: RuleScope::Element,
    category: RuleCategory::Forms,
    tier: RuleTier::More,
    required: true,
    wcag_primary: "3.3.2",
    wcag_related: &["4.1.2"],
    target_resources: LABELABLE_TARGETS,
    requires_attribute: Some("title"),
    messages: &[
        msg("ELEMENT_PASS_1", 1),
        msg("ELEMENT_FAIL_1", 1),
        msg("ELEMENT_HIDDEN_1", 1),
    ],
};

/// Controls whose name comes from a label rather than their own value
fn is_labelable(el: &ElementDescriptor) -> bool {
    match el.tag_name.as_str() {
        "input" => !el
            .type_attr
            .as_deref()
            .map(|t| BUTTON_INPUT_TYPES.contains(&t))
            .unwrap_or(false),
        "select" | "textarea" | "meter" | "progress" => true,
        _ => false,
    }
}

fn controls<'c>(cache: &'c SemanticCache) -> impl Iterator<Item = &'c ElementDescriptor> + 'c {
    cache.members(cache.controls())
}

pub struct ControlsHaveNames;

impl RuleCheck for ControlsHaveNames {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        for el in controls(cache).filter(|e| is_labelable(e)) {
            let id = el.identifier();
            if !el.is_visible_to_at {
                sink.element(Classification::Hidden, el, "ELEMENT_HIDDEN_1", &[id.as_str()])?;
            } else if el.has_name() {
                sink.element(Classification::Pass, el, "ELEMENT_PASS_1", &[id.as_str(), el.name()])?;
            } else {
                sink.element(Classification::Fail, el, "ELEMENT_FAIL_1", &[id.as_str()])?;
            }
        }
        Ok(())
    }
}

pub struct ImageInputsHaveNames;

impl RuleCheck for ImageInputsHaveNames {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        let image_inputs = controls(cache)
            .filter(|e| e.tag_name == "input" && e.type_attr.as_deref() == Some("image"));
        for el in image_inputs {
            if !el.is_visible_to_at {
                sink.element(Classification::Hidden, el, "ELEMENT_HIDDEN_1", &[])?;
            } else if el.has_name() {
                sink.element(Classification::Pass, el, "ELEMENT_PASS_1", &[el.name()])?;
            } else {
                sink.element(Classification::Fail, el, "ELEMENT_FAIL_1", &[])?;
            }
        }
        Ok(())
    }
}

pub struct ButtonsHaveContent;

impl RuleCheck for ButtonsHaveContent {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        for el in controls(cache).filter(|e| e.tag_name == "button") {
            if !el.is_visible_on_screen {
                sink.element(Classification::Hidden, el, "ELEMENT_HIDDEN_1", &[])?;
            } else if el.has_text_content {
                sink.element(Classification::Pass, el, "ELEMENT_PASS_1", &[])?;
            } else if el.has_image_content {
                sink.element(Classification::Pass, el, "ELEMENT_PASS_2", &[])?;
            } else {
                sink.element(Classification::Fail, el, "ELEMENT_FAIL_1", &[])?;
            }
        }
        Ok(())
    }
}

pub struct UniqueIds;

impl RuleCheck for UniqueIds {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for el in cache.elements() {
            if let Some(id) = el.html_id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
                *counts.entry(id).or_default() += 1;
            }
        }

        for el in controls(cache) {
            let Some(id) = el.html_id.as_deref().map(str::trim).filter(|id| !id.is_empty()) else {
                continue;
            };
            let tag = el.tag_name.as_str();
            if !el.is_visible_to_at {
                sink.element(Classification::Hidden, el, "ELEMENT_HIDDEN_1", &[tag])?;
            } else if counts.get(id).copied().unwrap_or(0) > 1 {
                sink.element(Classification::Fail, el, "ELEMENT_FAIL_1", &[tag, id])?;
            } else {
                sink.element(Classification::Pass, el, "ELEMENT_PASS_1", &[tag, id])?;
            }
        }
        Ok(())
    }
}

pub struct TitleOnlyLabels;

impl RuleCheck for TitleOnlyLabels {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        for el in controls(cache).filter(|e| is_labelable(e) && e.has_name()) {
            let id = el.identifier();
            if !el.is_visible_to_at {
                sink.element(Classification::Hidden, el, "ELEMENT_HIDDEN_1", &[id.as_str()])?;
            } else if el.accessible_name.source == NameSource::Title {
                sink.element(Classification::Fail, el, "ELEMENT_FAIL_1", &[id.as_str()])?;
            } else {
                sink.element(Classification::Pass, el, "ELEMENT_PASS_1", &[id.as_str()])?;
            }
        }
        Ok(())
    }
}
