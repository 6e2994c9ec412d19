// SPDX-License-Identifier: PMPL-1.0-or-later
//! Widget rules - WCAG 4.1.2 Name, Role, Value
//!
//! ARIA widgets must be named, use valid roles, and carry the states and
//! properties their role requires with values of the right type.

use super::{msg, RuleCategory, RuleCheck, RuleInfo, RuleScope, RuleTier};
use crate::aria::{self, RoleStatus};
use crate::cache::{ElementDescriptor, SemanticCache};
use crate::engine::ResultSink;
use crate::error::RuleError;
use crate::results::Classification;

pub static WIDGET_1: RuleInfo = RuleInfo {
    id: "WIDGET_1",
    summary: "Widgets must have accessible names",
    scope: RuleScope::Element,
    category: RuleCategory::WidgetsScripts,
    tier: RuleTier::Triage,
    required: true,
    wcag_primary: "4.1.2",
    wcag_related: &[],
    target_resources: &["[role]"],
    requires_attribute: Some("role"),
    messages: &[
        msg("ELEMENT_PASS_1", 2),
        msg("ELEMENT_FAIL_1", 1),
        msg("ELEMENT_HIDDEN_1", 1),
    ],
};

pub static WIDGET_2: RuleInfo = RuleInfo {
    id: "WIDGET_2",
    summary: "Elements with click handlers must have widget roles",
    scope: RuleScope::Element,
    category: RuleCategory::WidgetsScripts,
    tier: RuleTier::Triage,
    required: true,
    wcag_primary: "4.1.2",
    wcag_related: &["2.1.1"],
    target_resources: &["[onclick]"],
    requires_attribute: Some("onclick"),
    messages: &[
        msg("ELEMENT_PASS_1", 2),
        msg("ELEMENT_FAIL_1", 1),
        msg("ELEMENT_HIDDEN_1", 1),
    ],
};

pub static WIDGET_3: RuleInfo = RuleInfo {
    id: "WIDGET_3",
    summary: "Role attribute values must be valid and allowed on the element",
    scope: RuleScope::Element,
    category: RuleCategory::WidgetsScripts,
    tier: RuleTier::Triage,
    required: true,
    wcag_primary: "4.1.2",
    wcag_related: &[],
    target_resources: &["[role]"],
    requires_attribute: Some("role"),
    messages: &[
        msg("ELEMENT_PASS_1", 1),
        msg("ELEMENT_FAIL_1", 1),
        msg("ELEMENT_FAIL_2", 2),
        msg("ELEMENT_HIDDEN_1", 1),
    ],
};

pub static WIDGET_4: RuleInfo = RuleInfo {
    id: "WIDGET_4",
    summary: "ARIA attribute values must be valid",
    scope: RuleScope::Element,
    category: RuleCategory::WidgetsScripts,
    tier: RuleTier::More,
    required: true,
    wcag_primary: "4.1.2",
    wcag_related: &[],
    target_resources: &["[aria-*]"],
    requires_attribute: None,
    messages: &[
        msg("ELEMENT_PASS_1", 2),
        msg("ELEMENT_FAIL_1", 2),
        msg("ELEMENT_HIDDEN_1", 1),
    ],
};

pub static WIDGET_5: RuleInfo = RuleInfo {
    id: "WIDGET_5",
    summary: "ARIA attributes must be defined states or properties",
    scope: RuleScope::Element,
    category: RuleCategory::WidgetsScripts,
    tier: RuleTier::More,
    required: true,
    wcag_primary: "4.1.2",
    wcag_related: &[],
    target_resources: &["[aria-*]"],
    requires_attribute: None,
    messages: &[
        msg("ELEMENT_PASS_1", 1),
        msg("ELEMENT_FAIL_1", 1),
        msg("ELEMENT_HIDDEN_1", 1),
    ],
};

pub static WIDGET_6: RuleInfo = RuleInfo {
    id: "WIDGET_6",
    summary: "Widgets must have the properties their role requires",
    scope: RuleScope::Element,
    category: RuleCategory::WidgetsScripts,
    tier: RuleTier::More,
    required: true,
    wcag_primary: "4.1.2",
    wcag_related: &[],
    target_resources: &["[role]"],
    requires_attribute: Some("role"),
    messages: &[
        msg("ELEMENT_PASS_1", 1),
        msg("ELEMENT_FAIL_1", 2),
        msg("ELEMENT_HIDDEN_1", 1),
    ],
};

fn with_aria_attributes(cache: &SemanticCache) -> impl Iterator<Item = &ElementDescriptor> + '_ {
    cache.elements().iter().filter(|e| !e.aria_attributes.is_empty())
}

pub struct WidgetsHaveNames;

impl RuleCheck for WidgetsHaveNames {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        let widgets = cache
            .members(cache.widgets())
            .filter(|e| aria::is_name_required(e.resolved_role));
        for el in widgets {
            let role = el.resolved_role;
            if !el.is_visible_to_at {
                sink.element(Classification::Hidden, el, "ELEMENT_HIDDEN_1", &[role])?;
            } else if el.has_name() {
                sink.element(Classification::Pass, el, "ELEMENT_PASS_1", &[role, el.name()])?;
            } else {
                sink.element(Classification::Fail, el, "ELEMENT_FAIL_1", &[role])?;
            }
        }
        Ok(())
    }
}

pub struct ClickHandlersHaveRoles;

impl RuleCheck for ClickHandlersHaveRoles {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        for el in cache.elements().iter().filter(|e| e.has_attr("onclick")) {
            let tag = el.tag_name.as_str();
            if !el.is_visible_on_screen {
                sink.element(Classification::Hidden, el, "ELEMENT_HIDDEN_1", &[tag])?;
            } else if aria::is_widget_role(el.resolved_role) {
                sink.element(Classification::Pass, el, "ELEMENT_PASS_1", &[tag, el.resolved_role])?;
            } else {
                sink.element(Classification::Fail, el, "ELEMENT_FAIL_1", &[tag])?;
            }
        }
        Ok(())
    }
}

pub struct ValidRoles;

impl RuleCheck for ValidRoles {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        for el in cache.elements() {
            let Some(role) = el.explicit_role.as_deref() else { continue };
            if !el.is_visible_to_at {
                sink.element(Classification::Hidden, el, "ELEMENT_HIDDEN_1", &[role])?;
                continue;
            }
            match el.role_status {
                RoleStatus::Unknown => sink.element(Classification::Fail, el, "ELEMENT_FAIL_1", &[role])?,
                RoleStatus::NotAllowed => {
                    sink.element(Classification::Fail, el, "ELEMENT_FAIL_2", &[role, el.tag_name.as_str()])?
                }
                RoleStatus::Accepted | RoleStatus::Implicit => {
                    sink.element(Classification::Pass, el, "ELEMENT_PASS_1", &[el.resolved_role])?
                }
            }
        }
        Ok(())
    }
}

pub struct ValidAttributeValues;

impl RuleCheck for ValidAttributeValues {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        for el in with_aria_attributes(cache) {
            if !el.is_visible_to_at {
                sink.element(Classification::Hidden, el, "ELEMENT_HIDDEN_1", &[el.tag_name.as_str()])?;
                continue;
            }
            for attr in el.aria_attributes.iter().filter(|a| a.is_defined) {
                let args = [attr.name.as_str(), attr.value.as_str()];
                if attr.is_valid {
                    sink.element(Classification::Pass, el, "ELEMENT_PASS_1", &args)?;
                } else {
                    sink.element(Classification::Fail, el, "ELEMENT_FAIL_1", &args)?;
                }
            }
        }
        Ok(())
    }
}

pub struct DefinedAttributes;

impl RuleCheck for DefinedAttributes {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        for el in with_aria_attributes(cache) {
            if !el.is_visible_to_at {
                sink.element(Classification::Hidden, el, "ELEMENT_HIDDEN_1", &[el.tag_name.as_str()])?;
                continue;
            }
            for attr in &el.aria_attributes {
                if attr.is_defined {
                    sink.element(Classification::Pass, el, "ELEMENT_PASS_1", &[attr.name.as_str()])?;
                } else {
                    sink.element(Classification::Fail, el, "ELEMENT_FAIL_1", &[attr.name.as_str()])?;
                }
            }
        }
        Ok(())
    }
}

pub struct RequiredProperties;

impl RuleCheck for RequiredProperties {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        // Native elements supply their own states, so only roles that
        // override the default are checked
        let targets = cache.elements().iter().filter(|e| {
            e.role_status == RoleStatus::Accepted
                && e.resolved_role != e.default_role
                && !aria::required_attributes(e.resolved_role).is_empty()
        });

        for el in targets {
            let role = el.resolved_role;
            if !el.is_visible_to_at {
                sink.element(Classification::Hidden, el, "ELEMENT_HIDDEN_1", &[role])?;
                continue;
            }
            let missing: Vec<&str> = aria::required_attributes(role)
                .iter()
                .copied()
                .filter(|required| !el.aria_attributes.iter().any(|a| a.name == *required))
                .collect();
            if missing.is_empty() {
                sink.element(Classification::Pass, el, "ELEMENT_PASS_1", &[role])?;
            } else {
                sink.element(Classification::Fail, el, "ELEMENT_FAIL_1", &[role, missing.join(", ").as_str()])?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{messages, run};

    #[test]
    fn test_unnamed_widget_fails() {
        let html = r#"<body><div role="button" tabindex="0">Save</div><div role="slider" aria-valuenow="3"></div></body>"#;
        let result = run(&WIDGET_1, WidgetsHaveNames, html);
        assert_eq!(messages(&result), vec![
            (Classification::Pass, "ELEMENT_PASS_1"),
            (Classification::Fail, "ELEMENT_FAIL_1"),
        ]);
        assert_eq!(result.node_results[0].args, vec!["button", "Save"]);
    }

    #[test]
    fn test_click_handler_without_role() {
        let html = r#"<body><div onclick="go()">Go</div><button onclick="save()">Save</button></body>"#;
        let result = run(&WIDGET_2, ClickHandlersHaveRoles, html);
        assert_eq!(messages(&result), vec![
            (Classification::Fail, "ELEMENT_FAIL_1"),
            (Classification::Pass, "ELEMENT_PASS_1"),
        ]);
        assert_eq!(result.node_results[1].args, vec!["button", "button"]);
    }

    #[test]
    fn test_unknown_and_disallowed_roles() {
        let html = r#"<body><div role="bogus">a</div><div role="navigation">b</div><input type="text" role="heading"></body>"#;
        let result = run(&WIDGET_3, ValidRoles, html);
        assert_eq!(messages(&result), vec![
            (Classification::Fail, "ELEMENT_FAIL_1"),
            (Classification::Pass, "ELEMENT_PASS_1"),
            (Classification::Fail, "ELEMENT_FAIL_2"),
        ]);
        assert_eq!(result.node_results[2].args, vec!["heading", "input"]);
    }

    #[test]
    fn test_attribute_values() {
        let html = r#"<body><button aria-expanded="maybe" aria-pressed="true">x</button></body>"#;
        let result = run(&WIDGET_4, ValidAttributeValues, html);
        assert_eq!(messages(&result), vec![
            (Classification::Fail, "ELEMENT_FAIL_1"),
            (Classification::Pass, "ELEMENT_PASS_1"),
        ]);
        assert_eq!(result.node_results[0].args, vec!["aria-expanded", "maybe"]);
    }

    #[test]
    fn test_misspelled_attribute() {
        let html = r#"<body><input aria-labeledby="x" aria-required="true"></body>"#;
        let result = run(&WIDGET_5, DefinedAttributes, html);
        assert_eq!(messages(&result), vec![
            (Classification::Fail, "ELEMENT_FAIL_1"),
            (Classification::Pass, "ELEMENT_PASS_1"),
        ]);
    }

    #[test]
    fn test_required_properties() {
        let html = r#"<body><div role="checkbox" tabindex="0">Agree</div>
            <span role="switch" aria-checked="false">Wifi</span>
            <input type="checkbox"></body>"#;
        let result = run(&WIDGET_6, RequiredProperties, html);
        assert_eq!(messages(&result), vec![
            (Classification::Fail, "ELEMENT_FAIL_1"),
            (Classification::Pass, "ELEMENT_PASS_1"),
        ]);
        assert_eq!(result.node_results[0].args, vec!["checkbox", "aria-checked"]);
    }
}
