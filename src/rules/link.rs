// SPDX-License-Identifier: PMPL-1.0-or-later
//! Link rules - WCAG 2.4.4 Link Purpose (In Context)
//!
//! Links need a name, and links sharing a name should lead to the same place.

use super::{msg, RuleCategory, RuleCheck, RuleInfo, RuleScope, RuleTier};
use crate::cache::{ElementDescriptor, SemanticCache};
use crate::engine::ResultSink;
use crate::error::RuleError;
use crate::results::Classification;
use std::collections::BTreeMap;

const LINK_TARGETS: &[&str] = &["a[href]", "area[href]", "[role=\"link\"]"];

pub static LINK_1: RuleInfo = RuleInfo {
    id: "LINK_1",
    summary: "Links must have an accessible name",
    scope: RuleScope::Element,
    category: RuleCategory::Links,
    tier: RuleTier::Triage,
    required: true,
    wcag_primary: "2.4.4",
    wcag_related: &["4.1.2"],
    target_resources: LINK_TARGETS,
    requires_attribute: None,
    messages: &[
        msg("ELEMENT_PASS_1", 1),
        msg("ELEMENT_FAIL_1", 0),
        msg("ELEMENT_HIDDEN_1", 0),
    ],
};

pub static LINK_2: RuleInfo = RuleInfo {
    id: "LINK_2",
    summary: "Links with the same name should point to the same resource",
    scope: RuleScope::Element,
    category: RuleCategory::Links,
    tier: RuleTier::More,
    required: false,
    wcag_primary: "2.4.4",
    wcag_related: &["2.4.9"],
    target_resources: LINK_TARGETS,
    requires_attribute: Some("href"),
    messages: &[
        msg("ELEMENT_PASS_1", 1),
        msg("ELEMENT_MC_1", 1),
        msg("ELEMENT_HIDDEN_1", 0),
    ],
};

fn links<'c>(cache: &'c SemanticCache) -> impl Iterator<Item = &'c ElementDescriptor> + 'c {
    cache.members(cache.links())
}

pub struct LinksHaveNames;

impl RuleCheck for LinksHaveNames {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        for el in links(cache) {
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

pub struct SameNameDifferentTarget;

impl RuleCheck for SameNameDifferentTarget {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        for el in links(cache).filter(|e| !e.is_visible_to_at && e.has_name()) {
            sink.element(Classification::Hidden, el, "ELEMENT_HIDDEN_1", &[])?;
        }

        // Keyed by lowercased name; BTreeMap keeps output order stable
        let mut by_name: BTreeMap<String, Vec<&ElementDescriptor>> = BTreeMap::new();
        for el in links(cache).filter(|e| e.is_visible_to_at && e.has_name()) {
            by_name.entry(el.name().to_lowercase()).or_default().push(el);
        }

        for group in by_name.values().filter(|g| g.len() > 1) {
            let first_href = group[0].attr("href").map(str::trim).unwrap_or("");
            let same_target = group
                .iter()
                .all(|el| el.attr("href").map(str::trim).unwrap_or("") == first_href);
            for el in group {
                if same_target {
                    sink.element(Classification::Pass, el, "ELEMENT_PASS_1", &[el.name()])?;
                } else {
                    sink.element(Classification::ManualCheck, el, "ELEMENT_MC_1", &[el.name()])?;
                }
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
    fn test_named_and_empty_links() {
        let html = r#"<body><a href="/about">About us</a><a href="/x"><img src="x.png"></a><a href="/y" aria-hidden="true">Hidden</a></body>"#;
        let result = run(&LINK_1, LinksHaveNames, html);
        assert_eq!(messages(&result), vec![
            (Classification::Pass, "ELEMENT_PASS_1"),
            (Classification::Fail, "ELEMENT_FAIL_1"),
            (Classification::Hidden, "ELEMENT_HIDDEN_1"),
        ]);
        assert_eq!(result.node_results[0].args, vec!["About us"]);
    }

    #[test]
    fn test_anchor_without_href_is_not_a_link() {
        let result = run(&LINK_1, LinksHaveNames, "<body><a name=\"top\">Top</a></body>");
        assert_eq!(messages(&result), vec![(Classification::NotApplicable, "RULE_NA_1")]);
    }

    #[test]
    fn test_same_name_different_targets() {
        let html = r#"<body>
            <a href="/a">Read more</a><a href="/b">read more</a>
            <a href="/c">Contact</a><a href="/c">Contact</a>
            <a href="/d">Unique</a></body>"#;
        let result = run(&LINK_2, SameNameDifferentTarget, html);
        assert_eq!(messages(&result), vec![
            (Classification::Pass, "ELEMENT_PASS_1"),
            (Classification::Pass, "ELEMENT_PASS_1"),
            (Classification::ManualCheck, "ELEMENT_MC_1"),
            (Classification::ManualCheck, "ELEMENT_MC_1"),
        ]);
    }
}
