// SPDX-License-Identifier: PMPL-1.0-or-later
//! List rules - WCAG 1.3.1 Info and Relationships, 2.4.6 Headings and Labels
//!
//! List markup tells AT users how many items follow. Whether a list is
//! really a list is a judgement call, so these rules only ask for review.

use super::{msg, RuleCategory, RuleCheck, RuleInfo, RuleScope, RuleTier};
use crate::cache::SemanticCache;
use crate::engine::ResultSink;
use crate::error::RuleError;
use crate::results::Classification;

pub static LIST_1: RuleInfo = RuleInfo {
    id: "LIST_1",
    summary: "List markup should be used for lists of related items",
    scope: RuleScope::Page,
    category: RuleCategory::StylesReadability,
    tier: RuleTier::More,
    required: true,
    wcag_primary: "1.3.1",
    wcag_related: &[],
    target_resources: &["ul", "ol", "li", "[role=\"list\"]", "[role=\"listitem\"]"],
    requires_attribute: None,
    messages: &[
        msg("PAGE_MC_1", 1),
        msg("ELEMENT_MC_1", 2),
        msg("ELEMENT_MC_2", 1),
        msg("ELEMENT_HIDDEN_1", 1),
    ],
};

pub static LIST_2: RuleInfo = RuleInfo {
    id: "LIST_2",
    summary: "Lists may benefit from an accessible name",
    scope: RuleScope::Element,
    category: RuleCategory::StylesReadability,
    tier: RuleTier::All,
    required: true,
    wcag_primary: "2.4.6",
    wcag_related: &["1.3.1"],
    target_resources: &["ul", "ol", "[role=\"list\"]"],
    requires_attribute: None,
    messages: &[
        msg("ELEMENT_MC_1", 2),
        msg("ELEMENT_MC_2", 1),
        msg("ELEMENT_HIDDEN_1", 1),
    ],
};

pub struct ListMarkup;

impl RuleCheck for ListMarkup {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        let mut reviewed = 0;
        let targets = cache
            .elements()
            .iter()
            .filter(|e| matches!(e.resolved_role, "list" | "listitem"));

        for el in targets {
            let tag = el.tag_name.as_str();
            if !el.is_visible_to_at {
                sink.element(Classification::Hidden, el, "ELEMENT_HIDDEN_1", &[tag])?;
                continue;
            }
            reviewed += 1;
            if el.resolved_role == "listitem" {
                sink.element(Classification::ManualCheck, el, "ELEMENT_MC_2", &[tag])?;
            } else {
                let items = cache
                    .lists()
                    .iter()
                    .find(|l| l.element == el.id)
                    .map(|l| l.item_count)
                    .unwrap_or(0);
                sink.element(Classification::ManualCheck, el, "ELEMENT_MC_1", &[tag, items.to_string().as_str()])?;
            }
        }

        if reviewed > 0 {
            sink.page(Classification::ManualCheck, "PAGE_MC_1", &[reviewed.to_string().as_str()])?;
        }
        Ok(())
    }
}

pub struct ListNames;

impl RuleCheck for ListNames {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        for el in cache.lists().iter().filter_map(|l| cache.element(l.element)) {
            let tag = el.tag_name.as_str();
            if !el.is_visible_to_at {
                sink.element(Classification::Hidden, el, "ELEMENT_HIDDEN_1", &[tag])?;
            } else if el.has_name() {
                sink.element(Classification::ManualCheck, el, "ELEMENT_MC_1", &[tag, el.name()])?;
            } else {
                sink.element(Classification::ManualCheck, el, "ELEMENT_MC_2", &[tag])?;
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
    fn test_visible_lists_and_items_need_review() {
        let html = r#"<body><ul><li>Tea</li><li>Milk</li></ul>
            <ol hidden><li>gone</li></ol></body>"#;
        let result = run(&LIST_1, ListMarkup, html);
        assert_eq!(messages(&result), vec![
            (Classification::ManualCheck, "ELEMENT_MC_1"),
            (Classification::ManualCheck, "ELEMENT_MC_2"),
            (Classification::ManualCheck, "ELEMENT_MC_2"),
            (Classification::Hidden, "ELEMENT_HIDDEN_1"),
            (Classification::Hidden, "ELEMENT_HIDDEN_1"),
            (Classification::ManualCheck, "PAGE_MC_1"),
        ]);
        assert_eq!(result.node_results[0].args, vec!["ul", "2"]);
        assert_eq!(result.node_results[5].args, vec!["3"]);
    }

    #[test]
    fn test_nested_list_items_counted_per_list() {
        let html = r#"<body><ul><li>a<ol><li>x</li><li>y</li><li>z</li></ol></li></ul></body>"#;
        let result = run(&LIST_1, ListMarkup, html);
        let list_args: Vec<&Vec<String>> = result
            .node_results
            .iter()
            .filter(|r| r.message_id == "ELEMENT_MC_1")
            .map(|r| &r.args)
            .collect();
        assert_eq!(list_args, vec![&vec!["ul".to_string(), "1".to_string()], &vec!["ol".to_string(), "3".to_string()]]);
    }

    #[test]
    fn test_no_lists_not_applicable() {
        let result = run(&LIST_1, ListMarkup, "<body><p>Plain</p></body>");
        assert_eq!(messages(&result), vec![(Classification::NotApplicable, "RULE_NA_1")]);
    }

    #[test]
    fn test_list_names() {
        let html = r#"<body><ul aria-label="Ingredients"><li>a</li></ul><ol><li>b</li></ol>
            <div role="list" style="display:none"><div role="listitem">c</div></div></body>"#;
        let result = run(&LIST_2, ListNames, html);
        assert_eq!(messages(&result), vec![
            (Classification::ManualCheck, "ELEMENT_MC_1"),
            (Classification::ManualCheck, "ELEMENT_MC_2"),
            (Classification::Hidden, "ELEMENT_HIDDEN_1"),
        ]);
        assert_eq!(result.node_results[0].args, vec!["ul", "Ingredients"]);
    }
}
