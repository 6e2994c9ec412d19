// SPDX-License-Identifier: PMPL-1.0-or-later
//! Heading rules - WCAG 1.3.1 Info and Relationships, 2.4.6 Headings and Labels
//!
//! - A page should have a level one heading, inside main or banner
//! - Heading levels must not skip when going deeper (h2 -> h4)
//! - Headings need text content

use super::{msg, RuleCategory, RuleCheck, RuleInfo, RuleScope, RuleTier};
use crate::cache::{ElementDescriptor, SemanticCache};
use crate::engine::ResultSink;
use crate::error::RuleError;
use crate::results::Classification;

const HEADING_TARGETS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6", "[role=\"heading\"]"];

pub static HEADING_1: RuleInfo = RuleInfo {
    id: "HEADING_1",
    summary: "Page should contain at least one h1 element",
    scope: RuleScope::Page,
    category: RuleCategory::Headings,
    tier: RuleTier::Triage,
    required: false,
    wcag_primary: "2.4.1",
    wcag_related: &["1.3.1", "2.4.6"],
    target_resources: &["h1"],
    requires_attribute: None,
    messages: &[
        msg("PAGE_PASS_1", 1),
        msg("PAGE_FAIL_1", 0),
        msg("ELEMENT_PASS_1", 0),
        msg("ELEMENT_HIDDEN_1", 0),
    ],
};

pub static HEADING_2: RuleInfo = RuleInfo {
    id: "HEADING_2",
    summary: "Level one headings should be inside the main or banner landmark",
    scope: RuleScope::Element,
    category: RuleCategory::Headings,
    tier: RuleTier::More,
    required: false,
    wcag_primary: "2.4.6",
    wcag_related: &["1.3.1"],
    target_resources: &["h1"],
    requires_attribute: None,
    messages: &[
        msg("ELEMENT_PASS_1", 1),
        msg("ELEMENT_FAIL_1", 0),
        msg("ELEMENT_HIDDEN_1", 0),
    ],
};

pub static HEADING_5: RuleInfo = RuleInfo {
    id: "HEADING_5",
    summary: "Headings must be properly nested",
    scope: RuleScope::Page,
    category: RuleCategory::Headings,
    tier: RuleTier::More,
    required: true,
    wcag_primary: "1.3.1",
    wcag_related: &["2.4.6"],
    target_resources: HEADING_TARGETS,
    requires_attribute: None,
    messages: &[
        msg("PAGE_PASS_1", 0),
        msg("PAGE_FAIL_1", 1),
        msg("ELEMENT_PASS_1", 1),
        msg("ELEMENT_FAIL_1", 2),
        msg("ELEMENT_HIDDEN_1", 1),
    ],
};

pub static HEADING_6: RuleInfo = RuleInfo {
    id: "HEADING_6",
    summary: "Headings should have text content",
    scope: RuleScope::Element,
    category: RuleCategory::Headings,
    tier: RuleTier::All,
    required: false,
    wcag_primary: "1.3.1",
    wcag_related: &["2.4.6"],
    target_resources: HEADING_TARGETS,
    requires_attribute: None,
    messages: &[
        msg("ELEMENT_PASS_1", 1),
        msg("ELEMENT_PASS_2", 1),
        msg("ELEMENT_FAIL_1", 1),
        msg("ELEMENT_HIDDEN_1", 1),
    ],
};

fn headings(cache: &SemanticCache) -> impl Iterator<Item = (&ElementDescriptor, u8)> + '_ {
    cache
        .headings()
        .iter()
        .filter_map(move |h| cache.element(h.element).map(|el| (el, h.level)))
}

/// Roles of all landmarks enclosing `el`, innermost first
fn enclosing_landmarks<'c>(cache: &'c SemanticCache, el: &ElementDescriptor) -> impl Iterator<Item = &'static str> + 'c {
    std::iter::successors(el.parent_landmark.and_then(|id| cache.element(id)), move |lm| {
        lm.parent_landmark.and_then(|id| cache.element(id))
    })
    .map(|lm| lm.resolved_role)
}

pub struct PageHasH1;

impl RuleCheck for PageHasH1 {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        let h1s: Vec<&ElementDescriptor> = headings(cache)
            .filter(|(_, level)| *level == 1)
            .map(|(el, _)| el)
            .collect();
        let visible = h1s.iter().filter(|h| h.is_visible_to_at).count();

        if visible > 0 {
            sink.page(Classification::Pass, "PAGE_PASS_1", &[visible.to_string().as_str()])?;
        } else {
            sink.page(Classification::Fail, "PAGE_FAIL_1", &[])?;
        }

        for h1 in h1s {
            if h1.is_visible_to_at {
                sink.element(Classification::Pass, h1, "ELEMENT_PASS_1", &[])?;
            } else {
                sink.element(Classification::Hidden, h1, "ELEMENT_HIDDEN_1", &[])?;
            }
        }
        Ok(())
    }
}

pub struct H1InMainOrBanner;

impl RuleCheck for H1InMainOrBanner {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        for (el, _) in headings(cache).filter(|(_, level)| *level == 1) {
            if !el.is_visible_to_at {
                sink.element(Classification::Hidden, el, "ELEMENT_HIDDEN_1", &[])?;
                continue;
            }
            match enclosing_landmarks(cache, el).find(|r| *r == "main" || *r == "banner") {
                Some(role) => sink.element(Classification::Pass, el, "ELEMENT_PASS_1", &[role])?,
                None => sink.element(Classification::Fail, el, "ELEMENT_FAIL_1", &[])?,
            }
        }
        Ok(())
    }
}

pub struct HeadingNesting;

impl RuleCheck for HeadingNesting {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        let mut failures = 0;
        let mut visible = 0;

        // Collect details first; the page verdict is recorded ahead of them
        let mut details = Vec::new();
        for (el, level) in headings(cache) {
            let level_arg = level.to_string();
            if !el.is_visible_to_at {
                details.push((Classification::Hidden, el, "ELEMENT_HIDDEN_1", vec![level_arg]));
                continue;
            }
            visible += 1;
            match el.parent_heading_level {
                Some(previous) if level > previous.saturating_add(1) => {
                    failures += 1;
                    details.push((Classification::Fail, el, "ELEMENT_FAIL_1", vec![level_arg, previous.to_string()]));
                }
                _ => details.push((Classification::Pass, el, "ELEMENT_PASS_1", vec![level_arg])),
            }
        }

        if failures > 0 {
            sink.page(Classification::Fail, "PAGE_FAIL_1", &[failures.to_string().as_str()])?;
        } else if visible > 0 {
            sink.page(Classification::Pass, "PAGE_PASS_1", &[])?;
        }

        for (classification, el, message_id, args) in details {
            let args: Vec<&str> = args.iter().map(String::as_str).collect();
            sink.element(classification, el, message_id, &args)?;
        }
        Ok(())
    }
}

pub struct HeadingsHaveText;

impl RuleCheck for HeadingsHaveText {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        for (el, _) in headings(cache) {
            let tag = el.tag_name.as_str();
            if !el.is_visible_to_at {
                sink.element(Classification::Hidden, el, "ELEMENT_HIDDEN_1", &[tag])?;
            } else if el.has_text_content {
                sink.element(Classification::Pass, el, "ELEMENT_PASS_1", &[tag])?;
            } else if el.has_image_content && el.has_name() {
                sink.element(Classification::Pass, el, "ELEMENT_PASS_2", &[tag])?;
            } else {
                sink.element(Classification::Fail, el, "ELEMENT_FAIL_1", &[tag])?;
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
    fn test_page_without_h1() {
        let result = run(&HEADING_1, PageHasH1, "<body><h2>Sub</h2></body>");
        assert_eq!(messages(&result), vec![(Classification::Fail, "PAGE_FAIL_1")]);
    }

    #[test]
    fn test_page_with_visible_and_hidden_h1() {
        let result = run(&HEADING_1, PageHasH1, r#"<body><h1>Title</h1><h1 hidden>Old</h1></body>"#);
        assert_eq!(messages(&result), vec![
            (Classification::Pass, "PAGE_PASS_1"),
            (Classification::Pass, "ELEMENT_PASS_1"),
            (Classification::Hidden, "ELEMENT_HIDDEN_1"),
        ]);
        assert_eq!(result.node_results[0].args, vec!["1"]);
    }

    #[test]
    fn test_h1_location() {
        let html = "<body><header><h1>Site</h1></header><main><section aria-label=\"x\"><h1>Deep</h1></section></main><h1>Loose</h1></body>";
        let result = run(&HEADING_2, H1InMainOrBanner, html);
        assert_eq!(messages(&result), vec![
            (Classification::Pass, "ELEMENT_PASS_1"),
            (Classification::Pass, "ELEMENT_PASS_1"),
            (Classification::Fail, "ELEMENT_FAIL_1"),
        ]);
        assert_eq!(result.node_results[1].args, vec!["main"]);
    }

    #[test]
    fn test_skipped_level_fails() {
        let result = run(&HEADING_5, HeadingNesting, "<body><h1>A</h1><h2>B</h2><h4>C</h4><h2>D</h2></body>");
        assert_eq!(messages(&result), vec![
            (Classification::Fail, "PAGE_FAIL_1"),
            (Classification::Pass, "ELEMENT_PASS_1"),
            (Classification::Pass, "ELEMENT_PASS_1"),
            (Classification::Fail, "ELEMENT_FAIL_1"),
            (Classification::Pass, "ELEMENT_PASS_1"),
        ]);
        assert_eq!(result.node_results[3].args, vec!["4", "2"]);
    }

    #[test]
    fn test_proper_nesting_passes() {
        let result = run(&HEADING_5, HeadingNesting, "<body><h2>A</h2><h3>B</h3><h2>C</h2></body>");
        assert_eq!(result.summary.fail, 0);
        assert_eq!(result.node_results[0].message_id, "PAGE_PASS_1");
    }

    #[test]
    fn test_empty_heading_fails() {
        let html = r#"<body><h2>Text</h2><h2><img src="logo.png" alt="Acme"></h2><h3></h3></body>"#;
        let result = run(&HEADING_6, HeadingsHaveText, html);
        assert_eq!(messages(&result), vec![
            (Classification::Pass, "ELEMENT_PASS_1"),
            (Classification::Pass, "ELEMENT_PASS_2"),
            (Classification::Fail, "ELEMENT_FAIL_1"),
        ]);
    }
}
