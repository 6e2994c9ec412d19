// SPDX-License-Identifier: PMPL-1.0-or-later
//! Frame rules - WCAG 2.4.1 Bypass Blocks
//!
//! AT users pick frames by name, so every `frame` and `iframe` that loads
//! a document needs an accessible name, usually its `title`.

use super::{msg, RuleCategory, RuleCheck, RuleInfo, RuleScope, RuleTier};
use crate::cache::SemanticCache;
use crate::engine::ResultSink;
use crate::error::RuleError;
use crate::results::Classification;

pub static FRAME_1: RuleInfo = RuleInfo {
    id: "FRAME_1",
    summary: "Frames must have an accessible name",
    scope: RuleScope::Element,
    category: RuleCategory::StylesReadability,
    tier: RuleTier::More,
    required: true,
    wcag_primary: "2.4.1",
    wcag_related: &[],
    target_resources: &["frame"],
    requires_attribute: None,
    messages: &[
        msg("ELEMENT_PASS_1", 1),
        msg("ELEMENT_FAIL_1", 0),
        msg("ELEMENT_HIDDEN_1", 0),
    ],
};

pub static FRAME_2: RuleInfo = RuleInfo {
    id: "FRAME_2",
    summary: "Iframes must have an accessible name",
    scope: RuleScope::Element,
    category: RuleCategory::StylesReadability,
    tier: RuleTier::Triage,
    required: true,
    wcag_primary: "2.4.1",
    wcag_related: &[],
    target_resources: &["iframe"],
    requires_attribute: None,
    messages: &[
        msg("ELEMENT_PASS_1", 1),
        msg("ELEMENT_FAIL_1", 0),
        msg("ELEMENT_HIDDEN_1", 0),
    ],
};

/// Name check for one frame element type
pub struct FramesHaveNames {
    pub tag: &'static str,
}

impl RuleCheck for FramesHaveNames {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        let frames = cache
            .elements()
            .iter()
            .filter(|e| e.tag_name == self.tag)
            .filter(|e| e.attr("src").map(|s| !s.trim().is_empty()).unwrap_or(false));
        for el in frames {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{messages, run};

    #[test]
    fn test_iframe_names() {
        let html = r#"<body><iframe src="map.html" title="Store map"></iframe>
            <iframe src="ad.html"></iframe>
            <iframe src="chat.html" aria-label="Chat" hidden></iframe>
            <iframe srcdoc="inline"></iframe></body>"#;
        let result = run(&FRAME_2, FramesHaveNames { tag: "iframe" }, html);
        assert_eq!(messages(&result), vec![
            (Classification::Pass, "ELEMENT_PASS_1"),
            (Classification::Fail, "ELEMENT_FAIL_1"),
            (Classification::Hidden, "ELEMENT_HIDDEN_1"),
        ]);
        assert_eq!(result.node_results[0].args, vec!["Store map"]);
    }

    #[test]
    fn test_frameset_frames() {
        let html = r#"<html><head><title>Docs</title></head>
            <frameset cols="20%,80%"><frame src="toc.html" title="Contents"><frame src="body.html"></frameset></html>"#;
        let result = run(&FRAME_1, FramesHaveNames { tag: "frame" }, html);
        assert_eq!(messages(&result), vec![
            (Classification::Pass, "ELEMENT_PASS_1"),
            (Classification::Fail, "ELEMENT_FAIL_1"),
        ]);
    }

    #[test]
    fn test_page_without_frames() {
        let result = run(&FRAME_1, FramesHaveNames { tag: "frame" }, "<body><p>x</p></body>");
        assert_eq!(messages(&result), vec![(Classification::NotApplicable, "RULE_NA_1")]);
    }
}
