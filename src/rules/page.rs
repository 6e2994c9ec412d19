// SPDX-License-Identifier: PMPL-1.0-or-later
//! Page rules - WCAG 2.4.2 Page Titled, 3.1.1 Language of Page

use super::{msg, RuleCategory, RuleCheck, RuleInfo, RuleScope, RuleTier};
use crate::cache::SemanticCache;
use crate::engine::ResultSink;
use crate::error::RuleError;
use crate::results::Classification;
use regex::Regex;
use std::sync::LazyLock;

/// Primary language subtag followed by optional subtags, e.g. `en`, `pt-BR`, `zh-Hant-TW`
static LANGUAGE_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]{2,3}(-[A-Za-z0-9]{2,8})*$").expect("valid regex")
});

pub static TITLE_1: RuleInfo = RuleInfo {
    id: "TITLE_1",
    summary: "Page must have a title",
    scope: RuleScope::Page,
    category: RuleCategory::SiteNavigation,
    tier: RuleTier::Triage,
    required: true,
    wcag_primary: "2.4.2",
    wcag_related: &[],
    target_resources: &["title"],
    requires_attribute: None,
    messages: &[msg("PAGE_PASS_1", 1), msg("PAGE_FAIL_1", 0)],
};

pub static LANGUAGE_1: RuleInfo = RuleInfo {
    id: "LANGUAGE_1",
    summary: "Page must identify its language",
    scope: RuleScope::Page,
    category: RuleCategory::StylesReadability,
    tier: RuleTier::Triage,
    required: true,
    wcag_primary: "3.1.1",
    wcag_related: &[],
    target_resources: &["html[lang]"],
    requires_attribute: Some("lang"),
    messages: &[msg("PAGE_PASS_1", 1), msg("PAGE_FAIL_1", 0), msg("PAGE_FAIL_2", 1)],
};

pub struct PageTitle;

impl RuleCheck for PageTitle {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        let title = cache.page().title.trim();
        if title.is_empty() {
            sink.page(Classification::Fail, "PAGE_FAIL_1", &[])
        } else {
            sink.page(Classification::Pass, "PAGE_PASS_1", &[title])
        }
    }
}

pub fn is_valid_language_tag(tag: &str) -> bool {
    LANGUAGE_TAG_RE.is_match(tag.trim())
}

pub struct PageLanguage;

impl RuleCheck for PageLanguage {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        match cache.page().language.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
            None => sink.page(Classification::Fail, "PAGE_FAIL_1", &[]),
            Some(lang) if is_valid_language_tag(lang) => sink.page(Classification::Pass, "PAGE_PASS_1", &[lang]),
            Some(lang) => sink.page(Classification::Fail, "PAGE_FAIL_2", &[lang]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{messages, run};

    #[test]
    fn test_title_present_and_missing() {
        let result = run(&TITLE_1, PageTitle, "<html><head><title> Home </title></head><body></body></html>");
        assert_eq!(messages(&result), vec![(Classification::Pass, "PAGE_PASS_1")]);
        assert_eq!(result.node_results[0].args, vec!["Home"]);

        let result = run(&TITLE_1, PageTitle, "<html><head></head><body></body></html>");
        assert_eq!(messages(&result), vec![(Classification::Fail, "PAGE_FAIL_1")]);
    }

    #[test]
    fn test_language() {
        let ok = run(&LANGUAGE_1, PageLanguage, r#"<html lang="en-GB"><body></body></html>"#);
        assert_eq!(messages(&ok), vec![(Classification::Pass, "PAGE_PASS_1")]);

        let missing = run(&LANGUAGE_1, PageLanguage, "<html><body></body></html>");
        assert_eq!(messages(&missing), vec![(Classification::Fail, "PAGE_FAIL_1")]);

        let invalid = run(&LANGUAGE_1, PageLanguage, r#"<html lang="english please"><body></body></html>"#);
        assert_eq!(messages(&invalid), vec![(Classification::Fail, "PAGE_FAIL_2")]);
    }

    #[test]
    fn test_language_tags() {
        assert!(is_valid_language_tag("zh-Hant-TW"));
        assert!(is_valid_language_tag("de"));
        assert!(!is_valid_language_tag("e"));
        assert!(!is_valid_language_tag("en_US"));
    }
}
