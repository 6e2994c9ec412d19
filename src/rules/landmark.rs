// SPDX-License-Identifier: PMPL-1.0-or-later
//! Landmark rules - WCAG 1.3.1 Info and Relationships, 2.4.1 Bypass Blocks
//!
//! Landmarks let AT users jump between page regions. Pages need one main
//! landmark, content should live inside landmarks, navigation blocks should
//! be marked up as navigation, and landmarks sharing a role need distinct
//! labels.

use super::{msg, RuleCategory, RuleCheck, RuleInfo, RuleScope, RuleTier};
use crate::cache::{ElementDescriptor, SemanticCache};
use crate::engine::ResultSink;
use crate::error::RuleError;
use crate::results::Classification;

/// Lists with at least this many links look like navigation blocks
pub const MINIMUM_LINKS: usize = 4;

pub static LANDMARK_1: RuleInfo = RuleInfo {
    id: "LANDMARK_1",
    summary: "Each page must have one main landmark",
    scope: RuleScope::Page,
    category: RuleCategory::Landmarks,
    tier: RuleTier::More,
    required: true,
    wcag_primary: "2.4.1",
    wcag_related: &["1.3.1"],
    target_resources: &["main", "[role=\"main\"]"],
    requires_attribute: None,
    messages: &[
        msg("PAGE_PASS_1", 0),
        msg("PAGE_FAIL_1", 0),
        msg("PAGE_FAIL_2", 1),
        msg("ELEMENT_PASS_1", 0),
        msg("ELEMENT_FAIL_1", 0),
        msg("ELEMENT_HIDDEN_1", 0),
    ],
};

pub static LANDMARK_2: RuleInfo = RuleInfo {
    id: "LANDMARK_2",
    summary: "All rendered content must be contained in landmarks",
    scope: RuleScope::Element,
    category: RuleCategory::Landmarks,
    tier: RuleTier::More,
    required: true,
    wcag_primary: "1.3.1",
    wcag_related: &["2.4.1"],
    target_resources: &["text content", "img"],
    requires_attribute: None,
    messages: &[
        msg("ELEMENT_PASS_1", 2),
        msg("ELEMENT_FAIL_1", 1),
        msg("ELEMENT_HIDDEN_1", 1),
    ],
};

pub static LANDMARK_3: RuleInfo = RuleInfo {
    id: "LANDMARK_3",
    summary: "Navigation blocks should be in navigation landmarks",
    scope: RuleScope::Website,
    category: RuleCategory::Landmarks,
    tier: RuleTier::More,
    required: true,
    wcag_primary: "2.4.1",
    wcag_related: &["1.3.1"],
    target_resources: &["nav", "[role=\"navigation\"]", "ul", "ol"],
    requires_attribute: None,
    messages: &[
        msg("WEBSITE_PASS_1", 1),
        msg("WEBSITE_FAIL_1", 0),
        msg("ELEMENT_PASS_1", 0),
        msg("ELEMENT_FAIL_1", 1),
        msg("ELEMENT_HIDDEN_1", 0),
    ],
};

pub static LANDMARK_17: RuleInfo = RuleInfo {
    id: "LANDMARK_17",
    summary: "Landmarks with the same role must have unique labels",
    scope: RuleScope::Element,
    category: RuleCategory::Landmarks,
    tier: RuleTier::Triage,
    required: true,
    wcag_primary: "1.3.1",
    wcag_related: &["2.4.1"],
    target_resources: &["landmarks"],
    requires_attribute: None,
    messages: &[
        msg("ELEMENT_PASS_1", 2),
        msg("ELEMENT_FAIL_1", 2),
        msg("ELEMENT_HIDDEN_1", 1),
    ],
};

pub static LANDMARK_18: RuleInfo = RuleInfo {
    id: "LANDMARK_18",
    summary: "Landmark labels should describe the region",
    scope: RuleScope::Element,
    category: RuleCategory::Landmarks,
    tier: RuleTier::More,
    required: false,
    wcag_primary: "2.4.6",
    wcag_related: &["1.3.1"],
    target_resources: &["landmarks"],
    requires_attribute: None,
    messages: &[msg("ELEMENT_MC_1", 2), msg("ELEMENT_HIDDEN_1", 1)],
};

pub static LANDMARK_19: RuleInfo = RuleInfo {
    id: "LANDMARK_19",
    summary: "Complementary landmarks must be top level",
    scope: RuleScope::Element,
    category: RuleCategory::Landmarks,
    tier: RuleTier::More,
    required: true,
    wcag_primary: "1.3.1",
    wcag_related: &[],
    target_resources: &["aside", "[role=\"complementary\"]"],
    requires_attribute: None,
    messages: &[
        msg("ELEMENT_PASS_1", 0),
        msg("ELEMENT_FAIL_1", 1),
        msg("ELEMENT_HIDDEN_1", 0),
    ],
};

fn landmarks_with_role<'c>(cache: &'c SemanticCache, role: &'c str) -> impl Iterator<Item = &'c ElementDescriptor> + 'c {
    cache
        .landmarks()
        .iter()
        .filter(move |l| l.role == role)
        .filter_map(move |l| cache.element(l.element))
}

pub struct MainLandmark;

impl RuleCheck for MainLandmark {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        let mains: Vec<&ElementDescriptor> = landmarks_with_role(cache, "main").collect();
        let visible = mains.iter().filter(|m| m.is_visible_to_at).count();

        match visible {
            0 => sink.page(Classification::Fail, "PAGE_FAIL_1", &[])?,
            1 => sink.page(Classification::Pass, "PAGE_PASS_1", &[])?,
            n => sink.page(Classification::Fail, "PAGE_FAIL_2", &[n.to_string().as_str()])?,
        }

        for main in mains {
            if !main.is_visible_to_at {
                sink.element(Classification::Hidden, main, "ELEMENT_HIDDEN_1", &[])?;
            } else if visible == 1 {
                sink.element(Classification::Pass, main, "ELEMENT_PASS_1", &[])?;
            } else {
                sink.element(Classification::Fail, main, "ELEMENT_FAIL_1", &[])?;
            }
        }
        Ok(())
    }
}

pub struct ContentInLandmarks;

impl RuleCheck for ContentInLandmarks {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        let content = cache
            .elements()
            .iter()
            .filter(|e| e.has_own_text || e.tag_name == "img" || e.resolved_role == "img");

        for el in content {
            let tag = el.tag_name.as_str();
            if !el.is_visible_to_at {
                sink.element(Classification::Hidden, el, "ELEMENT_HIDDEN_1", &[tag])?;
            } else if let Some(role) = cache.parent_landmark_role(el) {
                sink.element(Classification::Pass, el, "ELEMENT_PASS_1", &[tag, role])?;
            } else if el.is_landmark {
                sink.element(Classification::Pass, el, "ELEMENT_PASS_1", &[tag, el.resolved_role])?;
            } else {
                sink.element(Classification::Fail, el, "ELEMENT_FAIL_1", &[tag])?;
            }
        }
        Ok(())
    }
}

pub struct NavigationLandmark {
    pub minimum_links: usize,
}

impl RuleCheck for NavigationLandmark {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        let navs: Vec<&ElementDescriptor> = landmarks_with_role(cache, "navigation").collect();
        let visible = navs.iter().filter(|n| n.is_visible_to_at).count();

        if visible > 0 {
            sink.website(Classification::Pass, "WEBSITE_PASS_1", &[visible.to_string().as_str()])?;
            for nav in navs {
                if nav.is_visible_to_at {
                    sink.element(Classification::Pass, nav, "ELEMENT_PASS_1", &[])?;
                } else {
                    sink.element(Classification::Hidden, nav, "ELEMENT_HIDDEN_1", &[])?;
                }
            }
            return Ok(());
        }

        let link_lists: Vec<(&ElementDescriptor, usize)> = cache
            .lists()
            .iter()
            .filter(|l| l.link_count >= self.minimum_links)
            .filter_map(|l| cache.element(l.element).map(|el| (el, l.link_count)))
            .filter(|(el, _)| el.is_visible_to_at)
            .collect();

        if !link_lists.is_empty() {
            sink.website(Classification::Fail, "WEBSITE_FAIL_1", &[])?;
            for (list, links) in link_lists {
                sink.element(Classification::Fail, list, "ELEMENT_FAIL_1", &[links.to_string().as_str()])?;
            }
        }
        Ok(())
    }
}

pub struct UniqueLabels;

impl RuleCheck for UniqueLabels {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        let landmarks = cache.landmarks();
        for entry in landmarks {
            let Some(el) = cache.element(entry.element) else { continue };
            let shares_role = landmarks
                .iter()
                .filter(|l| l.is_visible_to_at && l.role == entry.role)
                .count()
                > 1;

            if !entry.is_visible_to_at {
                sink.element(Classification::Hidden, el, "ELEMENT_HIDDEN_1", &[entry.role])?;
            } else if entry.is_duplicate_label {
                sink.element(Classification::Fail, el, "ELEMENT_FAIL_1", &[entry.role, entry.label.as_str()])?;
            } else if shares_role {
                sink.element(Classification::Pass, el, "ELEMENT_PASS_1", &[entry.role, entry.label.as_str()])?;
            }
        }
        Ok(())
    }
}

pub struct DescriptiveLabels;

impl RuleCheck for DescriptiveLabels {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        for entry in cache.landmarks().iter().filter(|l| !l.label.is_empty()) {
            let Some(el) = cache.element(entry.element) else { continue };
            if entry.is_visible_to_at {
                sink.element(Classification::ManualCheck, el, "ELEMENT_MC_1", &[entry.role, entry.label.as_str()])?;
            } else {
                sink.element(Classification::Hidden, el, "ELEMENT_HIDDEN_1", &[entry.role])?;
            }
        }
        Ok(())
    }
}

pub struct ComplementaryTopLevel;

impl RuleCheck for ComplementaryTopLevel {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        for el in landmarks_with_role(cache, "complementary") {
            if !el.is_visible_to_at {
                sink.element(Classification::Hidden, el, "ELEMENT_HIDDEN_1", &[])?;
            } else if let Some(parent) = cache.parent_landmark_role(el) {
                sink.element(Classification::Fail, el, "ELEMENT_FAIL_1", &[parent])?;
            } else {
                sink.element(Classification::Pass, el, "ELEMENT_PASS_1", &[])?;
            }
        }
        Ok(())
    }
}
