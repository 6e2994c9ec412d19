// SPDX-License-Identifier: PMPL-1.0-or-later
//! Color rules - WCAG 1.4.3 Contrast (Minimum) and 1.4.1 Use of Color
//!
//! Text runs are checked against the configured minimum ratios:
//! - 4.5:1 for normal text, 3:1 for large text by default
//! - text over a background image always needs a manual check, whatever
//!   the computed ratio says

use super::{msg, RuleCategory, RuleCheck, RuleInfo, RuleScope, RuleTier};
use crate::cache::SemanticCache;
use crate::config::ContrastConfig;
use crate::engine::ResultSink;
use crate::error::RuleError;
use crate::results::Classification;

pub static COLOR_1: RuleInfo = RuleInfo {
    id: "COLOR_1",
    summary: "Text must have sufficient contrast with its background",
    scope: RuleScope::Element,
    category: RuleCategory::StylesReadability,
    tier: RuleTier::Triage,
    required: true,
    wcag_primary: "1.4.3",
    wcag_related: &["1.4.6"],
    target_resources: &["text content"],
    requires_attribute: None,
    messages: &[
        msg("ELEMENT_PASS_1", 1),
        msg("ELEMENT_PASS_2", 1),
        msg("ELEMENT_FAIL_1", 1),
        msg("ELEMENT_FAIL_2", 1),
        msg("ELEMENT_MC_1", 1),
        msg("ELEMENT_MC_2", 1),
        msg("ELEMENT_MC_3", 1),
        msg("ELEMENT_MC_4", 1),
        msg("ELEMENT_HIDDEN_1", 1),
    ],
};

pub static COLOR_2: RuleInfo = RuleInfo {
    id: "COLOR_2",
    summary: "Color must not be the only means of conveying information",
    scope: RuleScope::Page,
    category: RuleCategory::StylesReadability,
    tier: RuleTier::More,
    required: true,
    wcag_primary: "1.4.1",
    wcag_related: &[],
    target_resources: &["page"],
    requires_attribute: None,
    messages: &[msg("PAGE_MC_1", 0)],
};

pub struct TextContrast {
    pub thresholds: ContrastConfig,
}

impl RuleCheck for TextContrast {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        for run in cache.text_runs() {
            let ratio = format!("{:.1}", run.contrast_ratio);
            let visible_to_at = cache
                .element(run.parent)
                .map(|el| el.is_visible_to_at)
                .unwrap_or(false);
            if !visible_to_at {
                sink.text_run(Classification::Hidden, run, "ELEMENT_HIDDEN_1", &[ratio.as_str()])?;
                continue;
            }

            let passes = run.contrast_ratio >= self.thresholds.minimum_for(run.is_large_font);
            let (classification, message_id) = match (run.has_background_image, passes, run.is_large_font) {
                (false, true, false) => (Classification::Pass, "ELEMENT_PASS_1"),
                (false, true, true) => (Classification::Pass, "ELEMENT_PASS_2"),
                (false, false, false) => (Classification::Fail, "ELEMENT_FAIL_1"),
                (false, false, true) => (Classification::Fail, "ELEMENT_FAIL_2"),
                (true, true, false) => (Classification::ManualCheck, "ELEMENT_MC_1"),
                (true, true, true) => (Classification::ManualCheck, "ELEMENT_MC_2"),
                (true, false, false) => (Classification::ManualCheck, "ELEMENT_MC_3"),
                (true, false, true) => (Classification::ManualCheck, "ELEMENT_MC_4"),
            };
            sink.text_run(classification, run, message_id, &[ratio.as_str()])?;
        }
        Ok(())
    }
}

pub struct ColorNotSoleMeans;

impl RuleCheck for ColorNotSoleMeans {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        if !cache.text_runs().is_empty() {
            sink.page(Classification::ManualCheck, "PAGE_MC_1", &[])?;
        }
        Ok(())
    }
}
