// SPDX-License-Identifier: PMPL-1.0-or-later
//! Image rules - WCAG 1.1.1 Non-text Content (Level A)
//!
//! - Images need an accessible name or must be marked decorative
//! - Names must describe the image, not be generic words or file names
//! - Names should be short; long descriptions belong elsewhere

use super::{msg, RuleCategory, RuleCheck, RuleInfo, RuleScope, RuleTier};
use crate::cache::{ElementDescriptor, SemanticCache};
use crate::engine::ResultSink;
use crate::error::RuleError;
use crate::results::Classification;
use regex::Regex;
use std::sync::LazyLock;

/// Names longer than this should move to a long description
pub const MAX_NAME_CHARS: usize = 100;

/// Generic names that say nothing about the image
const GENERIC_NAMES: &[&str] = &[
    "image",
    "photo",
    "picture",
    "icon",
    "graphic",
    "img",
    "banner",
    "logo",
    "untitled",
    "screenshot",
    "thumbnail",
    "placeholder",
];

static FILE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(png|jpe?g|gif|svg|webp|bmp|tiff?|ico|avif)\b").expect("valid regex")
});

const IMAGE_TARGETS: &[&str] = &["img", "area", "[role=\"img\"]"];

pub static IMAGE_1: RuleInfo = RuleInfo {
    id: "IMAGE_1",
    summary: "Images must have an accessible name or be marked decorative",
    scope: RuleScope::Element,
    category: RuleCategory::Images,
    tier: RuleTier::Triage,
    required: true,
    wcag_primary: "1.1.1",
    wcag_related: &[],
    target_resources: IMAGE_TARGETS,
    requires_attribute: None,
    messages: &[
        msg("ELEMENT_PASS_1", 2),
        msg("ELEMENT_PASS_2", 1),
        msg("ELEMENT_FAIL_1", 1),
        msg("ELEMENT_HIDDEN_1", 1),
    ],
};

pub static IMAGE_2: RuleInfo = RuleInfo {
    id: "IMAGE_2",
    summary: "Accessible names of images must describe their purpose",
    scope: RuleScope::Element,
    category: RuleCategory::Images,
    tier: RuleTier::More,
    required: true,
    wcag_primary: "1.1.1",
    wcag_related: &[],
    target_resources: IMAGE_TARGETS,
    requires_attribute: None,
    messages: &[
        msg("ELEMENT_FAIL_1", 1),
        msg("ELEMENT_MC_1", 1),
        msg("ELEMENT_MC_2", 1),
        msg("ELEMENT_HIDDEN_1", 1),
    ],
};

pub static IMAGE_3: RuleInfo = RuleInfo {
    id: "IMAGE_3",
    summary: "Accessible names of images must not contain file names",
    scope: RuleScope::Element,
    category: RuleCategory::Images,
    tier: RuleTier::Triage,
    required: true,
    wcag_primary: "1.1.1",
    wcag_related: &[],
    target_resources: IMAGE_TARGETS,
    requires_attribute: None,
    messages: &[
        msg("ELEMENT_PASS_1", 1),
        msg("ELEMENT_FAIL_1", 1),
        msg("ELEMENT_HIDDEN_1", 1),
    ],
};

pub static IMAGE_4: RuleInfo = RuleInfo {
    id: "IMAGE_4",
    summary: "Accessible names of images should be 100 characters or fewer",
    scope: RuleScope::Element,
    category: RuleCategory::Images,
    tier: RuleTier::More,
    required: false,
    wcag_primary: "1.1.1",
    wcag_related: &[],
    target_resources: IMAGE_TARGETS,
    requires_attribute: None,
    messages: &[
        msg("ELEMENT_PASS_1", 1),
        msg("ELEMENT_FAIL_1", 1),
        msg("ELEMENT_HIDDEN_1", 1),
    ],
};

fn is_decorative(el: &ElementDescriptor) -> bool {
    crate::aria::is_presentational(el.resolved_role)
}

pub struct ImagesHaveNames;

impl RuleCheck for ImagesHaveNames {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        for el in cache.members(cache.images()) {
            if !el.is_visible_to_at {
                sink.element(Classification::Hidden, el, "ELEMENT_HIDDEN_1", &[el.tag_name.as_str()])?;
            } else if el.has_name() {
                sink.element(Classification::Pass, el, "ELEMENT_PASS_1", &[el.tag_name.as_str(), el.name()])?;
            } else if is_decorative(el) {
                sink.element(Classification::Pass, el, "ELEMENT_PASS_2", &[el.tag_name.as_str()])?;
            } else {
                sink.element(Classification::Fail, el, "ELEMENT_FAIL_1", &[el.tag_name.as_str()])?;
            }
        }
        Ok(())
    }
}

pub struct NamesDescribePurpose;

impl RuleCheck for NamesDescribePurpose {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        for el in cache.members(cache.images()) {
            if !el.is_visible_to_at {
                sink.element(Classification::Hidden, el, "ELEMENT_HIDDEN_1", &[el.tag_name.as_str()])?;
            } else if el.has_name() {
                let name = el.name().to_lowercase();
                if GENERIC_NAMES.contains(&name.trim()) {
                    sink.element(Classification::Fail, el, "ELEMENT_FAIL_1", &[el.name()])?;
                } else {
                    sink.element(Classification::ManualCheck, el, "ELEMENT_MC_1", &[el.name()])?;
                }
            } else if is_decorative(el) {
                sink.element(Classification::ManualCheck, el, "ELEMENT_MC_2", &[el.tag_name.as_str()])?;
            }
        }
        Ok(())
    }
}

pub struct NoFileNames;

impl RuleCheck for NoFileNames {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        for el in cache.members(cache.images()).filter(|e| e.has_name()) {
            if !el.is_visible_to_at {
                sink.element(Classification::Hidden, el, "ELEMENT_HIDDEN_1", &[el.tag_name.as_str()])?;
            } else if FILE_NAME_RE.is_match(el.name()) {
                sink.element(Classification::Fail, el, "ELEMENT_FAIL_1", &[el.name()])?;
            } else {
                sink.element(Classification::Pass, el, "ELEMENT_PASS_1", &[el.name()])?;
            }
        }
        Ok(())
    }
}

pub struct NameLength {
    pub max_chars: usize,
}

impl RuleCheck for NameLength {
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
        for el in cache.members(cache.images()).filter(|e| e.has_name()) {
            if !el.is_visible_to_at {
                sink.element(Classification::Hidden, el, "ELEMENT_HIDDEN_1", &[el.tag_name.as_str()])?;
                continue;
            }
            let length = el.name().chars().count();
            let length_arg = length.to_string();
            if length <= self.max_chars {
                sink.element(Classification::Pass, el, "ELEMENT_PASS_1", &[length_arg.as_str()])?;
            } else {
                sink.element(Classification::Fail, el, "ELEMENT_FAIL_1", &[length_arg.as_str()])?;
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
    fn test_missing_name_fails_and_empty_alt_passes() {
        let html = r#"<body><img src="chart.png"><img src="icon.png" alt=""></body>"#;
        let result = run(&IMAGE_1, ImagesHaveNames, html);
        assert_eq!(messages(&result), vec![
            (Classification::Fail, "ELEMENT_FAIL_1"),
            (Classification::Pass, "ELEMENT_PASS_2"),
        ]);
    }

    #[test]
    fn test_named_and_hidden_images() {
        let html = r#"<body><img src="a.png" alt="Sales chart"><img src="b.png" alt="x" hidden>
            <div role="img" aria-label="Stars"></div></body>"#;
        let result = run(&IMAGE_1, ImagesHaveNames, html);
        assert_eq!(messages(&result), vec![
            (Classification::Pass, "ELEMENT_PASS_1"),
            (Classification::Hidden, "ELEMENT_HIDDEN_1"),
            (Classification::Pass, "ELEMENT_PASS_1"),
        ]);
        assert_eq!(result.node_results[0].args, vec!["img", "Sales chart"]);
    }

    #[test]
    fn test_generic_names_fail() {
        let html = r#"<body><img src="a.png" alt="Image"><img src="b.png" alt="Quarterly revenue"><img alt=""></body>"#;
        let result = run(&IMAGE_2, NamesDescribePurpose, html);
        assert_eq!(messages(&result), vec![
            (Classification::Fail, "ELEMENT_FAIL_1"),
            (Classification::ManualCheck, "ELEMENT_MC_1"),
            (Classification::ManualCheck, "ELEMENT_MC_2"),
        ]);
    }

    #[test]
    fn test_file_names_in_names() {
        let html = r#"<body><img src="a.png" alt="IMG_2041.JPG"><img src="b.png" alt="Team photo"><img src="c.png"></body>"#;
        let result = run(&IMAGE_3, NoFileNames, html);
        assert_eq!(messages(&result), vec![
            (Classification::Fail, "ELEMENT_FAIL_1"),
            (Classification::Pass, "ELEMENT_PASS_1"),
        ]);
    }

    #[test]
    fn test_long_names() {
        let long = "a".repeat(101);
        let html = format!(r#"<body><img src="a.png" alt="{}"><img src="b.png" alt="Short"></body>"#, long);
        let result = run(&IMAGE_4, NameLength { max_chars: MAX_NAME_CHARS }, &html);
        assert_eq!(messages(&result), vec![
            (Classification::Fail, "ELEMENT_FAIL_1"),
            (Classification::Pass, "ELEMENT_PASS_1"),
        ]);
        assert_eq!(result.node_results[0].args, vec!["101"]);
    }

    #[test]
    fn test_no_images_not_applicable() {
        let result = run(&IMAGE_1, ImagesHaveNames, "<body><p>Text</p></body>");
        assert_eq!(messages(&result), vec![(Classification::NotApplicable, "RULE_NA_1")]);
    }
}
