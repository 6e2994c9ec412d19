// SPDX-License-Identifier: PMPL-1.0-or-later
//! Rule catalog.
//!
//! Each rule is a static [`RuleInfo`] record plus a value implementing
//! [`RuleCheck`]. Rules read the [`SemanticCache`] and write classified
//! results into a [`ResultSink`]; they never see each other's results.
//! Rule modules are grouped by the content they inspect.

pub mod color;
pub mod control;
pub mod frame;
pub mod heading;
pub mod image;
pub mod landmark;
pub mod link;
pub mod list;
pub mod page;
pub mod table;
pub mod widget;

use crate::cache::SemanticCache;
use crate::config::{Config, ContrastConfig};
use crate::engine::ResultSink;
use crate::error::RuleError;
use crate::wcag::{self, WcagLevel};
use serde::{Deserialize, Serialize};

/// What a rule's verdicts apply to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleScope {
    Element,
    Page,
    Website,
}

impl RuleScope {
    /// Prefix of the message ids a rule of this scope uses for its verdicts
    pub fn message_prefix(&self) -> &'static str {
        match self {
            RuleScope::Element => "ELEMENT",
            RuleScope::Page => "PAGE",
            RuleScope::Website => "WEBSITE",
        }
    }
}

impl std::fmt::Display for RuleScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message_prefix())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleCategory {
    Landmarks,
    Headings,
    StylesReadability,
    Images,
    Links,
    Tables,
    Forms,
    WidgetsScripts,
    AudioVideo,
    KeyboardSupport,
    Timing,
    SiteNavigation,
}

impl RuleCategory {
    pub const ALL: [RuleCategory; 12] = [
        RuleCategory::Landmarks,
        RuleCategory::Headings,
        RuleCategory::StylesReadability,
        RuleCategory::Images,
        RuleCategory::Links,
        RuleCategory::Tables,
        RuleCategory::Forms,
        RuleCategory::WidgetsScripts,
        RuleCategory::AudioVideo,
        RuleCategory::KeyboardSupport,
        RuleCategory::Timing,
        RuleCategory::SiteNavigation,
    ];

    /// Bit value used in interchange formats
    pub fn bits(&self) -> u32 {
        match self {
            RuleCategory::Landmarks => 0x0001,
            RuleCategory::Headings => 0x0002,
            RuleCategory::StylesReadability => 0x0004,
            RuleCategory::Images => 0x0008,
            RuleCategory::Links => 0x0010,
            RuleCategory::Tables => 0x0020,
            RuleCategory::Forms => 0x0040,
            RuleCategory::WidgetsScripts => 0x0080,
            RuleCategory::AudioVideo => 0x0100,
            RuleCategory::KeyboardSupport => 0x0200,
            RuleCategory::Timing => 0x0400,
            RuleCategory::SiteNavigation => 0x0800,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RuleCategory::Landmarks => "Landmarks",
            RuleCategory::Headings => "Headings",
            RuleCategory::StylesReadability => "Styles/Content",
            RuleCategory::Images => "Images",
            RuleCategory::Links => "Links",
            RuleCategory::Tables => "Tables",
            RuleCategory::Forms => "Forms",
            RuleCategory::WidgetsScripts => "Widgets/Scripts",
            RuleCategory::AudioVideo => "Audio/Video",
            RuleCategory::KeyboardSupport => "Keyboard",
            RuleCategory::Timing => "Timing",
            RuleCategory::SiteNavigation => "Site Navigation",
        }
    }
}

/// How early a rule is worth running
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleTier {
    Triage,
    More,
    All,
}

/// Named selection of rule tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Ruleset {
    /// Triage rules only
    Triage,
    /// Triage and more
    Level,
    All,
}

impl Ruleset {
    pub fn includes(&self, tier: RuleTier) -> bool {
        match self {
            Ruleset::Triage => tier == RuleTier::Triage,
            Ruleset::Level => tier <= RuleTier::More,
            Ruleset::All => true,
        }
    }
}

impl std::fmt::Display for Ruleset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ruleset::Triage => write!(f, "TRIAGE"),
            Ruleset::Level => write!(f, "LEVEL"),
            Ruleset::All => write!(f, "ALL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScopeFilter {
    All,
    Element,
    Page,
    Website,
}

impl ScopeFilter {
    pub fn allows(&self, scope: RuleScope) -> bool {
        match self {
            ScopeFilter::All => true,
            ScopeFilter::Element => scope == RuleScope::Element,
            ScopeFilter::Page => scope == RuleScope::Page,
            ScopeFilter::Website => scope == RuleScope::Website,
        }
    }
}

impl std::fmt::Display for ScopeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScopeFilter::All => write!(f, "ALL"),
            ScopeFilter::Element => write!(f, "ELEMENT"),
            ScopeFilter::Page => write!(f, "PAGE"),
            ScopeFilter::Website => write!(f, "WEBSITE"),
        }
    }
}

/// A message a rule may record, with the number of arguments it takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageSpec {
    pub id: &'static str,
    pub arity: usize,
}

pub(crate) const fn msg(id: &'static str, arity: usize) -> MessageSpec {
    MessageSpec { id, arity }
}

/// Static description of one rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleInfo {
    pub id: &'static str,
    pub summary: &'static str,
    pub scope: RuleScope,
    pub category: RuleCategory,
    pub tier: RuleTier,
    /// FAIL on a required rule is a violation, otherwise a warning
    pub required: bool,
    pub wcag_primary: &'static str,
    pub wcag_related: &'static [&'static str],
    /// Informational hints, e.g. `img`, `[role="img"]`
    pub target_resources: &'static [&'static str],
    pub requires_attribute: Option<&'static str>,
    pub messages: &'static [MessageSpec],
}

impl RuleInfo {
    pub fn level(&self) -> WcagLevel {
        wcag::level_of(self.wcag_primary)
    }

    pub fn guideline(&self) -> &'static str {
        wcag::guideline_of(self.wcag_primary)
    }

    pub fn message(&self, id: &str) -> Option<&'static MessageSpec> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn is_selected(&self, ruleset: Ruleset, level: WcagLevel, scope: ScopeFilter) -> bool {
        ruleset.includes(self.tier) && self.level() <= level && scope.allows(self.scope)
    }
}

/// The check half of a rule
pub trait RuleCheck: Send + Sync {
    /// Classify the rule's targets in `cache`; errors abort the rule only
    fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError>;
}

pub struct RuleDescriptor {
    pub info: &'static RuleInfo,
    pub check: Box<dyn RuleCheck>,
}

impl RuleDescriptor {
    pub fn new(info: &'static RuleInfo, check: impl RuleCheck + 'static) -> Self {
        Self { info, check: Box::new(check) }
    }

    pub fn id(&self) -> &'static str {
        self.info.id
    }
}

impl std::fmt::Debug for RuleDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleDescriptor").field("id", &self.info.id).finish()
    }
}

/// Every rule, in catalog order
pub fn catalog(contrast: &ContrastConfig) -> Vec<RuleDescriptor> {
    vec![
        RuleDescriptor::new(&image::IMAGE_1, image::ImagesHaveNames),
        RuleDescriptor::new(&image::IMAGE_2, image::NamesDescribePurpose),
        RuleDescriptor::new(&image::IMAGE_3, image::NoFileNames),
        RuleDescriptor::new(&image::IMAGE_4, image::NameLength { max_chars: image::MAX_NAME_CHARS }),
        RuleDescriptor::new(&color::COLOR_1, color::TextContrast { thresholds: contrast.clone() }),
        RuleDescriptor::new(&color::COLOR_2, color::ColorNotSoleMeans),
        RuleDescriptor::new(&landmark::LANDMARK_1, landmark::MainLandmark),
        RuleDescriptor::new(&landmark::LANDMARK_2, landmark::ContentInLandmarks),
        RuleDescriptor::new(
            &landmark::LANDMARK_3,
            landmark::NavigationLandmark { minimum_links: landmark::MINIMUM_LINKS },
        ),
        RuleDescriptor::new(&landmark::LANDMARK_17, landmark::UniqueLabels),
        RuleDescriptor::new(&landmark::LANDMARK_18, landmark::DescriptiveLabels),
        RuleDescriptor::new(&landmark::LANDMARK_19, landmark::ComplementaryTopLevel),
        RuleDescriptor::new(&heading::HEADING_1, heading::PageHasH1),
        RuleDescriptor::new(&heading::HEADING_2, heading::H1InMainOrBanner),
        RuleDescriptor::new(&heading::HEADING_5, heading::HeadingNesting),
        RuleDescriptor::new(&heading::HEADING_6, heading::HeadingsHaveText),
        RuleDescriptor::new(&control::CONTROL_1, control::ControlsHaveNames),
        RuleDescriptor::new(&control::CONTROL_2, control::ImageInputsHaveNames),
        RuleDescriptor::new(&control::CONTROL_4, control::ButtonsHaveContent),
        RuleDescriptor::new(&control::CONTROL_5, control::UniqueIds),
        RuleDescriptor::new(&control::CONTROL_9, control::TitleOnlyLabels),
        RuleDescriptor::new(&link::LINK_1, link::LinksHaveNames),
        RuleDescriptor::new(&link::LINK_2, link::SameNameDifferentTarget),
        RuleDescriptor::new(&widget::WIDGET_1, widget::WidgetsHaveNames),
        RuleDescriptor::new(&widget::WIDGET_2, widget::ClickHandlersHaveRoles),
        RuleDescriptor::new(&widget::WIDGET_3, widget::ValidRoles),
        RuleDescriptor::new(&widget::WIDGET_4, widget::ValidAttributeValues),
        RuleDescriptor::new(&widget::WIDGET_5, widget::DefinedAttributes),
        RuleDescriptor::new(&widget::WIDGET_6, widget::RequiredProperties),
        RuleDescriptor::new(&table::TABLE_1, table::DataCellsHaveHeaders),
        RuleDescriptor::new(&table::TABLE_2, table::DataTablesHaveNames),
        RuleDescriptor::new(&list::LIST_1, list::ListMarkup),
        RuleDescriptor::new(&list::LIST_2, list::ListNames),
        RuleDescriptor::new(&frame::FRAME_1, frame::FramesHaveNames { tag: "frame" }),
        RuleDescriptor::new(&frame::FRAME_2, frame::FramesHaveNames { tag: "iframe" }),
        RuleDescriptor::new(&page::TITLE_1, page::PageTitle),
        RuleDescriptor::new(&page::LANGUAGE_1, page::PageLanguage),
    ]
}

/// Rules selected by the configured ruleset, level and scope filter
pub fn selected_rules(config: &Config) -> Vec<RuleDescriptor> {
    catalog(&config.contrast)
        .into_iter()
        .filter(|r| r.info.is_selected(config.ruleset, config.level, config.scope))
        .collect()
}

/// Look up one rule by id
pub fn find_rule(id: &str, contrast: &ContrastConfig) -> Option<RuleDescriptor> {
    catalog(contrast).into_iter().find(|r| r.info.id.eq_ignore_ascii_case(id))
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{RuleCheck, RuleDescriptor, RuleInfo};
    use crate::cache::SemanticCache;
    use crate::config::ContrastConfig;
    use crate::dom::html::parse_html;
    use crate::engine::run_rule;
    use crate::results::{Classification, RuleResult};

    pub fn cache(html: &str) -> SemanticCache {
        let doc = parse_html(html);
        SemanticCache::build(&doc, doc.title(), "https://example.com/", &ContrastConfig::default())
    }

    pub fn run(info: &'static RuleInfo, check: impl RuleCheck + 'static, html: &str) -> RuleResult {
        let result = run_rule(&RuleDescriptor::new(info, check), &cache(html));
        assert!(result.error.is_none(), "{} aborted: {:?}", info.id, result.error);
        result
    }

    pub fn messages(result: &RuleResult) -> Vec<(Classification, &'static str)> {
        result
            .node_results
            .iter()
            .map(|r| (r.classification, r.message_id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_unique() {
        let rules = catalog(&ContrastConfig::default());
        assert_eq!(rules.len(), 37);
        let ids: HashSet<&str> = rules.iter().map(|r| r.id()).collect();
        assert_eq!(ids.len(), rules.len(), "rule ids must be unique");
    }

    #[test]
    fn test_message_ids_match_scope() {
        for rule in catalog(&ContrastConfig::default()) {
            for message in rule.info.messages {
                let prefix = message.id.split('_').next().unwrap_or("");
                assert!(
                    prefix == "ELEMENT" || prefix == rule.info.scope.message_prefix(),
                    "{} declares {} outside its scope",
                    rule.id(),
                    message.id
                );
            }
        }
    }

    #[test]
    fn test_primary_criteria_are_known() {
        for rule in catalog(&ContrastConfig::default()) {
            assert!(
                wcag::success_criterion(rule.info.wcag_primary).is_some(),
                "{} has unknown criterion {}",
                rule.id(),
                rule.info.wcag_primary
            );
        }
    }

    #[test]
    fn test_ruleset_tiers() {
        assert!(Ruleset::Triage.includes(RuleTier::Triage));
        assert!(!Ruleset::Triage.includes(RuleTier::More));
        assert!(Ruleset::Level.includes(RuleTier::More));
        assert!(!Ruleset::Level.includes(RuleTier::All));
        assert!(Ruleset::All.includes(RuleTier::All));
    }

    #[test]
    fn test_selection_by_level_and_scope() {
        let mut config = Config { ruleset: Ruleset::All, level: WcagLevel::A, ..Config::default() };
        let rules = selected_rules(&config);
        assert!(rules.iter().all(|r| r.info.level() == WcagLevel::A));
        assert!(!rules.iter().any(|r| r.id() == "COLOR_1"));

        config.level = WcagLevel::AA;
        config.scope = ScopeFilter::Page;
        let rules = selected_rules(&config);
        assert!(!rules.is_empty());
        assert!(rules.iter().all(|r| r.info.scope == RuleScope::Page));
    }

    #[test]
    fn test_triage_subset() {
        let config = Config { ruleset: Ruleset::Triage, ..Config::default() };
        let rules = selected_rules(&config);
        assert!(rules.iter().any(|r| r.id() == "IMAGE_1"));
        assert!(!rules.iter().any(|r| r.id() == "LANDMARK_1"));
    }

    #[test]
    fn test_find_rule() {
        let rule = find_rule("image_1", &ContrastConfig::default()).expect("IMAGE_1");
        assert_eq!(rule.info.category, RuleCategory::Images);
        assert!(find_rule("NOPE_1", &ContrastConfig::default()).is_none());
    }

    #[test]
    fn test_category_bits_distinct() {
        let bits: HashSet<u32> = RuleCategory::ALL.iter().map(|c| c.bits()).collect();
        assert_eq!(bits.len(), RuleCategory::ALL.len());
    }
}
