// SPDX-License-Identifier: PMPL-1.0-or-later
//! Whole-document evaluation result and its JSON report shape.

use super::group::{GroupBy, RuleGroupResult};
use super::{Classification, ImplementationLevel, NodeResult, ResultTarget, ResultsSummary, RuleResult, RuleResultValue};
use crate::cache::SemanticCache;
use crate::error::Result;
use crate::rules::{RuleCategory, RuleScope, Ruleset, ScopeFilter};
use crate::wcag::WcagLevel;
use serde::Serialize;
use url::Url;

#[derive(Debug, Clone)]
pub struct EvaluationResult {
    cache: SemanticCache,
    rule_results: Vec<RuleResult>,
    ruleset: Ruleset,
    level: WcagLevel,
    scope: ScopeFilter,
}

impl EvaluationResult {
    pub fn new(
        cache: SemanticCache,
        rule_results: Vec<RuleResult>,
        ruleset: Ruleset,
        level: WcagLevel,
        scope: ScopeFilter,
    ) -> Self {
        Self { cache, rule_results, ruleset, level, scope }
    }

    pub fn cache(&self) -> &SemanticCache {
        &self.cache
    }

    pub fn title(&self) -> &str {
        &self.cache.page().title
    }

    pub fn url(&self) -> &str {
        &self.cache.page().url
    }

    pub fn ruleset(&self) -> Ruleset {
        self.ruleset
    }

    pub fn level(&self) -> WcagLevel {
        self.level
    }

    pub fn scope(&self) -> ScopeFilter {
        self.scope
    }

    pub fn rule_results(&self) -> &[RuleResult] {
        &self.rule_results
    }

    pub fn rule_result(&self, rule_id: &str) -> Option<&RuleResult> {
        self.rule_results.iter().find(|r| r.rule_id() == rule_id)
    }

    pub fn summary(&self) -> ResultsSummary {
        let mut summary = ResultsSummary::default();
        for result in &self.rule_results {
            summary.add(&result.summary);
        }
        summary
    }

    pub fn implementation_score(&self) -> Option<u8> {
        self.summary().implementation_score()
    }

    pub fn group(&self, group: GroupBy) -> RuleGroupResult<'_> {
        RuleGroupResult::new(group, &self.rule_results)
    }

    /// Non-empty category groups in category order
    pub fn groups_by_category(&self) -> Vec<RuleGroupResult<'_>> {
        RuleCategory::ALL
            .iter()
            .map(|c| self.group(GroupBy::Category(*c)))
            .filter(|g| !g.is_empty())
            .collect()
    }

    /// Guideline groups in order of first appearance in the results
    pub fn groups_by_guideline(&self) -> Vec<RuleGroupResult<'_>> {
        let mut guidelines: Vec<&'static str> = Vec::new();
        for result in &self.rule_results {
            let guideline = result.info.guideline();
            if !guidelines.contains(&guideline) {
                guidelines.push(guideline);
            }
        }
        guidelines
            .into_iter()
            .map(|g| self.group(GroupBy::Guideline(g)))
            .collect()
    }

    pub fn groups_by_scope(&self) -> Vec<RuleGroupResult<'_>> {
        [RuleScope::Element, RuleScope::Page, RuleScope::Website]
            .iter()
            .map(|s| self.group(GroupBy::Scope(*s)))
            .filter(|g| !g.is_empty())
            .collect()
    }

    /// Rules that aborted instead of producing results
    pub fn incomplete_rules(&self) -> Vec<&RuleResult> {
        self.rule_results.iter().filter(|r| !r.is_complete()).collect()
    }

    pub fn has_violations(&self) -> bool {
        self.rule_results
            .iter()
            .any(|r| r.value() == RuleResultValue::Violation)
    }

    pub fn headings(&self) -> Vec<HeadingView<'_>> {
        self.cache
            .headings()
            .iter()
            .filter_map(|h| {
                let el = self.cache.element(h.element)?;
                Some(HeadingView {
                    ordinal_position: el.ordinal_position,
                    level: h.level,
                    name: el.name(),
                    is_visible_to_at: el.is_visible_to_at,
                })
            })
            .collect()
    }

    pub fn landmarks(&self) -> Vec<LandmarkView<'_>> {
        self.cache
            .landmarks()
            .iter()
            .filter_map(|l| {
                let el = self.cache.element(l.element)?;
                Some(LandmarkView {
                    ordinal_position: el.ordinal_position,
                    role: l.role,
                    label: &l.label,
                    parent_role: self.cache.parent_landmark_role(el),
                    heading_count: l.child_headings.len(),
                    is_visible_to_at: l.is_visible_to_at,
                    is_duplicate_label: l.is_duplicate_label,
                })
            })
            .collect()
    }

    pub fn links(&self) -> Vec<LinkView<'_>> {
        let base = Url::parse(self.url()).ok();
        self.cache
            .members(self.cache.links())
            .map(|el| {
                let href = el.attr("href");
                LinkView {
                    ordinal_position: el.ordinal_position,
                    name: el.name(),
                    href,
                    kind: href.and_then(|h| classify_link(base.as_ref(), h)),
                    is_visible_to_at: el.is_visible_to_at,
                }
            })
            .collect()
    }

    /// Deterministic JSON report; identical results give identical output
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.json_report())?)
    }

    /// The same report as [`to_json`](Self::to_json), for embedding in batch reports
    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self.json_report())?)
    }

    /// Short readable label for a result target, e.g. `img#logo` or `page`
    pub fn target_label(&self, target: ResultTarget) -> String {
        match target {
            ResultTarget::Element(id) => self
                .cache
                .element(id)
                .map(|el| el.identifier())
                .unwrap_or_else(|| "element".to_string()),
            ResultTarget::TextRun(id) => self
                .cache
                .text_run(id)
                .and_then(|run| self.cache.element(run.parent))
                .map(|el| format!("text in {}", el.identifier()))
                .unwrap_or_else(|| "text".to_string()),
            ResultTarget::Page => "page".to_string(),
            ResultTarget::Website => "website".to_string(),
            ResultTarget::Rule => "rule".to_string(),
        }
    }

    fn json_report(&self) -> EvaluationJson<'_> {
        let summary = self.summary();
        EvaluationJson {
            title: self.title(),
            url: self.url(),
            language: self.cache.page().language.as_deref(),
            ruleset: self.ruleset,
            level: self.level,
            scope_filter: self.scope,
            summary,
            implementation_score: summary.implementation_score(),
            implementation_level: summary.implementation_level(),
            rule_results: self.rule_results.iter().map(|r| self.rule_json(r)).collect(),
        }
    }

    fn rule_json<'a>(&'a self, result: &'a RuleResult) -> RuleResultJson<'a> {
        let info = result.info;
        RuleResultJson {
            rule_id: info.id,
            summary: info.summary,
            scope: info.scope,
            category: info.category,
            category_bits: info.category.bits(),
            required: info.required,
            wcag_primary: info.wcag_primary,
            wcag_related: info.wcag_related,
            wcag_level: info.level(),
            result_value: result.value(),
            counts: result.summary,
            implementation_score: result.implementation_score(),
            error: result.error.as_ref().map(|e| e.to_string()),
            node_results: result.node_results.iter().map(|n| self.node_json(n)).collect(),
        }
    }

    fn node_json<'a>(&'a self, result: &'a NodeResult) -> NodeResultJson<'a> {
        NodeResultJson {
            classification: result.classification,
            message_id: result.message_id,
            args: &result.args,
            target: self.target_json(result.target),
        }
    }

    fn target_json(&self, target: ResultTarget) -> TargetJson<'_> {
        let mut json = TargetJson {
            kind: match target {
                ResultTarget::Element(_) => "ELEMENT",
                ResultTarget::TextRun(_) => "TEXT_RUN",
                ResultTarget::Page => "PAGE",
                ResultTarget::Website => "WEBSITE",
                ResultTarget::Rule => "RULE",
            },
            ..Default::default()
        };
        let element = match target {
            ResultTarget::Element(id) => self.cache.element(id),
            ResultTarget::TextRun(id) => self.cache.text_run(id).and_then(|run| {
                json.text = Some(&run.text);
                json.contrast_ratio = Some(run.contrast_ratio);
                self.cache.element(run.parent)
            }),
            _ => None,
        };
        if let Some(el) = element {
            json.ordinal_position = Some(el.ordinal_position);
            json.tag_name = Some(&el.tag_name);
            json.identifier = Some(el.identifier());
            json.role = Some(el.resolved_role);
            json.accessible_name = Some(el.name());
        }
        json
    }
}

/// Where a link points relative to the evaluated page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LinkKind {
    Internal,
    External,
    /// mailto:, tel:, javascript: and other non-web schemes
    Other,
}

fn classify_link(base: Option<&Url>, href: &str) -> Option<LinkKind> {
    let href = href.trim();
    let target = match base {
        Some(base) => base.join(href).ok()?,
        None => Url::parse(href).ok()?,
    };
    if !matches!(target.scheme(), "http" | "https" | "file") {
        return Some(LinkKind::Other);
    }
    match base {
        Some(base) if base.host_str() == target.host_str() => Some(LinkKind::Internal),
        _ => Some(LinkKind::External),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingView<'a> {
    pub ordinal_position: usize,
    pub level: u8,
    pub name: &'a str,
    pub is_visible_to_at: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandmarkView<'a> {
    pub ordinal_position: usize,
    pub role: &'static str,
    pub label: &'a str,
    pub parent_role: Option<&'static str>,
    pub heading_count: usize,
    pub is_visible_to_at: bool,
    pub is_duplicate_label: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkView<'a> {
    pub ordinal_position: usize,
    pub name: &'a str,
    pub href: Option<&'a str>,
    pub kind: Option<LinkKind>,
    pub is_visible_to_at: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EvaluationJson<'a> {
    title: &'a str,
    url: &'a str,
    language: Option<&'a str>,
    ruleset: Ruleset,
    level: WcagLevel,
    scope_filter: ScopeFilter,
    summary: ResultsSummary,
    implementation_score: Option<u8>,
    implementation_level: ImplementationLevel,
    rule_results: Vec<RuleResultJson<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RuleResultJson<'a> {
    rule_id: &'static str,
    summary: &'static str,
    scope: RuleScope,
    category: RuleCategory,
    category_bits: u32,
    required: bool,
    wcag_primary: &'static str,
    wcag_related: &'static [&'static str],
    wcag_level: WcagLevel,
    result_value: RuleResultValue,
    counts: ResultsSummary,
    implementation_score: Option<u8>,
    error: Option<String>,
    node_results: Vec<NodeResultJson<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NodeResultJson<'a> {
    classification: Classification,
    message_id: &'static str,
    args: &'a [String],
    target: TargetJson<'a>,
}

#[derive(Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct TargetJson<'a> {
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    ordinal_position: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    accessible_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contrast_ratio: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_links() {
        let base = Url::parse("https://example.com/docs/index.html").ok();
        let base = base.as_ref();
        assert_eq!(classify_link(base, "/about"), Some(LinkKind::Internal));
        assert_eq!(classify_link(base, "page2.html"), Some(LinkKind::Internal));
        assert_eq!(classify_link(base, "https://other.org/"), Some(LinkKind::External));
        assert_eq!(classify_link(base, "mailto:a@example.com"), Some(LinkKind::Other));
    }

    #[test]
    fn test_classify_without_base() {
        assert_eq!(classify_link(None, "https://other.org/"), Some(LinkKind::External));
        assert_eq!(classify_link(None, "/relative"), None);
    }
}
