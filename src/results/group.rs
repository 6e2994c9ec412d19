// SPDX-License-Identifier: PMPL-1.0-or-later
//! Groups of rule results.

use super::{ImplementationLevel, ResultsSummary, RuleResult, RuleResultValue};
use crate::rules::{RuleCategory, RuleInfo, RuleScope};
use serde::Serialize;

/// How rule results are selected into a group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Category(RuleCategory),
    /// WCAG guideline id, e.g. "1.4"
    Guideline(&'static str),
    Scope(RuleScope),
    All,
}

impl GroupBy {
    pub fn matches(&self, info: &RuleInfo) -> bool {
        match self {
            GroupBy::Category(category) => info.category == *category,
            GroupBy::Guideline(guideline) => info.guideline() == *guideline,
            GroupBy::Scope(scope) => info.scope == *scope,
            GroupBy::All => true,
        }
    }

    pub fn title(&self) -> String {
        match self {
            GroupBy::Category(category) => category.label().to_string(),
            GroupBy::Guideline(guideline) => format!("Guideline {}", guideline),
            GroupBy::Scope(scope) => format!("{} rules", scope),
            GroupBy::All => "All rules".to_string(),
        }
    }
}

/// Number of rules per rule-level verdict
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleTally {
    pub violations: usize,
    pub warnings: usize,
    pub manual_checks: usize,
    pub passed: usize,
    pub not_applicable: usize,
    pub incomplete: usize,
}

impl RuleTally {
    pub fn record(&mut self, value: RuleResultValue) {
        match value {
            RuleResultValue::Violation => self.violations += 1,
            RuleResultValue::Warning => self.warnings += 1,
            RuleResultValue::ManualCheck => self.manual_checks += 1,
            RuleResultValue::Pass => self.passed += 1,
            RuleResultValue::NotApplicable => self.not_applicable += 1,
            RuleResultValue::Incomplete => self.incomplete += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.violations + self.warnings + self.manual_checks + self.passed + self.not_applicable + self.incomplete
    }
}

/// Read-only view over the rule results that belong to one group
#[derive(Debug, Clone)]
pub struct RuleGroupResult<'e> {
    pub group: GroupBy,
    pub rule_results: Vec<&'e RuleResult>,
    pub summary: ResultsSummary,
    pub tally: RuleTally,
}

impl<'e> RuleGroupResult<'e> {
    pub fn new(group: GroupBy, results: &'e [RuleResult]) -> Self {
        let rule_results: Vec<&RuleResult> = results.iter().filter(|r| group.matches(r.info)).collect();
        let mut summary = ResultsSummary::default();
        let mut tally = RuleTally::default();
        for result in &rule_results {
            summary.add(&result.summary);
            tally.record(result.value());
        }
        Self { group, rule_results, summary, tally }
    }

    pub fn title(&self) -> String {
        self.group.title()
    }

    pub fn is_empty(&self) -> bool {
        self.rule_results.is_empty()
    }

    pub fn implementation_score(&self) -> Option<u8> {
        self.summary.implementation_score()
    }

    pub fn implementation_level(&self) -> ImplementationLevel {
        self.summary.implementation_level()
    }
}
