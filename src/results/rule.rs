// SPDX-License-Identifier: PMPL-1.0-or-later
//! Results of a single rule.

use super::{Classification, NodeResult, ResultsSummary};
use crate::error::RuleError;
use crate::rules::RuleInfo;
use serde::Serialize;

/// Rule-level verdict derived from the node results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleResultValue {
    /// The rule aborted with a logic error
    Incomplete,
    Violation,
    Warning,
    ManualCheck,
    Pass,
    NotApplicable,
}

impl std::fmt::Display for RuleResultValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleResultValue::Incomplete => write!(f, "INCOMPLETE"),
            RuleResultValue::Violation => write!(f, "VIOLATION"),
            RuleResultValue::Warning => write!(f, "WARNING"),
            RuleResultValue::ManualCheck => write!(f, "MANUAL_CHECK"),
            RuleResultValue::Pass => write!(f, "PASS"),
            RuleResultValue::NotApplicable => write!(f, "NOT_APPLICABLE"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RuleResult {
    pub info: &'static RuleInfo,
    pub node_results: Vec<NodeResult>,
    pub summary: ResultsSummary,
    /// Set when the rule aborted; `node_results` is then empty
    pub error: Option<RuleError>,
}

impl RuleResult {
    pub fn completed(info: &'static RuleInfo, node_results: Vec<NodeResult>) -> Self {
        let summary = ResultsSummary::from_results(&node_results);
        Self { info, node_results, summary, error: None }
    }

    pub fn aborted(info: &'static RuleInfo, error: RuleError) -> Self {
        Self {
            info,
            node_results: Vec::new(),
            summary: ResultsSummary::default(),
            error: Some(error),
        }
    }

    pub fn rule_id(&self) -> &'static str {
        self.info.id
    }

    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    pub fn value(&self) -> RuleResultValue {
        if self.error.is_some() {
            RuleResultValue::Incomplete
        } else if self.summary.fail > 0 {
            if self.info.required {
                RuleResultValue::Violation
            } else {
                RuleResultValue::Warning
            }
        } else if self.summary.manual_check > 0 {
            RuleResultValue::ManualCheck
        } else if self.summary.pass > 0 {
            RuleResultValue::Pass
        } else {
            RuleResultValue::NotApplicable
        }
    }

    pub fn implementation_score(&self) -> Option<u8> {
        self.summary.implementation_score()
    }

    /// Results with the given classification, in recording order
    pub fn with_classification(&self, classification: Classification) -> impl Iterator<Item = &NodeResult> {
        self.node_results
            .iter()
            .filter(move |r| r.classification == classification)
    }
}
