// SPDX-License-Identifier: PMPL-1.0-or-later
//! Evaluation results.
//!
//! `NodeResult`s are folded into a [`RuleResult`] per rule, rule results into
//! [`RuleGroupResult`]s and the whole run into an [`EvaluationResult`]. Every
//! level carries a [`ResultsSummary`]. All views are computed from already
//! recorded results; nothing here runs a rule.

pub mod evaluation;
pub mod group;
pub mod rule;

pub use evaluation::{EvaluationResult, HeadingView, LandmarkView, LinkKind, LinkView};
pub use group::{GroupBy, RuleGroupResult, RuleTally};
pub use rule::{RuleResult, RuleResultValue};

use crate::cache::{ElementId, TextRunId};
use serde::Serialize;

/// Wire-stable verdict of one result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    Pass,
    Fail,
    ManualCheck,
    Hidden,
    NotApplicable,
}

impl Classification {
    /// Token used inside message ids
    pub fn token(&self) -> &'static str {
        match self {
            Classification::Pass => "PASS",
            Classification::Fail => "FAIL",
            Classification::ManualCheck => "MC",
            Classification::Hidden => "HIDDEN",
            Classification::NotApplicable => "NA",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Pass => write!(f, "PASS"),
            Classification::Fail => write!(f, "FAIL"),
            Classification::ManualCheck => write!(f, "MANUAL_CHECK"),
            Classification::Hidden => write!(f, "HIDDEN"),
            Classification::NotApplicable => write!(f, "NOT_APPLICABLE"),
        }
    }
}

/// What a result is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultTarget {
    Element(ElementId),
    TextRun(TextRunId),
    Page,
    Website,
    /// The rule itself, used for the engine's not-applicable marker
    Rule,
}

impl ResultTarget {
    /// Message id prefix this target requires
    pub fn message_prefix(&self) -> &'static str {
        match self {
            ResultTarget::Element(_) | ResultTarget::TextRun(_) => "ELEMENT",
            ResultTarget::Page => "PAGE",
            ResultTarget::Website => "WEBSITE",
            ResultTarget::Rule => "RULE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeResult {
    pub classification: Classification,
    pub target: ResultTarget,
    pub message_id: &'static str,
    /// Positional substitution arguments for the message template
    pub args: Vec<String>,
}

/// Counts per classification plus the derived implementation score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsSummary {
    pub pass: usize,
    pub fail: usize,
    pub manual_check: usize,
    pub hidden: usize,
    pub not_applicable: usize,
}

impl ResultsSummary {
    pub fn from_results(results: &[NodeResult]) -> Self {
        let mut summary = ResultsSummary::default();
        for result in results {
            summary.record(result.classification);
        }
        summary
    }

    pub fn record(&mut self, classification: Classification) {
        match classification {
            Classification::Pass => self.pass += 1,
            Classification::Fail => self.fail += 1,
            Classification::ManualCheck => self.manual_check += 1,
            Classification::Hidden => self.hidden += 1,
            Classification::NotApplicable => self.not_applicable += 1,
        }
    }

    pub fn add(&mut self, other: &ResultsSummary) {
        self.pass += other.pass;
        self.fail += other.fail;
        self.manual_check += other.manual_check;
        self.hidden += other.hidden;
        self.not_applicable += other.not_applicable;
    }

    pub fn total(&self) -> usize {
        self.pass + self.fail + self.manual_check + self.hidden + self.not_applicable
    }

    /// PASS / (PASS + FAIL + MANUAL_CHECK) as a rounded percentage.
    ///
    /// `None` when nothing scoreable was recorded. A perfect ratio with any
    /// FAIL or MANUAL_CHECK present is reported as 99.
    pub fn implementation_score(&self) -> Option<u8> {
        let denominator = self.pass + self.fail + self.manual_check;
        if denominator == 0 {
            return None;
        }
        let score = ((100 * self.pass) as f64 / denominator as f64).round() as u8;
        if score == 100 && self.fail + self.manual_check > 0 {
            Some(99)
        } else {
            Some(score)
        }
    }

    pub fn implementation_level(&self) -> ImplementationLevel {
        if self.pass + self.fail + self.manual_check == 0 {
            return ImplementationLevel::NotApplicable;
        }
        if self.pass + self.fail == 0 {
            return ImplementationLevel::ManualChecksOnly;
        }
        if self.fail == 0 {
            return if self.manual_check > 0 {
                ImplementationLevel::CompleteWithManualChecks
            } else {
                ImplementationLevel::Complete
            };
        }
        let ratio = 100.0 * self.pass as f64 / (self.pass + self.fail) as f64;
        if ratio > 95.0 {
            ImplementationLevel::AlmostComplete
        } else if ratio > 50.0 {
            ImplementationLevel::Partial
        } else {
            ImplementationLevel::NotImplemented
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImplementationLevel {
    NotApplicable,
    NotImplemented,
    Partial,
    AlmostComplete,
    Complete,
    CompleteWithManualChecks,
    ManualChecksOnly,
}

impl std::fmt::Display for ImplementationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ImplementationLevel::NotApplicable => "not applicable",
            ImplementationLevel::NotImplemented => "not implemented",
            ImplementationLevel::Partial => "partial",
            ImplementationLevel::AlmostComplete => "almost complete",
            ImplementationLevel::Complete => "complete",
            ImplementationLevel::CompleteWithManualChecks => "complete with manual checks",
            ImplementationLevel::ManualChecksOnly => "manual checks only",
        };
        write!(f, "{}", label)
    }
}
