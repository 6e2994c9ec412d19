// SPDX-License-Identifier: PMPL-1.0-or-later
//! WCAG success criterion reference data.
//!
//! Only the criteria referenced by the rule catalog are listed. The table is
//! read-only input; rules refer to criteria by their dotted id.

use serde::{Deserialize, Serialize};

/// WCAG conformance level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    /// Level A - minimum conformance
    A,
    /// Level AA - standard conformance
    AA,
    /// Level AAA - enhanced conformance
    AAA,
}

impl std::fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WcagLevel::A => write!(f, "A"),
            WcagLevel::AA => write!(f, "AA"),
            WcagLevel::AAA => write!(f, "AAA"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuccessCriterion {
    pub id: &'static str,
    pub title: &'static str,
    pub level: WcagLevel,
}

impl SuccessCriterion {
    /// Guideline id, e.g. "2.4" for "2.4.1"
    pub fn guideline_id(&self) -> &'static str {
        guideline_of(self.id)
    }
}

const SUCCESS_CRITERIA: &[SuccessCriterion] = &[
    SuccessCriterion { id: "1.1.1", title: "Non-text Content", level: WcagLevel::A },
    SuccessCriterion { id: "1.3.1", title: "Info and Relationships", level: WcagLevel::A },
    SuccessCriterion { id: "1.4.1", title: "Use of Color", level: WcagLevel::A },
    SuccessCriterion { id: "1.4.3", title: "Contrast (Minimum)", level: WcagLevel::AA },
    SuccessCriterion { id: "1.4.6", title: "Contrast (Enhanced)", level: WcagLevel::AAA },
    SuccessCriterion { id: "2.4.1", title: "Bypass Blocks", level: WcagLevel::A },
    SuccessCriterion { id: "2.4.2", title: "Page Titled", level: WcagLevel::A },
    SuccessCriterion { id: "2.4.4", title: "Link Purpose (In Context)", level: WcagLevel::A },
    SuccessCriterion { id: "2.4.6", title: "Headings and Labels", level: WcagLevel::AA },
    SuccessCriterion { id: "2.4.9", title: "Link Purpose (Link Only)", level: WcagLevel::AAA },
    SuccessCriterion { id: "2.4.10", title: "Section Headings", level: WcagLevel::AAA },
    SuccessCriterion { id: "3.1.1", title: "Language of Page", level: WcagLevel::A },
    SuccessCriterion { id: "3.3.2", title: "Labels or Instructions", level: WcagLevel::A },
    SuccessCriterion { id: "4.1.2", title: "Name, Role, Value", level: WcagLevel::A },
];

/// Look up a success criterion by dotted id
pub fn success_criterion(id: &str) -> Option<&'static SuccessCriterion> {
    SUCCESS_CRITERIA.iter().find(|sc| sc.id == id)
}

/// Level of a criterion; unknown ids are treated as level A so they are never filtered out
pub fn level_of(id: &str) -> WcagLevel {
    success_criterion(id).map(|sc| sc.level).unwrap_or(WcagLevel::A)
}

pub fn guideline_of(id: &str) -> &str {
    match id.rfind('.') {
        Some(idx) if id[..idx].contains('.') => &id[..idx],
        _ => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let sc = success_criterion("1.4.3").expect("known criterion");
        assert_eq!(sc.level, WcagLevel::AA);
        assert_eq!(sc.guideline_id(), "1.4");
        assert!(success_criterion("9.9.9").is_none());
    }

    #[test]
    fn test_guideline_of() {
        assert_eq!(guideline_of("2.4.10"), "2.4");
        assert_eq!(guideline_of("2.4"), "2.4");
    }

    #[test]
    fn test_level_ordering() {
        assert!(WcagLevel::A < WcagLevel::AA);
        assert!(WcagLevel::AA < WcagLevel::AAA);
        assert_eq!(level_of("1.4.6"), WcagLevel::AAA);
    }
}
