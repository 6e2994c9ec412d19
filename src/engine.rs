// SPDX-License-Identifier: PMPL-1.0-or-later
//! Rule evaluation engine.
//!
//! Rules run one at a time in catalog order against the finished cache. A
//! rule that records nothing gets a single rule-level NOT_APPLICABLE result.
//! A rule that returns an error is recorded as incomplete and its partial
//! results are dropped; the remaining rules still run.

use crate::cache::SemanticCache;
use crate::error::RuleError;
use crate::results::{Classification, NodeResult, ResultTarget, RuleResult};
use crate::rules::{RuleDescriptor, RuleInfo};
use tracing::{debug, warn};

/// Message id the engine records for rules with no qualifying content
pub const RULE_NOT_APPLICABLE: &str = "RULE_NA_1";

/// Append-only collector handed to a rule for one run
pub struct ResultSink<'r> {
    info: &'static RuleInfo,
    cache: &'r SemanticCache,
    results: Vec<NodeResult>,
    page_verdict: bool,
    website_verdict: bool,
}

impl<'r> ResultSink<'r> {
    pub fn new(info: &'static RuleInfo, cache: &'r SemanticCache) -> Self {
        Self {
            info,
            cache,
            results: Vec::new(),
            page_verdict: false,
            website_verdict: false,
        }
    }

    /// Record one result after checking it against the rule's declared messages
    pub fn add_result(
        &mut self,
        classification: Classification,
        target: ResultTarget,
        message_id: &str,
        args: &[&str],
    ) -> Result<(), RuleError> {
        let rule_id = self.info.id;
        let spec = self.info.message(message_id).ok_or_else(|| RuleError::UnknownMessage {
            rule_id: rule_id.to_string(),
            message_id: message_id.to_string(),
        })?;

        if args.len() != spec.arity {
            return Err(RuleError::ArgumentArity {
                rule_id: rule_id.to_string(),
                message_id: spec.id.to_string(),
                expected: spec.arity,
                actual: args.len(),
            });
        }

        let mut parts = spec.id.split('_');
        let prefix = parts.next().unwrap_or_default();
        let token = parts.next().unwrap_or_default();

        if token != classification.token() {
            return Err(RuleError::ClassificationMismatch {
                rule_id: rule_id.to_string(),
                message_id: spec.id.to_string(),
                classification: classification.to_string(),
            });
        }
        if prefix != target.message_prefix() || target == ResultTarget::Rule {
            return Err(RuleError::TargetMismatch {
                rule_id: rule_id.to_string(),
                message_id: spec.id.to_string(),
            });
        }

        match target {
            ResultTarget::Element(id) if self.cache.element(id).is_none() => {
                return Err(RuleError::UnknownTarget { rule_id: rule_id.to_string() });
            }
            ResultTarget::TextRun(id) if self.cache.text_run(id).is_none() => {
                return Err(RuleError::UnknownTarget { rule_id: rule_id.to_string() });
            }
            ResultTarget::Page => {
                if self.page_verdict {
                    return Err(RuleError::DuplicateVerdict {
                        rule_id: rule_id.to_string(),
                        message_id: spec.id.to_string(),
                    });
                }
                self.page_verdict = true;
            }
            ResultTarget::Website => {
                if self.website_verdict {
                    return Err(RuleError::DuplicateVerdict {
                        rule_id: rule_id.to_string(),
                        message_id: spec.id.to_string(),
                    });
                }
                self.website_verdict = true;
            }
            _ => {}
        }

        self.results.push(NodeResult {
            classification,
            target,
            message_id: spec.id,
            args: args.iter().map(|a| a.to_string()).collect(),
        });
        Ok(())
    }

    pub fn element(
        &mut self,
        classification: Classification,
        element: &crate::cache::ElementDescriptor,
        message_id: &str,
        args: &[&str],
    ) -> Result<(), RuleError> {
        self.add_result(classification, ResultTarget::Element(element.id), message_id, args)
    }

    pub fn text_run(
        &mut self,
        classification: Classification,
        run: &crate::cache::TextRunDescriptor,
        message_id: &str,
        args: &[&str],
    ) -> Result<(), RuleError> {
        self.add_result(classification, ResultTarget::TextRun(run.id), message_id, args)
    }

    pub fn page(&mut self, classification: Classification, message_id: &str, args: &[&str]) -> Result<(), RuleError> {
        self.add_result(classification, ResultTarget::Page, message_id, args)
    }

    pub fn website(&mut self, classification: Classification, message_id: &str, args: &[&str]) -> Result<(), RuleError> {
        self.add_result(classification, ResultTarget::Website, message_id, args)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    fn into_results(self) -> Vec<NodeResult> {
        self.results
    }
}

/// Run one rule against the cache
pub fn run_rule(descriptor: &RuleDescriptor, cache: &SemanticCache) -> RuleResult {
    let info = descriptor.info;
    let mut sink = ResultSink::new(info, cache);

    match descriptor.check.run(cache, &mut sink) {
        Ok(()) => {
            let mut results = sink.into_results();
            if results.is_empty() {
                results.push(NodeResult {
                    classification: Classification::NotApplicable,
                    target: ResultTarget::Rule,
                    message_id: RULE_NOT_APPLICABLE,
                    args: Vec::new(),
                });
            }
            debug!("{}: {} results", info.id, results.len());
            RuleResult::completed(info, results)
        }
        Err(e) => {
            warn!("Rule {} aborted: {}", info.id, e);
            RuleResult::aborted(info, e)
        }
    }
}

/// Run rules sequentially in the given order
pub fn run_rules(rules: &[RuleDescriptor], cache: &SemanticCache) -> Vec<RuleResult> {
    rules.iter().map(|rule| run_rule(rule, cache)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ElementId;
    use crate::config::ContrastConfig;
    use crate::dom::html::parse_html;
    use crate::results::RuleResultValue;
    use crate::rules::{msg, MessageSpec, RuleCategory, RuleCheck, RuleScope, RuleTier};

    static TEST_MESSAGES: &[MessageSpec] = &[
        msg("ELEMENT_PASS_1", 1),
        msg("ELEMENT_FAIL_1", 0),
        msg("PAGE_PASS_1", 0),
    ];

    static TEST_RULE: RuleInfo = RuleInfo {
        id: "TEST_1",
        summary: "test rule",
        scope: RuleScope::Page,
        category: RuleCategory::Headings,
        tier: RuleTier::Triage,
        required: true,
        wcag_primary: "1.3.1",
        wcag_related: &[],
        target_resources: &[],
        requires_attribute: None,
        messages: TEST_MESSAGES,
    };

    fn cache() -> SemanticCache {
        let doc = parse_html("<body><p>Hello</p></body>");
        SemanticCache::build(&doc, "", "", &ContrastConfig::default())
    }

    struct Nothing;
    impl RuleCheck for Nothing {
        fn run(&self, _: &SemanticCache, _: &mut ResultSink<'_>) -> Result<(), RuleError> {
            Ok(())
        }
    }

    struct Broken;
    impl RuleCheck for Broken {
        fn run(&self, cache: &SemanticCache, sink: &mut ResultSink<'_>) -> Result<(), RuleError> {
            sink.page(Classification::Pass, "PAGE_PASS_1", &[])?;
            let first = &cache.elements()[0];
            sink.element(Classification::Pass, first, "ELEMENT_PASS_1", &[])?;
            Ok(())
        }
    }

    #[test]
    fn test_empty_run_is_not_applicable() {
        let cache = cache();
        let result = run_rule(&RuleDescriptor::new(&TEST_RULE, Nothing), &cache);
        assert_eq!(result.node_results.len(), 1);
        assert_eq!(result.node_results[0].message_id, RULE_NOT_APPLICABLE);
        assert_eq!(result.node_results[0].target, ResultTarget::Rule);
        assert_eq!(result.value(), RuleResultValue::NotApplicable);
    }

    #[test]
    fn test_error_aborts_rule_and_drops_partial_results() {
        let cache = cache();
        let result = run_rule(&RuleDescriptor::new(&TEST_RULE, Broken), &cache);
        assert!(result.node_results.is_empty());
        assert_eq!(result.value(), RuleResultValue::Incomplete);
        assert!(matches!(result.error, Some(RuleError::ArgumentArity { expected: 1, actual: 0, .. })));
    }

    #[test]
    fn test_sink_validation() {
        let cache = cache();
        let mut sink = ResultSink::new(&TEST_RULE, &cache);
        let el = ResultTarget::Element(ElementId(0));

        assert!(matches!(
            sink.add_result(Classification::Pass, el, "ELEMENT_PASS_9", &[]),
            Err(RuleError::UnknownMessage { .. })
        ));
        assert!(matches!(
            sink.add_result(Classification::Fail, el, "ELEMENT_PASS_1", &["x"]),
            Err(RuleError::ClassificationMismatch { .. })
        ));
        assert!(matches!(
            sink.add_result(Classification::Pass, ResultTarget::Page, "ELEMENT_PASS_1", &["x"]),
            Err(RuleError::TargetMismatch { .. })
        ));
        assert!(matches!(
            sink.add_result(Classification::Pass, ResultTarget::Element(ElementId(999)), "ELEMENT_PASS_1", &["x"]),
            Err(RuleError::UnknownTarget { .. })
        ));
        assert!(sink.page(Classification::Pass, "PAGE_PASS_1", &[]).is_ok());
        assert!(matches!(
            sink.page(Classification::Pass, "PAGE_PASS_1", &[]),
            Err(RuleError::DuplicateVerdict { .. })
        ));
        assert!(sink.add_result(Classification::Pass, el, "ELEMENT_PASS_1", &["x"]).is_ok());
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_run_rules_keeps_order() {
        let cache = cache();
        let rules = vec![
            RuleDescriptor::new(&TEST_RULE, Broken),
            RuleDescriptor::new(&TEST_RULE, Nothing),
        ];
        let results = run_rules(&rules, &cache);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].value(), RuleResultValue::Incomplete);
        assert_eq!(results[1].value(), RuleResultValue::NotApplicable);
    }
}
