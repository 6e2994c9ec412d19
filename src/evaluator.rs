// SPDX-License-Identifier: PMPL-1.0-or-later
//! Evaluation entry point.
//!
//! An [`EvaluationContext`] is built per evaluation from a [`Config`] and
//! owns everything the run needs. Nothing is shared between evaluations.

use crate::cache::SemanticCache;
use crate::config::Config;
use crate::dom::Document;
use crate::engine;
use crate::results::EvaluationResult;
use crate::rules::{self, Ruleset, ScopeFilter};
use crate::wcag::WcagLevel;
use tracing::{debug, info};

/// Settings for one evaluation
#[derive(Debug, Clone, Default)]
pub struct EvaluationContext {
    pub config: Config,
}

impl EvaluationContext {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Build the semantic cache for `document` and run the selected rules against it
    pub fn evaluate(&self, document: &Document, title: &str, url: &str) -> EvaluationResult {
        let cache = SemanticCache::build(document, title, url, &self.config.contrast);
        let rules = rules::selected_rules(&self.config);
        debug!(
            "Selected {} rules (ruleset {}, level {}, scope {})",
            rules.len(),
            self.config.ruleset,
            self.config.level,
            self.config.scope
        );

        let rule_results = engine::run_rules(&rules, &cache);
        let result = EvaluationResult::new(
            cache,
            rule_results,
            self.config.ruleset,
            self.config.level,
            self.config.scope,
        );

        info!(
            "Evaluated {}: {} rules, {} incomplete",
            if url.is_empty() { "document" } else { url },
            result.rule_results().len(),
            result.incomplete_rules().len()
        );
        result
    }
}

/// Evaluate `document` with default contrast settings and the given selection
pub fn evaluate(
    document: &Document,
    title: &str,
    url: &str,
    ruleset: Ruleset,
    level: WcagLevel,
    scope: ScopeFilter,
) -> EvaluationResult {
    let config = Config { ruleset, level, scope, ..Config::default() };
    EvaluationContext::new(config).evaluate(document, title, url)
}
