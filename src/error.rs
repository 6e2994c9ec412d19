// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for a11ybot

use thiserror::Error;

pub type Result<T> = std::result::Result<T, A11ybotError>;

#[derive(Error, Debug)]
pub enum A11ybotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

/// Programmer errors raised while a rule records its results.
///
/// These abort the offending rule only; the evaluation carries on with the
/// next rule and reports the aborted one as incomplete.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("rule {rule_id}: unknown message id {message_id}")]
    UnknownMessage { rule_id: String, message_id: String },

    #[error("rule {rule_id}: message {message_id} expects {expected} argument(s), got {actual}")]
    ArgumentArity {
        rule_id: String,
        message_id: String,
        expected: usize,
        actual: usize,
    },

    #[error("rule {rule_id}: message {message_id} does not match classification {classification}")]
    ClassificationMismatch {
        rule_id: String,
        message_id: String,
        classification: String,
    },

    #[error("rule {rule_id}: message {message_id} does not match the result target")]
    TargetMismatch { rule_id: String, message_id: String },

    #[error("rule {rule_id}: second verdict {message_id} for a single-verdict target")]
    DuplicateVerdict { rule_id: String, message_id: String },

    #[error("rule {rule_id}: result target is not part of the cache")]
    UnknownTarget { rule_id: String },
}
