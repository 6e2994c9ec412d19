// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report generation for scan results.
//!
//! Supports multiple output formats:
//! - Text: per-page rule verdicts with WCAG criterion references
//! - JSON: the evaluation JSON of every page plus batch totals
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use crate::results::{Classification, EvaluationResult, RuleResult, RuleResultValue};
use crate::scanner::{PageReport, ScanReport};
use serde::Serialize;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI integration
    Sarif,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Sarif => write!(f, "sarif"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "sarif" => Ok(OutputFormat::Sarif),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Generate a report from a scan
pub fn generate_report(report: &ScanReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_text_report(report),
        OutputFormat::Json => generate_json_report(report),
        OutputFormat::Sarif => generate_sarif_report(report),
    }
}

/// `ELEMENT_FAIL_1 (img#logo: a, b)`
fn describe_result(result: &EvaluationResult, rule: &RuleResult, index: usize) -> String {
    let Some(node) = rule.node_results.get(index) else {
        return String::new();
    };
    let target = result.target_label(node.target);
    if node.args.is_empty() {
        format!("{} ({})", node.message_id, target)
    } else {
        format!("{} ({}: {})", node.message_id, target, node.args.join(", "))
    }
}

/// Generate human-readable text report
fn generate_text_report(report: &ScanReport) -> String {
    let mut output = String::new();

    output.push_str("=== a11ybot Accessibility Evaluation Report ===\n\n");

    if report.is_empty() {
        output.push_str("No HTML pages found.\n");
        return output;
    }

    for page in &report.pages {
        write_text_page(&mut output, page);
    }

    let summary = report.summary();
    output.push_str(&format!(
        "Totals: {} pass, {} fail, {} manual check, {} hidden, {} not applicable\n",
        summary.pass, summary.fail, summary.manual_check, summary.hidden, summary.not_applicable
    ));
    if let Some(score) = summary.implementation_score() {
        output.push_str(&format!("Implementation score: {} ({})\n", score, summary.implementation_level()));
    }

    if report.has_violations() {
        output.push_str("RESULT: VIOLATIONS FOUND\n");
    } else if report.summary().fail > 0 {
        output.push_str("RESULT: PASS WITH WARNINGS\n");
    } else {
        output.push_str("RESULT: PASS\n");
    }

    output
}

fn write_text_page(output: &mut String, page: &PageReport) {
    let result = &page.result;
    let title = if result.title().is_empty() { "(untitled)" } else { result.title() };
    output.push_str(&format!("Page: {} - {}\n", page.path.display(), title));
    output.push_str(&format!(
        "Ruleset {} / level {} / scope {}\n\n",
        result.ruleset(),
        result.level(),
        result.scope()
    ));

    for value in [
        RuleResultValue::Incomplete,
        RuleResultValue::Violation,
        RuleResultValue::Warning,
        RuleResultValue::ManualCheck,
    ] {
        let rules: Vec<&RuleResult> = result.rule_results().iter().filter(|r| r.value() == value).collect();
        if rules.is_empty() {
            continue;
        }

        output.push_str(&format!("--- {} ({}) ---\n", value, rules.len()));
        for rule in rules {
            let info = rule.info;
            output.push_str(&format!("[{}] {}\n", info.id, info.summary));
            output.push_str(&format!("  WCAG: {} (Level {})\n", info.wcag_primary, info.level()));
            if let Some(ref error) = rule.error {
                output.push_str(&format!("  Error: {}\n", error));
            }
            let shown = match value {
                RuleResultValue::ManualCheck => Classification::ManualCheck,
                _ => Classification::Fail,
            };
            for (index, node) in rule.node_results.iter().enumerate() {
                if node.classification == shown {
                    output.push_str(&format!("  {}\n", describe_result(result, rule, index)));
                }
            }
            output.push('\n');
        }
    }

    let passed = result
        .rule_results()
        .iter()
        .filter(|r| r.value() == RuleResultValue::Pass)
        .count();
    let score = result
        .implementation_score()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());
    output.push_str(&format!(
        "{} of {} rules passed, implementation score {}\n\n",
        passed,
        result.rule_results().len(),
        score
    ));
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonPage {
    path: String,
    evaluation: serde_json::Value,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport {
    generated_at: String,
    summary: crate::results::ResultsSummary,
    implementation_score: Option<u8>,
    has_violations: bool,
    pages: Vec<JsonPage>,
}

/// Generate JSON report
fn generate_json_report(report: &ScanReport) -> String {
    let pages: Result<Vec<JsonPage>, _> = report
        .pages
        .iter()
        .map(|page| {
            page.result.to_json_value().map(|evaluation| JsonPage {
                path: page.path.display().to_string(),
                evaluation,
            })
        })
        .collect();

    let pages = match pages {
        Ok(pages) => pages,
        Err(e) => return format!("{{\"error\": \"Failed to serialize evaluation: {}\"}}", e),
    };

    let summary = report.summary();
    let json = JsonReport {
        generated_at: report.generated_at.to_rfc3339(),
        summary,
        implementation_score: summary.implementation_score(),
        has_violations: report.has_violations(),
        pages,
    };

    serde_json::to_string_pretty(&json).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize report: {}\"}}", e)
    })
}

/// SARIF report structure (simplified)
#[derive(Debug, Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Debug, Serialize)]
struct SarifDriver {
    name: String,
    version: String,
    #[serde(rename = "informationUri")]
    information_uri: String,
    rules: Vec<SarifRule>,
}

#[derive(Debug, Serialize)]
struct SarifRule {
    id: String,
    #[serde(rename = "shortDescription")]
    short_description: SarifMessage,
    properties: SarifRuleProperties,
}

#[derive(Debug, Serialize)]
struct SarifRuleProperties {
    wcag: String,
    level: String,
    category: String,
}

#[derive(Debug, Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Debug, Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Debug, Serialize)]
struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation,
    #[serde(rename = "logicalLocations")]
    logical_locations: Vec<SarifLogicalLocation>,
}

#[derive(Debug, Serialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifactLocation,
}

#[derive(Debug, Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

#[derive(Debug, Serialize)]
struct SarifLogicalLocation {
    name: String,
}

/// Generate SARIF report; only FAIL results are reported
fn generate_sarif_report(report: &ScanReport) -> String {
    let mut rules: Vec<SarifRule> = Vec::new();
    let mut results = Vec::new();

    for page in &report.pages {
        for rule in page.result.rule_results() {
            let info = rule.info;
            let level = if info.required { "error" } else { "warning" };

            for (index, node) in rule.node_results.iter().enumerate() {
                if node.classification != Classification::Fail {
                    continue;
                }
                if !rules.iter().any(|r| r.id == info.id) {
                    rules.push(SarifRule {
                        id: info.id.to_string(),
                        short_description: SarifMessage { text: info.summary.to_string() },
                        properties: SarifRuleProperties {
                            wcag: info.wcag_primary.to_string(),
                            level: info.level().to_string(),
                            category: info.category.label().to_string(),
                        },
                    });
                }
                results.push(SarifResult {
                    rule_id: info.id.to_string(),
                    level: level.to_string(),
                    message: SarifMessage {
                        text: format!("{}: {}", info.summary, describe_result(&page.result, rule, index)),
                    },
                    locations: vec![SarifLocation {
                        physical_location: SarifPhysicalLocation {
                            artifact_location: SarifArtifactLocation {
                                uri: page.path.display().to_string(),
                            },
                        },
                        logical_locations: vec![SarifLogicalLocation {
                            name: page.result.target_label(node.target),
                        }],
                    }],
                });
            }
        }
    }

    let sarif = SarifReport {
        schema: "https://json.schemastore.org/sarif-2.1.0.json".to_string(),
        version: "2.1.0".to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "a11ybot".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    information_uri: "https://github.com/hyperpolymath/a11ybot".to_string(),
                    rules,
                },
            },
            results,
        }],
    };

    serde_json::to_string_pretty(&sarif).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize SARIF report: {}\"}}", e)
    })
}
