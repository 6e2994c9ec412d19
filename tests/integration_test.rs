// SPDX-License-Identifier: PMPL-1.0-or-later
//! Integration tests for a11ybot

use a11ybot::config::{load_config, write_default_config, Config};
use a11ybot::dom::html::parse_html;
use a11ybot::evaluator::{evaluate, EvaluationContext};
use a11ybot::report::{generate_report, OutputFormat};
use a11ybot::results::{Classification, ResultsSummary, RuleResultValue};
use a11ybot::rules::{Ruleset, ScopeFilter};
use a11ybot::scanner::{self, ScanReport};
use a11ybot::wcag::WcagLevel;
use std::path::Path;

fn all_rules() -> Config {
    Config { ruleset: Ruleset::All, ..Config::default() }
}

fn scan_fixture(name: &str, config: &Config) -> ScanReport {
    scanner::scan_file(&Path::new("tests/fixtures").join(name), config).expect("scan should succeed")
}

fn rule_value(report: &ScanReport, rule_id: &str) -> Option<RuleResultValue> {
    report.pages[0].result.rule_result(rule_id).map(|r| r.value())
}

#[test]
fn test_accessible_fixture_has_no_violations() {
    let report = scan_fixture("accessible.html", &all_rules());
    let result = &report.pages[0].result;

    let violations: Vec<&str> = result
        .rule_results()
        .iter()
        .filter(|r| r.value() == RuleResultValue::Violation)
        .map(|r| r.rule_id())
        .collect();
    assert!(violations.is_empty(), "unexpected violations: {:?}", violations);
    assert!(result.incomplete_rules().is_empty());
    assert_eq!(result.title(), "Harbour Books - Home");
}

#[test]
fn test_accessible_fixture_structure() {
    let report = scan_fixture("accessible.html", &all_rules());
    let result = &report.pages[0].result;

    let roles: Vec<&str> = result.landmarks().iter().map(|l| l.role).collect();
    assert_eq!(roles, vec!["banner", "navigation", "main", "contentinfo"]);

    let levels: Vec<u8> = result.headings().iter().map(|h| h.level).collect();
    assert_eq!(levels, vec![1, 2, 2, 2]);

    assert_eq!(rule_value(&report, "TABLE_1"), Some(RuleResultValue::Pass));
    assert_eq!(rule_value(&report, "TABLE_2"), Some(RuleResultValue::Pass));
    assert_eq!(rule_value(&report, "LIST_1"), Some(RuleResultValue::ManualCheck));
    assert_eq!(rule_value(&report, "LANGUAGE_1"), Some(RuleResultValue::Pass));
}

#[test]
fn test_inaccessible_fixture_violations() {
    let report = scan_fixture("inaccessible.html", &all_rules());
    assert!(report.has_violations());

    for rule_id in [
        "IMAGE_1", "IMAGE_3", "COLOR_1", "LANDMARK_1", "LANDMARK_2", "LANDMARK_3", "CONTROL_1",
        "CONTROL_9", "LINK_1", "WIDGET_1", "WIDGET_2", "WIDGET_3", "WIDGET_4", "WIDGET_6", "TITLE_1",
        "LANGUAGE_1", "FRAME_2",
    ] {
        assert_eq!(rule_value(&report, rule_id), Some(RuleResultValue::Violation), "{}", rule_id);
    }

    // Optional rules only warn
    assert_eq!(rule_value(&report, "HEADING_1"), Some(RuleResultValue::Warning));
    assert_eq!(rule_value(&report, "CONTROL_4"), Some(RuleResultValue::Warning));
}

#[test]
fn test_partial_fixture() {
    let report = scan_fixture("partial.html", &all_rules());
    assert!(report.has_violations());
    assert_eq!(rule_value(&report, "IMAGE_1"), Some(RuleResultValue::Violation));
    assert_eq!(rule_value(&report, "HEADING_5"), Some(RuleResultValue::Violation));
    assert_eq!(rule_value(&report, "LINK_2"), Some(RuleResultValue::ManualCheck));
    assert_eq!(rule_value(&report, "TITLE_1"), Some(RuleResultValue::Pass));
}

#[test]
fn test_scan_fixtures_directory() {
    let report = scanner::scan_directory(Path::new("tests/fixtures"), &all_rules()).expect("scan should succeed");
    assert_eq!(report.pages.len(), 3);
    assert!(report.has_violations());
}

#[test]
fn test_empty_alt_is_decorative() {
    let doc = parse_html(r#"<html><body><main><img src="rule.png" alt=""><img src="x.png"></main></body></html>"#);
    let result = evaluate(&doc, doc.title(), "", Ruleset::Triage, WcagLevel::A, ScopeFilter::Element);
    let image = result.rule_result("IMAGE_1").expect("IMAGE_1 selected");
    let messages: Vec<(Classification, &str)> = image
        .node_results
        .iter()
        .map(|r| (r.classification, r.message_id))
        .collect();
    assert_eq!(messages, vec![
        (Classification::Pass, "ELEMENT_PASS_2"),
        (Classification::Fail, "ELEMENT_FAIL_1"),
    ]);
}

#[test]
fn test_json_is_byte_identical_across_runs() {
    let markup = std::fs::read_to_string("tests/fixtures/inaccessible.html").expect("fixture");
    let context = EvaluationContext::new(all_rules());
    let run = || {
        let doc = parse_html(&markup);
        context.evaluate(&doc, doc.title(), "https://example.com/").to_json().expect("json")
    };
    assert_eq!(run(), run());
}

#[test]
fn test_summaries_are_consistent() {
    let report = scan_fixture("inaccessible.html", &all_rules());
    let result = &report.pages[0].result;

    let mut folded = ResultsSummary::default();
    for rule in result.rule_results() {
        assert_eq!(rule.summary, ResultsSummary::from_results(&rule.node_results));
        folded.add(&rule.summary);
    }
    assert_eq!(folded, result.summary());

    let grouped: usize = result.groups_by_category().iter().map(|g| g.summary.total()).sum();
    assert_eq!(grouped, result.summary().total());

    let score = result.implementation_score().expect("scoreable");
    assert!(score < 100);
}

#[test]
fn test_level_a_selects_fewer_rules() {
    let level_a = Config { level: WcagLevel::A, ..all_rules() };
    let a = scan_fixture("inaccessible.html", &level_a);
    let aa = scan_fixture("inaccessible.html", &all_rules());
    assert!(a.pages[0].result.rule_results().len() < aa.pages[0].result.rule_results().len());
    assert!(a.pages[0].result.rule_result("COLOR_1").is_none());
}

#[test]
fn test_reports_render() {
    let report = scan_fixture("inaccessible.html", &all_rules());

    let text = generate_report(&report, OutputFormat::Text);
    assert!(text.contains("a11ybot Accessibility Evaluation Report"));
    assert!(text.contains("WCAG"));
    assert!(text.contains("RESULT: VIOLATIONS FOUND"));

    let json: serde_json::Value =
        serde_json::from_str(&generate_report(&report, OutputFormat::Json)).expect("valid JSON");
    assert_eq!(json["pages"].as_array().map(|p| p.len()), Some(1));

    let sarif: serde_json::Value =
        serde_json::from_str(&generate_report(&report, OutputFormat::Sarif)).expect("valid JSON");
    assert_eq!(sarif["version"], "2.1.0");
    assert_eq!(sarif["runs"][0]["tool"]["driver"]["name"], "a11ybot");
}

#[test]
fn test_config_file_drives_scan() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("a11ybot.toml");
    write_default_config(&path).expect("write");
    assert_eq!(load_config(&path).expect("load"), Config::default());

    std::fs::write(&path, "ruleset = \"TRIAGE\"\nlevel = \"A\"\n").expect("write");
    let config = load_config(&path).expect("load");
    let report = scan_fixture("inaccessible.html", &config);
    assert!(report.pages[0].result.rule_result("LANDMARK_1").is_none());
    assert!(report.pages[0].result.rule_result("IMAGE_1").is_some());
}
