// SPDX-License-Identifier: PMPL-1.0-or-later
//! File and directory scanning.
//!
//! Walks directory trees, loads HTML pages and evaluates each one with the
//! same [`EvaluationContext`].

use crate::config::Config;
use crate::dom::html::parse_html;
use crate::evaluator::EvaluationContext;
use crate::results::{EvaluationResult, ResultsSummary};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use url::Url;
use walkdir::WalkDir;

/// File extensions to scan
const SCANNABLE_EXTENSIONS: &[&str] = &["html", "htm"];

/// One evaluated page
#[derive(Debug)]
pub struct PageReport {
    pub path: PathBuf,
    pub result: EvaluationResult,
}

/// Results of a scan run
#[derive(Debug)]
pub struct ScanReport {
    pub generated_at: DateTime<Utc>,
    pub pages: Vec<PageReport>,
}

impl ScanReport {
    pub fn new(pages: Vec<PageReport>) -> Self {
        Self { generated_at: Utc::now(), pages }
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Counts over every page
    pub fn summary(&self) -> ResultsSummary {
        let mut summary = ResultsSummary::default();
        for page in &self.pages {
            summary.add(&page.result.summary());
        }
        summary
    }

    /// Any page has a required rule with a FAIL result
    pub fn has_violations(&self) -> bool {
        self.pages.iter().any(|p| p.result.has_violations())
    }
}

/// `file://` URL for a path, or the plain path when it cannot be expressed as one
fn file_url(path: &Path) -> String {
    std::fs::canonicalize(path)
        .ok()
        .and_then(|p| Url::from_file_path(p).ok())
        .map(|u| u.to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Load and evaluate one HTML file as if served from `url`
pub fn evaluate_file(path: &Path, url: &str, context: &EvaluationContext) -> anyhow::Result<PageReport> {
    // invalid UTF-8 sequences become U+FFFD
    let bytes = std::fs::read(path)?;
    let markup = String::from_utf8_lossy(&bytes);
    let document = parse_html(&markup);
    let result = context.evaluate(&document, document.title(), url);
    debug!("{}: {} results", path.display(), result.summary().total());
    Ok(PageReport { path: path.to_path_buf(), result })
}

/// Evaluate a single file
pub fn scan_file(path: &Path, config: &Config) -> anyhow::Result<ScanReport> {
    let context = EvaluationContext::new(config.clone());
    let page = evaluate_file(path, &file_url(path), &context)?;
    Ok(ScanReport::new(vec![page]))
}

/// Evaluate every HTML file under `dir`, skipping excluded and hidden directories
pub fn scan_directory(dir: &Path, config: &Config) -> anyhow::Result<ScanReport> {
    let context = EvaluationContext::new(config.clone());
    let mut pages = Vec::new();

    info!("Scanning directory: {}", dir.display());

    let walker = WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_str().unwrap_or("");
            if e.file_type().is_dir() && e.depth() > 0 {
                return !config.exclude.iter().any(|x| x == name) && !name.starts_with('.');
            }
            true
        });

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if !SCANNABLE_EXTENSIONS.contains(&ext.as_str()) {
            continue;
        }

        match evaluate_file(path, &file_url(path), &context) {
            Ok(page) => pages.push(page),
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }

    let report = ScanReport::new(pages);
    info!(
        "Scanned {} pages, {} failures",
        report.pages.len(),
        report.summary().fail
    );
    Ok(report)
}
