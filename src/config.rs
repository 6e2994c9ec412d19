// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration for a11ybot

use crate::error::{A11ybotError, Result};
use crate::rules::{Ruleset, ScopeFilter};
use crate::wcag::WcagLevel;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ruleset: Ruleset,
    pub level: WcagLevel,
    pub scope: ScopeFilter,
    /// Directory names skipped by directory scans
    pub exclude: Vec<String>,
    pub contrast: ContrastConfig,
}

/// Thresholds used by the contrast cache and the text contrast rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContrastConfig {
    /// Minimum ratio for normal text
    pub normal_text_min: f64,
    /// Minimum ratio for large text
    pub large_text_min: f64,
    /// Text at or above this size (px) is large regardless of weight
    pub large_font_px: f64,
    /// Bold text at or above this size (px) is large
    pub large_bold_font_px: f64,
    /// Weight from which text counts as bold
    pub bold_weight: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ruleset: Ruleset::Level,
            level: WcagLevel::AA,
            scope: ScopeFilter::All,
            exclude: vec![
                "target".to_string(),
                "node_modules".to_string(),
                ".git".to_string(),
                "dist".to_string(),
                "build".to_string(),
            ],
            contrast: ContrastConfig::default(),
        }
    }
}

impl Default for ContrastConfig {
    fn default() -> Self {
        Self {
            normal_text_min: 4.5,
            large_text_min: 3.0,
            // 18pt and 14pt bold
            large_font_px: 24.0,
            large_bold_font_px: 18.66,
            bold_weight: 700,
        }
    }
}

impl ContrastConfig {
    pub fn is_large_font(&self, size_px: f64, weight: u16) -> bool {
        size_px >= self.large_font_px
            || (size_px >= self.large_bold_font_px && weight >= self.bold_weight)
    }

    pub fn minimum_for(&self, large_font: bool) -> f64 {
        if large_font {
            self.large_text_min
        } else {
            self.normal_text_min
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;

    if path.extension().and_then(|s| s.to_str()) == Some("toml") {
        toml::from_str(&content)
            .map_err(|e| A11ybotError::Config(format!("TOML parse error: {}", e)))
    } else {
        serde_yaml::from_str(&content)
            .map_err(|e| A11ybotError::Config(format!("YAML parse error: {}", e)))
    }
}

pub fn write_default_config(path: &Path) -> Result<()> {
    let config = Config::default();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let content = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
        toml::to_string_pretty(&config)
            .map_err(|e| A11ybotError::Config(format!("TOML serialize error: {}", e)))?
    } else {
        serde_yaml::to_string(&config)?
    };

    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = load_config(Path::new("/nonexistent/a11ybot.yml")).expect("defaults");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_yaml_round_trip_through_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("a11ybot.yml");
        write_default_config(&path).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("a11ybot.toml");
        std::fs::write(&path, "ruleset = \"ALL\"\nlevel = \"AAA\"\n\n[contrast]\nnormal_text_min = 7.0\n")
            .expect("write");
        let config = load_config(&path).expect("load");
        assert_eq!(config.ruleset, Ruleset::All);
        assert_eq!(config.level, WcagLevel::AAA);
        assert_eq!(config.contrast.normal_text_min, 7.0);
        assert_eq!(config.contrast.large_text_min, 3.0);
        assert_eq!(config.scope, ScopeFilter::All);
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.yml");
        std::fs::write(&path, "ruleset: [not, a, ruleset").expect("write");
        assert!(matches!(load_config(&path), Err(A11ybotError::Config(_))));
    }

    #[test]
    fn test_large_font_thresholds() {
        let contrast = ContrastConfig::default();
        assert!(contrast.is_large_font(24.0, 400));
        assert!(contrast.is_large_font(19.0, 700));
        assert!(!contrast.is_large_font(19.0, 400));
        assert!(!contrast.is_large_font(16.0, 700));
    }
}
