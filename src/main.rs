// SPDX-License-Identifier: PMPL-1.0-or-later
//! a11ybot CLI - semantic DOM cache and WCAG/ARIA rule evaluation

use a11ybot::config::{load_config, write_default_config, Config};
use a11ybot::evaluator::EvaluationContext;
use a11ybot::report::{generate_report, OutputFormat};
use a11ybot::rules::{self, Ruleset, ScopeFilter};
use a11ybot::scanner::{self, ScanReport};
use a11ybot::wcag::WcagLevel;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Accessibility evaluation of HTML pages against WCAG/ARIA rules
#[derive(Parser)]
#[command(name = "a11ybot")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single HTML file
    Evaluate {
        /// File to evaluate
        file: PathBuf,

        /// URL the page is served from (defaults to its file:// URL)
        #[arg(long)]
        url: Option<String>,

        #[command(flatten)]
        options: EvalOptions,
    },

    /// Evaluate every HTML file in a directory
    Check {
        /// Directory to scan
        dir: PathBuf,

        #[command(flatten)]
        options: EvalOptions,
    },

    /// List the rule catalog
    Rules {
        #[command(flatten)]
        options: EvalOptions,
    },

    /// Write a default configuration file (.toml or .yaml)
    InitConfig {
        /// Destination path
        path: PathBuf,
    },
}

#[derive(Args)]
struct EvalOptions {
    /// Rule set to run
    #[arg(long)]
    ruleset: Option<RulesetArg>,

    /// WCAG conformance level
    #[arg(long)]
    level: Option<WcagLevelArg>,

    /// Restrict rules by scope
    #[arg(long)]
    scope: Option<ScopeArg>,

    /// Output format
    #[arg(long, default_value = "text")]
    format: FormatArg,

    /// Configuration file (TOML or YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    verbose: bool,
}

impl EvalOptions {
    /// Config file values with command-line flags applied on top
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => Config::default(),
        };
        if let Some(ruleset) = self.ruleset {
            config.ruleset = ruleset.into();
        }
        if let Some(level) = self.level {
            config.level = level.into();
        }
        if let Some(scope) = self.scope {
            config.scope = scope.into();
        }
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RulesetArg {
    /// Triage rules only
    Triage,
    /// Triage and more
    Level,
    /// Every rule
    All,
}

impl From<RulesetArg> for Ruleset {
    fn from(arg: RulesetArg) -> Self {
        match arg {
            RulesetArg::Triage => Ruleset::Triage,
            RulesetArg::Level => Ruleset::Level,
            RulesetArg::All => Ruleset::All,
        }
    }
}

/// WCAG conformance level CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum WcagLevelArg {
    /// Level A - minimum
    A,
    /// Level AA - standard
    Aa,
    /// Level AAA - enhanced
    Aaa,
}

impl From<WcagLevelArg> for WcagLevel {
    fn from(arg: WcagLevelArg) -> Self {
        match arg {
            WcagLevelArg::A => WcagLevel::A,
            WcagLevelArg::Aa => WcagLevel::AA,
            WcagLevelArg::Aaa => WcagLevel::AAA,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScopeArg {
    All,
    Element,
    Page,
    Website,
}

impl From<ScopeArg> for ScopeFilter {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::All => ScopeFilter::All,
            ScopeArg::Element => ScopeFilter::Element,
            ScopeArg::Page => ScopeFilter::Page,
            ScopeArg::Website => ScopeFilter::Website,
        }
    }
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI
    Sarif,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Sarif => OutputFormat::Sarif,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("a11ybot=debug")
    } else {
        EnvFilter::new("a11ybot=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate { file, url, options } => {
            init_logging(options.verbose);
            let config = options.config()?;
            let report = match url {
                Some(url) => {
                    let context = EvaluationContext::new(config);
                    ScanReport::new(vec![scanner::evaluate_file(&file, &url, &context)?])
                }
                None => scanner::scan_file(&file, &config)?,
            };
            finish(&report, &options)?;
        }

        Commands::Check { dir, options } => {
            init_logging(options.verbose);
            let config = options.config()?;
            let report = scanner::scan_directory(&dir, &config)?;
            finish(&report, &options)?;
        }

        Commands::Rules { options } => {
            init_logging(options.verbose);
            let config = options.config()?;
            let listing = list_rules(&config);
            write_output(&listing, options.output.as_deref())?;
        }

        Commands::InitConfig { path } => {
            init_logging(false);
            write_default_config(&path)?;
            eprintln!("Default configuration written to {}", path.display());
        }
    }

    Ok(())
}

/// Write the report and exit non-zero when a required rule failed
fn finish(report: &ScanReport, options: &EvalOptions) -> anyhow::Result<()> {
    let rendered = generate_report(report, options.format.into());
    write_output(&rendered, options.output.as_deref())?;

    if report.has_violations() {
        std::process::exit(1);
    }
    Ok(())
}

/// One line per catalog rule, marking the ones the configuration selects
fn list_rules(config: &Config) -> String {
    let mut output = String::new();
    for rule in rules::catalog(&config.contrast) {
        let info = rule.info;
        let selected = info.is_selected(config.ruleset, config.level, config.scope);
        output.push_str(&format!(
            "{} {:<12} {:<8} {:<18} {:<6} {:<3} {}\n",
            if selected { "*" } else { " " },
            info.id,
            info.scope.to_string(),
            info.category.label(),
            info.wcag_primary,
            info.level().to_string(),
            info.summary
        ));
    }
    output
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
