use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::browser::session::SessionOptions;
use crate::error::{AutofillError, Result};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "field-autofill",
    version,
    about = "Categorize form fields and fill the safe ones with your saved values"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: field-autofill.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Path to the saved mappings file (overrides the config file)
    #[arg(long, global = true)]
    pub mappings: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a page and show each field's category
    Scan {
        /// Page to open in the browser
        #[arg(long, conflicts_with = "fixture")]
        url: Option<String>,

        /// JSON page fixture to scan instead of a live page
        #[arg(long)]
        fixture: Option<String>,

        /// Output format: console or json
        #[arg(long, default_value = "console")]
        format: String,
    },

    /// Scan a page, then fill every safe field that has a saved value
    Fill {
        /// Page to open in the browser
        #[arg(long, conflicts_with = "fixture")]
        url: Option<String>,

        /// JSON page fixture to fill instead of a live page
        #[arg(long)]
        fixture: Option<String>,

        /// Print the fill plan without touching the page
        #[arg(long)]
        dry_run: bool,
    },

    /// Show or edit the saved category values
    Mappings {
        #[command(subcommand)]
        action: MappingAction,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum MappingAction {
    /// Print the current mappings
    Show,

    /// Set one or more values, e.g. `email=me@example.com`; `email=` clears one
    Set {
        #[arg(required = true)]
        entries: Vec<String>,
    },

    /// Remove categories from the mappings
    Unset {
        #[arg(required = true)]
        categories: Vec<String>,
    },

    /// Restore the built-in defaults
    Reset,
}

/// Where a scan or fill reads its fields from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Url(String),
    Fixture(String),
}

impl Target {
    pub fn from_args(url: Option<String>, fixture: Option<String>) -> Result<Self> {
        match (url, fixture) {
            (Some(url), None) => Ok(Target::Url(url)),
            (None, Some(path)) => Ok(Target::Fixture(path)),
            (Some(_), Some(_)) => Err(AutofillError::Validation(
                "use either --url or --fixture, not both".into(),
            )),
            (None, None) => Err(AutofillError::Validation(
                "one of --url or --fixture is required".into(),
            )),
        }
    }
}

/// Split a `category=value` argument.
pub fn parse_assignment(arg: &str) -> Result<(String, String)> {
    arg.split_once('=')
        .map(|(c, v)| (c.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| {
            AutofillError::Validation(format!("expected category=value, got '{}'", arg))
        })
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `field-autofill.yaml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub browser: SessionOptions,
    #[serde(default)]
    pub mappings: MappingsConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingsConfig {
    #[serde(default = "default_mappings_path")]
    pub path: String,
}

impl Default for MappingsConfig {
    fn default() -> Self {
        Self {
            path: default_mappings_path(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceConfig {
    /// JSONL file receiving one event per scan/fill; tracing is off when unset.
    pub path: Option<String>,
}

fn default_mappings_path() -> String {
    "field-mappings.json".to_string()
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("field-autofill.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = config_path, error = %e, "ignoring malformed config file");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

/// Mappings file: CLI flag first, then the config file.
pub fn resolve_mappings_path(cli_path: Option<&str>, config: &AppConfig) -> String {
    cli_path
        .map(str::to_string)
        .unwrap_or_else(|| config.mappings.path.clone())
}
