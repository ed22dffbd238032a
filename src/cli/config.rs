use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::request_model::GenerationOptions;

pub const DEFAULT_CONFIG_PATH: &str = "scenario-codegen.yaml";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "scenario-codegen",
    version,
    about = "Generate pytest page objects and tests from recorded browser scenarios"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: scenario-codegen.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate code from a recorded generation request
    Generate {
        /// Request file (.json, or .yaml / .yml)
        #[arg(long)]
        request: String,

        /// Write the composed code to this file instead of stdout
        #[arg(short, long, conflicts_with = "output_dir")]
        output: Option<String>,

        /// Write sections as a project layout (pages/, tests/) under this directory
        #[arg(long)]
        output_dir: Option<String>,

        /// Override options.generatePom
        #[arg(long)]
        pom: Option<bool>,

        /// Override options.generateTest
        #[arg(long)]
        test: Option<bool>,

        /// Override options.generateBasePage
        #[arg(long)]
        base_page: Option<bool>,

        /// Override options.renderMissingCode
        #[arg(long)]
        render_missing_code: Option<bool>,
    },

    /// Print the identifier derived for an element or a scenario name
    Name {
        /// Element data as JSON, e.g. '{"selectors": {"id": "submit"}}'
        #[arg(long, conflicts_with = "scenario", required_unless_present = "scenario")]
        element: Option<String>,

        /// Free-text scenario name
        #[arg(long)]
        scenario: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `scenario-codegen.yaml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub generate: OptionOverrides,
}

/// Per-flag overrides of the request's `options`. `None` keeps the
/// request's value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionOverrides {
    #[serde(default)]
    pub generate_pom: Option<bool>,

    #[serde(default)]
    pub generate_test: Option<bool>,

    #[serde(default)]
    pub generate_base_page: Option<bool>,

    #[serde(default)]
    pub render_missing_code: Option<bool>,
}

impl OptionOverrides {
    /// Layer `self` over `fallback`: set flags here win.
    pub fn or(self, fallback: OptionOverrides) -> OptionOverrides {
        OptionOverrides {
            generate_pom: self.generate_pom.or(fallback.generate_pom),
            generate_test: self.generate_test.or(fallback.generate_test),
            generate_base_page: self.generate_base_page.or(fallback.generate_base_page),
            render_missing_code: self.render_missing_code.or(fallback.render_missing_code),
        }
    }

    pub fn apply(&self, options: &mut GenerationOptions) {
        if let Some(v) = self.generate_pom {
            options.generate_pom = v;
        }
        if let Some(v) = self.generate_test {
            options.generate_test = v;
        }
        if let Some(v) = self.generate_base_page {
            options.generate_base_page = v;
        }
        if let Some(v) = self.render_missing_code {
            options.render_missing_code = v;
        }
    }
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = config_path, error = %e, "malformed config file, using defaults");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}
