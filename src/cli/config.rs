use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::validator::{
    AllowAll, AssetLinksValidator, AssociationValidator, DEFAULT_ASSET_LINKS_ENDPOINT,
    StaticAssociations,
};

pub const DEFAULT_CONFIG_PATH: &str = "autofill-parser.yaml";
pub const DEFAULT_OWN_PACKAGE: &str = "keepass2android.keepass2android";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "autofill-parser",
    version,
    about = "Classify username and password fields in a view structure"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: autofill-parser.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Package of the credential provider itself
    #[arg(long, global = true)]
    pub own_package: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a fill request against a structure snapshot
    Fill {
        /// Structure file (JSON, or YAML for .yaml/.yml)
        #[arg(long)]
        structure: String,

        /// Treat the request as user-forced
        #[arg(long, default_value_t = false)]
        manual: bool,

        /// Requesting package, overriding the one recorded in the structure
        #[arg(long)]
        package: Option<String>,

        /// Association validator: allow-all, static or asset-links
        #[arg(long)]
        validator: Option<String>,

        /// Output format: json or text
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// Run a save request (not supported)
    Save {
        /// Structure file (JSON, or YAML for .yaml/.yml)
        #[arg(long)]
        structure: String,
    },

    /// Check whether autofill may be offered for a session identifier
    Check {
        /// Session identifier, e.g. example.com or app:com.example
        #[arg(long)]
        identifier: String,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ValidatorKind {
    AllowAll,
    #[default]
    Static,
    AssetLinks,
}

impl ValidatorKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "allow-all" => Some(ValidatorKind::AllowAll),
            "static" => Some(ValidatorKind::Static),
            "asset-links" => Some(ValidatorKind::AssetLinks),
            _ => None,
        }
    }
}

/// Optional YAML config file: `autofill-parser.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_own_package")]
    pub own_package: String,

    #[serde(default)]
    pub validator: ValidatorKind,

    /// Domain → packages allowed to claim it, for the static validator.
    #[serde(default)]
    pub associations: HashMap<String, Vec<String>>,

    #[serde(default = "default_asset_links_endpoint")]
    pub asset_links_endpoint: String,

    pub trace_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            own_package: default_own_package(),
            validator: ValidatorKind::default(),
            associations: HashMap::new(),
            asset_links_endpoint: default_asset_links_endpoint(),
            trace_path: None,
        }
    }
}

fn default_own_package() -> String { DEFAULT_OWN_PACKAGE.to_string() }
fn default_asset_links_endpoint() -> String { DEFAULT_ASSET_LINKS_ENDPOINT.to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("ignoring malformed config {}: {}", config_path, e);
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

pub fn build_validator(kind: ValidatorKind, config: &AppConfig) -> Box<dyn AssociationValidator> {
    match kind {
        ValidatorKind::AllowAll => Box::new(AllowAll),
        ValidatorKind::Static => Box::new(StaticAssociations::new(config.associations.clone())),
        ValidatorKind::AssetLinks => Box::new(AssetLinksValidator::new(&config.asset_links_endpoint)),
    }
}
