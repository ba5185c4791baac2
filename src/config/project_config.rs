//! Project configuration loading
//!
//! Looks for, in order:
//! 1. `kaizen.toml`
//! 2. `.kaizenrc.json`
//!
//! ```toml
//! [report]
//! top_developers = 3
//! needs_attention = 3
//!
//! [overview]
//! max_items = 3
//! max_item_length = 140
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

const TOML_FILE: &str = "kaizen.toml";
const JSON_FILE: &str = ".kaizenrc.json";

/// Project-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct KaizenConfig {
    /// Report payload sizing
    #[serde(default)]
    pub report: ReportConfig,

    /// Deterministic overview limits
    #[serde(default)]
    pub overview: OverviewConfig,
}

/// How many developers a report lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Highest overall scores (default: 3)
    #[serde(default = "default_top_developers")]
    pub top_developers: usize,

    /// Lowest overall scores (default: 3)
    #[serde(default = "default_needs_attention")]
    pub needs_attention: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_developers: default_top_developers(),
            needs_attention: default_needs_attention(),
        }
    }
}

fn default_top_developers() -> usize {
    3
}
fn default_needs_attention() -> usize {
    3
}

/// Limits for the fallback overview bullets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewConfig {
    /// Bullets per list (default: 3)
    #[serde(default = "default_max_items")]
    pub max_items: usize,

    /// Characters per bullet including the ellipsis (default: 140)
    #[serde(default = "default_max_item_length")]
    pub max_item_length: usize,
}

impl Default for OverviewConfig {
    fn default() -> Self {
        Self {
            max_items: default_max_items(),
            max_item_length: default_max_item_length(),
        }
    }
}

fn default_max_items() -> usize {
    3
}
fn default_max_item_length() -> usize {
    140
}

impl KaizenConfig {
    /// Load from an explicit file; `.json` files are parsed as JSON,
    /// everything else as TOML
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        let config = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON in {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Invalid TOML in {}", path.display()))?
        };
        Ok(config)
    }
}

/// Load configuration from a project directory
///
/// Unreadable or invalid files are logged and skipped; with no usable
/// file the defaults are returned.
pub fn load_config(dir: &Path) -> KaizenConfig {
    for name in [TOML_FILE, JSON_FILE] {
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        match KaizenConfig::from_path(&path) {
            Ok(config) => {
                debug!("Loaded project config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {:#}", path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    KaizenConfig::default()
}
