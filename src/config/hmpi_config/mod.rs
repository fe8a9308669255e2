//! Configuration file support
//!
//! Loads settings from `hmpi.toml` or `.hmpirc.json` in a directory, or
//! from an explicit path.
//!
//! # Configuration Format
//!
//! ```toml
//! # hmpi.toml
//!
//! [engine]
//! invalid_input = "reject"   # or "clamp"
//!
//! [analytics]
//! leaderboard_size = 10
//! trend_days = 30
//!
//! [defaults]
//! format = "text"
//! workers = 8
//! ```
//!
//! Permissible limits and HPI weights are regulatory constants and cannot
//! be configured.

use crate::analytics::{DEFAULT_LEADERBOARD_SIZE, DEFAULT_TREND_DAYS};
use crate::engine::{IndexEngine, InputPolicy};
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Config file names, in lookup order
pub const CONFIG_FILE_NAMES: &[&str] = &["hmpi.toml", ".hmpirc.json"];

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct HmpiConfig {
    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Index engine settings
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct EngineConfig {
    /// Handling of negative concentrations (reject, clamp)
    #[serde(default)]
    pub invalid_input: InputPolicy,
}

/// Aggregation settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AnalyticsConfig {
    /// Locations per leaderboard (default: 10)
    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: usize,

    /// Days covered by the trend series (default: 30)
    #[serde(default = "default_trend_days")]
    pub trend_days: u32,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            leaderboard_size: default_leaderboard_size(),
            trend_days: default_trend_days(),
        }
    }
}

fn default_leaderboard_size() -> usize {
    DEFAULT_LEADERBOARD_SIZE
}
fn default_trend_days() -> u32 {
    DEFAULT_TREND_DAYS
}

/// Default CLI flags that can be set in the config file
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct CliDefaults {
    /// Default output format (text, json)
    #[serde(default)]
    pub format: Option<String>,

    /// Default number of workers
    #[serde(default)]
    pub workers: Option<usize>,
}

impl HmpiConfig {
    /// Engine built from the `[engine]` section
    pub fn engine(&self) -> IndexEngine {
        IndexEngine::new(self.engine.invalid_input)
    }
}

/// Load configuration from a directory.
///
/// Searches for `hmpi.toml`, then `.hmpirc.json`. A file that fails to
/// parse is logged and skipped. Returns defaults if nothing usable is found.
pub fn load_config(dir: &Path) -> HmpiConfig {
    for name in CONFIG_FILE_NAMES {
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {:#}", path.display(), e);
            }
        }
    }

    debug!("No config found, using defaults");
    HmpiConfig::default()
}

/// Load one config file, choosing the format by extension
pub fn load_config_file(path: &Path) -> anyhow::Result<HmpiConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let config = if is_json {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content)?
    };
    Ok(config)
}

/// Template written by `hmpi init`
pub const CONFIG_TEMPLATE: &str = r#"# HMPI configuration

[engine]
# What to do with a negative concentration for a recognized metal:
#   "reject" - fail the sample (default)
#   "clamp"  - treat it as 0
# NaN and infinite values are always rejected.
invalid_input = "reject"

[analytics]
# Locations shown on each leaderboard
leaderboard_size = 10

# Days covered by the daily trend series
trend_days = 30

[defaults]
# Default output format (text, json)
format = "text"

# Parallel workers for batch evaluation
# workers = 8
"#;
