//! Configuration module for hmpi
//!
//! This module handles:
//! - Config file loading (hmpi.toml, .hmpirc.json)
//! - Input policy selection for the index engine
//! - Analytics defaults
//! - CLI defaults

mod hmpi_config;

pub use hmpi_config::{
    load_config, load_config_file, AnalyticsConfig, CliDefaults, EngineConfig, HmpiConfig,
    CONFIG_FILE_NAMES, CONFIG_TEMPLATE,
};
