//! CLI command definitions and handlers

mod compute;
mod init;
mod report;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use hmpi::config::{load_config, load_config_file, HmpiConfig};
use hmpi::reporters::{self, OutputFormat};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    check_workers(n)
}

fn check_workers(n: usize) -> Result<usize, String> {
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// Parse a `NAME=VALUE` concentration pair
fn parse_metal_pair(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("'{}' is not NAME=VALUE", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("'{}' has an empty metal name", s));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value.trim()))?;
    Ok((name.to_string(), value))
}

/// HMPI - heavy metal pollution indices for water samples
#[derive(Parser, Debug)]
#[command(name = "hmpi")]
#[command(
    version,
    about = "Compute heavy metal pollution indices (HPI, HEI, Cd) and health risk for water samples",
    after_help = "\
Examples:
  hmpi compute --lead 0.02                    Indices for one sample
  hmpi compute --lead 0.004 --zinc 1.2 -f json
  hmpi report samples.json                    Batch report for a JSON array of samples
  hmpi report samples.json -f json -o out.json
  hmpi limits                                 Show permissible limits and weights
  hmpi init                                   Write an hmpi.toml template"
)]
pub struct Cli {
    /// Config file (default: hmpi.toml or .hmpirc.json in the current directory)
    #[arg(long, global = true, env = "HMPI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Number of parallel workers for batch evaluation (1-64)
    #[arg(long, global = true, value_parser = parse_workers)]
    pub workers: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write an hmpi.toml config file with the default settings
    Init {
        /// Directory to write hmpi.toml into
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing hmpi.toml
        #[arg(long)]
        force: bool,
    },

    /// Compute indices for a single sample
    Compute {
        #[command(flatten)]
        metals: MetalArgs,

        /// Output format: text, json
        #[arg(long, short = 'f', value_parser = ["text", "json"])]
        format: Option<String>,
    },

    /// Evaluate a JSON array of samples and print aggregate analytics
    #[command(after_help = "\
Input is a JSON array of samples:
  [
    {\"location\": {\"name\": \"Well 4\", \"latitude\": 12.9, \"longitude\": 77.5},
     \"sampleDate\": \"2024-03-01\",
     \"metals\": {\"lead\": 0.004, \"zinc\": 1.2}}
  ]")]
    Report {
        /// Path to the samples file
        input: PathBuf,

        /// Output format: text, json
        #[arg(long, short = 'f', value_parser = ["text", "json"])]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Locations per leaderboard
        #[arg(long)]
        top: Option<usize>,

        /// Days covered by the trend series
        #[arg(long)]
        days: Option<u32>,

        /// Last day of the trend window (YYYY-MM-DD, default: today)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Show the permissible limits and HPI weights
    Limits {
        /// Output format: text, json
        #[arg(long, short = 'f', value_parser = ["text", "json"])]
        format: Option<String>,
    },
}

/// Concentrations in mg/L; omitted metals count as 0
#[derive(Args, Debug, Default)]
pub struct MetalArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub lead: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub mercury: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub cadmium: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub arsenic: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub chromium: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub copper: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub zinc: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub nickel: Option<f64>,

    /// Any other reading as NAME=VALUE (unrecognized names are ignored)
    #[arg(long = "metal", value_name = "NAME=VALUE", value_parser = parse_metal_pair)]
    pub extra: Vec<(String, f64)>,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Init { path, force } => init::run(&path, force),

        Commands::Compute { metals, format } => {
            let format = output_format(format.as_deref(), &config)?;
            compute::run(&config, metals, format)
        }

        Commands::Report {
            input,
            format,
            output,
            top,
            days,
            as_of,
        } => {
            let format = output_format(format.as_deref(), &config)?;
            let workers = resolve_workers(cli.workers, &config)?;
            report::run(
                &config,
                report::ReportArgs {
                    input,
                    format,
                    output,
                    top,
                    days,
                    as_of,
                    workers,
                },
            )
        }

        Commands::Limits { format } => {
            let format = output_format(format.as_deref(), &config)?;
            print!("{}", reporters::limits(format)?);
            Ok(())
        }
    }
}

/// Explicit `--config` must load; otherwise search the working directory
fn resolve_config(explicit: Option<&Path>) -> Result<HmpiConfig> {
    match explicit {
        Some(path) => load_config_file(path)
            .with_context(|| format!("Invalid config file {}", path.display())),
        None => {
            let cwd = std::env::current_dir().context("Cannot determine current directory")?;
            Ok(load_config(&cwd))
        }
    }
}

/// CLI flag > config default; the config value gets the same 1-64 check
fn resolve_workers(flag: Option<usize>, config: &HmpiConfig) -> Result<Option<usize>> {
    if flag.is_some() {
        return Ok(flag);
    }
    config
        .defaults
        .workers
        .map(check_workers)
        .transpose()
        .map_err(|e| anyhow::anyhow!("Invalid [defaults] workers in config: {}", e))
}

/// CLI flag > config default > text
fn output_format(flag: Option<&str>, config: &HmpiConfig) -> Result<OutputFormat> {
    let chosen = flag
        .or(config.defaults.format.as_deref())
        .unwrap_or("text");
    debug!("Output format: {}", chosen);
    chosen.parse()
}
