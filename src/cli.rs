//! CLI argument parsing for jobdrift

use crate::config::SimulationConfig;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the comparison report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text table (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "jobdrift")]
#[command(version)]
#[command(
    about = "Synthesize batch-job telemetry and compare run-time spread across an upgrade",
    long_about = None
)]
pub struct Cli {
    /// Load simulation settings from a TOML file
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Analyze run records from a JSON file instead of generating them
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Number of run records to generate
    #[arg(short = 'n', long = "population", value_name = "N")]
    pub population: Option<usize>,

    /// Number of distinct jobs in the generated catalog
    #[arg(short = 'j', long = "jobs", value_name = "N")]
    pub jobs: Option<usize>,

    /// Seed for the random stream
    #[arg(short = 's', long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,

    /// First day of the pre-cutover window (YYYY-MM-DD)
    #[arg(long = "start", value_name = "DATE")]
    pub start: Option<NaiveDate>,

    /// Cutover date (YYYY-MM-DD)
    #[arg(long = "cutover", value_name = "DATE")]
    pub cutover: Option<NaiveDate>,

    /// End of the post-cutover window, exclusive (YYYY-MM-DD)
    #[arg(long = "end", value_name = "DATE")]
    pub end: Option<NaiveDate>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Include the weekly series in the output
    #[arg(long = "weekly")]
    pub weekly: bool,

    /// Include a descriptive summary of the generated population
    #[arg(long = "summary")]
    pub summary: bool,

    /// Show only the first N rows of the text table
    #[arg(long = "top", value_name = "N")]
    pub top: Option<usize>,

    /// Write the generated records to a JSON file
    #[arg(long = "records-out", value_name = "FILE")]
    pub records_out: Option<PathBuf>,

    /// Drop records that violate causality instead of failing
    #[arg(long = "reject-invalid")]
    pub reject_invalid: bool,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Apply command-line overrides on top of `base`
    pub fn apply_overrides(&self, base: SimulationConfig) -> SimulationConfig {
        SimulationConfig {
            population_size: self.population.unwrap_or(base.population_size),
            job_count: self.jobs.unwrap_or(base.job_count),
            start_date: self.start.unwrap_or(base.start_date),
            cutover_date: self.cutover.unwrap_or(base.cutover_date),
            end_date: self.end.unwrap_or(base.end_date),
            seed: self.seed.unwrap_or(base.seed),
        }
    }
}
