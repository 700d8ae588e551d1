//! Simulation configuration
//!
//! Defines the population size, job universe and the three calendar dates that
//! bound the pre- and post-cutover measurement windows.

use crate::error::{DriftError, Result};
use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for the synthetic workload generator
///
/// # Example
/// ```
/// use jobdrift::config::SimulationConfig;
///
/// let config = SimulationConfig::default();
/// assert_eq!(config.job_count, 166);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Total number of run records to synthesize across both windows
    pub population_size: usize,

    /// Number of distinct jobs (`JOB_1` ..= `JOB_n`)
    pub job_count: usize,

    /// First day of the pre-cutover window (inclusive)
    pub start_date: NaiveDate,

    /// The upgrade date; first day of the post-cutover window
    pub cutover_date: NaiveDate,

    /// End of the post-cutover window (exclusive)
    pub end_date: NaiveDate,

    /// Seed for the single sequential random stream
    pub seed: u64,
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            population_size: 1_000_000,
            job_count: 166,
            start_date: ymd(2023, 9, 1),
            cutover_date: ymd(2024, 5, 19),
            end_date: ymd(2024, 6, 22),
            seed: 42,
        }
    }
}

impl SimulationConfig {
    /// Load a configuration from a TOML file
    ///
    /// Missing keys fall back to [`SimulationConfig::default`]. Dates are
    /// quoted ISO strings.
    ///
    /// # Example TOML
    /// ```toml
    /// population_size = 50000
    /// job_count = 40
    /// start_date = "2023-09-01"
    /// cutover_date = "2024-05-19"
    /// end_date = "2024-06-22"
    /// seed = 7
    /// ```
    pub fn from_toml<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read config file: {}", path.as_ref().display())
        })?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.as_ref().display()))?;
        Ok(config)
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| DriftError::ConfigParse(e.to_string()))
    }

    /// Reject configurations that cannot produce a population
    pub fn validate(&self) -> Result<()> {
        if self.start_date >= self.cutover_date || self.cutover_date >= self.end_date {
            return Err(DriftError::InvalidDateOrder {
                start: self.start_date,
                cutover: self.cutover_date,
                end: self.end_date,
            });
        }

        if self.population_size == 0 {
            return Err(DriftError::EmptyPopulation);
        }

        if self.job_count == 0 {
            return Err(DriftError::EmptyJobUniverse);
        }

        Ok(())
    }

    /// Whole days in the pre-cutover window
    pub fn pre_days(&self) -> i64 {
        (self.cutover_date - self.start_date).num_days()
    }

    /// Whole days in the post-cutover window
    pub fn post_days(&self) -> i64 {
        (self.end_date - self.cutover_date).num_days()
    }

    /// Whole days across both windows
    pub fn total_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// Job names in catalog order
    pub fn job_names(&self) -> Vec<String> {
        (1..=self.job_count).map(|i| format!("JOB_{}", i)).collect()
    }
}
