//! JSON output format for drift comparisons
//!
//! Emits the ranked comparison table, optionally followed by the weekly series
//! and the population summary.

use crate::comparison::{ComparisonRow, ComparisonTable, WeeklyAggregate};
use crate::summary::PopulationSummary;
use chrono::NaiveDate;
use serde::Serialize;

/// Run parameters echoed into the document
#[derive(Debug, Clone, Serialize)]
pub struct JsonRunInfo {
    pub cutover_date: NaiveDate,
    pub records: usize,
    pub rejected_records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Classification counts
#[derive(Debug, Clone, Default, Serialize)]
pub struct JsonTally {
    pub improvement: usize,
    pub regression: usize,
    pub no_change: usize,
}

/// Complete JSON document
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    pub version: String,
    pub format: String,
    pub run: JsonRunInfo,
    pub tally: JsonTally,
    pub comparison: Vec<ComparisonRow>,
    pub excluded_jobs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly: Option<Vec<WeeklyAggregate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<PopulationSummary>,
}

impl JsonOutput {
    pub fn new(run: JsonRunInfo, table: &ComparisonTable) -> Self {
        let tally = table.tally();
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "jobdrift-json-v1".to_string(),
            run,
            tally: JsonTally {
                improvement: tally.improvement,
                regression: tally.regression,
                no_change: tally.no_change,
            },
            comparison: table.rows.clone(),
            excluded_jobs: table.excluded_jobs.clone(),
            weekly: None,
            summary: None,
        }
    }

    pub fn set_weekly(&mut self, weekly: &[WeeklyAggregate]) {
        self.weekly = Some(weekly.to_vec());
    }

    pub fn set_summary(&mut self, summary: PopulationSummary) {
        self.summary = Some(summary);
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
