// Pre/post cutover IQR comparison
//
// Only jobs with weekly data on both sides of the cutover are compared. Rows
// are ranked by difference, most negative (largest improvement) first.

use crate::comparison::quartile::iqr;
use crate::comparison::weekly::WeeklyAggregate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Direction of the spread change for one job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Improvement,
    Regression,
    NoChange,
}

impl Classification {
    /// Classify by the sign of `iqr_post - iqr_pre`
    pub fn from_difference(difference: f64) -> Self {
        if difference < 0.0 {
            Classification::Improvement
        } else if difference > 0.0 {
            Classification::Regression
        } else {
            Classification::NoChange
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Classification::Improvement => "Improvement",
            Classification::Regression => "Regression",
            Classification::NoChange => "No Change",
        }
    }
}

/// One job's spread before and after the cutover
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub job_name: String,
    pub iqr_pre_minutes: f64,
    pub iqr_post_minutes: f64,
    pub difference_minutes: f64,
    /// `-100 * difference / iqr_pre`; `None` when `iqr_pre` is zero
    pub improvement_percent: Option<f64>,
    pub classification: Classification,
    pub pre_weeks: usize,
    pub post_weeks: usize,
}

/// Ranked comparison rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonTable {
    pub rows: Vec<ComparisonRow>,
    /// Jobs dropped because one partition had no weeks
    pub excluded_jobs: Vec<String>,
}

/// Count of rows per classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassificationTally {
    pub improvement: usize,
    pub regression: usize,
    pub no_change: usize,
}

impl ComparisonTable {
    pub fn tally(&self) -> ClassificationTally {
        let mut tally = ClassificationTally::default();
        for row in &self.rows {
            match row.classification {
                Classification::Improvement => tally.improvement += 1,
                Classification::Regression => tally.regression += 1,
                Classification::NoChange => tally.no_change += 1,
            }
        }
        tally
    }

    /// First row, the job whose spread shrank the most
    pub fn most_improved(&self) -> Option<&ComparisonRow> {
        self.rows
            .first()
            .filter(|row| row.classification == Classification::Improvement)
    }

    pub fn get(&self, job_name: &str) -> Option<&ComparisonRow> {
        self.rows.iter().find(|row| row.job_name == job_name)
    }
}

/// Compares per-job weekly spreads across the cutover
#[derive(Debug, Clone, Copy, Default)]
pub struct IqrComparator;

impl IqrComparator {
    pub fn new() -> Self {
        Self
    }

    pub fn compare(&self, weekly: &[WeeklyAggregate]) -> ComparisonTable {
        let mut pre: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        let mut post: BTreeMap<&str, Vec<f64>> = BTreeMap::new();

        for aggregate in weekly {
            let side = if aggregate.is_post_cutover {
                &mut post
            } else {
                &mut pre
            };
            side.entry(aggregate.job_name.as_str())
                .or_default()
                .push(aggregate.mean_duration_minutes);
        }

        let mut rows = Vec::new();
        for (job_name, pre_values) in &pre {
            let Some(post_values) = post.get(job_name) else {
                continue;
            };
            let (Some(iqr_pre), Some(iqr_post)) = (iqr(pre_values), iqr(post_values)) else {
                continue;
            };

            let difference = iqr_post - iqr_pre;
            let improvement_percent = if iqr_pre == 0.0 {
                tracing::debug!(job = *job_name, "pre-cutover IQR is zero; percent undefined");
                None
            } else {
                Some(-100.0 * difference / iqr_pre)
            };

            rows.push(ComparisonRow {
                job_name: job_name.to_string(),
                iqr_pre_minutes: iqr_pre,
                iqr_post_minutes: iqr_post,
                difference_minutes: difference,
                improvement_percent,
                classification: Classification::from_difference(difference),
                pre_weeks: pre_values.len(),
                post_weeks: post_values.len(),
            });
        }

        // Rows are already in job-name order, so a stable sort breaks ties by name.
        rows.sort_by(|a, b| a.difference_minutes.total_cmp(&b.difference_minutes));

        let all_jobs: BTreeSet<&str> = pre.keys().chain(post.keys()).copied().collect();
        let excluded_jobs: Vec<String> = all_jobs
            .into_iter()
            .filter(|job| !(pre.contains_key(job) && post.contains_key(job)))
            .map(str::to_string)
            .collect();

        if !excluded_jobs.is_empty() {
            tracing::info!(
                excluded = excluded_jobs.len(),
                "jobs without weeks on both sides of the cutover"
            );
        }

        ComparisonTable {
            rows,
            excluded_jobs,
        }
    }
}
