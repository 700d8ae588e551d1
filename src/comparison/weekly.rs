// Weekly mean-duration aggregation
//
// Records are grouped by (job, calendar week of begin_time). Weeks run Monday
// 00:00 to Sunday 23:59:59 and are keyed by their Monday. A week is
// post-cutover when its Monday is on or after the cutover date.

use crate::error::{DriftError, Result};
use crate::record::JobRunRecord;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What to do with a record that breaks causal ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegrityPolicy {
    /// Fail the whole aggregation on the first bad record
    #[default]
    Abort,
    /// Drop bad records and report them in the outcome
    Reject,
}

/// Mean duration of one job within one calendar week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyAggregate {
    pub job_name: String,
    pub week_start: NaiveDate,
    pub mean_duration_minutes: f64,
    pub is_post_cutover: bool,
    /// Number of runs averaged into this week
    pub run_count: usize,
}

/// Weekly series plus any records rejected on the way
#[derive(Debug, Default)]
pub struct AggregationOutcome {
    pub aggregates: Vec<WeeklyAggregate>,
    pub rejected: Vec<DriftError>,
}

/// Monday of the week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Groups run records into weekly means
#[derive(Debug, Clone, Copy)]
pub struct Aggregator {
    cutover: NaiveDate,
    policy: IntegrityPolicy,
}

impl Aggregator {
    pub fn new(cutover: NaiveDate) -> Self {
        Self {
            cutover,
            policy: IntegrityPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: IntegrityPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn cutover(&self) -> NaiveDate {
        self.cutover
    }

    /// Aggregate `records` into rows sorted by (job, week)
    pub fn aggregate(&self, records: &[JobRunRecord]) -> Result<AggregationOutcome> {
        let mut groups: BTreeMap<(&str, NaiveDate), (f64, usize)> = BTreeMap::new();
        let mut rejected = Vec::new();

        for (index, record) in records.iter().enumerate() {
            if let Err(violation) = record.check_causality(index) {
                match self.policy {
                    IntegrityPolicy::Abort => return Err(violation),
                    IntegrityPolicy::Reject => {
                        tracing::warn!("Rejecting record: {}", violation);
                        rejected.push(violation);
                        continue;
                    }
                }
            }

            let key = (record.job_name.as_str(), week_start(record.begin_time.date()));
            let entry = groups.entry(key).or_insert((0.0, 0));
            entry.0 += record.duration_minutes();
            entry.1 += 1;
        }

        let aggregates = groups
            .into_iter()
            .map(|((job_name, week), (sum, count))| WeeklyAggregate {
                job_name: job_name.to_string(),
                week_start: week,
                mean_duration_minutes: sum / count as f64,
                is_post_cutover: week >= self.cutover,
                run_count: count,
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            records = records.len(),
            weeks = aggregates.len(),
            rejected = rejected.len(),
            "aggregated weekly means"
        );

        Ok(AggregationOutcome {
            aggregates,
            rejected,
        })
    }
}
