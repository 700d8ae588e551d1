//! Descriptive summary of a generated population
//!
//! Counts records per window and schedule class, buckets durations for
//! scheduler and human submissions, and re-checks timestamp consistency.

use crate::error::{DriftError, Result};
use crate::job::ScheduleClass;
use crate::record::JobRunRecord;
use crate::workload::{JobCatalog, Population};
use serde::Serialize;
use std::collections::BTreeMap;

/// Upper bounds (exclusive, minutes) of the duration buckets; the last is inclusive
const BUCKET_BOUNDS_MINUTES: [(f64, &str); 5] = [
    (2.0, "under 2 minutes"),
    (15.0, "2 to 15 minutes"),
    (240.0, "15 minutes to 4 hours"),
    (1440.0, "4 hours to 1 day"),
    (4320.0, "1 day to 3 days"),
];

/// Record counts per duration bucket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DurationBuckets {
    pub total: usize,
    pub counts: Vec<(String, usize)>,
}

impl DurationBuckets {
    fn from_records<'a>(records: impl Iterator<Item = &'a JobRunRecord>) -> Self {
        let mut counts = vec![0usize; BUCKET_BOUNDS_MINUTES.len()];
        let mut total = 0;
        for record in records {
            total += 1;
            let minutes = record.duration_minutes();
            let last = BUCKET_BOUNDS_MINUTES.len() - 1;
            let slot = BUCKET_BOUNDS_MINUTES
                .iter()
                .position(|(bound, _)| minutes < *bound)
                .or_else(|| (minutes <= BUCKET_BOUNDS_MINUTES[last].0).then_some(last));
            if let Some(i) = slot {
                counts[i] += 1;
            }
        }

        Self {
            total,
            counts: BUCKET_BOUNDS_MINUTES
                .iter()
                .zip(counts)
                .map(|((_, label), n)| (label.to_string(), n))
                .collect(),
        }
    }
}

/// Timestamp consistency counters; all zero for a valid population
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConsistencyCheck {
    pub negative_durations: usize,
    pub begin_before_request: usize,
    pub end_before_begin: usize,
}

impl ConsistencyCheck {
    pub fn is_consistent(&self) -> bool {
        self.negative_durations == 0 && self.begin_before_request == 0 && self.end_before_begin == 0
    }
}

/// Summary of a generated population
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationSummary {
    pub total_records: usize,
    pub pre_cutover_records: usize,
    pub post_cutover_records: usize,
    pub records_by_schedule: BTreeMap<ScheduleClass, usize>,
    pub scheduler_durations: DurationBuckets,
    pub other_durations: DurationBuckets,
    pub consistency: ConsistencyCheck,
}

impl PopulationSummary {
    /// Summarize `population`, looking up schedules in `catalog`
    pub fn from_population(population: &Population, catalog: &JobCatalog) -> Result<Self> {
        let records = &population.records;

        let mut records_by_schedule = BTreeMap::new();
        let mut consistency = ConsistencyCheck::default();
        for record in records {
            let job = catalog
                .get(&record.job_name)
                .ok_or_else(|| DriftError::UnknownJob(record.job_name.clone()))?;
            *records_by_schedule.entry(job.schedule).or_insert(0) += 1;

            if record.duration_seconds() < 0 {
                consistency.negative_durations += 1;
            }
            if record.begin_time < record.request_time {
                consistency.begin_before_request += 1;
            }
            if record.end_time < record.begin_time {
                consistency.end_before_begin += 1;
            }
        }

        Ok(Self {
            total_records: records.len(),
            pre_cutover_records: population.split.pre,
            post_cutover_records: population.split.post,
            records_by_schedule,
            scheduler_durations: DurationBuckets::from_records(
                records.iter().filter(|r| r.is_scheduler_submission()),
            ),
            other_durations: DurationBuckets::from_records(
                records.iter().filter(|r| !r.is_scheduler_submission()),
            ),
            consistency,
        })
    }

    fn percent(part: usize, whole: usize) -> f64 {
        if whole == 0 {
            0.0
        } else {
            part as f64 * 100.0 / whole as f64
        }
    }

    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        report.push_str(&format!("Total runs: {}\n", self.total_records));
        report.push_str(&format!(
            "Runs before cutover: {} ({:.2}%)\n",
            self.pre_cutover_records,
            Self::percent(self.pre_cutover_records, self.total_records)
        ));
        report.push_str(&format!(
            "Runs after cutover: {} ({:.2}%)\n",
            self.post_cutover_records,
            Self::percent(self.post_cutover_records, self.total_records)
        ));

        for (title, buckets) in [
            ("scheduler", &self.scheduler_durations),
            ("non-scheduler", &self.other_durations),
        ] {
            report.push_str(&format!("\nDuration distribution for {} runs:\n", title));
            for (label, count) in &buckets.counts {
                report.push_str(&format!(
                    "  {}: {} ({:.2}%)\n",
                    label,
                    count,
                    Self::percent(*count, buckets.total)
                ));
            }
        }

        report.push_str("\nRuns per schedule class:\n");
        for (schedule, count) in &self.records_by_schedule {
            report.push_str(&format!(
                "  {}: {} ({:.2}%)\n",
                schedule.as_str(),
                count,
                Self::percent(*count, self.total_records)
            ));
        }

        report.push_str("\nTimestamp consistency:\n");
        report.push_str(&format!(
            "  Negative durations: {}\n",
            self.consistency.negative_durations
        ));
        report.push_str(&format!(
            "  Begin time before request time: {}\n",
            self.consistency.begin_before_request
        ));
        report.push_str(&format!(
            "  End time before begin time: {}\n",
            self.consistency.end_before_begin
        ));

        report
    }
}
