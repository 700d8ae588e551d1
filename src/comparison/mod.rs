// Weekly aggregation and IQR drift comparison
//
// Turns a population of run records into a ranked per-job table of how the
// spread of weekly mean durations changed across the cutover. The IQR is used
// instead of variance so a single anomalous week does not dominate a job's
// verdict.
//
// Pipeline:
//   records -> Aggregator (weekly means) -> IqrComparator (ranked rows)
//
// Both stages are pure functions of their input.

mod iqr;
mod quartile;
mod weekly;

pub use iqr::{Classification, ClassificationTally, ComparisonRow, ComparisonTable, IqrComparator};
pub use quartile::{quantile_sorted, Quartiles};
pub use weekly::{week_start, AggregationOutcome, Aggregator, IntegrityPolicy, WeeklyAggregate};

use crate::error::Result;
use crate::record::JobRunRecord;
use chrono::NaiveDate;

/// Full analytics pass over a population
#[derive(Debug)]
pub struct DriftAnalysis {
    pub weekly: AggregationOutcome,
    pub comparison: ComparisonTable,
}

/// Aggregate `records` by week and compare spreads across `cutover`
///
/// # Example
/// ```
/// use jobdrift::comparison::{analyze, IntegrityPolicy};
/// use chrono::NaiveDate;
///
/// let cutover = NaiveDate::from_ymd_opt(2024, 5, 19).unwrap();
/// let analysis = analyze(&[], cutover, IntegrityPolicy::Abort).unwrap();
/// assert!(analysis.comparison.rows.is_empty());
/// ```
pub fn analyze(
    records: &[JobRunRecord],
    cutover: NaiveDate,
    policy: IntegrityPolicy,
) -> Result<DriftAnalysis> {
    let weekly = Aggregator::new(cutover)
        .with_policy(policy)
        .aggregate(records)?;
    let comparison = IqrComparator::new().compare(&weekly.aggregates);
    Ok(DriftAnalysis { weekly, comparison })
}

#[cfg(test)]
mod tests;
