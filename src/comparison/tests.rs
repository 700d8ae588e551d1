// Scenario tests for the aggregation and comparison stages
//
// Fixtures are hand-built weekly series with known quartiles, so expected
// IQRs can be checked exactly.

use super::*;
use crate::record::fixtures::{at, record};
use chrono::{Duration, NaiveDate};

fn monday(n: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::weeks(n)
}

fn series(job: &str, pre: &[f64], post: &[f64]) -> Vec<WeeklyAggregate> {
    let pre_rows = pre.iter().enumerate().map(|(i, &m)| WeeklyAggregate {
        job_name: job.to_string(),
        week_start: monday(i as i64),
        mean_duration_minutes: m,
        is_post_cutover: false,
        run_count: 1,
    });
    let post_rows = post.iter().enumerate().map(|(i, &m)| WeeklyAggregate {
        job_name: job.to_string(),
        week_start: monday(40 + i as i64),
        mean_duration_minutes: m,
        is_post_cutover: true,
        run_count: 1,
    });
    pre_rows.chain(post_rows).collect()
}

/// Two jobs: A tightens after the cutover, B is unchanged
#[test]
fn test_two_job_scenario() {
    let mut weekly = series("A", &[10.0, 12.0, 14.0], &[5.0, 6.0, 7.0]);
    weekly.extend(series("B", &[30.0, 40.0], &[30.0, 40.0]));

    let table = IqrComparator::new().compare(&weekly);
    assert_eq!(table.rows.len(), 2);

    let a = &table.rows[0];
    assert_eq!(a.job_name, "A");
    assert_eq!(a.iqr_pre_minutes, 2.0);
    assert_eq!(a.iqr_post_minutes, 1.0);
    assert_eq!(a.difference_minutes, -1.0);
    assert_eq!(a.improvement_percent, Some(50.0));
    assert_eq!(a.classification, Classification::Improvement);

    let b = &table.rows[1];
    assert_eq!(b.job_name, "B");
    assert_eq!(b.difference_minutes, 0.0);
    assert_eq!(b.improvement_percent, Some(0.0));
    assert_eq!(b.classification, Classification::NoChange);
}

#[test]
fn test_sort_puts_most_negative_difference_first() {
    let mut weekly = series("SMALL_GAIN", &[1.0, 3.0], &[1.0, 2.0]);
    weekly.extend(series("WORSE", &[1.0, 2.0], &[1.0, 9.0]));
    weekly.extend(series("BIG_GAIN", &[1.0, 21.0], &[1.0, 2.0]));

    let table = IqrComparator::new().compare(&weekly);
    let names: Vec<_> = table.rows.iter().map(|r| r.job_name.as_str()).collect();
    assert_eq!(names, vec!["BIG_GAIN", "SMALL_GAIN", "WORSE"]);

    let diffs: Vec<_> = table.rows.iter().map(|r| r.difference_minutes).collect();
    assert!(diffs.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_job_missing_post_weeks_excluded() {
    let mut weekly = series("BOTH", &[1.0, 2.0], &[1.0, 2.0]);
    weekly.extend(series("PRE_ONLY", &[5.0, 6.0, 7.0], &[]));

    let table = IqrComparator::new().compare(&weekly);
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].job_name, "BOTH");
    assert!(table.get("PRE_ONLY").is_none());
    assert_eq!(table.excluded_jobs, vec!["PRE_ONLY"]);
}

#[test]
fn test_comparison_is_idempotent() {
    let mut weekly = series("A", &[10.0, 12.0, 14.0], &[5.0, 6.0, 7.0]);
    weekly.extend(series("B", &[30.0, 40.0], &[30.0, 40.0]));
    weekly.extend(series("C", &[3.0, 1.0, 4.0, 1.0, 5.0], &[9.0, 2.0, 6.0]));

    let comparator = IqrComparator::new();
    assert_eq!(comparator.compare(&weekly), comparator.compare(&weekly));

    // Input order does not matter either
    let mut reversed = weekly.clone();
    reversed.reverse();
    assert_eq!(comparator.compare(&weekly), comparator.compare(&reversed));
}

#[test]
fn test_analyze_is_idempotent_over_records() {
    let cutover = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
    let records = vec![
        record("A", at(2024, 5, 6, 9, 0, 0), 600),
        record("A", at(2024, 5, 7, 9, 0, 0), 660),
        record("A", at(2024, 5, 13, 9, 0, 0), 1200),
        record("A", at(2024, 5, 20, 9, 0, 0), 300),
        record("A", at(2024, 5, 27, 9, 0, 0), 360),
    ];

    let first = analyze(&records, cutover, IntegrityPolicy::Abort).unwrap();
    let second = analyze(&records, cutover, IntegrityPolicy::Abort).unwrap();
    assert_eq!(first.weekly.aggregates, second.weekly.aggregates);
    assert_eq!(first.comparison, second.comparison);

    // Pre weeks: 10.5, 20.0 min; post weeks: 5.0, 6.0 min
    let row = first.comparison.get("A").unwrap();
    assert_eq!(row.pre_weeks, 2);
    assert_eq!(row.post_weeks, 2);
    assert!((row.iqr_pre_minutes - 4.75).abs() < 1e-9);
    assert!((row.iqr_post_minutes - 0.5).abs() < 1e-9);
    assert_eq!(row.classification, Classification::Improvement);
}

#[test]
fn test_analyze_aborts_on_bad_record() {
    let cutover = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
    let mut bad = record("A", at(2024, 5, 6, 9, 0, 0), 600);
    bad.request_time = at(2024, 5, 6, 10, 0, 0);

    let err = analyze(&[bad.clone()], cutover, IntegrityPolicy::Abort).unwrap_err();
    assert!(err.is_integrity_error());

    let lenient = analyze(&[bad], cutover, IntegrityPolicy::Reject).unwrap();
    assert_eq!(lenient.weekly.rejected.len(), 1);
    assert!(lenient.weekly.aggregates.is_empty());
}
