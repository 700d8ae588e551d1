//! Plain-text comparison report

use crate::comparison::{ComparisonTable, WeeklyAggregate};

/// Render the ranked table with a classification tally
pub fn comparison_report(table: &ComparisonTable, limit: Option<usize>) -> String {
    let mut report = String::new();
    let tally = table.tally();

    report.push_str(&format!(
        "IQR of weekly job durations, pre vs. post cutover ({} jobs)\n",
        table.rows.len()
    ));
    report.push_str(&format!(
        "Improvement: {}  Regression: {}  No Change: {}\n\n",
        tally.improvement, tally.regression, tally.no_change
    ));

    report.push_str(&format!(
        "{:<24} {:>12} {:>12} {:>12} {:>14}  {}\n",
        "job", "iqr_pre_min", "iqr_post_min", "diff_min", "improvement_%", "change"
    ));

    let shown = limit.unwrap_or(table.rows.len());
    for row in table.rows.iter().take(shown) {
        let percent = row
            .improvement_percent
            .map(|p| format!("{:.2}", p))
            .unwrap_or_else(|| "n/a".to_string());
        report.push_str(&format!(
            "{:<24} {:>12.3} {:>12.3} {:>12.3} {:>14}  {}\n",
            row.job_name,
            row.iqr_pre_minutes,
            row.iqr_post_minutes,
            row.difference_minutes,
            percent,
            row.classification.label()
        ));
    }

    if shown < table.rows.len() {
        report.push_str(&format!("... {} more\n", table.rows.len() - shown));
    }

    if !table.excluded_jobs.is_empty() {
        report.push_str(&format!(
            "\nExcluded (no weeks on one side of the cutover): {}\n",
            table.excluded_jobs.join(", ")
        ));
    }

    report
}

/// Render the weekly series, one line per (job, week)
pub fn weekly_report(weekly: &[WeeklyAggregate]) -> String {
    let mut report = String::from("Weekly mean durations\n");
    for week in weekly {
        report.push_str(&format!(
            "{:<24} {}  {:>10.3} min  {:>6} runs  {}\n",
            week.job_name,
            week.week_start,
            week.mean_duration_minutes,
            week.run_count,
            if week.is_post_cutover { "post" } else { "pre" }
        ));
    }
    report
}
