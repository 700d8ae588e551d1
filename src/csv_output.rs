//! CSV output format for drift comparisons
//!
//! One table per call: the ranked comparison rows or the weekly series.

use crate::comparison::{ComparisonRow, WeeklyAggregate};

/// Escape CSV field (handle commas, quotes, newlines)
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// CSV formatter for the comparison table
#[derive(Debug, Default)]
pub struct CsvComparisonOutput {
    rows: Vec<ComparisonRow>,
}

impl CsvComparisonOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, row: ComparisonRow) {
        self.rows.push(row);
    }

    fn header() -> &'static str {
        "job_name,iqr_pre_minutes,iqr_post_minutes,difference_minutes,improvement_percent,classification"
    }

    fn format_row(row: &ComparisonRow) -> String {
        // Undefined percentages are left empty
        let percent = row
            .improvement_percent
            .map(|p| format!("{:.4}", p))
            .unwrap_or_default();

        [
            escape_field(&row.job_name),
            format!("{:.4}", row.iqr_pre_minutes),
            format!("{:.4}", row.iqr_post_minutes),
            format!("{:.4}", row.difference_minutes),
            percent,
            row.classification.label().to_string(),
        ]
        .join(",")
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str(Self::header());
        output.push('\n');

        for row in &self.rows {
            output.push_str(&Self::format_row(row));
            output.push('\n');
        }

        output
    }
}

/// CSV formatter for the weekly series
#[derive(Debug, Default)]
pub struct CsvWeeklyOutput {
    weeks: Vec<WeeklyAggregate>,
}

impl CsvWeeklyOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_week(&mut self, week: WeeklyAggregate) {
        self.weeks.push(week);
    }

    pub fn to_csv(&self) -> String {
        let mut output =
            String::from("job_name,week_start,mean_duration_minutes,is_post_cutover,run_count\n");

        for week in &self.weeks {
            output.push_str(&format!(
                "{},{},{:.4},{},{}\n",
                escape_field(&week.job_name),
                week.week_start,
                week.mean_duration_minutes,
                week.is_post_cutover,
                week.run_count
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::Classification;
    use chrono::NaiveDate;

    fn row(name: &str, percent: Option<f64>) -> ComparisonRow {
        ComparisonRow {
            job_name: name.to_string(),
            iqr_pre_minutes: 2.0,
            iqr_post_minutes: 1.0,
            difference_minutes: -1.0,
            improvement_percent: percent,
            classification: Classification::Improvement,
            pre_weeks: 3,
            post_weeks: 3,
        }
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("simple"), "simple");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_comparison_csv() {
        let mut output = CsvComparisonOutput::new();
        output.add_row(row("JOB_1", Some(50.0)));
        output.add_row(row("JOB,2", None));

        let csv = output.to_csv();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("job_name,iqr_pre_minutes"));
        assert_eq!(lines[1], "JOB_1,2.0000,1.0000,-1.0000,50.0000,Improvement");
        assert_eq!(lines[2], "\"JOB,2\",2.0000,1.0000,-1.0000,,Improvement");
    }

    #[test]
    fn test_weekly_csv() {
        let mut output = CsvWeeklyOutput::new();
        output.add_week(WeeklyAggregate {
            job_name: "JOB_1".to_string(),
            week_start: NaiveDate::from_ymd_opt(2024, 5, 13).unwrap(),
            mean_duration_minutes: 1.5,
            is_post_cutover: false,
            run_count: 4,
        });
        let csv = output.to_csv();
        assert!(csv.contains("JOB_1,2024-05-13,1.5000,false,4"));
    }
}
