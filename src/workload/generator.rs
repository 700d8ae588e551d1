// Synthetic job-run record generation
//
// Records are drawn from one sequential random stream: all pre-cutover draws
// first, then all post-cutover draws. Per draw the order is job, request
// offset, submitter, duration, begin delay, status, run instance, control id.

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::job::{JobMetadata, ScheduleGrid};
use crate::record::{JobRunRecord, RunStatus, CONTROL_IDS, SCHEDULER_ACTOR, SUBMITTERS};
use crate::workload::duration::DurationSampler;
use crate::workload::labels::{Categorical, JobCatalog, LabelAssigner};
use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Timelike};
use rand::seq::SliceRandom;
use rand::Rng;

const SECONDS_PER_DAY: i64 = 86_400;

/// Inclusive bounds of the queue wait between request and begin
pub const BEGIN_DELAY_SECS: (i64, i64) = (1, 300);

/// How a population is divided between the two windows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulationSplit {
    pub pre: usize,
    pub post: usize,
}

impl PopulationSplit {
    /// `pre = round(total * pre_days / total_days)`, remainder to post
    pub fn for_config(config: &SimulationConfig) -> Self {
        let total = config.population_size;
        let ratio = config.pre_days() as f64 / config.total_days() as f64;
        let pre = ((total as f64 * ratio).round() as usize).min(total);
        Self {
            pre,
            post: total - pre,
        }
    }

    pub fn total(&self) -> usize {
        self.pre + self.post
    }
}

/// A generated population and its split
#[derive(Debug, Clone)]
pub struct Population {
    pub records: Vec<JobRunRecord>,
    pub split: PopulationSplit,
}

impl Population {
    pub fn pre_cutover_records(&self) -> &[JobRunRecord] {
        &self.records[..self.split.pre]
    }

    pub fn post_cutover_records(&self) -> &[JobRunRecord] {
        &self.records[self.split.pre..]
    }
}

/// One side of the cutover
#[derive(Debug, Clone, Copy)]
struct Window {
    start: NaiveDateTime,
    days: i64,
    is_post_cutover: bool,
}

/// Floor `ts` onto a schedule grid
pub fn align_to_grid(ts: NaiveDateTime, grid: ScheduleGrid) -> NaiveDateTime {
    let midnight = ts.date().and_time(NaiveTime::MIN);
    match grid {
        ScheduleGrid::Interval(step) => {
            let secs = ts.time().num_seconds_from_midnight();
            midnight + Duration::seconds(i64::from(secs - secs % step))
        }
        ScheduleGrid::Day => midnight,
        ScheduleGrid::Month => ts
            .date()
            .with_day(1)
            .map_or(midnight, |first| first.and_time(NaiveTime::MIN)),
    }
}

/// Whether `ts` already lies on `grid`
pub fn is_on_grid(ts: NaiveDateTime, grid: ScheduleGrid) -> bool {
    align_to_grid(ts, grid) == ts
}

/// Composes job-run records for a labelled catalog
#[derive(Debug, Clone)]
pub struct RecordGenerator {
    config: SimulationConfig,
    catalog: JobCatalog,
    durations: DurationSampler,
    statuses: Categorical<RunStatus>,
}

impl RecordGenerator {
    /// Validate `config` and label a fresh `JOB_1..=JOB_n` catalog from `rng`
    pub fn new<R: Rng + ?Sized>(config: SimulationConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let catalog = LabelAssigner::new()?.assign(&config.job_names(), rng);
        tracing::debug!(jobs = catalog.len(), "labelled job catalog");
        Self::with_catalog(config, catalog)
    }

    /// Use a prepared catalog instead of sampling labels
    pub fn with_catalog(config: SimulationConfig, catalog: JobCatalog) -> Result<Self> {
        config.validate()?;
        if catalog.is_empty() {
            return Err(crate::error::DriftError::EmptyJobUniverse);
        }

        Ok(Self {
            config,
            catalog,
            durations: DurationSampler::new(),
            statuses: Categorical::new("status", &RunStatus::WEIGHTS)?,
        })
    }

    pub fn catalog(&self) -> &JobCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn split(&self) -> PopulationSplit {
        PopulationSplit::for_config(&self.config)
    }

    /// Cutover instant (midnight of the cutover date)
    pub fn cutover(&self) -> NaiveDateTime {
        self.config.cutover_date.and_time(NaiveTime::MIN)
    }

    /// Generate the whole population
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Population {
        let split = self.split();
        tracing::info!(
            total = split.total(),
            pre = split.pre,
            post = split.post,
            pre_days = self.config.pre_days(),
            post_days = self.config.post_days(),
            "generating run records"
        );

        let pre = Window {
            start: self.config.start_date.and_time(NaiveTime::MIN),
            days: self.config.pre_days(),
            is_post_cutover: false,
        };
        let post = Window {
            start: self.cutover(),
            days: self.config.post_days(),
            is_post_cutover: true,
        };

        let mut records = Vec::with_capacity(split.total());
        for (window, count) in [(pre, split.pre), (post, split.post)] {
            for _ in 0..count {
                records.push(self.generate_one(window, rng));
            }
        }

        Population { records, split }
    }

    fn generate_one<R: Rng + ?Sized>(&self, window: Window, rng: &mut R) -> JobRunRecord {
        let jobs = self.catalog.jobs();
        let job: &JobMetadata = &jobs[rng.gen_range(0..jobs.len())];

        let offset = rng.gen_range(0..window.days * SECONDS_PER_DAY);
        let mut request_time = window.start + Duration::seconds(offset);

        let submitter = SUBMITTERS.choose(rng).copied().unwrap_or(SCHEDULER_ACTOR);
        if submitter == SCHEDULER_ACTOR {
            if let Some(grid) = job.schedule.grid() {
                request_time = align_to_grid(request_time, grid);
            }
        }

        let duration = self.durations.sample(
            rng,
            job.category,
            window.is_post_cutover,
            job.impact,
            job.schedule,
        );

        let delay = rng.gen_range(BEGIN_DELAY_SECS.0..=BEGIN_DELAY_SECS.1);
        let begin_time = request_time + Duration::seconds(delay);
        let end_time = begin_time + Duration::seconds(duration);

        let status = self.statuses.sample(rng);
        let run_instance_id = rng.gen_range(100_000..999_999);
        let control_id = CONTROL_IDS.choose(rng).copied().unwrap_or(CONTROL_IDS[0]);

        JobRunRecord {
            job_name: job.name.clone(),
            request_time,
            begin_time,
            end_time,
            submitter: submitter.to_string(),
            status,
            run_instance_id,
            control_id: control_id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::fixtures::at;

    #[test]
    fn test_align_fifteen_minutes() {
        let ts = at(2024, 2, 10, 13, 44, 59);
        assert_eq!(
            align_to_grid(ts, ScheduleGrid::Interval(900)),
            at(2024, 2, 10, 13, 30, 0)
        );
    }

    #[test]
    fn test_align_already_on_grid() {
        let ts = at(2024, 2, 10, 13, 45, 0);
        assert!(is_on_grid(ts, ScheduleGrid::Interval(900)));
        assert!(!is_on_grid(ts, ScheduleGrid::Day));
    }

    #[test]
    fn test_align_day_and_month() {
        let ts = at(2024, 2, 29, 23, 59, 59);
        assert_eq!(align_to_grid(ts, ScheduleGrid::Day), at(2024, 2, 29, 0, 0, 0));
        assert_eq!(align_to_grid(ts, ScheduleGrid::Month), at(2024, 2, 1, 0, 0, 0));
    }

    #[test]
    fn test_split_uses_rounding() {
        let config = SimulationConfig::default();
        // 1_000_000 * 261 / 295 = 884745.76...
        let split = PopulationSplit::for_config(&config);
        assert_eq!(split.pre, 884_746);
        assert_eq!(split.post, 115_254);
        assert_eq!(split.total(), config.population_size);
    }

    #[test]
    fn test_split_small_population() {
        let config = SimulationConfig {
            population_size: 1,
            ..SimulationConfig::default()
        };
        let split = PopulationSplit::for_config(&config);
        assert_eq!(split, PopulationSplit { pre: 1, post: 0 });
    }
}
