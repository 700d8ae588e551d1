//! Job-run records
//!
//! One record per execution. Generated records satisfy the causal ordering
//! `request <= begin <= end` by construction; externally sourced ones are
//! checked with [`JobRunRecord::check_causality`].

use crate::error::{CausalityBreach, DriftError, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Reserved submitter identity for automated submissions
pub const SCHEDULER_ACTOR: &str = "scheduler";

/// Submitters drawn by the generator; the scheduler is one of them
pub const SUBMITTERS: [&str; 6] = [
    "mcurtis",
    "jdoe",
    "asmith",
    "bjohnson",
    "ewilliams",
    SCHEDULER_ACTOR,
];

/// Run control ids attached to generated records
pub const CONTROL_IDS: [&str; 2] = ["EXTERNAL_PAYMENTS", "INTERNAL_PAYMENTS"];

/// Outcome of a run; never affects its duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Success,
    Error,
}

impl RunStatus {
    pub const WEIGHTS: [(RunStatus, f64); 2] = [(RunStatus::Success, 0.9), (RunStatus::Error, 0.1)];
}

/// A single job execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRunRecord {
    pub job_name: String,
    pub request_time: NaiveDateTime,
    pub begin_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub submitter: String,
    pub status: RunStatus,
    pub run_instance_id: u32,
    pub control_id: String,
}

impl JobRunRecord {
    /// Run time in whole seconds (`end_time - begin_time`)
    pub fn duration_seconds(&self) -> i64 {
        (self.end_time - self.begin_time).num_seconds()
    }

    /// Run time in fractional minutes
    pub fn duration_minutes(&self) -> f64 {
        (self.end_time - self.begin_time).num_milliseconds() as f64 / 60_000.0
    }

    /// Queue wait between request and begin, in seconds
    pub fn begin_delay_seconds(&self) -> i64 {
        (self.begin_time - self.request_time).num_seconds()
    }

    pub fn is_scheduler_submission(&self) -> bool {
        self.submitter == SCHEDULER_ACTOR
    }

    /// Verify `request_time <= begin_time <= end_time`
    ///
    /// `index` is the record's position in its population and is carried into
    /// the error for reporting.
    pub fn check_causality(&self, index: usize) -> Result<()> {
        let breach = if self.begin_time < self.request_time {
            Some(CausalityBreach::BeginBeforeRequest)
        } else if self.end_time < self.begin_time {
            Some(CausalityBreach::EndBeforeBegin)
        } else {
            None
        };

        match breach {
            None => Ok(()),
            Some(breach) => Err(DriftError::CausalityViolation {
                index,
                job_name: self.job_name.clone(),
                breach,
                request_time: self.request_time,
                begin_time: self.begin_time,
                end_time: self.end_time,
            }),
        }
    }
}
