//! Error types for workload generation and drift analysis

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Which causal ordering a run record broke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CausalityBreach {
    /// `begin_time` precedes `request_time`
    BeginBeforeRequest,
    /// `end_time` precedes `begin_time`
    EndBeforeBegin,
}

impl std::fmt::Display for CausalityBreach {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CausalityBreach::BeginBeforeRequest => write!(f, "begin time precedes request time"),
            CausalityBreach::EndBeforeBegin => write!(f, "end time precedes begin time"),
        }
    }
}

/// Errors raised by configuration, generation and aggregation
#[derive(Error, Debug)]
pub enum DriftError {
    #[error("Invalid date order: start {start} < cutover {cutover} < end {end} must hold")]
    InvalidDateOrder {
        start: NaiveDate,
        cutover: NaiveDate,
        end: NaiveDate,
    },

    #[error("Population size must be positive")]
    EmptyPopulation,

    #[error("Job universe is empty: job_count must be positive")]
    EmptyJobUniverse,

    #[error("Invalid categorical weights for {table}: {reason}")]
    InvalidWeights { table: &'static str, reason: String },

    #[error("Record {index} for job '{job_name}' violates causality: {breach} (request={request_time}, begin={begin_time}, end={end_time})")]
    CausalityViolation {
        index: usize,
        job_name: String,
        breach: CausalityBreach,
        request_time: NaiveDateTime,
        begin_time: NaiveDateTime,
        end_time: NaiveDateTime,
    },

    #[error("Record {index} is missing required timestamp '{field}'")]
    MissingTimestamp { index: usize, field: &'static str },

    #[error("Unknown job '{0}'")]
    UnknownJob(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(String),

    #[error("Failed to parse run records: {0}")]
    RecordParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DriftError {
    /// True for errors that make a record unusable for analytics
    pub fn is_integrity_error(&self) -> bool {
        matches!(
            self,
            DriftError::CausalityViolation { .. } | DriftError::MissingTimestamp { .. }
        )
    }

    /// True for errors that reject the run before any generation starts
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            DriftError::InvalidDateOrder { .. }
                | DriftError::EmptyPopulation
                | DriftError::EmptyJobUniverse
                | DriftError::InvalidWeights { .. }
                | DriftError::ConfigParse(_)
        )
    }
}

/// Result type for jobdrift operations
pub type Result<T> = std::result::Result<T, DriftError>;
